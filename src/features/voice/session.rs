//! Cancellable listen → echo loop
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.0.0: Replaces the unbounded blocking microphone loop with a stoppable task

use anyhow::Result;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::recognizer::SpeechRecognizer;
use super::synthesizer::SpeechSynthesizer;

/// Said back when audio was captured but no words were recognised
pub const NOT_UNDERSTOOD: &str = "Sorry, I didn't understand that.";

/// Capacity of the recognised-utterance channel handed to consumers
pub const UTTERANCE_BUFFER: usize = 16;

const DEFAULT_ERROR_PAUSE: Duration = Duration::from_secs(1);

pub struct VoiceSession {
    recognizer: Arc<dyn SpeechRecognizer>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    skip_first: bool,
    error_pause: Duration,
}

/// Control handle for a running session
pub struct VoiceHandle {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<usize>,
}

impl VoiceHandle {
    /// Ask the loop to stop and wait for it; returns how many utterances were heard
    pub async fn stop(self) -> Result<usize> {
        let _ = self.stop_tx.send(true);
        Ok(self.task.await?)
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl VoiceSession {
    pub fn new(
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        VoiceSession {
            recognizer,
            synthesizer,
            skip_first: true,
            error_pause: DEFAULT_ERROR_PAUSE,
        }
    }

    /// Whether the first heard utterance is printed but not spoken
    pub fn skip_first(mut self, skip: bool) -> Self {
        self.skip_first = skip;
        self
    }

    /// Pause after a recogniser failure before listening again
    pub fn error_pause(mut self, pause: Duration) -> Self {
        self.error_pause = pause;
        self
    }

    /// Spawn the loop; recognised utterances are also forwarded on the returned channel
    pub fn start(self) -> (VoiceHandle, mpsc::Receiver<String>) {
        let (stop_tx, stop_rx) = watch::channel(false);
        let (utterance_tx, utterance_rx) = mpsc::channel(UTTERANCE_BUFFER);

        let task = tokio::spawn(self.run(stop_rx, utterance_tx));
        (VoiceHandle { stop_tx, task }, utterance_rx)
    }

    async fn run(self, mut stop_rx: watch::Receiver<bool>, utterance_tx: mpsc::Sender<String>) -> usize {
        let mut heard = 0usize;
        let mut spoke_once = false;
        info!("🎙️ Voice loop started");

        loop {
            if *stop_rx.borrow() {
                break;
            }

            let result = tokio::select! {
                changed = stop_rx.changed() => {
                    // Sender dropped counts as a stop request
                    if changed.is_err() || *stop_rx.borrow() {
                        break;
                    }
                    continue;
                }
                result = self.recognizer.listen() => result,
            };

            let text = match result {
                Ok(Some(text)) => text,
                Ok(None) => NOT_UNDERSTOOD.to_string(),
                Err(e) => {
                    warn!("Speech recognition failed: {e}");
                    if !self.error_pause.is_zero() {
                        tokio::select! {
                            _ = stop_rx.changed() => {}
                            _ = tokio::time::sleep(self.error_pause) => {}
                        }
                    }
                    continue;
                }
            };

            heard += 1;
            println!("You said: {text}");
            info!("🗣️ Heard utterance #{heard} ({} chars)", text.len());

            if let Err(mpsc::error::TrySendError::Full(_)) = utterance_tx.try_send(text.clone()) {
                warn!("Utterance buffer full, dropping newest utterance");
            }

            if self.skip_first && !spoke_once {
                spoke_once = true;
                println!("Skipped speaking: {text}");
                debug!("First utterance not spoken");
                continue;
            }
            spoke_once = true;

            if let Err(e) = self.synthesizer.speak(&text).await {
                error!("Speech synthesis failed: {e}");
            }
        }

        info!("🛑 Voice loop stopped after {heard} utterances");
        heard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays a fixed script, then waits forever like an idle microphone
    struct ScriptedRecognizer {
        script: Mutex<VecDeque<Result<Option<String>>>>,
    }

    impl ScriptedRecognizer {
        fn new(script: Vec<Result<Option<String>>>) -> Self {
            ScriptedRecognizer {
                script: Mutex::new(script.into()),
            }
        }
    }

    #[async_trait]
    impl SpeechRecognizer for ScriptedRecognizer {
        async fn listen(&self) -> Result<Option<String>> {
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some(result) => result,
                None => std::future::pending().await,
            }
        }
    }

    #[derive(Default)]
    struct RecordingSynthesizer {
        spoken: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SpeechSynthesizer for RecordingSynthesizer {
        async fn speak(&self, text: &str) -> Result<()> {
            self.spoken.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    async fn collect(rx: &mut mpsc::Receiver<String>, n: usize) -> Vec<String> {
        let mut out = Vec::new();
        for _ in 0..n {
            out.push(rx.recv().await.unwrap());
        }
        out
    }

    #[tokio::test]
    async fn test_echoes_and_skips_first() {
        let recognizer = Arc::new(ScriptedRecognizer::new(vec![
            Ok(Some("hello".to_string())),
            Ok(Some("what time is it".to_string())),
            Ok(None),
        ]));
        let synth = Arc::new(RecordingSynthesizer::default());

        let (handle, mut rx) = VoiceSession::new(recognizer, synth.clone()).start();
        let heard = collect(&mut rx, 3).await;
        let count = handle.stop().await.unwrap();

        assert_eq!(heard, vec!["hello", "what time is it", NOT_UNDERSTOOD]);
        assert_eq!(count, 3);
        assert_eq!(
            *synth.spoken.lock().unwrap(),
            vec!["what time is it".to_string(), NOT_UNDERSTOOD.to_string()]
        );
    }

    #[tokio::test]
    async fn test_speaks_everything_when_not_skipping() {
        let recognizer = Arc::new(ScriptedRecognizer::new(vec![Ok(Some("hi".to_string()))]));
        let synth = Arc::new(RecordingSynthesizer::default());

        let (handle, mut rx) = VoiceSession::new(recognizer, synth.clone())
            .skip_first(false)
            .start();
        collect(&mut rx, 1).await;
        handle.stop().await.unwrap();

        assert_eq!(*synth.spoken.lock().unwrap(), vec!["hi".to_string()]);
    }

    #[tokio::test]
    async fn test_recognition_errors_do_not_end_loop() {
        let recognizer = Arc::new(ScriptedRecognizer::new(vec![
            Err(anyhow::anyhow!("mic unplugged")),
            Ok(Some("still here".to_string())),
        ]));
        let synth = Arc::new(RecordingSynthesizer::default());

        let (handle, mut rx) = VoiceSession::new(recognizer, synth)
            .error_pause(Duration::ZERO)
            .start();
        assert_eq!(collect(&mut rx, 1).await, vec!["still here"]);
        assert_eq!(handle.stop().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_stop_interrupts_idle_listen() {
        let recognizer = Arc::new(ScriptedRecognizer::new(Vec::new()));
        let synth = Arc::new(RecordingSynthesizer::default());

        let (handle, _rx) = VoiceSession::new(recognizer, synth).start();
        let count = tokio::time::timeout(Duration::from_secs(5), handle.stop())
            .await
            .expect("stop should not hang")
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_full_buffer_drops_without_blocking() {
        let script = (0..UTTERANCE_BUFFER + 4)
            .map(|i| Ok(Some(format!("u{i}"))))
            .collect();
        let recognizer = Arc::new(ScriptedRecognizer::new(script));
        let synth = Arc::new(RecordingSynthesizer::default());

        let (handle, mut rx) = VoiceSession::new(recognizer, synth.clone())
            .skip_first(false)
            .start();

        // Wait until every scripted utterance has been spoken
        for _ in 0..500 {
            if synth.spoken.lock().unwrap().len() == UTTERANCE_BUFFER + 4 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        let count = handle.stop().await.unwrap();
        assert_eq!(count, UTTERANCE_BUFFER + 4);

        let mut buffered = 0;
        while rx.try_recv().is_ok() {
            buffered += 1;
        }
        assert_eq!(buffered, UTTERANCE_BUFFER);
    }

    /// Process state letter from `/proc/<pid>/stat`, `None` once the pid is gone
    #[cfg(target_os = "linux")]
    fn process_state(pid: &str) -> Option<char> {
        let stat = std::fs::read_to_string(format!("/proc/{pid}/stat")).ok()?;
        stat.rsplit_once(')')?.1.trim_start().chars().next()
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_stop_during_recording_kills_recorder_and_removes_clip() {
        use crate::features::voice::CommandRecognizer;

        let dir = std::env::temp_dir().join(format!("vox_stop_{}", uuid::Uuid::new_v4().simple()));
        std::fs::create_dir_all(&dir).unwrap();
        let pid_file = dir.join("pid");
        let clip_file = dir.join("clip");
        let script = dir.join("record.sh");
        std::fs::write(
            &script,
            format!(
                "echo \"$1\" > {clip}\ntouch \"$1\"\necho $$ > {pid}\nexec sleep 30\n",
                clip = clip_file.display(),
                pid = pid_file.display(),
            ),
        )
        .unwrap();

        let recognizer = Arc::new(CommandRecognizer::new(
            &format!("sh {} {{output}}", script.display()),
            "http://127.0.0.1:1/",
            "k",
            "m",
        ));
        let synth = Arc::new(RecordingSynthesizer::default());
        let (handle, _rx) = VoiceSession::new(recognizer, synth).start();

        let mut pid = String::new();
        for _ in 0..400 {
            if let Ok(contents) = std::fs::read_to_string(&pid_file) {
                if !contents.trim().is_empty() {
                    pid = contents.trim().to_string();
                    break;
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(!pid.is_empty(), "recorder never started");
        let clip = std::fs::read_to_string(&clip_file).unwrap().trim().to_string();
        assert!(std::path::Path::new(&clip).exists());

        let count = tokio::time::timeout(Duration::from_secs(5), handle.stop())
            .await
            .expect("stop should not hang")
            .unwrap();
        assert_eq!(count, 0);

        // The killed child may linger as a zombie until reaped
        let mut exited = false;
        for _ in 0..200 {
            if matches!(process_state(&pid), None | Some('Z') | Some('X')) {
                exited = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(exited, "recorder {pid} still running after stop");
        assert!(!std::path::Path::new(&clip).exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
