//! # Feature: Reminder Store
//!
//! In-memory list of one-shot reminders. Appends on schedule, scans in
//! insertion order and pops at most one due reminder per check.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Guard the list with a mutex so concurrent requests cannot lose or duplicate a delivery
//! - 1.0.0: Initial release with linear scan-and-pop

use chrono::{DateTime, Duration, Local};
use log::debug;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A scheduled one-shot text notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub fire_at: DateTime<Local>,
    pub message: String,
}

impl Reminder {
    pub fn is_due(&self, now: DateTime<Local>) -> bool {
        self.fire_at <= now
    }
}

/// Shared reminder list; clones point at the same storage
#[derive(Debug, Clone, Default)]
pub struct ReminderStore {
    reminders: Arc<Mutex<Vec<Reminder>>>,
}

impl ReminderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reminder firing `delay` after `now`
    pub async fn schedule(&self, message: &str, now: DateTime<Local>, delay: Duration) -> Reminder {
        let reminder = Reminder {
            fire_at: now + delay,
            message: message.to_string(),
        };

        let mut reminders = self.reminders.lock().await;
        reminders.push(reminder.clone());
        debug!(
            "Scheduled reminder for {} ({} pending)",
            reminder.fire_at.format("%H:%M:%S"),
            reminders.len()
        );

        reminder
    }

    /// Remove and return the oldest-inserted reminder that is due at `now`
    ///
    /// Only one reminder is delivered per call even when several are due; the
    /// rest stay queued for the next check.
    pub async fn check_due(&self, now: DateTime<Local>) -> Option<String> {
        let mut reminders = self.reminders.lock().await;
        let index = reminders.iter().position(|r| r.is_due(now))?;
        let reminder = reminders.remove(index);
        debug!("Delivering reminder due at {}", reminder.fire_at.format("%H:%M:%S"));
        Some(reminder.message)
    }

    /// Snapshot of pending reminders in insertion order
    pub async fn pending(&self) -> Vec<Reminder> {
        self.reminders.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.reminders.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reminders.lock().await.is_empty()
    }
}
