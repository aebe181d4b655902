//! Per-command handler implementations
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod open_app;
pub mod remind;
pub mod time;

use std::sync::Arc;

use super::handler::LocalCommand;

pub use remind::REMINDER_MESSAGE;

/// Create all local command handlers in match priority order
pub fn create_all_handlers() -> Vec<Arc<dyn LocalCommand>> {
    vec![
        Arc::new(time::TimeHandler),
        Arc::new(open_app::OpenAppHandler::notepad()),
        Arc::new(remind::RemindHandler),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let names: Vec<_> = create_all_handlers().iter().map(|h| h.name()).collect();
        assert_eq!(names, vec!["time", "notepad", "remind"]);
    }
}
