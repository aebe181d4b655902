//! # Reminders Feature
//!
//! Short-lived in-memory reminders delivered on the next chat turn.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod store;

pub use store::{Reminder, ReminderStore};
