//! # Core Module
//!
//! Configuration and the clock capability shared by every feature.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod clock;
pub mod config;

// Re-export commonly used items
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, VoiceConfig};
