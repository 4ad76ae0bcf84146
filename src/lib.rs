//! Chime: weekly task reminder that announces tasks aloud.
//!
//! Reads a weekly schedule from CSV and, once per second, tells the user
//! whether each of today's tasks is upcoming, in progress or overdue.
//!
//! # Architecture
//!
//! Loader → Daily Filter → Reminder Engine (loop) → Notifier
//! - **Schedule**: CSV parsing into [`TaskRecord`]s and per-weekday filtering
//! - **Reminder engine**: the at-most-once-per-day state machine
//! - **Runner**: tokio interval loop with cancellation
//! - **Notify**: console and text-to-speech sinks

pub mod app_dirs;
pub mod config;
pub mod error;
pub mod notify;
pub mod reminder;
pub mod schedule;

pub use config::{ChimeConfig, DayRollover};
pub use error::{ChimeError, Result};
pub use notify::Notifier;
pub use reminder::{NotificationEvent, ReminderEngine, ReminderRunner, RunnerOptions};
pub use schedule::TaskRecord;
