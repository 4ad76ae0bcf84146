//! Reminder engine and the loop that drives it.
//!
//! [`ReminderEngine::tick`] is a pure state transition over synthetic
//! timestamps; [`ReminderRunner`] owns the timer, console status line and
//! notifier.

pub mod agenda;
pub mod clock;
pub mod engine;
pub mod event;
pub mod runner;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{ReminderEngine, classify};
pub use event::{Classification, NotificationEvent, NotificationKind, TriggerKey, TriggerSet};
pub use runner::{ReminderRunner, RunnerOptions};
