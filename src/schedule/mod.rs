//! Weekly schedule: CSV loading, time windows and per-day filtering.

pub mod filter;
pub mod loader;
pub mod record;

pub use filter::{display_day, tasks_for_day, weekday_name};
pub use loader::{load_schedule, read_schedule};
pub use record::{TaskRecord, TimeWindow, WindowError};
