//! Task records and their daily time windows.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const TIME_FORMAT: &str = "%H:%M";

/// One row of the weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Zero-based data row index in the source file (dropped rows still count).
    pub row: usize,
    /// Weekday name, lowercased and trimmed (e.g. `"monday"`).
    pub day: String,
    /// Raw time range as written in the file, trimmed (e.g. `"09:00-09:30"`).
    pub time: String,
    /// Task description.
    pub task: String,
}

impl TaskRecord {
    /// Build a record, normalising the day and trimming every field.
    pub fn new(
        row: usize,
        day: impl AsRef<str>,
        time: impl AsRef<str>,
        task: impl AsRef<str>,
    ) -> Self {
        Self {
            row,
            day: day.as_ref().trim().to_lowercase(),
            time: time.as_ref().trim().to_owned(),
            task: task.as_ref().trim().to_owned(),
        }
    }

    /// Parse this record's time range.
    pub fn window(&self) -> Result<TimeWindow, WindowError> {
        self.time.parse()
    }
}

/// Why a time range could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    /// Not exactly two parts separated by `-`.
    #[error("time range {0:?} is not of the form HH:MM-HH:MM")]
    Shape(String),

    /// One side is not a valid 24-hour `HH:MM` time.
    #[error("invalid {part} time {value:?}")]
    Time {
        /// `"start"` or `"end"`.
        part: &'static str,
        /// The offending text.
        value: String,
    },
}

/// A start/end pair of times of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Anchor both ends of the window to `date`.
    pub fn anchor(&self, date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
        (date.and_time(self.start), date.and_time(self.end))
    }
}

impl FromStr for TimeWindow {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let (start, end) = match (parts.next(), parts.next(), parts.next()) {
            (Some(start), Some(end), None) => (start.trim(), end.trim()),
            _ => return Err(WindowError::Shape(s.to_owned())),
        };

        let start = NaiveTime::parse_from_str(start, TIME_FORMAT).map_err(|_| WindowError::Time {
            part: "start",
            value: start.to_owned(),
        })?;
        let end = NaiveTime::parse_from_str(end, TIME_FORMAT).map_err(|_| WindowError::Time {
            part: "end",
            value: end.to_owned(),
        })?;

        Ok(Self { start, end })
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(TIME_FORMAT),
            self.end.format(TIME_FORMAT)
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn new_normalises_fields() {
        let record = TaskRecord::new(3, "  Monday ", " 09:00-09:30 ", " Standup  ");
        assert_eq!(record.row, 3);
        assert_eq!(record.day, "monday");
        assert_eq!(record.time, "09:00-09:30");
        assert_eq!(record.task, "Standup");
    }

    #[test]
    fn parses_window_with_spaces_around_parts() {
        let window: TimeWindow = "09:00 - 09:30".parse().unwrap();
        assert_eq!(window.start, hm(9, 0));
        assert_eq!(window.end, hm(9, 30));
        assert_eq!(window.to_string(), "09:00-09:30");
    }

    #[test]
    fn rejects_wrong_number_of_parts() {
        assert!(matches!(
            "09:00".parse::<TimeWindow>(),
            Err(WindowError::Shape(_))
        ));
        assert!(matches!(
            "09:00-09:30-10:00".parse::<TimeWindow>(),
            Err(WindowError::Shape(_))
        ));
    }

    #[test]
    fn rejects_invalid_times() {
        assert_eq!(
            "9am-09:30".parse::<TimeWindow>(),
            Err(WindowError::Time {
                part: "start",
                value: "9am".to_owned()
            })
        );
        assert_eq!(
            "09:00-25:00".parse::<TimeWindow>(),
            Err(WindowError::Time {
                part: "end",
                value: "25:00".to_owned()
            })
        );
    }

    #[test]
    fn anchor_places_window_on_date() {
        let window: TimeWindow = "09:00-09:30".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let (start, end) = window.anchor(date);
        assert_eq!(start, date.and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(end, date.and_hms_opt(9, 30, 0).unwrap());
    }
}
