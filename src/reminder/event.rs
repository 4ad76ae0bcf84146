//! Trigger keys, classifications and the notification events the engine emits.

use crate::schedule::record::WindowError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::collections::HashSet;
use std::fmt;

/// Identifies one task's notification eligibility on one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerKey {
    /// Row index of the task in the schedule file.
    pub row: usize,
    /// Calendar date the notification belongs to.
    pub date: NaiveDate,
}

impl TriggerKey {
    pub fn new(row: usize, date: NaiveDate) -> Self {
        Self { row, date }
    }
}

impl fmt::Display for TriggerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.row, self.date.format("%Y-%m-%d"))
    }
}

/// Keys that have already fired during this process lifetime.
///
/// Only grows; nothing is ever persisted.
#[derive(Debug, Clone, Default)]
pub struct TriggerSet {
    seen: HashSet<TriggerKey>,
}

impl TriggerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key`. Returns `true` when it was not present before.
    pub fn insert(&mut self, key: TriggerKey) -> bool {
        self.seen.insert(key)
    }

    pub fn contains(&self, key: &TriggerKey) -> bool {
        self.seen.contains(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Where `now` falls relative to a task's window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// `now` is before the window opens.
    Upcoming {
        /// Whole minutes until the start, rounded down.
        minutes: i64,
        start: NaiveTime,
    },
    /// `now` is inside the window, both ends inclusive.
    Active,
    /// `now` is after the window closed.
    Late {
        /// Whole minutes since the end, rounded down.
        minutes: i64,
        end: NaiveTime,
    },
    /// The time range could not be parsed; no notification is possible.
    Malformed(WindowError),
}

/// Which notification a task received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Upcoming { minutes: i64, start: NaiveTime },
    Active,
    Late { minutes: i64 },
}

/// A notification the engine decided to emit on a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEvent {
    pub key: TriggerKey,
    /// Task description.
    pub task: String,
    /// Time range as written in the schedule.
    pub window: String,
    pub kind: NotificationKind,
    /// Clock reading of the tick that produced this event.
    pub observed_at: NaiveDateTime,
}

impl NotificationEvent {
    /// Text to render, optionally greeting `name` first.
    pub fn render(&self, name: Option<&str>) -> String {
        let body = match self.kind {
            NotificationKind::Active => format!(
                "It's time for {}. Current time is {}",
                self.task,
                self.observed_at.format("%H:%M")
            ),
            NotificationKind::Upcoming { minutes, start } => format!(
                "{} will start in {minutes} minutes, at {}",
                self.task,
                start.format("%H:%M")
            ),
            NotificationKind::Late { minutes } => format!(
                "You are late by {minutes} minutes for {}, scheduled at {}",
                self.task, self.window
            ),
        };
        with_greeting(name, &body)
    }
}

/// Prefix `body` with `Hello <name>! ` when a name is configured.
pub fn with_greeting(name: Option<&str>, body: &str) -> String {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("Hello {name}! {body}"),
        None => body.to_owned(),
    }
}
