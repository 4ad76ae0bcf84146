//! Reminder state machine.
//!
//! Each applicable task moves from pending to exactly one of
//! upcoming/active/late per calendar date. The [`TriggerSet`] guarantees a
//! [`TriggerKey`] fires at most once no matter how many ticks observe it.

use crate::config::DayRollover;
use crate::reminder::event::{
    Classification, NotificationEvent, NotificationKind, TriggerKey, TriggerSet,
};
use crate::schedule::filter::{tasks_for_day, weekday_name};
use crate::schedule::record::{TaskRecord, TimeWindow};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use tracing::{debug, info};

/// Classify `window` against `now`, anchoring the window to `now`'s date.
pub fn classify(window: &str, now: NaiveDateTime) -> Classification {
    let window = match window.parse::<TimeWindow>() {
        Ok(w) => w,
        Err(e) => return Classification::Malformed(e),
    };
    let (start, end) = window.anchor(now.date());

    if start <= now && now <= end {
        Classification::Active
    } else if now < start {
        Classification::Upcoming {
            minutes: (start - now).num_minutes(),
            start: window.start,
        }
    } else {
        Classification::Late {
            minutes: (now - end).num_minutes(),
            end: window.end,
        }
    }
}

/// Owns the schedule, today's applicable subset and the trigger history.
#[derive(Debug, Clone)]
pub struct ReminderEngine {
    schedule: Vec<TaskRecord>,
    applicable: Vec<TaskRecord>,
    day: NaiveDate,
    rollover: DayRollover,
    triggered: TriggerSet,
}

impl ReminderEngine {
    /// Build an engine whose applicable tasks are those scheduled on `today`.
    pub fn new(schedule: Vec<TaskRecord>, today: NaiveDate, rollover: DayRollover) -> Self {
        let applicable = tasks_for_day(&schedule, today.weekday());
        Self {
            schedule,
            applicable,
            day: today,
            rollover,
            triggered: TriggerSet::new(),
        }
    }

    /// Tasks currently considered on each tick.
    pub fn applicable(&self) -> &[TaskRecord] {
        &self.applicable
    }

    /// Keys that have already fired.
    pub fn triggered(&self) -> &TriggerSet {
        &self.triggered
    }

    /// The date the applicable subset was computed for.
    pub fn current_day(&self) -> NaiveDate {
        self.day
    }

    /// Evaluate every applicable task at `now` and return the notifications to emit.
    pub fn tick(&mut self, now: NaiveDateTime) -> Vec<NotificationEvent> {
        self.roll_over(now.date());

        let date = now.date();
        let mut events = Vec::new();
        for task in &self.applicable {
            let kind = match classify(&task.time, now) {
                Classification::Malformed(e) => {
                    debug!(row = task.row, "skipping task with bad window: {e}");
                    continue;
                }
                Classification::Active => NotificationKind::Active,
                Classification::Upcoming { minutes, start } => {
                    NotificationKind::Upcoming { minutes, start }
                }
                Classification::Late { minutes, .. } => NotificationKind::Late { minutes },
            };

            let key = TriggerKey::new(task.row, date);
            if !self.triggered.insert(key) {
                continue;
            }

            debug!(%key, ?kind, "task triggered");
            events.push(NotificationEvent {
                key,
                task: task.task.clone(),
                window: task.time.clone(),
                kind,
                observed_at: now,
            });
        }
        events
    }

    fn roll_over(&mut self, date: NaiveDate) {
        if self.rollover != DayRollover::Refresh || date == self.day {
            return;
        }
        self.applicable = tasks_for_day(&self.schedule, date.weekday());
        self.day = date;
        info!(
            "date changed to {date}, {} tasks for {}",
            self.applicable.len(),
            weekday_name(date.weekday())
        );
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::schedule::record::WindowError;

    // 2024-03-04 is a Monday.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn at(date: NaiveDate, h: u32, m: u32, s: u32) -> NaiveDateTime {
        date.and_hms_opt(h, m, s).unwrap()
    }

    fn engine(rows: &[(&str, &str, &str)]) -> ReminderEngine {
        let schedule = rows
            .iter()
            .enumerate()
            .map(|(i, (day, time, task))| TaskRecord::new(i, day, time, task))
            .collect();
        ReminderEngine::new(schedule, monday(), DayRollover::Startup)
    }

    #[test]
    fn classify_before_window_is_upcoming() {
        let c = classify("09:00-09:30", at(monday(), 8, 55, 0));
        assert!(matches!(c, Classification::Upcoming { minutes: 5, .. }));
    }

    #[test]
    fn classify_rounds_minutes_down() {
        let c = classify("09:00-09:30", at(monday(), 8, 55, 30));
        assert!(matches!(c, Classification::Upcoming { minutes: 4, .. }));
        let c = classify("09:00-09:30", at(monday(), 9, 45, 59));
        assert!(matches!(c, Classification::Late { minutes: 15, .. }));
    }

    #[test]
    fn classify_inside_window_is_active() {
        assert_eq!(
            classify("09:00-09:30", at(monday(), 9, 10, 0)),
            Classification::Active
        );
    }

    #[test]
    fn classify_window_bounds_are_inclusive() {
        assert_eq!(
            classify("09:00-09:30", at(monday(), 9, 0, 0)),
            Classification::Active
        );
        assert_eq!(
            classify("09:00-09:30", at(monday(), 9, 30, 0)),
            Classification::Active
        );
        assert!(matches!(
            classify("09:00-09:30", at(monday(), 9, 30, 1)),
            Classification::Late { minutes: 0, .. }
        ));
    }

    #[test]
    fn classify_after_window_is_late() {
        assert!(matches!(
            classify("09:00-09:30", at(monday(), 9, 45, 0)),
            Classification::Late { minutes: 15, .. }
        ));
    }

    #[test]
    fn classify_bad_window_is_malformed() {
        assert!(matches!(
            classify("09:00", at(monday(), 9, 0, 0)),
            Classification::Malformed(WindowError::Shape(_))
        ));
        assert!(matches!(
            classify("nine-ten", at(monday(), 9, 0, 0)),
            Classification::Malformed(WindowError::Time { .. })
        ));
    }

    #[test]
    fn only_todays_tasks_are_applicable() {
        let engine = engine(&[
            ("Monday", "09:00-09:30", "Standup"),
            ("Tuesday", "09:00-09:30", "Gym"),
        ]);
        assert_eq!(engine.applicable().len(), 1);
        assert_eq!(engine.applicable()[0].task, "Standup");
    }

    #[test]
    fn upcoming_fires_once_with_minutes() {
        let mut engine = engine(&[("monday", "09:00-09:30", "Standup")]);
        let events = engine.tick(at(monday(), 8, 55, 0));
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].kind,
            NotificationKind::Upcoming {
                minutes: 5,
                start: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            }
        );
        assert_eq!(events[0].key, TriggerKey::new(0, monday()));
    }

    #[test]
    fn re_entry_emits_nothing_for_the_same_day() {
        let mut engine = engine(&[("monday", "09:00-09:30", "Standup")]);
        assert_eq!(engine.tick(at(monday(), 8, 55, 0)).len(), 1);
        assert!(engine.tick(at(monday(), 8, 55, 1)).is_empty());
        // Entering the window later the same day does not fire again.
        assert!(engine.tick(at(monday(), 9, 10, 0)).is_empty());
        assert!(engine.tick(at(monday(), 9, 45, 0)).is_empty());
        assert_eq!(engine.triggered().len(), 1);
    }

    #[test]
    fn first_observed_after_end_reports_late() {
        let mut engine = engine(&[("monday", "09:00-09:30", "Standup")]);
        let events = engine.tick(at(monday(), 9, 45, 0));
        assert_eq!(events[0].kind, NotificationKind::Late { minutes: 15 });
    }

    #[test]
    fn first_observed_inside_window_reports_active() {
        let mut engine = engine(&[("monday", "09:00-09:30", "Standup")]);
        let events = engine.tick(at(monday(), 9, 10, 0));
        assert_eq!(events[0].kind, NotificationKind::Active);
    }

    #[test]
    fn malformed_window_produces_no_event_and_no_key() {
        let mut engine = engine(&[
            ("monday", "09:00", "Broken"),
            ("monday", "10:00-10:30", "Fine"),
        ]);
        let events = engine.tick(at(monday(), 9, 0, 0));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].task, "Fine");
        assert!(!engine.triggered().contains(&TriggerKey::new(0, monday())));
        assert!(engine.tick(at(monday(), 9, 0, 1)).is_empty());
    }

    #[test]
    fn identical_tasks_fire_separately() {
        let mut engine = engine(&[
            ("monday", "09:00-09:30", "Read"),
            ("monday", "09:00-09:30", "Read"),
        ]);
        let events = engine.tick(at(monday(), 9, 5, 0));
        assert_eq!(events.len(), 2);
        assert_ne!(events[0].key, events[1].key);
    }

    #[test]
    fn events_follow_schedule_order() {
        let mut engine = engine(&[
            ("monday", "12:00-13:00", "Lunch"),
            ("monday", "08:00-08:30", "Breakfast"),
        ]);
        let tasks: Vec<String> = engine
            .tick(at(monday(), 9, 0, 0))
            .into_iter()
            .map(|e| e.task)
            .collect();
        assert_eq!(tasks, vec!["Lunch", "Breakfast"]);
    }

    #[test]
    fn new_date_generates_new_keys() {
        let mut engine = engine(&[("monday", "09:00-09:30", "Standup")]);
        assert_eq!(engine.tick(at(monday(), 9, 10, 0)).len(), 1);

        let tuesday = monday().succ_opt().unwrap();
        let events = engine.tick(at(tuesday, 0, 0, 5));
        // Startup rollover keeps Monday's subset, so the task fires again under Tuesday's key.
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].key, TriggerKey::new(0, tuesday));
        assert_eq!(engine.current_day(), monday());
    }

    #[test]
    fn refresh_rollover_switches_to_the_new_weekday() {
        let schedule = vec![
            TaskRecord::new(0, "monday", "09:00-09:30", "Standup"),
            TaskRecord::new(1, "tuesday", "07:00-07:30", "Gym"),
        ];
        let mut engine = ReminderEngine::new(schedule, monday(), DayRollover::Refresh);
        assert_eq!(engine.tick(at(monday(), 9, 10, 0)).len(), 1);

        let tuesday = monday().succ_opt().unwrap();
        let events = engine.tick(at(tuesday, 0, 0, 5));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].task, "Gym");
        assert_eq!(engine.current_day(), tuesday);
        assert_eq!(engine.applicable().len(), 1);
    }

    #[test]
    fn engines_do_not_share_state() {
        let mut a = engine(&[("monday", "09:00-09:30", "Standup")]);
        let mut b = engine(&[("monday", "09:00-09:30", "Standup")]);
        assert_eq!(a.tick(at(monday(), 9, 0, 0)).len(), 1);
        assert_eq!(b.tick(at(monday(), 9, 0, 0)).len(), 1);
    }
}
