//! Startup summary of today's tasks.

use crate::reminder::event::with_greeting;
use crate::schedule::filter::display_day;
use crate::schedule::record::TaskRecord;
use chrono::Weekday;

/// Console lines describing today's agenda.
pub fn agenda_lines(day: Weekday, tasks: &[TaskRecord]) -> Vec<String> {
    let day = display_day(day);
    if tasks.is_empty() {
        return vec![format!("No tasks for today ({day})")];
    }

    let mut lines = Vec::with_capacity(tasks.len() + 1);
    lines.push(format!("Tasks for today ({day}):"));
    lines.extend(tasks.iter().map(|t| format!("{} → {}", t.time, t.task)));
    lines
}

/// Phrases spoken once at startup, one per task.
pub fn agenda_announcements(tasks: &[TaskRecord], name: Option<&str>) -> Vec<String> {
    tasks
        .iter()
        .map(|t| with_greeting(name, &format!("Today's task at {}: {}", t.time, t.task)))
        .collect()
}
