//! Selecting the tasks that apply to a given weekday.

use crate::schedule::record::TaskRecord;
use chrono::Weekday;

/// Lowercase English name of `day`, matching [`TaskRecord::day`].
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Capitalised weekday name for console output (e.g. `"Monday"`).
pub fn display_day(day: Weekday) -> String {
    let name = weekday_name(day);
    let mut chars = name.chars();
    match chars.next() {
        Some(c) => {
            let mut result = c.to_uppercase().to_string();
            result.push_str(chars.as_str());
            result
        }
        None => String::new(),
    }
}

/// Tasks scheduled on `day`, in schedule order.
pub fn tasks_for_day(tasks: &[TaskRecord], day: Weekday) -> Vec<TaskRecord> {
    let name = weekday_name(day);
    tasks
        .iter()
        .filter(|t| t.day.trim().eq_ignore_ascii_case(name))
        .cloned()
        .collect()
}
