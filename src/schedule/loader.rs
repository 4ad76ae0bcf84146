//! CSV schedule loading.
//!
//! Column names are matched case-insensitively with surrounding whitespace
//! stripped. Rows with an empty `day`, `time` or `task` cell are dropped; the
//! row index of every kept record still reflects its position in the file.

use crate::error::{ChimeError, Result};
use crate::schedule::record::TaskRecord;
use std::io::Read;
use std::path::Path;
use tracing::{debug, trace};

const DAY_COLUMN: &str = "day";
const TIME_COLUMN: &str = "time";
const TASK_COLUMN: &str = "task";

/// Load the schedule from a CSV file.
///
/// # Errors
///
/// Returns [`ChimeError::Schedule`] if the file cannot be opened, is not
/// valid CSV, or is missing one of the required columns.
pub fn load_schedule(path: &Path) -> Result<Vec<TaskRecord>> {
    let file = std::fs::File::open(path).map_err(|e| {
        ChimeError::Schedule(format!("cannot open schedule {}: {e}", path.display()))
    })?;
    let records = read_schedule(file)?;
    debug!(
        "loaded {} schedule rows from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Parse a CSV schedule from any reader.
///
/// # Errors
///
/// Returns [`ChimeError::Schedule`] on malformed CSV or a missing column.
pub fn read_schedule<R: Read>(reader: R) -> Result<Vec<TaskRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| ChimeError::Schedule(format!("cannot read schedule header: {e}")))?
        .clone();
    let day_idx = column_index(&headers, DAY_COLUMN)?;
    let time_idx = column_index(&headers, TIME_COLUMN)?;
    let task_idx = column_index(&headers, TASK_COLUMN)?;

    let mut records = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result
            .map_err(|e| ChimeError::Schedule(format!("malformed schedule row {row}: {e}")))?;

        let cell = |idx: usize| record.get(idx).map(str::trim).filter(|v| !v.is_empty());
        match (cell(day_idx), cell(time_idx), cell(task_idx)) {
            (Some(day), Some(time), Some(task)) => {
                records.push(TaskRecord::new(row, day, time, task));
            }
            _ => trace!("dropping incomplete schedule row {row}"),
        }
    }

    Ok(records)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| ChimeError::Schedule(format!("schedule has no {name:?} column")))
}
