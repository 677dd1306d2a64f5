use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use utoipa::ToSchema;

/// One clock-in, with its clock-out once recorded. An interval without a
/// `time_out` is "open".
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeInterval {
    #[schema(example = "2026-01-05T09:00:00Z", value_type = String, format = "date-time")]
    pub time_in: DateTime<Utc>,

    #[schema(example = "2026-01-05T17:30:00Z", value_type = String, format = "date-time", nullable = true)]
    pub time_out: Option<DateTime<Utc>>,

    #[serde(rename = "type")]
    #[schema(example = "regular")]
    pub kind: String,
}

impl TimeInterval {
    pub fn open(time_in: DateTime<Utc>) -> Self {
        Self {
            time_in,
            time_out: None,
            kind: "regular".to_string(),
        }
    }

    /// Elapsed hours for a closed interval, clamped non-negative.
    /// Open intervals contribute nothing.
    pub fn hours(&self) -> f64 {
        match self.time_out {
            Some(out) => ((out - self.time_in).num_seconds() as f64 / 3600.0).max(0.0),
            None => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecordStatus {
    Pending,
    Completed,
    Rejected,
}

/// One attendance record per employee per calendar date.
///
/// Invariant: at most one interval is open at a time, and an open interval is
/// always the last in sequence. Every mutation goes through `clock_in` /
/// `clock_out`, which check before appending or closing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 1001)]
    pub employee_id: u64,

    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,

    pub time_ins: Vec<TimeInterval>,

    #[schema(example = 8.5)]
    pub total_work_hours: f64,

    pub status: RecordStatus,
}

/// Body for `POST /timeRecords` — the store assigns the id.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTimeRecord {
    pub employee_id: u64,
    pub date: NaiveDate,
    pub time_ins: Vec<TimeInterval>,
    pub total_work_hours: f64,
    pub status: RecordStatus,
}

/// Fields touched by clock-in/clock-out, sent as `PATCH /timeRecords/{id}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRecordPatch {
    pub time_ins: Vec<TimeInterval>,
    pub total_work_hours: f64,
    pub status: RecordStatus,
}

impl TimeRecord {
    /// Index of the open interval, if any. Only the last interval can be
    /// open.
    pub fn open_interval_index(&self) -> Option<usize> {
        match self.time_ins.last() {
            Some(last) if last.time_out.is_none() => Some(self.time_ins.len() - 1),
            _ => None,
        }
    }

    pub fn has_open_interval(&self) -> bool {
        self.open_interval_index().is_some()
    }

    /// Total hours across all closed intervals. Stored unrounded; rounding
    /// happens only at the presentation boundary.
    pub fn closed_hours(&self) -> f64 {
        self.time_ins.iter().map(TimeInterval::hours).sum()
    }
}

/// The record whose date matches exactly, if any. Records are matched by
/// date equality, never by range.
pub fn record_for_date(records: &[TimeRecord], date: NaiveDate) -> Option<&TimeRecord> {
    records.iter().find(|r| r.date == date)
}

/// True iff today's record exists and its last interval is still open.
pub fn has_open_interval(records: &[TimeRecord], today: NaiveDate) -> bool {
    record_for_date(records, today).is_some_and(TimeRecord::has_open_interval)
}

/// Most recent first, for display.
pub fn sort_by_date_desc(records: &mut [TimeRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}
