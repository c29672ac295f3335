//! Attendance domain: day records, statuses, and the check-in rules.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Status of one attendance day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Leave,
    Holiday,
    Weekend,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "PRESENT",
            AttendanceStatus::Absent => "ABSENT",
            AttendanceStatus::Leave => "LEAVE",
            AttendanceStatus::Holiday => "HOLIDAY",
            AttendanceStatus::Weekend => "WEEKEND",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PRESENT" => Some(AttendanceStatus::Present),
            "ABSENT" => Some(AttendanceStatus::Absent),
            "LEAVE" => Some(AttendanceStatus::Leave),
            "HOLIDAY" => Some(AttendanceStatus::Holiday),
            "WEEKEND" => Some(AttendanceStatus::Weekend),
            _ => None,
        }
    }
}

impl From<&str> for AttendanceStatus {
    fn from(s: &str) -> Self {
        AttendanceStatus::parse(s).unwrap_or(AttendanceStatus::Absent)
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One attendance row: at most one per (employee, date)
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    pub work_hours: Option<f64>,
    /// Set when the row was stamped by an approved leave request
    pub leave_request_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Attendance response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttendanceResponse {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    #[schema(example = "PRESENT")]
    pub status: AttendanceStatus,
    pub work_hours: Option<f64>,
    pub leave_request_id: Option<Uuid>,
}

impl From<AttendanceRecord> for AttendanceResponse {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            id: record.id,
            employee_id: record.employee_id,
            date: record.date,
            check_in: record.check_in,
            check_out: record.check_out,
            status: record.status,
            work_hours: record.work_hours,
            leave_request_id: record.leave_request_id,
        }
    }
}

/// Holiday calendar entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Holiday {
    pub id: Uuid,
    pub date: NaiveDate,
    #[schema(example = "New Year's Day")]
    pub name: String,
}

/// Check whether a date falls on the weekend (Saturday or Sunday)
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Determine the status a check-in gets stamped with.
///
/// Precedence: an approved leave covering the day wins, then the holiday
/// calendar, then the weekend, otherwise the day counts as present.
pub fn check_in_status(date: NaiveDate, on_leave: bool, is_holiday: bool) -> AttendanceStatus {
    if on_leave {
        AttendanceStatus::Leave
    } else if is_holiday {
        AttendanceStatus::Holiday
    } else if is_weekend(date) {
        AttendanceStatus::Weekend
    } else {
        AttendanceStatus::Present
    }
}

/// Derive worked hours from a check-in/check-out pair, rounded to two
/// decimal places. Returns zero for inverted pairs rather than a negative.
pub fn compute_work_hours(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> f64 {
    let minutes = (check_out - check_in).num_minutes().max(0) as f64;
    (minutes / 60.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekend_detection() {
        // 2024-06-01 is a Saturday
        assert!(is_weekend(date(2024, 6, 1)));
        assert!(is_weekend(date(2024, 6, 2)));
        assert!(!is_weekend(date(2024, 6, 3)));
    }

    #[test]
    fn status_precedence_leave_beats_holiday_and_weekend() {
        let saturday = date(2024, 6, 1);
        assert_eq!(
            check_in_status(saturday, true, true),
            AttendanceStatus::Leave
        );
        assert_eq!(
            check_in_status(saturday, false, true),
            AttendanceStatus::Holiday
        );
        assert_eq!(
            check_in_status(saturday, false, false),
            AttendanceStatus::Weekend
        );
        assert_eq!(
            check_in_status(date(2024, 6, 3), false, false),
            AttendanceStatus::Present
        );
    }

    #[test]
    fn work_hours_rounding() {
        let check_in = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2024, 6, 3, 17, 30, 0).unwrap();
        assert_eq!(compute_work_hours(check_in, check_out), 8.5);
    }

    #[test]
    fn work_hours_never_negative() {
        let check_in = Utc.with_ymd_and_hms(2024, 6, 3, 17, 0, 0).unwrap();
        let check_out = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
        assert_eq!(compute_work_hours(check_in, check_out), 0.0);
    }
}
