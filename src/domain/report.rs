//! Report domain: derived attendance metrics and the performance grade.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::{FULL_DAY_WORK_HOURS, GRADE_ATTENDANCE_WEIGHT, GRADE_HOURS_WEIGHT};

/// Filter for report queries
#[derive(Debug, Clone)]
pub struct ReportFilter {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub department_id: Option<uuid::Uuid>,
}

/// One computed report row per employee
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportRow {
    #[schema(example = "EMP-0042")]
    pub employee_code: String,
    pub full_name: String,
    pub department: String,
    /// Week- and holiday-adjusted days the employee was expected to work
    pub working_days: u32,
    pub days_present: u32,
    pub days_absent: u32,
    pub days_on_leave: u32,
    /// Present days over working days, in percent
    pub attendance_percent: f64,
    pub average_work_hours: f64,
    /// Weighted letter grade
    #[schema(value_type = String, example = "A")]
    pub grade: char,
}

/// Present days over working days, rounded to one decimal place.
pub fn attendance_percent(days_present: u32, working_days: u32) -> f64 {
    if working_days == 0 {
        return 0.0;
    }
    let pct = days_present as f64 / working_days as f64 * 100.0;
    (pct * 10.0).round() / 10.0
}

/// Weighted performance grade.
///
/// Attendance percentage and a work-hours score (average hours against a
/// full working day, capped at 100%) are combined with fixed weights.
pub fn performance_grade(attendance_pct: f64, average_work_hours: f64) -> char {
    let hours_score = (average_work_hours / FULL_DAY_WORK_HOURS * 100.0).min(100.0);
    let weighted = attendance_pct * GRADE_ATTENDANCE_WEIGHT + hours_score * GRADE_HOURS_WEIGHT;

    match weighted {
        w if w >= 90.0 => 'A',
        w if w >= 75.0 => 'B',
        w if w >= 60.0 => 'C',
        w if w >= 45.0 => 'D',
        _ => 'F',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attendance_percent_handles_empty_window() {
        assert_eq!(attendance_percent(0, 0), 0.0);
        assert_eq!(attendance_percent(9, 20), 45.0);
        assert_eq!(attendance_percent(20, 20), 100.0);
    }

    #[test]
    fn attendance_percent_rounds_to_one_decimal() {
        // 2/3 -> 66.666... -> 66.7
        assert_eq!(attendance_percent(2, 3), 66.7);
    }

    #[test]
    fn grade_boundaries() {
        // full attendance, full hours
        assert_eq!(performance_grade(100.0, 8.0), 'A');
        // hours score caps at 100 even for overtime
        assert_eq!(performance_grade(100.0, 12.0), 'A');
        assert_eq!(performance_grade(80.0, 7.0), 'B');
        assert_eq!(performance_grade(60.0, 6.0), 'C');
        assert_eq!(performance_grade(50.0, 4.0), 'D');
        assert_eq!(performance_grade(10.0, 1.0), 'F');
    }
}
