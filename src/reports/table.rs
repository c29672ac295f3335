//! Generic tabular report model shared by the CSV, Excel, and PDF writers.

use crate::domain::ReportRow;

/// Column headers used by every attendance report rendering
pub const ATTENDANCE_HEADERS: &[&str] = &[
    "Employee Code",
    "Name",
    "Department",
    "Working Days",
    "Present",
    "Absent",
    "On Leave",
    "Attendance %",
    "Avg Hours",
    "Grade",
];

/// A report flattened to strings, ready for any renderer
#[derive(Debug, Clone)]
pub struct ReportTable {
    pub title: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    /// Flatten computed report rows into renderable cells
    pub fn from_rows(title: &str, rows: &[ReportRow]) -> Self {
        let rows = rows
            .iter()
            .map(|row| {
                vec![
                    row.employee_code.clone(),
                    row.full_name.clone(),
                    row.department.clone(),
                    row.working_days.to_string(),
                    row.days_present.to_string(),
                    row.days_absent.to_string(),
                    row.days_on_leave.to_string(),
                    format!("{:.1}", row.attendance_percent),
                    format!("{:.2}", row.average_work_hours),
                    row.grade.to_string(),
                ]
            })
            .collect();

        Self {
            title: title.to_string(),
            headers: ATTENDANCE_HEADERS.to_vec(),
            rows,
        }
    }

    /// Longest cell (header included) per column, in characters
    pub fn content_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.len()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() && cell.len() > widths[i] {
                    widths[i] = cell.len();
                }
            }
        }
        widths
    }

    /// Distribute `total_width` across columns proportionally to content
    /// width, flooring every column at `min_width`.
    ///
    /// Floored columns are fixed first, then the remaining width is split
    /// among the rest by content share, so the result always sums to
    /// `total_width` (as long as the floor fits).
    pub fn allocate_widths(&self, total_width: f64, min_width: f64) -> Vec<f64> {
        let content = self.content_widths();
        if content.is_empty() {
            return Vec::new();
        }

        let total_content: f64 = content.iter().map(|w| *w as f64).sum();
        let mut widths: Vec<f64> = content
            .iter()
            .map(|w| *w as f64 / total_content * total_width)
            .collect();

        // Raise narrow columns to the floor, shrinking the others
        // proportionally to pay for it
        loop {
            let deficit: f64 = widths
                .iter()
                .filter(|w| **w < min_width)
                .map(|w| min_width - w)
                .sum();
            if deficit <= f64::EPSILON {
                break;
            }

            let flexible: f64 = widths
                .iter()
                .filter(|w| **w > min_width)
                .map(|w| w - min_width)
                .sum();
            if flexible <= deficit {
                // Nothing left to shrink; clamp everything to an even split
                let even = total_width / widths.len() as f64;
                for w in widths.iter_mut() {
                    *w = even;
                }
                break;
            }

            let scale = (flexible - deficit) / flexible;
            for w in widths.iter_mut() {
                if *w < min_width {
                    *w = min_width;
                } else {
                    *w = min_width + (*w - min_width) * scale;
                }
            }
        }

        widths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(code: &str, name: &str) -> ReportRow {
        ReportRow {
            employee_code: code.to_string(),
            full_name: name.to_string(),
            department: "Engineering".to_string(),
            working_days: 20,
            days_present: 18,
            days_absent: 1,
            days_on_leave: 1,
            attendance_percent: 90.0,
            average_work_hours: 7.8,
            grade: 'A',
        }
    }

    #[test]
    fn table_has_one_row_per_employee_plus_headers() {
        let table = ReportTable::from_rows(
            "June",
            &[sample_row("EMP-0001", "Alex"), sample_row("EMP-0002", "Sam")],
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.headers.len(), ATTENDANCE_HEADERS.len());
        assert!(table.rows.iter().all(|r| r.len() == table.headers.len()));
    }

    #[test]
    fn allocated_widths_sum_to_total() {
        let table = ReportTable::from_rows(
            "June",
            &[sample_row("EMP-0001", "A Very Long Employee Name Indeed")],
        );
        let widths = table.allocate_widths(270.0, 12.0);

        let sum: f64 = widths.iter().sum();
        assert!((sum - 270.0).abs() < 0.01, "widths sum to {}", sum);
        assert!(widths.iter().all(|w| *w >= 12.0 - f64::EPSILON));
    }

    #[test]
    fn wider_content_gets_wider_columns() {
        let table = ReportTable::from_rows(
            "June",
            &[sample_row("EMP-0001", "A Very Long Employee Name Indeed")],
        );
        let widths = table.allocate_widths(270.0, 12.0);

        // Name column carries the longest content
        let name_idx = 1;
        let grade_idx = widths.len() - 1;
        assert!(widths[name_idx] > widths[grade_idx]);
    }
}
