//! CSV report writer.

use super::table::ReportTable;
use crate::errors::{AppError, AppResult};

/// Render the table as CSV bytes (header row plus one row per employee).
pub fn render(table: &ReportTable) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(&table.headers)
        .map_err(|e| AppError::internal(format!("CSV write failed: {}", e)))?;

    for row in &table.rows {
        writer
            .write_record(row)
            .map_err(|e| AppError::internal(format!("CSV write failed: {}", e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("CSV flush failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::super::table::ATTENDANCE_HEADERS;
    use super::*;

    #[test]
    fn renders_header_and_rows() {
        let table = ReportTable {
            title: "June".to_string(),
            headers: ATTENDANCE_HEADERS.to_vec(),
            rows: vec![vec![
                "EMP-0001".to_string(),
                "Alex".to_string(),
                "Engineering".to_string(),
                "20".to_string(),
                "18".to_string(),
                "1".to_string(),
                "1".to_string(),
                "90.0".to_string(),
                "7.80".to_string(),
                "A".to_string(),
            ]],
        };

        let bytes = render(&table).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();

        assert!(lines.next().unwrap().starts_with("Employee Code,Name"));
        assert!(lines.next().unwrap().starts_with("EMP-0001,Alex"));
        assert_eq!(lines.next(), None);
    }
}
