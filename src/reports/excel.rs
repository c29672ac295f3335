//! Excel report writer.

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use super::table::ReportTable;
use crate::errors::{AppError, AppResult};

/// Render the table as an .xlsx workbook with a bold header row and
/// columns sized to content.
pub fn render(table: &ReportTable) -> AppResult<Vec<u8>> {
    render_inner(table).map_err(|e| AppError::internal(format!("Excel render failed: {}", e)))
}

fn render_inner(table: &ReportTable) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Attendance")?;

    let bold = Format::new().set_bold();

    for (col, header) in table.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        for (col, cell) in row.iter().enumerate() {
            worksheet.write_string((row_idx + 1) as u32, col as u16, cell.as_str())?;
        }
    }

    // Size columns to their longest cell, with a little padding
    for (col, width) in table.content_widths().iter().enumerate() {
        worksheet.set_column_width(col as u16, (*width as f64) + 2.0)?;
    }

    workbook.save_to_buffer()
}
