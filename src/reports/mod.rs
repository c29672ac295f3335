//! Report rendering: a shared table model and one writer per format.

pub mod csv;
pub mod excel;
pub mod pdf;
mod table;

pub use table::{ReportTable, ATTENDANCE_HEADERS};

use crate::errors::{AppError, AppResult};

/// Output formats selectable via the `format` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Excel,
    Pdf,
}

impl ReportFormat {
    /// Parse the `format` query parameter
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            "csv" => Ok(ReportFormat::Csv),
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            "pdf" => Ok(ReportFormat::Pdf),
            other => Err(AppError::bad_request(format!(
                "Unknown report format '{}'; expected pdf, csv, or excel",
                other
            ))),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "text/csv",
            ReportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ReportFormat::Pdf => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Excel => "xlsx",
            ReportFormat::Pdf => "pdf",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parsing() {
        assert_eq!(ReportFormat::parse("csv").unwrap(), ReportFormat::Csv);
        assert_eq!(ReportFormat::parse("xlsx").unwrap(), ReportFormat::Excel);
        assert_eq!(ReportFormat::parse("excel").unwrap(), ReportFormat::Excel);
        assert_eq!(ReportFormat::parse("pdf").unwrap(), ReportFormat::Pdf);
        assert!(ReportFormat::parse("docx").is_err());
    }
}
