//! Report service - derived attendance metrics and rendering hand-off.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    attendance_percent, is_weekend, performance_grade, AttendanceRecord, AttendanceStatus,
    Employee, ReportFilter, ReportRow,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::reports::{self, ReportFormat, ReportTable};

/// A rendered report ready to stream as an attachment download
#[derive(Debug)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

/// Report service trait for dependency injection.
#[async_trait]
pub trait ReportService: Send + Sync {
    /// Computed rows for the filter, as returned by the `/data` endpoint
    async fn attendance_rows(&self, filter: ReportFilter) -> AppResult<Vec<ReportRow>>;

    /// Rows rendered to the requested format
    async fn attendance_report(
        &self,
        filter: ReportFilter,
        format: ReportFormat,
    ) -> AppResult<RenderedReport>;
}

/// Display metadata needed per employee beyond the bare row
struct EmployeeMeta {
    employee: Employee,
    full_name: String,
    department: String,
}

/// Concrete implementation of ReportService using Unit of Work.
pub struct ReportGenerator<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ReportGenerator<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn load_employees(&self, department_id: Option<Uuid>) -> AppResult<Vec<EmployeeMeta>> {
        let employees = match department_id {
            Some(department_id) => {
                self.uow
                    .departments()
                    .find_by_id(department_id)
                    .await?
                    .ok_or(AppError::NotFound)?;
                self.uow.employees().list_by_department(department_id).await?
            }
            None => self.uow.employees().list_all().await?,
        };

        let mut metas = Vec::with_capacity(employees.len());
        for employee in employees {
            let user = self
                .uow
                .users()
                .find_by_id_with_deleted(employee.user_id)
                .await?
                .ok_or(AppError::NotFound)?;
            let department = self
                .uow
                .departments()
                .find_by_id(employee.department_id)
                .await?
                .ok_or(AppError::NotFound)?;

            metas.push(EmployeeMeta {
                employee,
                full_name: user.full_name,
                department: department.name,
            });
        }

        Ok(metas)
    }
}

#[async_trait]
impl<U: UnitOfWork> ReportService for ReportGenerator<U> {
    async fn attendance_rows(&self, filter: ReportFilter) -> AppResult<Vec<ReportRow>> {
        if filter.to < filter.from {
            return Err(AppError::bad_request("Invalid date range"));
        }

        let metas = self.load_employees(filter.department_id).await?;
        let employee_ids: Vec<Uuid> = metas.iter().map(|m| m.employee.id).collect();

        let records = self
            .uow
            .attendance()
            .list_for_employees(employee_ids, filter.from, filter.to)
            .await?;

        let holidays: Vec<chrono::NaiveDate> = self
            .uow
            .holidays()
            .list_in_range(filter.from, filter.to)
            .await?
            .into_iter()
            .map(|h| h.date)
            .collect();

        let working_days = count_working_days(filter.from, filter.to, &holidays);

        Ok(compute_rows(&metas, &records, working_days))
    }

    async fn attendance_report(
        &self,
        filter: ReportFilter,
        format: ReportFormat,
    ) -> AppResult<RenderedReport> {
        let title = format!("Attendance Report {} to {}", filter.from, filter.to);
        let rows = self.attendance_rows(filter).await?;
        let table = ReportTable::from_rows(&title, &rows);

        let bytes = match format {
            ReportFormat::Csv => reports::csv::render(&table)?,
            ReportFormat::Excel => reports::excel::render(&table)?,
            ReportFormat::Pdf => reports::pdf::render(&table)?,
        };

        Ok(RenderedReport {
            bytes,
            content_type: format.content_type(),
            filename: format!("attendance-report.{}", format.extension()),
        })
    }
}

/// Working days in [from, to]: every day that is neither a weekend nor on
/// the holiday calendar.
fn count_working_days(
    from: chrono::NaiveDate,
    to: chrono::NaiveDate,
    holidays: &[chrono::NaiveDate],
) -> u32 {
    crate::domain::days_in_range(from, to)
        .into_iter()
        .filter(|day| !is_weekend(*day) && !holidays.contains(day))
        .count() as u32
}

/// Fold attendance records into one metric row per employee.
fn compute_rows(
    metas: &[EmployeeMeta],
    records: &[AttendanceRecord],
    working_days: u32,
) -> Vec<ReportRow> {
    let mut by_employee: HashMap<Uuid, Vec<&AttendanceRecord>> = HashMap::new();
    for record in records {
        by_employee.entry(record.employee_id).or_default().push(record);
    }

    metas
        .iter()
        .map(|meta| {
            let empty = Vec::new();
            let records = by_employee.get(&meta.employee.id).unwrap_or(&empty);

            let days_present = records
                .iter()
                .filter(|r| r.status == AttendanceStatus::Present)
                .count() as u32;
            let days_on_leave = records
                .iter()
                .filter(|r| r.status == AttendanceStatus::Leave)
                .count() as u32;
            // Days the employee was expected but neither present nor on
            // approved leave
            let days_absent = working_days.saturating_sub(days_present + days_on_leave);

            let hours: Vec<f64> = records.iter().filter_map(|r| r.work_hours).collect();
            let average_work_hours = if hours.is_empty() {
                0.0
            } else {
                let avg = hours.iter().sum::<f64>() / hours.len() as f64;
                (avg * 100.0).round() / 100.0
            };

            let pct = attendance_percent(days_present, working_days);

            ReportRow {
                employee_code: meta.employee.employee_code.clone(),
                full_name: meta.full_name.clone(),
                department: meta.department.clone(),
                working_days,
                days_present,
                days_absent,
                days_on_leave,
                attendance_percent: pct,
                average_work_hours,
                grade: performance_grade(pct, average_work_hours),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn meta(code: &str) -> EmployeeMeta {
        EmployeeMeta {
            employee: Employee {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                department_id: Uuid::new_v4(),
                employee_code: code.to_string(),
                designation: None,
                manager_id: None,
                hire_date: date(2023, 1, 9),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            full_name: "Test Employee".to_string(),
            department: "Engineering".to_string(),
        }
    }

    fn record(employee_id: Uuid, day: NaiveDate, status: AttendanceStatus, hours: Option<f64>) -> AttendanceRecord {
        AttendanceRecord {
            id: Uuid::new_v4(),
            employee_id,
            date: day,
            check_in: None,
            check_out: None,
            status,
            work_hours: hours,
            leave_request_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn working_days_skip_weekends_and_holidays() {
        // Mon 2024-06-03 .. Sun 2024-06-09: five weekdays
        let holidays = vec![date(2024, 6, 5)];
        assert_eq!(
            count_working_days(date(2024, 6, 3), date(2024, 6, 9), &holidays),
            4
        );
        assert_eq!(count_working_days(date(2024, 6, 3), date(2024, 6, 9), &[]), 5);
    }

    #[test]
    fn rows_fold_presence_leave_and_absence() {
        let m = meta("EMP-0001");
        let id = m.employee.id;
        let records = vec![
            record(id, date(2024, 6, 3), AttendanceStatus::Present, Some(8.0)),
            record(id, date(2024, 6, 4), AttendanceStatus::Present, Some(7.0)),
            record(id, date(2024, 6, 5), AttendanceStatus::Leave, None),
        ];

        let rows = compute_rows(&[m], &records, 5);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.days_present, 2);
        assert_eq!(row.days_on_leave, 1);
        assert_eq!(row.days_absent, 2);
        assert_eq!(row.attendance_percent, 40.0);
        assert_eq!(row.average_work_hours, 7.5);
    }

    #[test]
    fn employee_without_records_is_fully_absent() {
        let rows = compute_rows(&[meta("EMP-0002")], &[], 5);
        assert_eq!(rows[0].days_present, 0);
        assert_eq!(rows[0].days_absent, 5);
        assert_eq!(rows[0].attendance_percent, 0.0);
        assert_eq!(rows[0].grade, 'F');
    }
}
