//! Attendance service - daily check-in/check-out and the holiday calendar.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    check_in_status, compute_work_hours, AttendanceResponse, AttendanceStatus, Holiday,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Attendance service trait for dependency injection.
#[async_trait]
pub trait AttendanceService: Send + Sync {
    /// Record today's check-in for an employee. Fails if a record for
    /// today already exists.
    async fn check_in(&self, employee_id: Uuid) -> AppResult<AttendanceResponse>;

    /// Record today's check-out. Fails without a prior check-in or when
    /// already checked out.
    async fn check_out(&self, employee_id: Uuid) -> AppResult<AttendanceResponse>;

    /// Today's record, if any
    async fn today(&self, employee_id: Uuid) -> AppResult<Option<AttendanceResponse>>;

    /// Records for an employee within [from, to]
    async fn list(
        &self,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<AttendanceResponse>>;

    /// Admin correction of a day's status
    async fn correct_status(
        &self,
        attendance_id: Uuid,
        status: AttendanceStatus,
    ) -> AppResult<AttendanceResponse>;

    async fn add_holiday(&self, date: NaiveDate, name: String) -> AppResult<Holiday>;

    async fn remove_holiday(&self, id: Uuid) -> AppResult<()>;

    async fn list_holidays(&self) -> AppResult<Vec<Holiday>>;
}

/// Concrete implementation of AttendanceService using Unit of Work.
pub struct AttendanceManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> AttendanceManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> AttendanceService for AttendanceManager<U> {
    async fn check_in(&self, employee_id: Uuid) -> AppResult<AttendanceResponse> {
        self.uow
            .employees()
            .find_by_id(employee_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let now = Utc::now();
        let today = now.date_naive();

        if let Some(existing) = self
            .uow
            .attendance()
            .find_by_employee_and_date(employee_id, today)
            .await?
        {
            let message = if existing.check_in.is_some() {
                "Already checked in today"
            } else {
                "Attendance for today is already recorded"
            };
            return Err(AppError::bad_request(message));
        }

        // Leave beats holiday beats weekend beats plain presence
        let on_leave = self
            .uow
            .leave_requests()
            .find_approved_covering(employee_id, today)
            .await?
            .is_some();
        let is_holiday = self.uow.holidays().find_by_date(today).await?.is_some();
        let status = check_in_status(today, on_leave, is_holiday);

        let record = self
            .uow
            .attendance()
            .insert_check_in(employee_id, today, now, status)
            .await?;

        Ok(AttendanceResponse::from(record))
    }

    async fn check_out(&self, employee_id: Uuid) -> AppResult<AttendanceResponse> {
        let now = Utc::now();
        let today = now.date_naive();

        let record = self
            .uow
            .attendance()
            .find_by_employee_and_date(employee_id, today)
            .await?
            .ok_or_else(|| AppError::bad_request("No check-in recorded for today"))?;

        let check_in = record
            .check_in
            .ok_or_else(|| AppError::bad_request("No check-in recorded for today"))?;

        if record.check_out.is_some() {
            return Err(AppError::bad_request("Already checked out today"));
        }

        let work_hours = compute_work_hours(check_in, now);
        let record = self
            .uow
            .attendance()
            .set_check_out(record.id, now, work_hours)
            .await?;

        Ok(AttendanceResponse::from(record))
    }

    async fn today(&self, employee_id: Uuid) -> AppResult<Option<AttendanceResponse>> {
        let today = Utc::now().date_naive();
        let record = self
            .uow
            .attendance()
            .find_by_employee_and_date(employee_id, today)
            .await?;

        Ok(record.map(AttendanceResponse::from))
    }

    async fn list(
        &self,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<AttendanceResponse>> {
        if to < from {
            return Err(AppError::bad_request("Invalid date range"));
        }

        let records = self
            .uow
            .attendance()
            .list_for_employee(employee_id, from, to)
            .await?;

        Ok(records.into_iter().map(AttendanceResponse::from).collect())
    }

    async fn correct_status(
        &self,
        attendance_id: Uuid,
        status: AttendanceStatus,
    ) -> AppResult<AttendanceResponse> {
        let record = self.uow.attendance().set_status(attendance_id, status).await?;
        Ok(AttendanceResponse::from(record))
    }

    async fn add_holiday(&self, date: NaiveDate, name: String) -> AppResult<Holiday> {
        if self.uow.holidays().find_by_date(date).await?.is_some() {
            return Err(AppError::conflict("Holiday"));
        }

        self.uow.holidays().create(date, name).await
    }

    async fn remove_holiday(&self, id: Uuid) -> AppResult<()> {
        self.uow.holidays().delete(id).await
    }

    async fn list_holidays(&self) -> AppResult<Vec<Holiday>> {
        self.uow.holidays().list().await
    }
}
