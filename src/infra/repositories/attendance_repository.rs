//! Attendance repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::attendance::{self, ActiveModel, Entity as AttendanceEntity};
use crate::domain::{AttendanceRecord, AttendanceStatus};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Attendance repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AttendanceRecord>>;

    /// The at-most-one row for (employee, date)
    async fn find_by_employee_and_date(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<AttendanceRecord>>;

    /// Insert a fresh check-in row
    async fn insert_check_in(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
        check_in: DateTime<Utc>,
        status: AttendanceStatus,
    ) -> AppResult<AttendanceRecord>;

    /// Stamp the check-out time and derived work hours
    async fn set_check_out(
        &self,
        id: Uuid,
        check_out: DateTime<Utc>,
        work_hours: f64,
    ) -> AppResult<AttendanceRecord>;

    /// Admin correction of a day's status
    async fn set_status(&self, id: Uuid, status: AttendanceStatus) -> AppResult<AttendanceRecord>;

    /// Records for one employee within [from, to]
    async fn list_for_employee(
        &self,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<AttendanceRecord>>;

    /// Records for a set of employees within [from, to] (report queries)
    async fn list_for_employees(
        &self,
        employee_ids: Vec<Uuid>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<AttendanceRecord>>;

    /// Number of records on a date with a given status (dashboard stats)
    async fn count_for_date(&self, date: NaiveDate, status: AttendanceStatus) -> AppResult<u64>;
}

/// Concrete implementation of AttendanceRepository
pub struct AttendanceStore {
    db: DatabaseConnection,
}

impl AttendanceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AttendanceRepository for AttendanceStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<AttendanceRecord>> {
        let result = AttendanceEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(AttendanceRecord::from))
    }

    async fn find_by_employee_and_date(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<AttendanceRecord>> {
        let result = AttendanceEntity::find()
            .filter(attendance::Column::EmployeeId.eq(employee_id))
            .filter(attendance::Column::Date.eq(date))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(AttendanceRecord::from))
    }

    async fn insert_check_in(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
        check_in: DateTime<Utc>,
        status: AttendanceStatus,
    ) -> AppResult<AttendanceRecord> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(employee_id),
            date: Set(date),
            check_in: Set(Some(check_in)),
            check_out: Set(None),
            status: Set(status.as_str().to_string()),
            work_hours: Set(None),
            leave_request_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(AttendanceRecord::from(model))
    }

    async fn set_check_out(
        &self,
        id: Uuid,
        check_out: DateTime<Utc>,
        work_hours: f64,
    ) -> AppResult<AttendanceRecord> {
        let model = AttendanceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active_model: ActiveModel = model.into();
        active_model.check_out = Set(Some(check_out));
        active_model.work_hours = Set(Some(work_hours));
        active_model.updated_at = Set(Utc::now());

        let model = active_model.update(&self.db).await.map_err(AppError::from)?;
        Ok(AttendanceRecord::from(model))
    }

    async fn set_status(&self, id: Uuid, status: AttendanceStatus) -> AppResult<AttendanceRecord> {
        let model = AttendanceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active_model: ActiveModel = model.into();
        active_model.status = Set(status.as_str().to_string());
        active_model.updated_at = Set(Utc::now());

        let model = active_model.update(&self.db).await.map_err(AppError::from)?;
        Ok(AttendanceRecord::from(model))
    }

    async fn list_for_employee(
        &self,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<AttendanceRecord>> {
        let models = AttendanceEntity::find()
            .filter(attendance::Column::EmployeeId.eq(employee_id))
            .filter(attendance::Column::Date.gte(from))
            .filter(attendance::Column::Date.lte(to))
            .order_by_asc(attendance::Column::Date)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(AttendanceRecord::from).collect())
    }

    async fn list_for_employees(
        &self,
        employee_ids: Vec<Uuid>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<AttendanceRecord>> {
        if employee_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = AttendanceEntity::find()
            .filter(attendance::Column::EmployeeId.is_in(employee_ids))
            .filter(attendance::Column::Date.gte(from))
            .filter(attendance::Column::Date.lte(to))
            .order_by_asc(attendance::Column::Date)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(AttendanceRecord::from).collect())
    }

    async fn count_for_date(&self, date: NaiveDate, status: AttendanceStatus) -> AppResult<u64> {
        let count = AttendanceEntity::find()
            .filter(attendance::Column::Date.eq(date))
            .filter(attendance::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count)
    }
}
