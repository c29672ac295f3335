//! Leave repositories: types, balances, and requests.
//!
//! Balance and request mutations that must stay consistent run through the
//! Unit of Work transaction context instead of these connection-scoped
//! stores.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::leave_balance::{self, Entity as LeaveBalanceEntity};
use super::entities::leave_request::{self, Entity as LeaveRequestEntity};
use super::entities::leave_type::{self, ActiveModel as LeaveTypeActiveModel, Entity as LeaveTypeEntity};
use crate::domain::{LeaveBalance, LeaveRequest, LeaveStatus, LeaveType};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Leave type catalog repository.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LeaveTypeRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LeaveType>>;

    async fn find_by_code(&self, code: &str) -> AppResult<Option<LeaveType>>;

    async fn create(&self, code: String, name: String, default_annual_quota: i32)
        -> AppResult<LeaveType>;

    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        default_annual_quota: Option<i32>,
        active: Option<bool>,
    ) -> AppResult<LeaveType>;

    /// Active types only unless `include_inactive`
    async fn list(&self, include_inactive: bool) -> AppResult<Vec<LeaveType>>;
}

/// Read access to leave balances (mutations go through the Unit of Work).
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LeaveBalanceRepository: Send + Sync {
    async fn find(
        &self,
        employee_id: Uuid,
        leave_type_id: Uuid,
        year: i32,
    ) -> AppResult<Option<LeaveBalance>>;

    async fn list_for_employee(&self, employee_id: Uuid, year: i32)
        -> AppResult<Vec<LeaveBalance>>;
}

/// Read access to leave requests (transitions go through the Unit of Work).
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait LeaveRequestRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LeaveRequest>>;

    async fn list_for_employee(&self, employee_id: Uuid) -> AppResult<Vec<LeaveRequest>>;

    async fn list_all(&self, status: Option<LeaveStatus>) -> AppResult<Vec<LeaveRequest>>;

    /// PENDING or APPROVED requests for the employee intersecting
    /// [start, end] (overlap validation)
    async fn list_overlapping(
        &self,
        employee_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<LeaveRequest>>;

    /// An APPROVED request covering `date`, if any (check-in status lookup)
    async fn find_approved_covering(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<LeaveRequest>>;

    async fn count_by_status(&self, status: LeaveStatus) -> AppResult<u64>;
}

/// Concrete leave type store
pub struct LeaveTypeStore {
    db: DatabaseConnection,
}

impl LeaveTypeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LeaveTypeRepository for LeaveTypeStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LeaveType>> {
        let result = LeaveTypeEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(LeaveType::from))
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<LeaveType>> {
        let result = LeaveTypeEntity::find()
            .filter(leave_type::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(LeaveType::from))
    }

    async fn create(
        &self,
        code: String,
        name: String,
        default_annual_quota: i32,
    ) -> AppResult<LeaveType> {
        let now = Utc::now();
        let active_model = LeaveTypeActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(code),
            name: Set(name),
            default_annual_quota: Set(default_annual_quota),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(LeaveType::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        default_annual_quota: Option<i32>,
        active: Option<bool>,
    ) -> AppResult<LeaveType> {
        let model = LeaveTypeEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active_model: LeaveTypeActiveModel = model.into();

        if let Some(name) = name {
            active_model.name = Set(name);
        }
        if let Some(quota) = default_annual_quota {
            active_model.default_annual_quota = Set(quota);
        }
        if let Some(active) = active {
            active_model.active = Set(active);
        }
        active_model.updated_at = Set(Utc::now());

        let model = active_model.update(&self.db).await.map_err(AppError::from)?;
        Ok(LeaveType::from(model))
    }

    async fn list(&self, include_inactive: bool) -> AppResult<Vec<LeaveType>> {
        let mut query = LeaveTypeEntity::find().order_by_asc(leave_type::Column::Code);
        if !include_inactive {
            query = query.filter(leave_type::Column::Active.eq(true));
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(LeaveType::from).collect())
    }
}

/// Concrete leave balance store
pub struct LeaveBalanceStore {
    db: DatabaseConnection,
}

impl LeaveBalanceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LeaveBalanceRepository for LeaveBalanceStore {
    async fn find(
        &self,
        employee_id: Uuid,
        leave_type_id: Uuid,
        year: i32,
    ) -> AppResult<Option<LeaveBalance>> {
        let result = LeaveBalanceEntity::find()
            .filter(leave_balance::Column::EmployeeId.eq(employee_id))
            .filter(leave_balance::Column::LeaveTypeId.eq(leave_type_id))
            .filter(leave_balance::Column::Year.eq(year))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(LeaveBalance::from))
    }

    async fn list_for_employee(
        &self,
        employee_id: Uuid,
        year: i32,
    ) -> AppResult<Vec<LeaveBalance>> {
        let models = LeaveBalanceEntity::find()
            .filter(leave_balance::Column::EmployeeId.eq(employee_id))
            .filter(leave_balance::Column::Year.eq(year))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(LeaveBalance::from).collect())
    }
}

/// Concrete leave request store
pub struct LeaveRequestStore {
    db: DatabaseConnection,
}

impl LeaveRequestStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LeaveRequestRepository for LeaveRequestStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LeaveRequest>> {
        let result = LeaveRequestEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(LeaveRequest::from))
    }

    async fn list_for_employee(&self, employee_id: Uuid) -> AppResult<Vec<LeaveRequest>> {
        let models = LeaveRequestEntity::find()
            .filter(leave_request::Column::EmployeeId.eq(employee_id))
            .order_by_desc(leave_request::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(LeaveRequest::from).collect())
    }

    async fn list_all(&self, status: Option<LeaveStatus>) -> AppResult<Vec<LeaveRequest>> {
        let mut query =
            LeaveRequestEntity::find().order_by_desc(leave_request::Column::CreatedAt);
        if let Some(status) = status {
            query = query.filter(leave_request::Column::Status.eq(status.as_str()));
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(LeaveRequest::from).collect())
    }

    async fn list_overlapping(
        &self,
        employee_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<LeaveRequest>> {
        // Two windows [a, b] and [c, d] intersect iff a <= d && c <= b
        let models = LeaveRequestEntity::find()
            .filter(leave_request::Column::EmployeeId.eq(employee_id))
            .filter(
                Condition::any()
                    .add(leave_request::Column::Status.eq(LeaveStatus::Pending.as_str()))
                    .add(leave_request::Column::Status.eq(LeaveStatus::Approved.as_str())),
            )
            .filter(leave_request::Column::StartDate.lte(end))
            .filter(leave_request::Column::EndDate.gte(start))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(LeaveRequest::from).collect())
    }

    async fn find_approved_covering(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> AppResult<Option<LeaveRequest>> {
        let result = LeaveRequestEntity::find()
            .filter(leave_request::Column::EmployeeId.eq(employee_id))
            .filter(leave_request::Column::Status.eq(LeaveStatus::Approved.as_str()))
            .filter(leave_request::Column::StartDate.lte(date))
            .filter(leave_request::Column::EndDate.gte(date))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(LeaveRequest::from))
    }

    async fn count_by_status(&self, status: LeaveStatus) -> AppResult<u64> {
        let count = LeaveRequestEntity::find()
            .filter(leave_request::Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count)
    }
}
