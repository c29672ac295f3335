//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and transaction demarcation. Every leave
//! state transition (create, approve, reject, cancel) runs inside exactly
//! one transaction obtained here, so the request row, the balance counters,
//! and the stamped attendance days commit or roll back together.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::{
    AttendanceRepository, AttendanceStore, DepartmentRepository, DepartmentStore,
    EmployeeRepository, EmployeeStore, HolidayRepository, HolidayStore, LeaveBalanceRepository,
    LeaveBalanceStore, LeaveRequestRepository, LeaveRequestStore, LeaveTypeRepository,
    LeaveTypeStore, NotificationRepository, NotificationStore, UserRepository, UserStore,
};
use crate::domain::{AttendanceStatus, LeaveBalance, LeaveRequest, LeaveStatus};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction
/// management. Note: the generic `transaction` method makes this trait
/// non-mockable; mock at the repository level or use integration tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn departments(&self) -> Arc<dyn DepartmentRepository>;

    fn employees(&self) -> Arc<dyn EmployeeRepository>;

    fn attendance(&self) -> Arc<dyn AttendanceRepository>;

    fn leave_types(&self) -> Arc<dyn LeaveTypeRepository>;

    fn leave_balances(&self) -> Arc<dyn LeaveBalanceRepository>;

    fn leave_requests(&self) -> Arc<dyn LeaveRequestRepository>;

    fn notifications(&self) -> Arc<dyn NotificationRepository>;

    fn holidays(&self) -> Arc<dyn HolidayRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is automatically committed on success or rolled back
    /// on error. Uses ReadCommitted isolation for balanced
    /// consistency/performance.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;

    /// Execute a closure within a transaction with serializable isolation.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// Only the repositories the leave lifecycle touches are exposed here;
/// everything else uses the connection-scoped stores.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Leave request writes for this transaction
    pub fn leave_requests(&self) -> TxLeaveRequestRepository<'_> {
        TxLeaveRequestRepository { txn: self.txn }
    }

    /// Leave balance writes for this transaction
    pub fn leave_balances(&self) -> TxLeaveBalanceRepository<'_> {
        TxLeaveBalanceRepository { txn: self.txn }
    }

    /// Attendance writes for this transaction
    pub fn attendance(&self) -> TxAttendanceRepository<'_> {
        TxAttendanceRepository { txn: self.txn }
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    department_repo: Arc<DepartmentStore>,
    employee_repo: Arc<EmployeeStore>,
    attendance_repo: Arc<AttendanceStore>,
    leave_type_repo: Arc<LeaveTypeStore>,
    leave_balance_repo: Arc<LeaveBalanceStore>,
    leave_request_repo: Arc<LeaveRequestStore>,
    notification_repo: Arc<NotificationStore>,
    holiday_repo: Arc<HolidayStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            department_repo: Arc::new(DepartmentStore::new(db.clone())),
            employee_repo: Arc::new(EmployeeStore::new(db.clone())),
            attendance_repo: Arc::new(AttendanceStore::new(db.clone())),
            leave_type_repo: Arc::new(LeaveTypeStore::new(db.clone())),
            leave_balance_repo: Arc::new(LeaveBalanceStore::new(db.clone())),
            leave_request_repo: Arc::new(LeaveRequestStore::new(db.clone())),
            notification_repo: Arc::new(NotificationStore::new(db.clone())),
            holiday_repo: Arc::new(HolidayStore::new(db.clone())),
            db,
        }
    }

    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn departments(&self) -> Arc<dyn DepartmentRepository> {
        self.department_repo.clone()
    }

    fn employees(&self) -> Arc<dyn EmployeeRepository> {
        self.employee_repo.clone()
    }

    fn attendance(&self) -> Arc<dyn AttendanceRepository> {
        self.attendance_repo.clone()
    }

    fn leave_types(&self) -> Arc<dyn LeaveTypeRepository> {
        self.leave_type_repo.clone()
    }

    fn leave_balances(&self) -> Arc<dyn LeaveBalanceRepository> {
        self.leave_balance_repo.clone()
    }

    fn leave_requests(&self) -> Arc<dyn LeaveRequestRepository> {
        self.leave_request_repo.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationRepository> {
        self.notification_repo.clone()
    }

    fn holidays(&self) -> Arc<dyn HolidayRepository> {
        self.holiday_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f).await
    }
}

/// Transaction-aware leave request repository.
pub struct TxLeaveRequestRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxLeaveRequestRepository<'a> {
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LeaveRequest>> {
        use super::repositories::entities::leave_request::Entity as LeaveRequestEntity;

        let result = LeaveRequestEntity::find_by_id(id)
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(LeaveRequest::from))
    }

    pub async fn insert(
        &self,
        employee_id: Uuid,
        leave_type_id: Uuid,
        start_date: chrono::NaiveDate,
        end_date: chrono::NaiveDate,
        duration: i32,
        reason: Option<String>,
    ) -> AppResult<LeaveRequest> {
        use super::repositories::entities::leave_request::ActiveModel;

        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(employee_id),
            leave_type_id: Set(leave_type_id),
            start_date: Set(start_date),
            end_date: Set(end_date),
            duration: Set(duration),
            reason: Set(reason),
            status: Set(LeaveStatus::Pending.as_str().to_string()),
            approver_id: Set(None),
            rejection_reason: Set(None),
            decided_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(LeaveRequest::from(model))
    }

    /// Write a status transition, stamping approver and decision time.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: LeaveStatus,
        approver_id: Option<Uuid>,
        rejection_reason: Option<String>,
    ) -> AppResult<LeaveRequest> {
        use super::repositories::entities::leave_request::{ActiveModel, Entity as LeaveRequestEntity};

        let model = LeaveRequestEntity::find_by_id(id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let now = Utc::now();
        let mut active_model: ActiveModel = model.into();
        active_model.status = Set(status.as_str().to_string());
        if approver_id.is_some() {
            active_model.approver_id = Set(approver_id);
        }
        if rejection_reason.is_some() {
            active_model.rejection_reason = Set(rejection_reason);
        }
        active_model.decided_at = Set(Some(now));
        active_model.updated_at = Set(now);

        let model = active_model.update(self.txn).await.map_err(AppError::from)?;
        Ok(LeaveRequest::from(model))
    }
}

/// Transaction-aware leave balance repository.
pub struct TxLeaveBalanceRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxLeaveBalanceRepository<'a> {
    pub async fn find(
        &self,
        employee_id: Uuid,
        leave_type_id: Uuid,
        year: i32,
    ) -> AppResult<Option<LeaveBalance>> {
        use super::repositories::entities::leave_balance::{self, Entity as LeaveBalanceEntity};

        let result = LeaveBalanceEntity::find()
            .filter(leave_balance::Column::EmployeeId.eq(employee_id))
            .filter(leave_balance::Column::LeaveTypeId.eq(leave_type_id))
            .filter(leave_balance::Column::Year.eq(year))
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(LeaveBalance::from))
    }

    /// Seed a fresh balance row from the leave type's annual quota.
    pub async fn create(
        &self,
        employee_id: Uuid,
        leave_type_id: Uuid,
        year: i32,
        allocated: i32,
    ) -> AppResult<LeaveBalance> {
        use super::repositories::entities::leave_balance::ActiveModel;

        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(employee_id),
            leave_type_id: Set(leave_type_id),
            year: Set(year),
            allocated: Set(allocated),
            used: Set(0),
            pending: Set(0),
            carried_forward: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(self.txn).await.map_err(AppError::from)?;
        Ok(LeaveBalance::from(model))
    }

    /// Persist counter changes made on a domain balance.
    pub async fn save(&self, balance: &LeaveBalance) -> AppResult<()> {
        use super::repositories::entities::leave_balance::{ActiveModel, Entity as LeaveBalanceEntity};

        let model = LeaveBalanceEntity::find_by_id(balance.id)
            .one(self.txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active_model: ActiveModel = model.into();
        active_model.used = Set(balance.used);
        active_model.pending = Set(balance.pending);
        active_model.carried_forward = Set(balance.carried_forward);
        active_model.updated_at = Set(Utc::now());

        active_model.update(self.txn).await.map_err(AppError::from)?;
        Ok(())
    }
}

/// Transaction-aware attendance repository.
pub struct TxAttendanceRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxAttendanceRepository<'a> {
    /// Upsert the (employee, date) row as a LEAVE day linked to a request.
    pub async fn stamp_leave_day(
        &self,
        employee_id: Uuid,
        date: chrono::NaiveDate,
        leave_request_id: Uuid,
    ) -> AppResult<()> {
        use super::repositories::entities::attendance::{self, ActiveModel, Entity as AttendanceEntity};

        let now = Utc::now();
        let existing = AttendanceEntity::find()
            .filter(attendance::Column::EmployeeId.eq(employee_id))
            .filter(attendance::Column::Date.eq(date))
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        match existing {
            Some(model) => {
                let mut active_model: ActiveModel = model.into();
                active_model.status = Set(AttendanceStatus::Leave.as_str().to_string());
                active_model.leave_request_id = Set(Some(leave_request_id));
                active_model.updated_at = Set(now);
                active_model.update(self.txn).await.map_err(AppError::from)?;
            }
            None => {
                let active_model = ActiveModel {
                    id: Set(Uuid::new_v4()),
                    employee_id: Set(employee_id),
                    date: Set(date),
                    check_in: Set(None),
                    check_out: Set(None),
                    status: Set(AttendanceStatus::Leave.as_str().to_string()),
                    work_hours: Set(None),
                    leave_request_id: Set(Some(leave_request_id)),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                active_model.insert(self.txn).await.map_err(AppError::from)?;
            }
        }

        Ok(())
    }

    /// Revert every row stamped by the given request back to ABSENT and
    /// clear the link. Returns the number of rows reverted.
    pub async fn revert_leave_days(&self, leave_request_id: Uuid) -> AppResult<u64> {
        use super::repositories::entities::attendance::{self, ActiveModel, Entity as AttendanceEntity};

        let models = AttendanceEntity::find()
            .filter(attendance::Column::LeaveRequestId.eq(leave_request_id))
            .all(self.txn)
            .await
            .map_err(AppError::from)?;

        let count = models.len() as u64;
        let now = Utc::now();
        for model in models {
            let mut active_model: ActiveModel = model.into();
            active_model.status = Set(AttendanceStatus::Absent.as_str().to_string());
            active_model.leave_request_id = Set(None);
            active_model.updated_at = Set(now);
            active_model.update(self.txn).await.map_err(AppError::from)?;
        }

        Ok(count)
    }
}
