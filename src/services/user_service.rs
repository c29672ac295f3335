//! User service - admin-facing account management and dashboard stats.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{AttendanceStatus, LeaveStatus, Role, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Admin dashboard counters
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_employees: u64,
    pub total_departments: u64,
    /// Employees checked in as PRESENT today
    pub present_today: u64,
    /// Leave requests awaiting a decision
    pub pending_leave_requests: u64,
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get active user by ID (excludes soft-deleted)
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// List all active users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Update user details; role and activation changes are admin-gated at
    /// the handler
    async fn update_user(
        &self,
        id: Uuid,
        full_name: Option<String>,
        role: Option<Role>,
        active: Option<bool>,
    ) -> AppResult<User>;

    /// Soft delete user (sets deleted_at timestamp)
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;

    /// Restore a soft-deleted user
    async fn restore_user(&self, id: Uuid) -> AppResult<User>;

    /// Aggregate counters for the admin dashboard
    async fn dashboard_stats(&self) -> AppResult<DashboardStats>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().list().await
    }

    async fn update_user(
        &self,
        id: Uuid,
        full_name: Option<String>,
        role: Option<Role>,
        active: Option<bool>,
    ) -> AppResult<User> {
        self.uow.users().update(id, full_name, role, active).await
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.uow.users().delete(id).await
    }

    async fn restore_user(&self, id: Uuid) -> AppResult<User> {
        self.uow.users().restore(id).await
    }

    async fn dashboard_stats(&self) -> AppResult<DashboardStats> {
        let today = Utc::now().date_naive();

        let total_users = self.uow.users().count().await?;
        let total_employees = self.uow.employees().count().await?;
        let total_departments = self.uow.departments().count().await?;
        let present_today = self
            .uow
            .attendance()
            .count_for_date(today, AttendanceStatus::Present)
            .await?;
        let pending_leave_requests = self
            .uow
            .leave_requests()
            .count_by_status(LeaveStatus::Pending)
            .await?;

        Ok(DashboardStats {
            total_users,
            total_employees,
            total_departments,
            present_today,
            pending_leave_requests,
        })
    }
}
