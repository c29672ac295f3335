//! Shared test fixtures: a Unit of Work backed by mock repositories.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use attendly::domain::{
    AttendanceRecord, AttendanceStatus, Department, Employee, LeaveBalance, LeaveRequest,
    LeaveStatus, LeaveType, Role, User,
};
use attendly::errors::{AppError, AppResult};
use attendly::infra::repositories::{
    MockAttendanceRepository, MockDepartmentRepository, MockEmployeeRepository,
    MockHolidayRepository, MockLeaveBalanceRepository, MockLeaveRequestRepository,
    MockLeaveTypeRepository, MockNotificationRepository, MockUserRepository,
};
use attendly::infra::{
    AttendanceRepository, DepartmentRepository, EmployeeRepository, HolidayRepository,
    LeaveBalanceRepository, LeaveRequestRepository, LeaveTypeRepository, NotificationRepository,
    TransactionContext, UnitOfWork, UserRepository,
};

/// Unit of Work over mock repositories.
///
/// Transactions are not supported; services exercise their pre-transaction
/// validation against this, and the transactional arithmetic is covered by
/// the domain tests.
#[derive(Default)]
pub struct TestUnitOfWork {
    pub users: Arc<MockUserRepository>,
    pub departments: Arc<MockDepartmentRepository>,
    pub employees: Arc<MockEmployeeRepository>,
    pub attendance: Arc<MockAttendanceRepository>,
    pub leave_types: Arc<MockLeaveTypeRepository>,
    pub leave_balances: Arc<MockLeaveBalanceRepository>,
    pub leave_requests: Arc<MockLeaveRequestRepository>,
    pub notifications: Arc<MockNotificationRepository>,
    pub holidays: Arc<MockHolidayRepository>,
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn departments(&self) -> Arc<dyn DepartmentRepository> {
        self.departments.clone()
    }

    fn employees(&self) -> Arc<dyn EmployeeRepository> {
        self.employees.clone()
    }

    fn attendance(&self) -> Arc<dyn AttendanceRepository> {
        self.attendance.clone()
    }

    fn leave_types(&self) -> Arc<dyn LeaveTypeRepository> {
        self.leave_types.clone()
    }

    fn leave_balances(&self) -> Arc<dyn LeaveBalanceRepository> {
        self.leave_balances.clone()
    }

    fn leave_requests(&self) -> Arc<dyn LeaveRequestRepository> {
        self.leave_requests.clone()
    }

    fn notifications(&self) -> Arc<dyn NotificationRepository> {
        self.notifications.clone()
    }

    fn holidays(&self) -> Arc<dyn HolidayRepository> {
        self.holidays.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }

    async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn test_user(id: Uuid, role: Role) -> User {
    User {
        id,
        username: "jdoe".to_string(),
        email: "jdoe@example.com".to_string(),
        password_hash: "hashed".to_string(),
        full_name: "Jordan Doe".to_string(),
        role,
        active: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
}

pub fn test_employee(id: Uuid, user_id: Uuid) -> Employee {
    Employee {
        id,
        user_id,
        department_id: Uuid::new_v4(),
        employee_code: "EMP-0001".to_string(),
        designation: Some("Engineer".to_string()),
        manager_id: None,
        hire_date: date(2023, 1, 9),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_department(id: Uuid, name: &str) -> Department {
    Department {
        id,
        name: name.to_string(),
        description: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_leave_type(id: Uuid, active: bool) -> LeaveType {
    LeaveType {
        id,
        code: "ANNUAL".to_string(),
        name: "Annual Leave".to_string(),
        default_annual_quota: 20,
        active,
    }
}

pub fn test_leave_request(
    id: Uuid,
    employee_id: Uuid,
    status: LeaveStatus,
    start: NaiveDate,
    end: NaiveDate,
) -> LeaveRequest {
    LeaveRequest {
        id,
        employee_id,
        leave_type_id: Uuid::new_v4(),
        start_date: start,
        end_date: end,
        duration: (end - start).num_days() as i32 + 1,
        reason: None,
        status,
        approver_id: None,
        rejection_reason: None,
        decided_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_balance(employee_id: Uuid, leave_type_id: Uuid, allocated: i32) -> LeaveBalance {
    LeaveBalance {
        id: Uuid::new_v4(),
        employee_id,
        leave_type_id,
        year: 2024,
        allocated,
        used: 0,
        pending: 0,
        carried_forward: 0,
    }
}

pub fn test_attendance(
    employee_id: Uuid,
    day: NaiveDate,
    status: AttendanceStatus,
) -> AttendanceRecord {
    AttendanceRecord {
        id: Uuid::new_v4(),
        employee_id,
        date: day,
        check_in: None,
        check_out: None,
        status,
        work_hours: None,
        leave_request_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
