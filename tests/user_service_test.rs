//! User service tests over mock repositories.

mod common;

use std::sync::Arc;

use mockall::predicate::eq;
use uuid::Uuid;

use attendly::domain::{AttendanceStatus, LeaveStatus, Role};
use attendly::errors::AppError;
use attendly::infra::repositories::{
    MockAttendanceRepository, MockDepartmentRepository, MockEmployeeRepository,
    MockLeaveRequestRepository, MockUserRepository,
};
use attendly::services::{UserManager, UserService};

use common::{test_user, TestUnitOfWork};

#[tokio::test]
async fn test_get_user_success() {
    let user_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .with(eq(user_id))
        .returning(move |id| Ok(Some(test_user(id, Role::Employee))));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..Default::default()
    };
    let service = UserManager::new(Arc::new(uow));

    let result = service.get_user(user_id).await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap().id, user_id);
}

#[tokio::test]
async fn test_get_user_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..Default::default()
    };
    let service = UserManager::new(Arc::new(uow));

    let result = service.get_user(Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_list_users_success() {
    let mut users = MockUserRepository::new();
    users.expect_list().returning(|| {
        Ok(vec![
            test_user(Uuid::new_v4(), Role::Employee),
            test_user(Uuid::new_v4(), Role::Manager),
        ])
    });

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..Default::default()
    };
    let service = UserManager::new(Arc::new(uow));

    let result = service.list_users().await;

    assert_eq!(result.unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_user_role() {
    let user_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users
        .expect_update()
        .returning(|id, _, role, _| {
            let mut user = test_user(id, Role::Employee);
            if let Some(role) = role {
                user.role = role;
            }
            Ok(user)
        });

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..Default::default()
    };
    let service = UserManager::new(Arc::new(uow));

    let user = service
        .update_user(user_id, None, Some(Role::Manager), None)
        .await
        .unwrap();

    assert_eq!(user.role, Role::Manager);
}

#[tokio::test]
async fn test_delete_and_restore_user() {
    let user_id = Uuid::new_v4();

    let mut users = MockUserRepository::new();
    users.expect_delete().returning(|_| Ok(()));
    users
        .expect_restore()
        .returning(move |id| Ok(test_user(id, Role::Employee)));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..Default::default()
    };
    let service = UserManager::new(Arc::new(uow));

    assert!(service.delete_user(user_id).await.is_ok());
    assert_eq!(service.restore_user(user_id).await.unwrap().id, user_id);
}

#[tokio::test]
async fn test_dashboard_stats_aggregates_counters() {
    let mut users = MockUserRepository::new();
    users.expect_count().returning(|| Ok(12));

    let mut employees = MockEmployeeRepository::new();
    employees.expect_count().returning(|| Ok(10));

    let mut departments = MockDepartmentRepository::new();
    departments.expect_count().returning(|| Ok(3));

    let mut attendance = MockAttendanceRepository::new();
    attendance
        .expect_count_for_date()
        .withf(|_, status| *status == AttendanceStatus::Present)
        .returning(|_, _| Ok(8));

    let mut leave_requests = MockLeaveRequestRepository::new();
    leave_requests
        .expect_count_by_status()
        .with(eq(LeaveStatus::Pending))
        .returning(|_| Ok(2));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        employees: Arc::new(employees),
        departments: Arc::new(departments),
        attendance: Arc::new(attendance),
        leave_requests: Arc::new(leave_requests),
        ..Default::default()
    };
    let service = UserManager::new(Arc::new(uow));

    let stats = service.dashboard_stats().await.unwrap();

    assert_eq!(stats.total_users, 12);
    assert_eq!(stats.total_employees, 10);
    assert_eq!(stats.total_departments, 3);
    assert_eq!(stats.present_today, 8);
    assert_eq!(stats.pending_leave_requests, 2);
}
