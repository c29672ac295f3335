//! Leave service tests over mock repositories.
//!
//! The transactional counter arithmetic is covered by the domain unit
//! tests; these exercise the validation and authorization that runs before
//! any transaction begins.

mod common;

use std::sync::Arc;

use mockall::predicate::eq;
use uuid::Uuid;

use attendly::domain::LeaveStatus;
use attendly::errors::AppError;
use attendly::infra::repositories::{
    MockEmployeeRepository, MockLeaveRequestRepository, MockLeaveTypeRepository,
};
use attendly::services::{LeaveCoordinator, LeaveService, NewLeaveRequest};

use common::{date, test_employee, test_leave_request, test_leave_type, TestUnitOfWork};

fn new_request(employee_id: Uuid, leave_type_id: Uuid) -> NewLeaveRequest {
    NewLeaveRequest {
        employee_id,
        leave_type_id,
        start_date: date(2024, 3, 4),
        end_date: date(2024, 3, 8),
        reason: None,
        duration: None,
    }
}

#[tokio::test]
async fn create_fails_for_unknown_employee() {
    let mut employees = MockEmployeeRepository::new();
    employees.expect_find_by_id().returning(|_| Ok(None));

    let uow = TestUnitOfWork {
        employees: Arc::new(employees),
        ..Default::default()
    };
    let service = LeaveCoordinator::new(Arc::new(uow));

    let result = service
        .create_request(new_request(Uuid::new_v4(), Uuid::new_v4()))
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn create_fails_for_inactive_leave_type() {
    let employee_id = Uuid::new_v4();
    let leave_type_id = Uuid::new_v4();

    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_by_id()
        .with(eq(employee_id))
        .returning(move |id| Ok(Some(test_employee(id, Uuid::new_v4()))));

    let mut leave_types = MockLeaveTypeRepository::new();
    leave_types
        .expect_find_by_id()
        .with(eq(leave_type_id))
        .returning(|id| Ok(Some(test_leave_type(id, false))));

    let uow = TestUnitOfWork {
        employees: Arc::new(employees),
        leave_types: Arc::new(leave_types),
        ..Default::default()
    };
    let service = LeaveCoordinator::new(Arc::new(uow));

    let result = service.create_request(new_request(employee_id, leave_type_id)).await;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("no longer available")));
}

#[tokio::test]
async fn create_rejects_duration_mismatch() {
    let employee_id = Uuid::new_v4();
    let leave_type_id = Uuid::new_v4();

    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_employee(id, Uuid::new_v4()))));

    let mut leave_types = MockLeaveTypeRepository::new();
    leave_types
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_leave_type(id, true))));

    let uow = TestUnitOfWork {
        employees: Arc::new(employees),
        leave_types: Arc::new(leave_types),
        ..Default::default()
    };
    let service = LeaveCoordinator::new(Arc::new(uow));

    // The window spans 5 days but the client claims 3
    let mut request = new_request(employee_id, leave_type_id);
    request.duration = Some(3);
    let result = service.create_request(request).await;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("Duration mismatch")));
}

#[tokio::test]
async fn create_rejects_inverted_window() {
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_employee(id, Uuid::new_v4()))));

    let mut leave_types = MockLeaveTypeRepository::new();
    leave_types
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_leave_type(id, true))));

    let uow = TestUnitOfWork {
        employees: Arc::new(employees),
        leave_types: Arc::new(leave_types),
        ..Default::default()
    };
    let service = LeaveCoordinator::new(Arc::new(uow));

    let mut request = new_request(Uuid::new_v4(), Uuid::new_v4());
    request.start_date = date(2024, 3, 8);
    request.end_date = date(2024, 3, 4);
    let result = service.create_request(request).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn create_rejects_overlapping_window() {
    let employee_id = Uuid::new_v4();
    let leave_type_id = Uuid::new_v4();

    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_by_id()
        .returning(move |id| Ok(Some(test_employee(id, Uuid::new_v4()))));

    let mut leave_types = MockLeaveTypeRepository::new();
    leave_types
        .expect_find_by_id()
        .returning(|id| Ok(Some(test_leave_type(id, true))));

    let mut leave_requests = MockLeaveRequestRepository::new();
    leave_requests.expect_list_overlapping().returning(|employee_id, start, end| {
        Ok(vec![test_leave_request(
            Uuid::new_v4(),
            employee_id,
            LeaveStatus::Pending,
            start,
            end,
        )])
    });

    let uow = TestUnitOfWork {
        employees: Arc::new(employees),
        leave_types: Arc::new(leave_types),
        leave_requests: Arc::new(leave_requests),
        ..Default::default()
    };
    let service = LeaveCoordinator::new(Arc::new(uow));

    let result = service.create_request(new_request(employee_id, leave_type_id)).await;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("overlapping")));
}

#[tokio::test]
async fn approve_own_request_is_forbidden() {
    let approver_user_id = Uuid::new_v4();
    let employee_id = Uuid::new_v4();
    let request_id = Uuid::new_v4();

    let mut leave_requests = MockLeaveRequestRepository::new();
    leave_requests.expect_find_by_id().with(eq(request_id)).returning(move |id| {
        Ok(Some(test_leave_request(
            id,
            employee_id,
            LeaveStatus::Pending,
            date(2024, 3, 4),
            date(2024, 3, 8),
        )))
    });

    // The approver's own employee profile is the requester
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_by_user_id()
        .with(eq(approver_user_id))
        .returning(move |user_id| Ok(Some(test_employee(employee_id, user_id))));

    let uow = TestUnitOfWork {
        employees: Arc::new(employees),
        leave_requests: Arc::new(leave_requests),
        ..Default::default()
    };
    let service = LeaveCoordinator::new(Arc::new(uow));

    let result = service.approve_request(request_id, approver_user_id).await;

    assert!(matches!(result.unwrap_err(), AppError::Forbidden));
}

#[tokio::test]
async fn approve_missing_request_is_not_found() {
    let mut leave_requests = MockLeaveRequestRepository::new();
    leave_requests.expect_find_by_id().returning(|_| Ok(None));

    let uow = TestUnitOfWork {
        leave_requests: Arc::new(leave_requests),
        ..Default::default()
    };
    let service = LeaveCoordinator::new(Arc::new(uow));

    let result = service.approve_request(Uuid::new_v4(), Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn list_requests_filters_by_status_for_employee() {
    let employee_id = Uuid::new_v4();

    let mut leave_requests = MockLeaveRequestRepository::new();
    leave_requests
        .expect_list_for_employee()
        .with(eq(employee_id))
        .returning(|employee_id| {
            Ok(vec![
                test_leave_request(
                    Uuid::new_v4(),
                    employee_id,
                    LeaveStatus::Pending,
                    date(2024, 3, 4),
                    date(2024, 3, 8),
                ),
                test_leave_request(
                    Uuid::new_v4(),
                    employee_id,
                    LeaveStatus::Rejected,
                    date(2024, 4, 1),
                    date(2024, 4, 2),
                ),
            ])
        });

    let uow = TestUnitOfWork {
        leave_requests: Arc::new(leave_requests),
        ..Default::default()
    };
    let service = LeaveCoordinator::new(Arc::new(uow));

    let requests = service
        .list_requests(Some(employee_id), Some(LeaveStatus::Pending))
        .await
        .unwrap();

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].status, LeaveStatus::Pending);
}

#[tokio::test]
async fn create_leave_type_rejects_duplicate_code() {
    let mut leave_types = MockLeaveTypeRepository::new();
    leave_types
        .expect_find_by_code()
        .returning(|_| Ok(Some(test_leave_type(Uuid::new_v4(), true))));

    let uow = TestUnitOfWork {
        leave_types: Arc::new(leave_types),
        ..Default::default()
    };
    let service = LeaveCoordinator::new(Arc::new(uow));

    let result = service
        .create_leave_type("ANNUAL".to_string(), "Annual Leave".to_string(), 20)
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn create_leave_type_rejects_negative_quota() {
    let uow = TestUnitOfWork::default();
    let service = LeaveCoordinator::new(Arc::new(uow));

    let result = service
        .create_leave_type("ANNUAL".to_string(), "Annual Leave".to_string(), -1)
        .await;

    assert!(result.is_err());
}
