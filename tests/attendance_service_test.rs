//! Attendance service tests over mock repositories.

mod common;

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use attendly::domain::{AttendanceStatus, Holiday, LeaveStatus};
use attendly::errors::AppError;
use attendly::infra::repositories::{
    MockAttendanceRepository, MockEmployeeRepository, MockHolidayRepository,
    MockLeaveRequestRepository,
};
use attendly::services::{AttendanceManager, AttendanceService};

use common::{test_attendance, test_employee, test_leave_request, TestUnitOfWork};

fn employees_with(employee_id: Uuid) -> MockEmployeeRepository {
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find_by_id()
        .with(eq(employee_id))
        .returning(move |id| Ok(Some(test_employee(id, Uuid::new_v4()))));
    employees
}

fn no_leave() -> MockLeaveRequestRepository {
    let mut leave_requests = MockLeaveRequestRepository::new();
    leave_requests.expect_find_approved_covering().returning(|_, _| Ok(None));
    leave_requests
}

fn no_holiday() -> MockHolidayRepository {
    let mut holidays = MockHolidayRepository::new();
    holidays.expect_find_by_date().returning(|_| Ok(None));
    holidays
}

#[tokio::test]
async fn second_check_in_same_day_fails() {
    let employee_id = Uuid::new_v4();

    let mut attendance = MockAttendanceRepository::new();
    attendance.expect_find_by_employee_and_date().returning(|employee_id, day| {
        let mut record = test_attendance(employee_id, day, AttendanceStatus::Present);
        record.check_in = Some(Utc::now());
        Ok(Some(record))
    });

    let uow = TestUnitOfWork {
        employees: Arc::new(employees_with(employee_id)),
        attendance: Arc::new(attendance),
        ..Default::default()
    };
    let service = AttendanceManager::new(Arc::new(uow));

    let result = service.check_in(employee_id).await;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("Already checked in")));
}

#[tokio::test]
async fn check_in_records_present_on_a_plain_workday() {
    let employee_id = Uuid::new_v4();

    let mut attendance = MockAttendanceRepository::new();
    attendance.expect_find_by_employee_and_date().returning(|_, _| Ok(None));
    attendance
        .expect_insert_check_in()
        .returning(|employee_id, day, check_in, status| {
            let mut record = test_attendance(employee_id, day, status);
            record.check_in = Some(check_in);
            Ok(record)
        });

    let uow = TestUnitOfWork {
        employees: Arc::new(employees_with(employee_id)),
        attendance: Arc::new(attendance),
        leave_requests: Arc::new(no_leave()),
        holidays: Arc::new(no_holiday()),
        ..Default::default()
    };
    let service = AttendanceManager::new(Arc::new(uow));

    let record = service.check_in(employee_id).await.unwrap();

    // On a weekday this is PRESENT; on a weekend the weekend status wins.
    // Either way the check-in time must be stamped.
    assert!(record.check_in.is_some());
    assert!(matches!(
        record.status,
        AttendanceStatus::Present | AttendanceStatus::Weekend
    ));
}

#[tokio::test]
async fn check_in_on_approved_leave_day_is_stamped_leave() {
    let employee_id = Uuid::new_v4();

    let mut attendance = MockAttendanceRepository::new();
    attendance.expect_find_by_employee_and_date().returning(|_, _| Ok(None));
    attendance
        .expect_insert_check_in()
        .returning(|employee_id, day, check_in, status| {
            let mut record = test_attendance(employee_id, day, status);
            record.check_in = Some(check_in);
            Ok(record)
        });

    let mut leave_requests = MockLeaveRequestRepository::new();
    leave_requests.expect_find_approved_covering().returning(|employee_id, day| {
        Ok(Some(test_leave_request(
            Uuid::new_v4(),
            employee_id,
            LeaveStatus::Approved,
            day,
            day,
        )))
    });

    let uow = TestUnitOfWork {
        employees: Arc::new(employees_with(employee_id)),
        attendance: Arc::new(attendance),
        leave_requests: Arc::new(leave_requests),
        holidays: Arc::new(no_holiday()),
        ..Default::default()
    };
    let service = AttendanceManager::new(Arc::new(uow));

    let record = service.check_in(employee_id).await.unwrap();

    assert_eq!(record.status, AttendanceStatus::Leave);
}

#[tokio::test]
async fn check_in_on_holiday_is_stamped_holiday() {
    let employee_id = Uuid::new_v4();

    let mut attendance = MockAttendanceRepository::new();
    attendance.expect_find_by_employee_and_date().returning(|_, _| Ok(None));
    attendance
        .expect_insert_check_in()
        .returning(|employee_id, day, check_in, status| {
            let mut record = test_attendance(employee_id, day, status);
            record.check_in = Some(check_in);
            Ok(record)
        });

    let mut holidays = MockHolidayRepository::new();
    holidays.expect_find_by_date().returning(|day| {
        Ok(Some(Holiday {
            id: Uuid::new_v4(),
            date: day,
            name: "Founders Day".to_string(),
        }))
    });

    let uow = TestUnitOfWork {
        employees: Arc::new(employees_with(employee_id)),
        attendance: Arc::new(attendance),
        leave_requests: Arc::new(no_leave()),
        holidays: Arc::new(holidays),
        ..Default::default()
    };
    let service = AttendanceManager::new(Arc::new(uow));

    let record = service.check_in(employee_id).await.unwrap();

    assert_eq!(record.status, AttendanceStatus::Holiday);
}

#[tokio::test]
async fn check_out_without_check_in_fails() {
    let employee_id = Uuid::new_v4();

    let mut attendance = MockAttendanceRepository::new();
    attendance.expect_find_by_employee_and_date().returning(|_, _| Ok(None));

    let uow = TestUnitOfWork {
        attendance: Arc::new(attendance),
        ..Default::default()
    };
    let service = AttendanceManager::new(Arc::new(uow));

    let result = service.check_out(employee_id).await;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("No check-in")));
}

#[tokio::test]
async fn double_check_out_fails() {
    let employee_id = Uuid::new_v4();

    let mut attendance = MockAttendanceRepository::new();
    attendance.expect_find_by_employee_and_date().returning(|employee_id, day| {
        let mut record = test_attendance(employee_id, day, AttendanceStatus::Present);
        record.check_in = Some(Utc::now());
        record.check_out = Some(Utc::now());
        Ok(Some(record))
    });

    let uow = TestUnitOfWork {
        attendance: Arc::new(attendance),
        ..Default::default()
    };
    let service = AttendanceManager::new(Arc::new(uow));

    let result = service.check_out(employee_id).await;

    let err = result.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg.contains("Already checked out")));
}

#[tokio::test]
async fn check_out_stamps_time_and_hours() {
    let employee_id = Uuid::new_v4();

    let mut attendance = MockAttendanceRepository::new();
    attendance.expect_find_by_employee_and_date().returning(|employee_id, day| {
        let mut record = test_attendance(employee_id, day, AttendanceStatus::Present);
        record.check_in = Some(Utc::now() - chrono::Duration::hours(8));
        Ok(Some(record))
    });
    attendance
        .expect_set_check_out()
        .returning(|id, check_out, work_hours| {
            let mut record = test_attendance(Uuid::new_v4(), check_out.date_naive(), AttendanceStatus::Present);
            record.id = id;
            record.check_out = Some(check_out);
            record.work_hours = Some(work_hours);
            Ok(record)
        });

    let uow = TestUnitOfWork {
        attendance: Arc::new(attendance),
        ..Default::default()
    };
    let service = AttendanceManager::new(Arc::new(uow));

    let record = service.check_out(employee_id).await.unwrap();

    assert!(record.check_out.is_some());
    let hours = record.work_hours.unwrap();
    assert!((hours - 8.0).abs() < 0.1, "derived {} hours", hours);
}

#[tokio::test]
async fn listing_rejects_inverted_range() {
    let uow = TestUnitOfWork::default();
    let service = AttendanceManager::new(Arc::new(uow));

    let result = service
        .list(
            Uuid::new_v4(),
            common::date(2024, 6, 10),
            common::date(2024, 6, 1),
        )
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn duplicate_holiday_is_a_conflict() {
    let mut holidays = MockHolidayRepository::new();
    holidays.expect_find_by_date().returning(|day| {
        Ok(Some(Holiday {
            id: Uuid::new_v4(),
            date: day,
            name: "Existing".to_string(),
        }))
    });

    let uow = TestUnitOfWork {
        holidays: Arc::new(holidays),
        ..Default::default()
    };
    let service = AttendanceManager::new(Arc::new(uow));

    let result = service
        .add_holiday(common::date(2024, 12, 25), "Christmas".to_string())
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}
