//! Notification service tests over mock repositories.

mod common;

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::eq;
use uuid::Uuid;

use attendly::domain::{Notification, NotificationRecipient, Role};
use attendly::errors::AppError;
use attendly::infra::repositories::{
    MockDepartmentRepository, MockEmployeeRepository, MockNotificationRepository,
    MockUserRepository,
};
use attendly::services::{Audience, NotificationService, Notifier};

use common::{test_department, test_employee, test_user, TestUnitOfWork};

fn notification(id: Uuid, sender_id: Uuid) -> Notification {
    Notification {
        id,
        title: "Office closed".to_string(),
        message: "Closed on Friday".to_string(),
        sender_id,
        expires_at: None,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn department_audience_fans_out_to_its_employees() {
    let department_id = Uuid::new_v4();
    let sender_id = Uuid::new_v4();
    let member_user_ids = [Uuid::new_v4(), Uuid::new_v4()];

    let mut departments = MockDepartmentRepository::new();
    departments
        .expect_find_by_id()
        .with(eq(department_id))
        .returning(|id| Ok(Some(test_department(id, "Engineering"))));

    let mut employees = MockEmployeeRepository::new();
    let users = member_user_ids;
    employees.expect_list_by_department().returning(move |department_id| {
        Ok(users
            .iter()
            .map(|user_id| {
                let mut employee = test_employee(Uuid::new_v4(), *user_id);
                employee.department_id = department_id;
                employee
            })
            .collect())
    });

    let mut notifications = MockNotificationRepository::new();
    notifications
        .expect_create()
        .withf(move |_, _, _, recipients, _| recipients.len() == 2)
        .returning(|title, message, sender_id, _, expires_at| {
            Ok(Notification {
                id: Uuid::new_v4(),
                title,
                message,
                sender_id,
                expires_at,
                created_at: Utc::now(),
            })
        });

    let uow = TestUnitOfWork {
        departments: Arc::new(departments),
        employees: Arc::new(employees),
        notifications: Arc::new(notifications),
        ..Default::default()
    };
    let service = Notifier::new(Arc::new(uow));

    let result = service
        .create(
            "Office closed".to_string(),
            "Closed on Friday".to_string(),
            sender_id,
            Audience::Department(department_id),
            None,
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn empty_audience_is_rejected() {
    let mut users = MockUserRepository::new();
    users.expect_list().returning(|| Ok(vec![]));

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        ..Default::default()
    };
    let service = Notifier::new(Arc::new(uow));

    let result = service
        .create(
            "t".to_string(),
            "m".to_string(),
            Uuid::new_v4(),
            Audience::Everyone,
            None,
        )
        .await;

    assert!(matches!(result.unwrap_err(), AppError::BadRequest(_)));
}

#[tokio::test]
async fn broadcast_skips_deactivated_accounts() {
    let mut users = MockUserRepository::new();
    users.expect_list().returning(|| {
        let active = test_user(Uuid::new_v4(), Role::Employee);
        let mut disabled = test_user(Uuid::new_v4(), Role::Employee);
        disabled.active = false;
        Ok(vec![active, disabled])
    });

    let mut notifications = MockNotificationRepository::new();
    notifications
        .expect_create()
        .withf(|_, _, _, recipients, _| recipients.len() == 1)
        .returning(|title, message, sender_id, _, expires_at| {
            Ok(Notification {
                id: Uuid::new_v4(),
                title,
                message,
                sender_id,
                expires_at,
                created_at: Utc::now(),
            })
        });

    let uow = TestUnitOfWork {
        users: Arc::new(users),
        notifications: Arc::new(notifications),
        ..Default::default()
    };
    let service = Notifier::new(Arc::new(uow));

    let result = service
        .create(
            "t".to_string(),
            "m".to_string(),
            Uuid::new_v4(),
            Audience::Everyone,
            None,
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn listing_returns_the_recipient_view() {
    let user_id = Uuid::new_v4();
    let notification_id = Uuid::new_v4();

    let mut notifications = MockNotificationRepository::new();
    notifications.expect_list_for_user().returning(move |user_id, _| {
        let n = notification(notification_id, Uuid::new_v4());
        let recipient = NotificationRecipient {
            notification_id,
            user_id,
            read: false,
            read_at: None,
        };
        Ok(vec![(n, recipient)])
    });

    let uow = TestUnitOfWork {
        notifications: Arc::new(notifications),
        ..Default::default()
    };
    let service = Notifier::new(Arc::new(uow));

    let list = service.list_for_user(user_id).await.unwrap();

    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, notification_id);
    assert!(!list[0].read);
}

#[tokio::test]
async fn mark_read_for_non_recipient_is_not_found() {
    let mut notifications = MockNotificationRepository::new();
    notifications
        .expect_mark_read()
        .returning(|_, _| Err(AppError::NotFound));

    let uow = TestUnitOfWork {
        notifications: Arc::new(notifications),
        ..Default::default()
    };
    let service = Notifier::new(Arc::new(uow));

    let result = service.mark_read(Uuid::new_v4(), Uuid::new_v4()).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}
