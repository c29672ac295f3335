//! Notification service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::NotificationResponse;
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Who a new notification is addressed to
#[derive(Debug, Clone)]
pub enum Audience {
    /// An explicit list of user ids
    Users(Vec<Uuid>),
    /// Every user with an employee profile in the department
    Department(Uuid),
    /// Every user in the system
    Everyone,
}

/// Notification service trait for dependency injection.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Create a notification; the recipient list is resolved and fixed here
    async fn create(
        &self,
        title: String,
        message: String,
        sender_id: Uuid,
        audience: Audience,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<NotificationResponse>;

    /// Unexpired notifications for the user, newest first
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<NotificationResponse>>;

    async fn unread_count(&self, user_id: Uuid) -> AppResult<u64>;

    async fn mark_read(&self, notification_id: Uuid, user_id: Uuid) -> AppResult<()>;

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<()>;

    async fn delete(&self, notification_id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of NotificationService using Unit of Work.
pub struct Notifier<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Notifier<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn resolve_audience(&self, audience: Audience) -> AppResult<Vec<Uuid>> {
        match audience {
            Audience::Users(user_ids) => Ok(user_ids),
            Audience::Department(department_id) => {
                self.uow
                    .departments()
                    .find_by_id(department_id)
                    .await?
                    .ok_or_else(|| AppError::bad_request("Department does not exist"))?;

                let employees = self
                    .uow
                    .employees()
                    .list_by_department(department_id)
                    .await?;
                Ok(employees.into_iter().map(|e| e.user_id).collect())
            }
            Audience::Everyone => {
                let users = self.uow.users().list().await?;
                Ok(users.into_iter().filter(|u| u.active).map(|u| u.id).collect())
            }
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> NotificationService for Notifier<U> {
    async fn create(
        &self,
        title: String,
        message: String,
        sender_id: Uuid,
        audience: Audience,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<NotificationResponse> {
        let recipient_ids = self.resolve_audience(audience).await?;
        if recipient_ids.is_empty() {
            return Err(AppError::bad_request("Notification has no recipients"));
        }

        let notification = self
            .uow
            .notifications()
            .create(title, message, sender_id, recipient_ids.clone(), expires_at)
            .await?;

        tracing::info!(
            notification_id = %notification.id,
            recipients = recipient_ids.len(),
            "Notification created"
        );

        // Echo back the sender's view of the freshly created notification
        let recipient = crate::domain::NotificationRecipient {
            notification_id: notification.id,
            user_id: sender_id,
            read: false,
            read_at: None,
        };
        Ok(NotificationResponse::new(notification, &recipient))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<NotificationResponse>> {
        let rows = self
            .uow
            .notifications()
            .list_for_user(user_id, Utc::now())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(notification, recipient)| NotificationResponse::new(notification, &recipient))
            .collect())
    }

    async fn unread_count(&self, user_id: Uuid) -> AppResult<u64> {
        self.uow.notifications().unread_count(user_id, Utc::now()).await
    }

    async fn mark_read(&self, notification_id: Uuid, user_id: Uuid) -> AppResult<()> {
        self.uow.notifications().mark_read(notification_id, user_id).await
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<()> {
        self.uow.notifications().mark_all_read(user_id).await
    }

    async fn delete(&self, notification_id: Uuid) -> AppResult<()> {
        self.uow.notifications().delete(notification_id).await
    }
}
