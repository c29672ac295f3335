//! Notification repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use super::entities::notification::recipient::{
    self, ActiveModel as RecipientActiveModel, Entity as RecipientEntity,
};
use super::entities::notification::{self, ActiveModel, Entity as NotificationEntity};
use crate::domain::{Notification, NotificationRecipient};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Notification repository trait for dependency injection.
///
/// The recipient list is fixed at creation; only read state changes later.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Create a notification and its recipient rows atomically
    async fn create(
        &self,
        title: String,
        message: String,
        sender_id: Uuid,
        recipient_ids: Vec<Uuid>,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<Notification>;

    /// Unexpired notifications addressed to the user, newest first
    async fn list_for_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<(Notification, NotificationRecipient)>>;

    /// Unexpired, unread count for the badge
    async fn unread_count(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<u64>;

    /// Mark one notification read; NotFound if the user is not a recipient
    async fn mark_read(&self, notification_id: Uuid, user_id: Uuid) -> AppResult<()>;

    /// Mark everything addressed to the user as read
    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<()>;

    /// Delete a notification and its recipient rows
    async fn delete(&self, notification_id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of NotificationRepository
pub struct NotificationStore {
    db: DatabaseConnection,
}

impl NotificationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NotificationRepository for NotificationStore {
    async fn create(
        &self,
        title: String,
        message: String,
        sender_id: Uuid,
        recipient_ids: Vec<Uuid>,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<Notification> {
        let now = Utc::now();
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title),
            message: Set(message),
            sender_id: Set(sender_id),
            expires_at: Set(expires_at),
            created_at: Set(now),
        };
        let model = active_model.insert(&txn).await.map_err(AppError::from)?;

        for user_id in recipient_ids {
            let recipient_model = RecipientActiveModel {
                id: Set(Uuid::new_v4()),
                notification_id: Set(model.id),
                user_id: Set(user_id),
                read: Set(false),
                read_at: Set(None),
            };
            recipient_model.insert(&txn).await.map_err(AppError::from)?;
        }

        txn.commit().await.map_err(AppError::from)?;
        Ok(Notification::from(model))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<(Notification, NotificationRecipient)>> {
        let recipients = RecipientEntity::find()
            .filter(recipient::Column::UserId.eq(user_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        if recipients.is_empty() {
            return Ok(Vec::new());
        }

        let notification_ids: Vec<Uuid> =
            recipients.iter().map(|r| r.notification_id).collect();

        let notifications = NotificationEntity::find()
            .filter(notification::Column::Id.is_in(notification_ids))
            .filter(
                Condition::any()
                    .add(notification::Column::ExpiresAt.is_null())
                    .add(notification::Column::ExpiresAt.gt(now)),
            )
            .order_by_desc(notification::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let result = notifications
            .into_iter()
            .filter_map(|n| {
                recipients
                    .iter()
                    .find(|r| r.notification_id == n.id)
                    .map(|r| (Notification::from(n), NotificationRecipient::from(r.clone())))
            })
            .collect();

        Ok(result)
    }

    async fn unread_count(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<u64> {
        let unread = self
            .list_for_user(user_id, now)
            .await?
            .into_iter()
            .filter(|(_, recipient)| !recipient.read)
            .count();

        Ok(unread as u64)
    }

    async fn mark_read(&self, notification_id: Uuid, user_id: Uuid) -> AppResult<()> {
        let model = RecipientEntity::find()
            .filter(recipient::Column::NotificationId.eq(notification_id))
            .filter(recipient::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active_model: RecipientActiveModel = model.into();
        active_model.read = Set(true);
        active_model.read_at = Set(Some(Utc::now()));

        active_model.update(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn mark_all_read(&self, user_id: Uuid) -> AppResult<()> {
        let unread = RecipientEntity::find()
            .filter(recipient::Column::UserId.eq(user_id))
            .filter(recipient::Column::Read.eq(false))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let now = Utc::now();
        for model in unread {
            let mut active_model: RecipientActiveModel = model.into();
            active_model.read = Set(true);
            active_model.read_at = Set(Some(now));
            active_model.update(&self.db).await.map_err(AppError::from)?;
        }

        Ok(())
    }

    async fn delete(&self, notification_id: Uuid) -> AppResult<()> {
        RecipientEntity::delete_many()
            .filter(recipient::Column::NotificationId.eq(notification_id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        let result = NotificationEntity::delete_by_id(notification_id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
