//! Notification domain entity.
//!
//! A notification has a fixed recipient list captured at creation time;
//! read state is tracked per recipient.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Notification domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub sender_id: Uuid,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Whether the notification is still visible at `now`
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |expiry| expiry > now)
    }
}

/// Per-recipient delivery state
#[derive(Debug, Clone, Serialize)]
pub struct NotificationRecipient {
    pub notification_id: Uuid,
    pub user_id: Uuid,
    pub read: bool,
    pub read_at: Option<DateTime<Utc>>,
}

/// Notification as seen by one recipient
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub id: Uuid,
    #[schema(example = "Leave approved")]
    pub title: String,
    pub message: String,
    pub sender_id: Uuid,
    pub read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl NotificationResponse {
    pub fn new(notification: Notification, recipient: &NotificationRecipient) -> Self {
        Self {
            id: notification.id,
            title: notification.title,
            message: notification.message,
            sender_id: notification.sender_id,
            read: recipient.read,
            read_at: recipient.read_at,
            expires_at: notification.expires_at,
            created_at: notification.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn expiry_check() {
        let now = Utc::now();
        let mut n = Notification {
            id: Uuid::new_v4(),
            title: "t".into(),
            message: "m".into(),
            sender_id: Uuid::new_v4(),
            expires_at: None,
            created_at: now,
        };
        assert!(n.is_active(now));

        n.expires_at = Some(now + Duration::hours(1));
        assert!(n.is_active(now));

        n.expires_at = Some(now - Duration::hours(1));
        assert!(!n.is_active(now));
    }
}
