//! Notification database entities for SeaORM.
//!
//! Split across two tables: the notification body and one row per
//! recipient carrying the read state.

use sea_orm::entity::prelude::*;

use crate::domain::Notification;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub sender_id: Uuid,
    pub expires_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Notification {
    fn from(model: Model) -> Self {
        Notification {
            id: model.id,
            title: model.title,
            message: model.message,
            sender_id: model.sender_id,
            expires_at: model.expires_at,
            created_at: model.created_at,
        }
    }
}

pub mod recipient {
    use sea_orm::entity::prelude::*;

    use crate::domain::NotificationRecipient;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "notification_recipients")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: Uuid,
        pub notification_id: Uuid,
        pub user_id: Uuid,
        pub read: bool,
        pub read_at: Option<DateTimeUtc>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for NotificationRecipient {
        fn from(model: Model) -> Self {
            NotificationRecipient {
                notification_id: model.notification_id,
                user_id: model.user_id,
                read: model.read,
                read_at: model.read_at,
            }
        }
    }
}
