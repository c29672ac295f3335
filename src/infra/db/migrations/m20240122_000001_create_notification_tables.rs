//! Migration: notifications and per-recipient read state.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Notifications::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Message).string().not_null())
                    .col(ColumnDef::new(Notifications::SenderId).uuid().not_null())
                    .col(
                        ColumnDef::new(Notifications::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notifications_sender")
                            .from(Notifications::Table, Notifications::SenderId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NotificationRecipients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NotificationRecipients::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(NotificationRecipients::NotificationId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(NotificationRecipients::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(NotificationRecipients::Read)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(NotificationRecipients::ReadAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_recipients_notification")
                            .from(
                                NotificationRecipients::Table,
                                NotificationRecipients::NotificationId,
                            )
                            .to(Notifications::Table, Notifications::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_recipients_user")
                            .from(NotificationRecipients::Table, NotificationRecipients::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One read-state row per (notification, user)
        manager
            .create_index(
                Index::create()
                    .name("idx_notification_recipients_notification_user")
                    .table(NotificationRecipients::Table)
                    .col(NotificationRecipients::NotificationId)
                    .col(NotificationRecipients::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notification_recipients_user_read")
                    .table(NotificationRecipients::Table)
                    .col(NotificationRecipients::UserId)
                    .col(NotificationRecipients::Read)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NotificationRecipients::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Notifications {
    Table,
    Id,
    Title,
    Message,
    SenderId,
    ExpiresAt,
    CreatedAt,
}

#[derive(Iden)]
enum NotificationRecipients {
    Table,
    Id,
    NotificationId,
    UserId,
    Read,
    ReadAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
