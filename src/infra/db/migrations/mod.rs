//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_identity_tables;
mod m20240108_000001_create_attendance_tables;
mod m20240115_000001_create_leave_tables;
mod m20240122_000001_create_notification_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_identity_tables::Migration),
            Box::new(m20240108_000001_create_attendance_tables::Migration),
            Box::new(m20240115_000001_create_leave_tables::Migration),
            Box::new(m20240122_000001_create_notification_tables::Migration),
        ]
    }
}
