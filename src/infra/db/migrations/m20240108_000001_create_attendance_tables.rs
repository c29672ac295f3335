//! Migration: attendance records and the holiday calendar.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Attendance::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Attendance::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(Attendance::Date).date().not_null())
                    .col(ColumnDef::new(Attendance::CheckIn).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Attendance::CheckOut).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Attendance::Status).string().not_null())
                    .col(ColumnDef::new(Attendance::WorkHours).double().null())
                    .col(ColumnDef::new(Attendance::LeaveRequestId).uuid().null())
                    .col(
                        ColumnDef::new(Attendance::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Attendance::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_employee")
                            .from(Attendance::Table, Attendance::EmployeeId)
                            .to(Employees::Table, Employees::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one record per (employee, date)
        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_employee_date")
                    .table(Attendance::Table)
                    .col(Attendance::EmployeeId)
                    .col(Attendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_leave_request_id")
                    .table(Attendance::Table)
                    .col(Attendance::LeaveRequestId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Holidays::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Holidays::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Holidays::Date).date().not_null().unique_key())
                    .col(ColumnDef::new(Holidays::Name).string().not_null())
                    .col(
                        ColumnDef::new(Holidays::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Holidays::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Attendance {
    Table,
    Id,
    EmployeeId,
    Date,
    CheckIn,
    CheckOut,
    Status,
    WorkHours,
    LeaveRequestId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Holidays {
    Table,
    Id,
    Date,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
}
