//! Migration: leave types, balances, and requests.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LeaveTypes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LeaveTypes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(LeaveTypes::Code).string().not_null().unique_key())
                    .col(ColumnDef::new(LeaveTypes::Name).string().not_null())
                    .col(ColumnDef::new(LeaveTypes::DefaultAnnualQuota).integer().not_null())
                    .col(ColumnDef::new(LeaveTypes::Active).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(LeaveTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LeaveTypes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LeaveBalances::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LeaveBalances::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(LeaveBalances::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(LeaveBalances::LeaveTypeId).uuid().not_null())
                    .col(ColumnDef::new(LeaveBalances::Year).integer().not_null())
                    .col(ColumnDef::new(LeaveBalances::Allocated).integer().not_null())
                    .col(ColumnDef::new(LeaveBalances::Used).integer().not_null().default(0))
                    .col(ColumnDef::new(LeaveBalances::Pending).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(LeaveBalances::CarriedForward)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LeaveBalances::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LeaveBalances::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_balances_employee")
                            .from(LeaveBalances::Table, LeaveBalances::EmployeeId)
                            .to(Employees::Table, Employees::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_balances_leave_type")
                            .from(LeaveBalances::Table, LeaveBalances::LeaveTypeId)
                            .to(LeaveTypes::Table, LeaveTypes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One balance row per (employee, leave type, year)
        manager
            .create_index(
                Index::create()
                    .name("idx_leave_balances_employee_type_year")
                    .table(LeaveBalances::Table)
                    .col(LeaveBalances::EmployeeId)
                    .col(LeaveBalances::LeaveTypeId)
                    .col(LeaveBalances::Year)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LeaveRequests::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LeaveRequests::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(LeaveRequests::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(LeaveRequests::LeaveTypeId).uuid().not_null())
                    .col(ColumnDef::new(LeaveRequests::StartDate).date().not_null())
                    .col(ColumnDef::new(LeaveRequests::EndDate).date().not_null())
                    .col(ColumnDef::new(LeaveRequests::Duration).integer().not_null())
                    .col(ColumnDef::new(LeaveRequests::Reason).string().null())
                    .col(ColumnDef::new(LeaveRequests::Status).string().not_null())
                    .col(ColumnDef::new(LeaveRequests::ApproverId).uuid().null())
                    .col(ColumnDef::new(LeaveRequests::RejectionReason).string().null())
                    .col(
                        ColumnDef::new(LeaveRequests::DecidedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(LeaveRequests::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LeaveRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_requests_employee")
                            .from(LeaveRequests::Table, LeaveRequests::EmployeeId)
                            .to(Employees::Table, Employees::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_requests_leave_type")
                            .from(LeaveRequests::Table, LeaveRequests::LeaveTypeId)
                            .to(LeaveTypes::Table, LeaveTypes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leave_requests_employee_status")
                    .table(LeaveRequests::Table)
                    .col(LeaveRequests::EmployeeId)
                    .col(LeaveRequests::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LeaveRequests::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LeaveBalances::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LeaveTypes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum LeaveTypes {
    Table,
    Id,
    Code,
    Name,
    DefaultAnnualQuota,
    Active,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum LeaveBalances {
    Table,
    Id,
    EmployeeId,
    LeaveTypeId,
    Year,
    Allocated,
    Used,
    Pending,
    CarriedForward,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum LeaveRequests {
    Table,
    Id,
    EmployeeId,
    LeaveTypeId,
    StartDate,
    EndDate,
    Duration,
    Reason,
    Status,
    ApproverId,
    RejectionReason,
    DecidedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Employees {
    Table,
    Id,
}
