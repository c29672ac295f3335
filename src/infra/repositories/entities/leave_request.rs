//! Leave request database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{LeaveRequest, LeaveStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leave_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub leave_type_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub duration: i32,
    pub reason: Option<String>,
    pub status: String,
    pub approver_id: Option<Uuid>,
    pub rejection_reason: Option<String>,
    pub decided_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LeaveRequest {
    fn from(model: Model) -> Self {
        LeaveRequest {
            id: model.id,
            employee_id: model.employee_id,
            leave_type_id: model.leave_type_id,
            start_date: model.start_date,
            end_date: model.end_date,
            duration: model.duration,
            reason: model.reason,
            status: LeaveStatus::from(model.status.as_str()),
            approver_id: model.approver_id,
            rejection_reason: model.rejection_reason,
            decided_at: model.decided_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
