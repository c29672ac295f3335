//! Attendance database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{AttendanceRecord, AttendanceStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: Date,
    pub check_in: Option<DateTimeUtc>,
    pub check_out: Option<DateTimeUtc>,
    pub status: String,
    pub work_hours: Option<f64>,
    /// Set when the row was stamped by an approved leave request
    pub leave_request_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AttendanceRecord {
    fn from(model: Model) -> Self {
        AttendanceRecord {
            id: model.id,
            employee_id: model.employee_id,
            date: model.date,
            check_in: model.check_in,
            check_out: model.check_out,
            status: AttendanceStatus::from(model.status.as_str()),
            work_hours: model.work_hours,
            leave_request_id: model.leave_request_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
