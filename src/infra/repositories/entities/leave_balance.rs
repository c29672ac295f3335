//! Leave balance database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::LeaveBalance;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leave_balances")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub leave_type_id: Uuid,
    pub year: i32,
    pub allocated: i32,
    pub used: i32,
    pub pending: i32,
    pub carried_forward: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LeaveBalance {
    fn from(model: Model) -> Self {
        LeaveBalance {
            id: model.id,
            employee_id: model.employee_id,
            leave_type_id: model.leave_type_id,
            year: model.year,
            allocated: model.allocated,
            used: model.used,
            pending: model.pending,
            carried_forward: model.carried_forward,
        }
    }
}
