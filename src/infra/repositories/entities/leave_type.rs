//! Leave type database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::LeaveType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leave_types")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub default_annual_quota: i32,
    pub active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for LeaveType {
    fn from(model: Model) -> Self {
        LeaveType {
            id: model.id,
            code: model.code,
            name: model.name,
            default_annual_quota: model.default_annual_quota,
            active: model.active,
        }
    }
}
