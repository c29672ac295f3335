//! Holiday calendar database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Holiday;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "holidays")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub date: Date,
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Holiday {
    fn from(model: Model) -> Self {
        Holiday {
            id: model.id,
            date: model.date,
            name: model.name,
        }
    }
}
