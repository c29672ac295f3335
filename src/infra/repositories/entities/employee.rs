//! Employee database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Employee;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub department_id: Uuid,
    #[sea_orm(unique)]
    pub employee_code: String,
    pub designation: Option<String>,
    /// Self-referential: the reporting manager's employee id
    pub manager_id: Option<Uuid>,
    pub hire_date: Date,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Employee {
    fn from(model: Model) -> Self {
        Employee {
            id: model.id,
            user_id: model.user_id,
            department_id: model.department_id,
            employee_code: model.employee_code,
            designation: model.designation,
            manager_id: model.manager_id,
            hire_date: model.hire_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
