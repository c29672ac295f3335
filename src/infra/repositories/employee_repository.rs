//! Employee repository implementation.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use super::entities::employee::{self, ActiveModel, Entity as EmployeeEntity};
use crate::domain::Employee;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Fields accepted by [`EmployeeRepository::update`]; `None` leaves a field
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub department_id: Option<Uuid>,
    pub designation: Option<String>,
    pub manager_id: Option<Option<Uuid>>,
    pub hire_date: Option<NaiveDate>,
}

/// Employee repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Employee>>;

    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<Employee>>;

    async fn find_by_code(&self, employee_code: &str) -> AppResult<Option<Employee>>;

    #[allow(clippy::too_many_arguments)]
    async fn create(
        &self,
        user_id: Uuid,
        department_id: Uuid,
        employee_code: String,
        designation: Option<String>,
        manager_id: Option<Uuid>,
        hire_date: NaiveDate,
    ) -> AppResult<Employee>;

    async fn update(&self, id: Uuid, changes: EmployeeChanges) -> AppResult<Employee>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Page of employees ordered by employee code
    async fn list(&self, offset: u64, limit: u64) -> AppResult<Vec<Employee>>;

    /// Every employee, for report queries
    async fn list_all(&self) -> AppResult<Vec<Employee>>;

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<Employee>>;

    async fn count(&self) -> AppResult<u64>;

    async fn count_by_department(&self, department_id: Uuid) -> AppResult<u64>;
}

/// Concrete implementation of EmployeeRepository
pub struct EmployeeStore {
    db: DatabaseConnection,
}

impl EmployeeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EmployeeRepository for EmployeeStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Employee>> {
        let result = EmployeeEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Employee::from))
    }

    async fn find_by_user_id(&self, user_id: Uuid) -> AppResult<Option<Employee>> {
        let result = EmployeeEntity::find()
            .filter(employee::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Employee::from))
    }

    async fn find_by_code(&self, employee_code: &str) -> AppResult<Option<Employee>> {
        let result = EmployeeEntity::find()
            .filter(employee::Column::EmployeeCode.eq(employee_code))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Employee::from))
    }

    async fn create(
        &self,
        user_id: Uuid,
        department_id: Uuid,
        employee_code: String,
        designation: Option<String>,
        manager_id: Option<Uuid>,
        hire_date: NaiveDate,
    ) -> AppResult<Employee> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            department_id: Set(department_id),
            employee_code: Set(employee_code),
            designation: Set(designation),
            manager_id: Set(manager_id),
            hire_date: Set(hire_date),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Employee::from(model))
    }

    async fn update(&self, id: Uuid, changes: EmployeeChanges) -> AppResult<Employee> {
        let model = EmployeeEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active_model: ActiveModel = model.into();

        if let Some(department_id) = changes.department_id {
            active_model.department_id = Set(department_id);
        }
        if let Some(designation) = changes.designation {
            active_model.designation = Set(Some(designation));
        }
        if let Some(manager_id) = changes.manager_id {
            active_model.manager_id = Set(manager_id);
        }
        if let Some(hire_date) = changes.hire_date {
            active_model.hire_date = Set(hire_date);
        }
        active_model.updated_at = Set(Utc::now());

        let model = active_model.update(&self.db).await.map_err(AppError::from)?;
        Ok(Employee::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = EmployeeEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list(&self, offset: u64, limit: u64) -> AppResult<Vec<Employee>> {
        let models = EmployeeEntity::find()
            .order_by_asc(employee::Column::EmployeeCode)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Employee::from).collect())
    }

    async fn list_all(&self) -> AppResult<Vec<Employee>> {
        let models = EmployeeEntity::find()
            .order_by_asc(employee::Column::EmployeeCode)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Employee::from).collect())
    }

    async fn list_by_department(&self, department_id: Uuid) -> AppResult<Vec<Employee>> {
        let models = EmployeeEntity::find()
            .filter(employee::Column::DepartmentId.eq(department_id))
            .order_by_asc(employee::Column::EmployeeCode)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Employee::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        let count = EmployeeEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count)
    }

    async fn count_by_department(&self, department_id: Uuid) -> AppResult<u64> {
        let count = EmployeeEntity::find()
            .filter(employee::Column::DepartmentId.eq(department_id))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count)
    }
}
