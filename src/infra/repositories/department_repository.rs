//! Department repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::department::{self, ActiveModel, Entity as DepartmentEntity};
use crate::domain::Department;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Department repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Department>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Department>>;

    async fn create(&self, name: String, description: Option<String>) -> AppResult<Department>;

    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<Department>;

    /// Hard delete; callers must ensure no employees remain assigned
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn list(&self) -> AppResult<Vec<Department>>;

    async fn count(&self) -> AppResult<u64>;
}

/// Concrete implementation of DepartmentRepository
pub struct DepartmentStore {
    db: DatabaseConnection,
}

impl DepartmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DepartmentRepository for DepartmentStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Department>> {
        let result = DepartmentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Department::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Department>> {
        let result = DepartmentEntity::find()
            .filter(department::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Department::from))
    }

    async fn create(&self, name: String, description: Option<String>) -> AppResult<Department> {
        let now = Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            description: Set(description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Department::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<Department> {
        let model = DepartmentEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active_model: ActiveModel = model.into();

        if let Some(name) = name {
            active_model.name = Set(name);
        }
        if description.is_some() {
            active_model.description = Set(description);
        }
        active_model.updated_at = Set(Utc::now());

        let model = active_model.update(&self.db).await.map_err(AppError::from)?;
        Ok(Department::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = DepartmentEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Department>> {
        let models = DepartmentEntity::find()
            .order_by_asc(department::Column::Name)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Department::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        let count = DepartmentEntity::find()
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count)
    }
}
