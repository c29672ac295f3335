//! Holiday calendar repository implementation.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::holiday::{self, ActiveModel, Entity as HolidayEntity};
use crate::domain::Holiday;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Holiday repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait HolidayRepository: Send + Sync {
    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Option<Holiday>>;

    async fn create(&self, date: NaiveDate, name: String) -> AppResult<Holiday>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn list(&self) -> AppResult<Vec<Holiday>>;

    /// Holidays falling within [from, to] (working-day computation)
    async fn list_in_range(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<Holiday>>;
}

/// Concrete implementation of HolidayRepository
pub struct HolidayStore {
    db: DatabaseConnection,
}

impl HolidayStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HolidayRepository for HolidayStore {
    async fn find_by_date(&self, date: NaiveDate) -> AppResult<Option<Holiday>> {
        let result = HolidayEntity::find()
            .filter(holiday::Column::Date.eq(date))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Holiday::from))
    }

    async fn create(&self, date: NaiveDate, name: String) -> AppResult<Holiday> {
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            date: Set(date),
            name: Set(name),
            created_at: Set(Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Holiday::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = HolidayEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Holiday>> {
        let models = HolidayEntity::find()
            .order_by_asc(holiday::Column::Date)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Holiday::from).collect())
    }

    async fn list_in_range(&self, from: NaiveDate, to: NaiveDate) -> AppResult<Vec<Holiday>> {
        let models = HolidayEntity::find()
            .filter(holiday::Column::Date.gte(from))
            .filter(holiday::Column::Date.lte(to))
            .order_by_asc(holiday::Column::Date)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Holiday::from).collect())
    }
}
