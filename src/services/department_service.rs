//! Department service.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Department, DepartmentResponse};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Department service trait for dependency injection.
#[async_trait]
pub trait DepartmentService: Send + Sync {
    async fn create_department(
        &self,
        name: String,
        description: Option<String>,
    ) -> AppResult<Department>;

    async fn get_department(&self, id: Uuid) -> AppResult<DepartmentResponse>;

    async fn list_departments(&self) -> AppResult<Vec<DepartmentResponse>>;

    async fn update_department(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<Department>;

    /// Refuses to delete while employees remain assigned
    async fn delete_department(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of DepartmentService using Unit of Work.
pub struct DepartmentManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> DepartmentManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DepartmentService for DepartmentManager<U> {
    async fn create_department(
        &self,
        name: String,
        description: Option<String>,
    ) -> AppResult<Department> {
        if self.uow.departments().find_by_name(&name).await?.is_some() {
            return Err(AppError::conflict("Department"));
        }

        self.uow.departments().create(name, description).await
    }

    async fn get_department(&self, id: Uuid) -> AppResult<DepartmentResponse> {
        let department = self
            .uow
            .departments()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        let employee_count = self.uow.employees().count_by_department(id).await?;
        Ok(DepartmentResponse::from_department(department, employee_count))
    }

    async fn list_departments(&self) -> AppResult<Vec<DepartmentResponse>> {
        let departments = self.uow.departments().list().await?;

        let mut responses = Vec::with_capacity(departments.len());
        for department in departments {
            let employee_count = self
                .uow
                .employees()
                .count_by_department(department.id)
                .await?;
            responses.push(DepartmentResponse::from_department(department, employee_count));
        }

        Ok(responses)
    }

    async fn update_department(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> AppResult<Department> {
        if let Some(ref name) = name {
            // Renaming onto another department's name is a conflict
            if let Some(existing) = self.uow.departments().find_by_name(name).await? {
                if existing.id != id {
                    return Err(AppError::conflict("Department"));
                }
            }
        }

        self.uow.departments().update(id, name, description).await
    }

    async fn delete_department(&self, id: Uuid) -> AppResult<()> {
        self.uow
            .departments()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        let employee_count = self.uow.employees().count_by_department(id).await?;
        if employee_count > 0 {
            return Err(AppError::bad_request(format!(
                "Cannot delete department with {} assigned employees",
                employee_count
            )));
        }

        self.uow.departments().delete(id).await
    }
}
