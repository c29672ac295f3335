//! Employee service - HR profile management.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Employee, EmployeeResponse};
use crate::errors::{AppError, AppResult};
use crate::infra::{EmployeeChanges, UnitOfWork};

/// Fields accepted when creating an employee profile
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub user_id: Uuid,
    pub department_id: Uuid,
    pub employee_code: String,
    pub designation: Option<String>,
    pub manager_id: Option<Uuid>,
    pub hire_date: NaiveDate,
}

/// Employee service trait for dependency injection.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    async fn create_employee(&self, new_employee: NewEmployee) -> AppResult<EmployeeResponse>;

    async fn get_employee(&self, id: Uuid) -> AppResult<EmployeeResponse>;

    /// The profile linked to a user account, if one exists
    async fn get_employee_by_user(&self, user_id: Uuid) -> AppResult<EmployeeResponse>;

    /// Page of employees plus the total count
    async fn list_employees(&self, offset: u64, limit: u64)
        -> AppResult<(Vec<EmployeeResponse>, u64)>;

    async fn update_employee(&self, id: Uuid, changes: EmployeeChanges)
        -> AppResult<EmployeeResponse>;

    /// Removes the profile; the department and user account are untouched
    async fn delete_employee(&self, id: Uuid) -> AppResult<()>;
}

/// Concrete implementation of EmployeeService using Unit of Work.
pub struct EmployeeManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> EmployeeManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Attach user and department display fields to a bare employee row
    async fn to_response(&self, employee: Employee) -> AppResult<EmployeeResponse> {
        let user = self
            .uow
            .users()
            .find_by_id_with_deleted(employee.user_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let department = self
            .uow
            .departments()
            .find_by_id(employee.department_id)
            .await?
            .ok_or(AppError::NotFound)?;

        Ok(EmployeeResponse::new(
            employee,
            user.full_name,
            user.email,
            department.name,
        ))
    }

    async fn validate_manager(&self, employee_id: Option<Uuid>, manager_id: Uuid) -> AppResult<()> {
        if employee_id == Some(manager_id) {
            return Err(AppError::bad_request("An employee cannot manage themselves"));
        }
        self.uow
            .employees()
            .find_by_id(manager_id)
            .await?
            .ok_or_else(|| AppError::bad_request("Manager does not exist"))?;
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> EmployeeService for EmployeeManager<U> {
    async fn create_employee(&self, new_employee: NewEmployee) -> AppResult<EmployeeResponse> {
        // The linked user account must exist and be active
        self.uow
            .users()
            .find_by_id(new_employee.user_id)
            .await?
            .ok_or_else(|| AppError::bad_request("User does not exist"))?;

        // One employee profile per user
        if self
            .uow
            .employees()
            .find_by_user_id(new_employee.user_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Employee profile"));
        }

        self.uow
            .departments()
            .find_by_id(new_employee.department_id)
            .await?
            .ok_or_else(|| AppError::bad_request("Department does not exist"))?;

        if self
            .uow
            .employees()
            .find_by_code(&new_employee.employee_code)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Employee code"));
        }

        if let Some(manager_id) = new_employee.manager_id {
            self.validate_manager(None, manager_id).await?;
        }

        let employee = self
            .uow
            .employees()
            .create(
                new_employee.user_id,
                new_employee.department_id,
                new_employee.employee_code,
                new_employee.designation,
                new_employee.manager_id,
                new_employee.hire_date,
            )
            .await?;

        self.to_response(employee).await
    }

    async fn get_employee(&self, id: Uuid) -> AppResult<EmployeeResponse> {
        let employee = self
            .uow
            .employees()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.to_response(employee).await
    }

    async fn get_employee_by_user(&self, user_id: Uuid) -> AppResult<EmployeeResponse> {
        let employee = self
            .uow
            .employees()
            .find_by_user_id(user_id)
            .await?
            .ok_or(AppError::NotFound)?;

        self.to_response(employee).await
    }

    async fn list_employees(
        &self,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<EmployeeResponse>, u64)> {
        let employees = self.uow.employees().list(offset, limit).await?;
        let total = self.uow.employees().count().await?;

        let mut responses = Vec::with_capacity(employees.len());
        for employee in employees {
            responses.push(self.to_response(employee).await?);
        }

        Ok((responses, total))
    }

    async fn update_employee(
        &self,
        id: Uuid,
        changes: EmployeeChanges,
    ) -> AppResult<EmployeeResponse> {
        self.uow
            .employees()
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if let Some(department_id) = changes.department_id {
            self.uow
                .departments()
                .find_by_id(department_id)
                .await?
                .ok_or_else(|| AppError::bad_request("Department does not exist"))?;
        }

        if let Some(Some(manager_id)) = changes.manager_id {
            self.validate_manager(Some(id), manager_id).await?;
        }

        let employee = self.uow.employees().update(id, changes).await?;
        self.to_response(employee).await
    }

    async fn delete_employee(&self, id: Uuid) -> AppResult<()> {
        self.uow.employees().delete(id).await
    }
}
