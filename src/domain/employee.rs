//! Employee domain entity.
//!
//! An employee is the HR profile attached to exactly one user account.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Employee domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub id: Uuid,
    pub user_id: Uuid,
    pub department_id: Uuid,
    pub employee_code: String,
    pub designation: Option<String>,
    /// Reporting manager (another employee), if any
    pub manager_id: Option<Uuid>,
    pub hire_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Employee response with denormalized display fields
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub department_id: Uuid,
    /// Unique employee code
    #[schema(example = "EMP-0042")]
    pub employee_code: String,
    #[schema(example = "Software Engineer")]
    pub designation: Option<String>,
    pub manager_id: Option<Uuid>,
    pub hire_date: NaiveDate,
    /// Display name from the linked user account
    pub full_name: String,
    /// Email from the linked user account
    pub email: String,
    /// Department name
    pub department: String,
}

impl EmployeeResponse {
    pub fn new(employee: Employee, full_name: String, email: String, department: String) -> Self {
        Self {
            id: employee.id,
            user_id: employee.user_id,
            department_id: employee.department_id,
            employee_code: employee.employee_code,
            designation: employee.designation,
            manager_id: employee.manager_id,
            hire_date: employee.hire_date,
            full_name,
            email,
            department,
        }
    }
}
