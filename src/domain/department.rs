//! Department domain entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Department domain entity
#[derive(Debug, Clone, Serialize)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Department response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DepartmentResponse {
    pub id: Uuid,
    /// Department name
    #[schema(example = "Engineering")]
    pub name: String,
    pub description: Option<String>,
    /// Number of employees currently assigned
    pub employee_count: u64,
    pub created_at: DateTime<Utc>,
}

impl DepartmentResponse {
    pub fn from_department(department: Department, employee_count: u64) -> Self {
        Self {
            id: department.id,
            name: department.name,
            description: department.description,
            employee_count,
            created_at: department.created_at,
        }
    }
}
