//! Employee profile handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, require_manager, CurrentUser};
use crate::api::AppState;
use crate::domain::EmployeeResponse;
use crate::errors::AppResult;
use crate::infra::EmployeeChanges;
use crate::services::NewEmployee;
use crate::types::{Paginated, PaginationParams};

/// Employee creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEmployeeRequest {
    /// Linked user account
    pub user_id: Uuid,
    pub department_id: Uuid,
    /// Unique employee code
    #[validate(length(min = 1, message = "Employee code is required"))]
    #[schema(example = "EMP-0042")]
    pub employee_code: String,
    #[schema(example = "Software Engineer")]
    pub designation: Option<String>,
    /// Reporting manager (employee id)
    pub manager_id: Option<Uuid>,
    pub hire_date: NaiveDate,
}

/// Employee update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEmployeeRequest {
    pub department_id: Option<Uuid>,
    pub designation: Option<String>,
    /// Set or clear the reporting manager; omit the field to leave it
    /// unchanged, send null to clear
    #[serde(default)]
    #[schema(value_type = Option<Uuid>)]
    pub manager_id: Option<Option<Uuid>>,
    pub hire_date: Option<NaiveDate>,
}

/// Create employee routes
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route("/me", get(get_own_profile))
        .route("/:id", get(get_employee).put(update_employee).delete(delete_employee))
}

/// List employees (paginated, manager/admin)
#[utoipa::path(
    get,
    path = "/api/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Page of employees"),
        (status = 403, description = "Manager or admin only")
    )
)]
pub async fn list_employees(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<Paginated<EmployeeResponse>>> {
    require_manager(&current_user)?;

    let (employees, total) = state
        .employee_service
        .list_employees(pagination.offset(), pagination.limit())
        .await?;

    Ok(Json(Paginated::new(
        employees,
        pagination.page,
        pagination.limit(),
        total,
    )))
}

/// Create an employee profile (admin)
#[utoipa::path(
    post,
    path = "/api/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin only"),
        (status = 409, description = "Duplicate employee code or profile")
    )
)]
pub async fn create_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateEmployeeRequest>,
) -> AppResult<(StatusCode, Json<EmployeeResponse>)> {
    require_admin(&current_user)?;

    let employee = state
        .employee_service
        .create_employee(NewEmployee {
            user_id: payload.user_id,
            department_id: payload.department_id,
            employee_code: payload.employee_code,
            designation: payload.designation,
            manager_id: payload.manager_id,
            hire_date: payload.hire_date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(employee)))
}

/// The authenticated user's own employee profile
#[utoipa::path(
    get,
    path = "/api/employees/me",
    tag = "Employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own employee profile", body = EmployeeResponse),
        (status = 404, description = "No employee profile for this account")
    )
)]
pub async fn get_own_profile(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<EmployeeResponse>> {
    let employee = state
        .employee_service
        .get_employee_by_user(current_user.id)
        .await?;
    Ok(Json(employee))
}

/// Get an employee by ID (own profile, or manager/admin)
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee", body = EmployeeResponse),
        (status = 403, description = "Not allowed to view this employee"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<EmployeeResponse>> {
    let employee = state.employee_service.get_employee(id).await?;

    if employee.user_id != current_user.id {
        require_manager(&current_user)?;
    }

    Ok(Json(employee))
}

/// Update an employee profile (admin)
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Employee ID")),
    request_body = UpdateEmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn update_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateEmployeeRequest>,
) -> AppResult<Json<EmployeeResponse>> {
    require_admin(&current_user)?;

    let employee = state
        .employee_service
        .update_employee(
            id,
            EmployeeChanges {
                department_id: payload.department_id,
                designation: payload.designation,
                manager_id: payload.manager_id,
                hire_date: payload.hire_date,
            },
        )
        .await?;

    Ok(Json(employee))
}

/// Delete an employee profile (admin)
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn delete_employee(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_admin(&current_user)?;
    state.employee_service.delete_employee(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
