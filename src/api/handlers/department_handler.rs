//! Department handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::DepartmentResponse;
use crate::errors::AppResult;

/// Department creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDepartmentRequest {
    #[validate(length(min = 1, message = "Department name is required"))]
    #[schema(example = "Engineering")]
    pub name: String,
    pub description: Option<String>,
}

/// Department update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateDepartmentRequest {
    #[validate(length(min = 1, message = "Department name cannot be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Create department routes
pub fn department_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_departments).post(create_department))
        .route(
            "/:id",
            get(get_department).put(update_department).delete(delete_department),
        )
}

/// List departments with employee counts
#[utoipa::path(
    get,
    path = "/api/departments",
    tag = "Departments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Departments", body = Vec<DepartmentResponse>)
    )
)]
pub async fn list_departments(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DepartmentResponse>>> {
    let departments = state.department_service.list_departments().await?;
    Ok(Json(departments))
}

/// Create a department (admin)
#[utoipa::path(
    post,
    path = "/api/departments",
    tag = "Departments",
    security(("bearer_auth" = [])),
    request_body = CreateDepartmentRequest,
    responses(
        (status = 201, description = "Department created", body = DepartmentResponse),
        (status = 403, description = "Admin only"),
        (status = 409, description = "Department already exists")
    )
)]
pub async fn create_department(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDepartmentRequest>,
) -> AppResult<(StatusCode, Json<DepartmentResponse>)> {
    require_admin(&current_user)?;

    let department = state
        .department_service
        .create_department(payload.name, payload.description)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DepartmentResponse::from_department(department, 0)),
    ))
}

/// Get a department by ID
#[utoipa::path(
    get,
    path = "/api/departments/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 200, description = "Department", body = DepartmentResponse),
        (status = 404, description = "Department not found")
    )
)]
pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DepartmentResponse>> {
    let department = state.department_service.get_department(id).await?;
    Ok(Json(department))
}

/// Update a department (admin)
#[utoipa::path(
    put,
    path = "/api/departments/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Department ID")),
    request_body = UpdateDepartmentRequest,
    responses(
        (status = 200, description = "Department updated", body = DepartmentResponse),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Department not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_department(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateDepartmentRequest>,
) -> AppResult<Json<DepartmentResponse>> {
    require_admin(&current_user)?;

    let department = state
        .department_service
        .update_department(id, payload.name, payload.description)
        .await?;

    let response = state.department_service.get_department(department.id).await?;
    Ok(Json(response))
}

/// Delete an empty department (admin)
#[utoipa::path(
    delete,
    path = "/api/departments/{id}",
    tag = "Departments",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Department ID")),
    responses(
        (status = 204, description = "Department deleted"),
        (status = 400, description = "Department still has employees"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Department not found")
    )
)]
pub async fn delete_department(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_admin(&current_user)?;
    state.department_service.delete_department(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
