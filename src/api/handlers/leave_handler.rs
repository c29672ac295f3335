//! Leave handlers: requests, lifecycle transitions, balances, and types.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post, put},
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
use crate::domain::{LeaveBalanceResponse, LeaveRequestResponse, LeaveStatus, LeaveType};
use crate::errors::{AppError, AppResult};
use crate::services::NewLeaveRequest;

/// Leave request creation payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLeaveRequest {
    /// Managers may submit on behalf of another employee
    pub employee_id: Option<Uuid>,
    pub leave_type_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Verified against the computed day count when present
    pub duration: Option<i32>,
    pub reason: Option<String>,
}

/// Rejection payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RejectLeaveRequest {
    #[validate(length(min = 1, message = "Rejection reason is required"))]
    pub reason: String,
}

/// Leave type creation payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLeaveTypeRequest {
    #[validate(length(min = 1, message = "Code is required"))]
    #[schema(example = "ANNUAL")]
    pub code: String,
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Annual Leave")]
    pub name: String,
    /// Days allocated per year
    pub default_annual_quota: i32,
}

/// Leave type update payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateLeaveTypeRequest {
    pub name: Option<String>,
    pub default_annual_quota: Option<i32>,
    /// Deactivate instead of deleting when the type is referenced
    pub active: Option<bool>,
}

/// Listing filters
#[derive(Debug, Deserialize)]
pub struct LeaveListQuery {
    pub employee_id: Option<Uuid>,
    pub status: Option<String>,
}

/// Create leave routes
pub fn leave_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_requests).post(create_request))
        .route("/balances", get(balances))
        .route("/types", get(list_types).post(create_type))
        .route("/types/:id", put(update_type))
        .route("/:id", get(get_request))
        .route("/:id/approve", post(approve_request))
        .route("/:id/reject", post(reject_request))
        .route("/:id/cancel", post(cancel_request))
}

/// Resolve the caller's own employee profile id
async fn own_employee_id(state: &AppState, current_user: &CurrentUser) -> AppResult<Option<Uuid>> {
    Ok(state
        .employee_service
        .get_employee_by_user(current_user.id)
        .await
        .ok()
        .map(|e| e.id))
}

/// Submit a leave request
#[utoipa::path(
    post,
    path = "/api/leaves",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    request_body = CreateLeaveRequest,
    responses(
        (status = 201, description = "Request created", body = LeaveRequestResponse),
        (status = 400, description = "Insufficient balance, overlap, or bad window"),
        (status = 403, description = "Submitting for others requires manager/admin")
    )
)]
pub async fn create_request(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateLeaveRequest>,
) -> AppResult<(StatusCode, Json<LeaveRequestResponse>)> {
    let own_id = own_employee_id(&state, &current_user).await?;

    let employee_id = match payload.employee_id {
        Some(employee_id) => {
            if own_id != Some(employee_id) {
                require_manager(&current_user)?;
            }
            employee_id
        }
        None => own_id
            .ok_or_else(|| AppError::bad_request("No employee profile for this account"))?,
    };

    let request = state
        .leave_service
        .create_request(NewLeaveRequest {
            employee_id,
            leave_type_id: payload.leave_type_id,
            start_date: payload.start_date,
            end_date: payload.end_date,
            reason: payload.reason,
            duration: payload.duration,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(request)))
}

/// List leave requests
#[utoipa::path(
    get,
    path = "/api/leaves",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    params(
        ("employee_id" = Option<Uuid>, Query, description = "Defaults to own requests; all for manager/admin when omitted by them"),
        ("status" = Option<String>, Query, description = "PENDING, APPROVED, REJECTED, or CANCELLED")
    ),
    responses(
        (status = 200, description = "Leave requests", body = Vec<LeaveRequestResponse>)
    )
)]
pub async fn list_requests(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<LeaveListQuery>,
) -> AppResult<Json<Vec<LeaveRequestResponse>>> {
    let status = match query.status.as_deref() {
        Some(status) => Some(
            LeaveStatus::parse(status)
                .ok_or_else(|| AppError::validation("Unknown leave status"))?,
        ),
        None => None,
    };

    let own_id = own_employee_id(&state, &current_user).await?;

    let employee_filter = match query.employee_id {
        Some(employee_id) => {
            if own_id != Some(employee_id) {
                require_manager(&current_user)?;
            }
            Some(employee_id)
        }
        // Managers see everything when no filter is given; employees see
        // their own requests
        None if current_user.can_manage() => None,
        None => Some(
            own_id.ok_or_else(|| AppError::bad_request("No employee profile for this account"))?,
        ),
    };

    let requests = state.leave_service.list_requests(employee_filter, status).await?;
    Ok(Json(requests))
}

/// Get one leave request
#[utoipa::path(
    get,
    path = "/api/leaves/{id}",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave request", body = LeaveRequestResponse),
        (status = 403, description = "Not the owner and not a manager"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn get_request(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<LeaveRequestResponse>> {
    let request = state.leave_service.get_request(id).await?;

    let own_id = own_employee_id(&state, &current_user).await?;
    if own_id != Some(request.employee_id) {
        require_manager(&current_user)?;
    }

    Ok(Json(LeaveRequestResponse::from(request)))
}

/// Approve a pending request (manager/admin)
#[utoipa::path(
    post,
    path = "/api/leaves/{id}/approve",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Request approved", body = LeaveRequestResponse),
        (status = 400, description = "Already processed"),
        (status = 403, description = "Manager/admin only, and never own requests"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn approve_request(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<LeaveRequestResponse>> {
    require_manager(&current_user)?;
    let request = state.leave_service.approve_request(id, current_user.id).await?;
    Ok(Json(request))
}

/// Reject a pending request (manager/admin)
#[utoipa::path(
    post,
    path = "/api/leaves/{id}/reject",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Leave request ID")),
    request_body = RejectLeaveRequest,
    responses(
        (status = 200, description = "Request rejected", body = LeaveRequestResponse),
        (status = 400, description = "Already processed"),
        (status = 403, description = "Manager/admin only"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn reject_request(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<RejectLeaveRequest>,
) -> AppResult<Json<LeaveRequestResponse>> {
    require_manager(&current_user)?;
    let request = state
        .leave_service
        .reject_request(id, current_user.id, payload.reason)
        .await?;
    Ok(Json(request))
}

/// Cancel an own pending or approved request (owner or admin)
#[utoipa::path(
    post,
    path = "/api/leaves/{id}/cancel",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Request cancelled", body = LeaveRequestResponse),
        (status = 400, description = "No longer cancellable"),
        (status = 403, description = "Only the owner or an admin may cancel"),
        (status = 404, description = "Request not found")
    )
)]
pub async fn cancel_request(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<LeaveRequestResponse>> {
    let request = state.leave_service.get_request(id).await?;

    let own_id = own_employee_id(&state, &current_user).await?;
    if own_id != Some(request.employee_id) {
        require_admin(&current_user)?;
    }

    let request = state.leave_service.cancel_request(id).await?;
    Ok(Json(request))
}

/// Current-year balances for the caller (or another employee for managers)
#[utoipa::path(
    get,
    path = "/api/leaves/balances",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    params(
        ("employee_id" = Option<Uuid>, Query, description = "Defaults to own profile")
    ),
    responses(
        (status = 200, description = "Balances", body = Vec<LeaveBalanceResponse>)
    )
)]
pub async fn balances(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<LeaveListQuery>,
) -> AppResult<Json<Vec<LeaveBalanceResponse>>> {
    let own_id = own_employee_id(&state, &current_user).await?;

    let employee_id = match query.employee_id {
        Some(employee_id) => {
            if own_id != Some(employee_id) {
                require_manager(&current_user)?;
            }
            employee_id
        }
        None => own_id
            .ok_or_else(|| AppError::bad_request("No employee profile for this account"))?,
    };

    let balances = state.leave_service.balances(employee_id).await?;
    Ok(Json(balances))
}

/// List leave types
#[utoipa::path(
    get,
    path = "/api/leaves/types",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Leave types", body = Vec<LeaveType>))
)]
pub async fn list_types(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<LeaveType>>> {
    // Admins also see deactivated types
    let include_inactive = current_user.is_admin();
    let types = state.leave_service.list_leave_types(include_inactive).await?;
    Ok(Json(types))
}

/// Create a leave type (admin)
#[utoipa::path(
    post,
    path = "/api/leaves/types",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    request_body = CreateLeaveTypeRequest,
    responses(
        (status = 201, description = "Leave type created", body = LeaveType),
        (status = 403, description = "Admin only"),
        (status = 409, description = "Code already exists")
    )
)]
pub async fn create_type(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateLeaveTypeRequest>,
) -> AppResult<(StatusCode, Json<LeaveType>)> {
    require_admin(&current_user)?;

    let leave_type = state
        .leave_service
        .create_leave_type(payload.code, payload.name, payload.default_annual_quota)
        .await?;

    Ok((StatusCode::CREATED, Json(leave_type)))
}

/// Update a leave type (admin)
#[utoipa::path(
    put,
    path = "/api/leaves/types/{id}",
    tag = "Leaves",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Leave type ID")),
    request_body = UpdateLeaveTypeRequest,
    responses(
        (status = 200, description = "Leave type updated", body = LeaveType),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Leave type not found")
    )
)]
pub async fn update_type(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateLeaveTypeRequest>,
) -> AppResult<Json<LeaveType>> {
    require_admin(&current_user)?;

    let leave_type = state
        .leave_service
        .update_leave_type(id, payload.name, payload.default_annual_quota, payload.active)
        .await?;

    Ok(Json(leave_type))
}
