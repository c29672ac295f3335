//! Attendance handlers: check-in/check-out, listings, corrections, and the
//! holiday calendar.

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
use crate::domain::{AttendanceResponse, AttendanceStatus, Holiday};
use crate::errors::{AppError, AppResult};

/// Attendance listing filters
#[derive(Debug, Deserialize)]
pub struct AttendanceQuery {
    /// Someone else's records require manager/admin
    pub employee_id: Option<Uuid>,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Admin status correction request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CorrectStatusRequest {
    /// New status for the day
    #[schema(example = "PRESENT")]
    pub status: String,
}

/// Holiday creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateHolidayRequest {
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "Holiday name is required"))]
    #[schema(example = "New Year's Day")]
    pub name: String,
}

/// Create attendance routes
pub fn attendance_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_attendance))
        .route("/check-in", post(check_in))
        .route("/check-out", post(check_out))
        .route("/today", get(today))
        .route("/holidays", get(list_holidays).post(create_holiday))
        .route("/holidays/:id", axum::routing::delete(delete_holiday))
        .route("/:id", put(correct_status))
}

/// Resolve the caller's own employee profile id
async fn own_employee_id(state: &AppState, current_user: &CurrentUser) -> AppResult<Uuid> {
    let employee = state
        .employee_service
        .get_employee_by_user(current_user.id)
        .await
        .map_err(|_| AppError::bad_request("No employee profile for this account"))?;
    Ok(employee.id)
}

/// Check in for today
#[utoipa::path(
    post,
    path = "/api/attendance/check-in",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Checked in", body = AttendanceResponse),
        (status = 400, description = "Already checked in today")
    )
)]
pub async fn check_in(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<AttendanceResponse>)> {
    let employee_id = own_employee_id(&state, &current_user).await?;
    let record = state.attendance_service.check_in(employee_id).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Check out for today
#[utoipa::path(
    post,
    path = "/api/attendance/check-out",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Checked out", body = AttendanceResponse),
        (status = 400, description = "No check-in, or already checked out")
    )
)]
pub async fn check_out(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<AttendanceResponse>> {
    let employee_id = own_employee_id(&state, &current_user).await?;
    let record = state.attendance_service.check_out(employee_id).await?;
    Ok(Json(record))
}

/// Today's attendance record, if any
#[utoipa::path(
    get,
    path = "/api/attendance/today",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Today's record (null if none)")
    )
)]
pub async fn today(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Option<AttendanceResponse>>> {
    let employee_id = own_employee_id(&state, &current_user).await?;
    let record = state.attendance_service.today(employee_id).await?;
    Ok(Json(record))
}

/// Attendance records within a date range
#[utoipa::path(
    get,
    path = "/api/attendance",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    params(
        ("employee_id" = Option<Uuid>, Query, description = "Defaults to own profile"),
        ("from" = NaiveDate, Query, description = "Range start"),
        ("to" = NaiveDate, Query, description = "Range end")
    ),
    responses(
        (status = 200, description = "Attendance records", body = Vec<AttendanceResponse>),
        (status = 403, description = "Others' records require manager/admin")
    )
)]
pub async fn list_attendance(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<AttendanceQuery>,
) -> AppResult<Json<Vec<AttendanceResponse>>> {
    let own_id = own_employee_id(&state, &current_user).await.ok();

    let employee_id = match query.employee_id {
        Some(employee_id) => {
            if own_id != Some(employee_id) {
                require_manager(&current_user)?;
            }
            employee_id
        }
        None => own_id.ok_or_else(|| {
            AppError::bad_request("No employee profile for this account")
        })?,
    };

    let records = state
        .attendance_service
        .list(employee_id, query.from, query.to)
        .await?;

    Ok(Json(records))
}

/// Correct a day's status (admin)
#[utoipa::path(
    put,
    path = "/api/attendance/{id}",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Attendance record ID")),
    request_body = CorrectStatusRequest,
    responses(
        (status = 200, description = "Status corrected", body = AttendanceResponse),
        (status = 400, description = "Unknown status"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Record not found")
    )
)]
pub async fn correct_status(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CorrectStatusRequest>,
) -> AppResult<Json<AttendanceResponse>> {
    require_admin(&current_user)?;

    let status = AttendanceStatus::parse(&payload.status)
        .ok_or_else(|| AppError::validation("Unknown attendance status"))?;

    let record = state.attendance_service.correct_status(id, status).await?;
    Ok(Json(record))
}

/// Holiday calendar
#[utoipa::path(
    get,
    path = "/api/attendance/holidays",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Holidays", body = Vec<Holiday>))
)]
pub async fn list_holidays(State(state): State<AppState>) -> AppResult<Json<Vec<Holiday>>> {
    let holidays = state.attendance_service.list_holidays().await?;
    Ok(Json(holidays))
}

/// Add a holiday (admin)
#[utoipa::path(
    post,
    path = "/api/attendance/holidays",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    request_body = CreateHolidayRequest,
    responses(
        (status = 201, description = "Holiday added", body = Holiday),
        (status = 403, description = "Admin only"),
        (status = 409, description = "Date already on the calendar")
    )
)]
pub async fn create_holiday(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateHolidayRequest>,
) -> AppResult<(StatusCode, Json<Holiday>)> {
    require_admin(&current_user)?;

    let holiday = state
        .attendance_service
        .add_holiday(payload.date, payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(holiday)))
}

/// Remove a holiday (admin)
#[utoipa::path(
    delete,
    path = "/api/attendance/holidays/{id}",
    tag = "Attendance",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Holiday ID")),
    responses(
        (status = 204, description = "Holiday removed"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Holiday not found")
    )
)]
pub async fn delete_holiday(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_admin(&current_user)?;
    state.attendance_service.remove_holiday(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
