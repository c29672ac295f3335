//! Report handlers.

use axum::{
    extract::{Extension, Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::Json,
    routing::get,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::middleware::{require_manager, CurrentUser};
use crate::api::AppState;
use crate::domain::{ReportFilter, ReportRow};
use crate::errors::{AppError, AppResult};
use crate::reports::ReportFormat;

/// Report query parameters
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub department_id: Option<Uuid>,
    /// pdf, csv, or excel; only used by the download endpoint
    pub format: Option<String>,
}

impl ReportQuery {
    fn filter(&self) -> ReportFilter {
        ReportFilter {
            from: self.from,
            to: self.to,
            department_id: self.department_id,
        }
    }
}

/// Create report routes
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/attendance", get(download_attendance_report))
        .route("/attendance/data", get(attendance_report_data))
}

/// Download the attendance report in the requested format
#[utoipa::path(
    get,
    path = "/api/reports/attendance",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(
        ("from" = NaiveDate, Query, description = "Range start"),
        ("to" = NaiveDate, Query, description = "Range end"),
        ("department_id" = Option<Uuid>, Query, description = "Restrict to one department"),
        ("format" = String, Query, description = "pdf, csv, or excel")
    ),
    responses(
        (status = 200, description = "Report file as attachment"),
        (status = 400, description = "Unknown format or bad range"),
        (status = 403, description = "Manager/admin only")
    )
)]
pub async fn download_attendance_report(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<(HeaderMap, Vec<u8>)> {
    require_manager(&current_user)?;

    let format = ReportFormat::parse(
        query
            .format
            .as_deref()
            .ok_or_else(|| AppError::bad_request("Missing format parameter"))?,
    )?;

    let report = state
        .report_service
        .attendance_report(query.filter(), format)
        .await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(report.content_type),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", report.filename))
            .map_err(|e| AppError::internal(format!("Invalid header value: {}", e)))?,
    );

    Ok((headers, report.bytes))
}

/// The computed report rows as JSON
#[utoipa::path(
    get,
    path = "/api/reports/attendance/data",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(
        ("from" = NaiveDate, Query, description = "Range start"),
        ("to" = NaiveDate, Query, description = "Range end"),
        ("department_id" = Option<Uuid>, Query, description = "Restrict to one department")
    ),
    responses(
        (status = 200, description = "Computed rows", body = Vec<ReportRow>),
        (status = 403, description = "Manager/admin only")
    )
)]
pub async fn attendance_report_data(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<ReportRow>>> {
    require_manager(&current_user)?;

    let rows = state.report_service.attendance_rows(query.filter()).await?;
    Ok(Json(rows))
}
