//! Notification handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, require_manager, CurrentUser};
use crate::api::AppState;
use crate::domain::NotificationResponse;
use crate::errors::{AppError, AppResult};
use crate::services::Audience;
use crate::types::MessageResponse;

/// Notification creation payload.
///
/// Exactly one audience: explicit recipients, a department, or everyone.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateNotificationRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Office closed Friday")]
    pub title: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
    /// Explicit recipient user ids
    pub recipient_ids: Option<Vec<Uuid>>,
    /// Fan out to every employee of a department
    pub department_id: Option<Uuid>,
    /// Fan out to every active user
    #[serde(default)]
    pub broadcast: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Unread badge counter
#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCountResponse {
    pub unread: u64,
}

/// Create notification routes
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications).post(create_notification))
        .route("/unread-count", get(unread_count))
        .route("/read-all", post(mark_all_read))
        .route("/:id/read", post(mark_read))
        .route("/:id", axum::routing::delete(delete_notification))
}

/// List the caller's notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notifications, newest first", body = Vec<NotificationResponse>)
    )
)]
pub async fn list_notifications(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<NotificationResponse>>> {
    let notifications = state
        .notification_service
        .list_for_user(current_user.id)
        .await?;
    Ok(Json(notifications))
}

/// Create a notification (manager/admin)
#[utoipa::path(
    post,
    path = "/api/notifications",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    request_body = CreateNotificationRequest,
    responses(
        (status = 201, description = "Notification created", body = NotificationResponse),
        (status = 400, description = "No audience given"),
        (status = 403, description = "Manager/admin only")
    )
)]
pub async fn create_notification(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateNotificationRequest>,
) -> AppResult<(StatusCode, Json<NotificationResponse>)> {
    require_manager(&current_user)?;

    let audience = match (payload.recipient_ids, payload.department_id, payload.broadcast) {
        (Some(recipient_ids), None, false) => Audience::Users(recipient_ids),
        (None, Some(department_id), false) => Audience::Department(department_id),
        (None, None, true) => Audience::Everyone,
        _ => {
            return Err(AppError::bad_request(
                "Provide exactly one of recipient_ids, department_id, or broadcast",
            ))
        }
    };

    let notification = state
        .notification_service
        .create(
            payload.title,
            payload.message,
            current_user.id,
            audience,
            payload.expires_at,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(notification)))
}

/// Unread notification count
#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Unread count", body = UnreadCountResponse))
)]
pub async fn unread_count(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UnreadCountResponse>> {
    let unread = state.notification_service.unread_count(current_user.id).await?;
    Ok(Json(UnreadCountResponse { unread }))
}

/// Mark one notification read
#[utoipa::path(
    post,
    path = "/api/notifications/{id}/read",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked read"),
        (status = 404, description = "Not addressed to this user")
    )
)]
pub async fn mark_read(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.notification_service.mark_read(id, current_user.id).await?;
    Ok(Json(MessageResponse::new("Notification marked read")))
}

/// Mark all notifications read
#[utoipa::path(
    post,
    path = "/api/notifications/read-all",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All marked read"))
)]
pub async fn mark_all_read(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    state.notification_service.mark_all_read(current_user.id).await?;
    Ok(Json(MessageResponse::new("All notifications marked read")))
}

/// Delete a notification for every recipient (admin)
#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Notification ID")),
    responses(
        (status = 204, description = "Notification deleted"),
        (status = 403, description = "Admin only"),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn delete_notification(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    require_admin(&current_user)?;
    state.notification_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
