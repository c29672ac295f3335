//! Role listing handler.
//!
//! Roles are a closed enum; this endpoint only exposes the set so clients
//! can render pickers.

use axum::response::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::Role;
use crate::errors::AppResult;

/// One assignable role
#[derive(Debug, Serialize, ToSchema)]
pub struct RoleResponse {
    #[schema(example = "MANAGER")]
    pub name: Role,
    pub can_manage: bool,
}

/// List the closed role set
#[utoipa::path(
    get,
    path = "/api/roles",
    tag = "Roles",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Assignable roles", body = Vec<RoleResponse>))
)]
pub async fn list_roles() -> AppResult<Json<Vec<RoleResponse>>> {
    let roles = [Role::Admin, Role::Manager, Role::Employee]
        .into_iter()
        .map(|role| RoleResponse {
            name: role,
            can_manage: role.can_manage(),
        })
        .collect();

    Ok(Json(roles))
}
