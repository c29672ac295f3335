//! User domain entity and the role model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_EMPLOYEE, ROLE_MANAGER};

/// Closed set of roles.
///
/// Capability checks live here instead of string comparisons in handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Check if this role can act on other employees' leave and attendance
    pub fn can_manage(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }

    /// Parse a role string, rejecting anything outside the closed set
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            ROLE_ADMIN => Some(Role::Admin),
            ROLE_MANAGER => Some(Role::Manager),
            ROLE_EMPLOYEE => Some(Role::Employee),
            _ => None,
        }
    }

    /// String form as stored in the database and JWT claims
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Manager => ROLE_MANAGER,
            Role::Employee => ROLE_EMPLOYEE,
        }
    }
}

impl From<&str> for Role {
    /// Lenient conversion used when loading rows; unknown values fall back
    /// to the least privileged role.
    fn from(s: &str) -> Self {
        Role::parse(s).unwrap_or(Role::Employee)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Never serialized; defaults to empty when a cached copy is loaded
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub full_name: String,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete timestamp (None = active, Some = deleted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if user is soft deleted
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Check if the account can log in (active and not deleted)
    pub fn can_login(&self) -> bool {
        self.active && self.deleted_at.is_none()
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Login name
    #[schema(example = "jdoe")]
    pub username: String,
    /// User email address
    #[schema(example = "jdoe@example.com")]
    pub email: String,
    /// Display name
    #[schema(example = "Jordan Doe")]
    pub full_name: String,
    /// Assigned role
    #[schema(example = "EMPLOYEE")]
    pub role: Role,
    /// Whether the account may log in
    pub active: bool,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            active: user.active,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::Admin, Role::Manager, Role::Employee] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("SUPERUSER"), None);
    }

    #[test]
    fn capability_checks() {
        assert!(Role::Admin.is_admin());
        assert!(Role::Admin.can_manage());
        assert!(Role::Manager.can_manage());
        assert!(!Role::Manager.is_admin());
        assert!(!Role::Employee.can_manage());
    }
}
