//! HTTP request handlers.

pub mod admin_handler;
pub mod attendance_handler;
pub mod auth_handler;
pub mod department_handler;
pub mod employee_handler;
pub mod leave_handler;
pub mod notification_handler;
pub mod report_handler;
pub mod role_handler;

pub use admin_handler::admin_routes;
pub use attendance_handler::attendance_routes;
pub use auth_handler::{auth_routes, profile_routes};
pub use department_handler::department_routes;
pub use employee_handler::employee_routes;
pub use leave_handler::leave_routes;
pub use notification_handler::notification_routes;
pub use report_handler::report_routes;
pub use role_handler::list_roles;
