//! Application services - business logic use cases.
//!
//! Each service is a trait (for dependency injection and testing) with one
//! concrete implementation over the Unit of Work.

mod attendance_service;
mod auth_service;
mod container;
mod department_service;
mod employee_service;
mod leave_service;
mod notification_service;
mod report_service;
mod user_service;

pub use attendance_service::{AttendanceManager, AttendanceService};
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use container::Services;
pub use department_service::{DepartmentManager, DepartmentService};
pub use employee_service::{EmployeeManager, EmployeeService, NewEmployee};
pub use leave_service::{LeaveCoordinator, LeaveService, NewLeaveRequest};
pub use notification_service::{Audience, NotificationService, Notifier};
pub use report_service::{RenderedReport, ReportGenerator, ReportService};
pub use user_service::{DashboardStats, UserManager, UserService};
