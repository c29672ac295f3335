//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, attendance_handler, auth_handler, department_handler, employee_handler,
    leave_handler, notification_handler, report_handler, role_handler,
};
use crate::domain::{
    AttendanceResponse, AttendanceStatus, DepartmentResponse, EmployeeResponse, Holiday,
    LeaveBalanceResponse, LeaveRequestResponse, LeaveStatus, LeaveType, NotificationResponse,
    ReportRow, Role, UserResponse,
};
use crate::services::{DashboardStats, TokenResponse};

/// OpenAPI documentation for the Attendly API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendly API",
        version = "0.1.0",
        description = "HR attendance and leave management REST API",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication
        auth_handler::register,
        auth_handler::login,
        auth_handler::get_profile,
        auth_handler::update_profile,
        auth_handler::change_password,
        // Admin
        admin_handler::stats,
        admin_handler::list_users,
        admin_handler::get_user,
        admin_handler::update_user,
        admin_handler::delete_user,
        admin_handler::restore_user,
        // Employees
        employee_handler::list_employees,
        employee_handler::create_employee,
        employee_handler::get_own_profile,
        employee_handler::get_employee,
        employee_handler::update_employee,
        employee_handler::delete_employee,
        // Departments
        department_handler::list_departments,
        department_handler::create_department,
        department_handler::get_department,
        department_handler::update_department,
        department_handler::delete_department,
        // Attendance
        attendance_handler::check_in,
        attendance_handler::check_out,
        attendance_handler::today,
        attendance_handler::list_attendance,
        attendance_handler::correct_status,
        attendance_handler::list_holidays,
        attendance_handler::create_holiday,
        attendance_handler::delete_holiday,
        // Leaves
        leave_handler::create_request,
        leave_handler::list_requests,
        leave_handler::get_request,
        leave_handler::approve_request,
        leave_handler::reject_request,
        leave_handler::cancel_request,
        leave_handler::balances,
        leave_handler::list_types,
        leave_handler::create_type,
        leave_handler::update_type,
        // Notifications
        notification_handler::list_notifications,
        notification_handler::create_notification,
        notification_handler::unread_count,
        notification_handler::mark_read,
        notification_handler::mark_all_read,
        notification_handler::delete_notification,
        // Roles
        role_handler::list_roles,
        // Reports
        report_handler::download_attendance_report,
        report_handler::attendance_report_data,
    ),
    components(
        schemas(
            // Domain types
            Role,
            UserResponse,
            EmployeeResponse,
            DepartmentResponse,
            AttendanceStatus,
            AttendanceResponse,
            Holiday,
            LeaveStatus,
            LeaveType,
            LeaveBalanceResponse,
            LeaveRequestResponse,
            NotificationResponse,
            ReportRow,
            DashboardStats,
            TokenResponse,
            // Request types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::UpdateProfileRequest,
            auth_handler::ChangePasswordRequest,
            admin_handler::UpdateUserRequest,
            employee_handler::CreateEmployeeRequest,
            employee_handler::UpdateEmployeeRequest,
            department_handler::CreateDepartmentRequest,
            department_handler::UpdateDepartmentRequest,
            attendance_handler::CorrectStatusRequest,
            attendance_handler::CreateHolidayRequest,
            leave_handler::CreateLeaveRequest,
            leave_handler::RejectLeaveRequest,
            leave_handler::CreateLeaveTypeRequest,
            leave_handler::UpdateLeaveTypeRequest,
            notification_handler::CreateNotificationRequest,
            notification_handler::UnreadCountResponse,
            role_handler::RoleResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login, and profile"),
        (name = "Admin", description = "Account management and dashboard stats"),
        (name = "Employees", description = "Employee profiles"),
        (name = "Departments", description = "Department management"),
        (name = "Attendance", description = "Check-in/check-out and the holiday calendar"),
        (name = "Leaves", description = "Leave requests, balances, and types"),
        (name = "Notifications", description = "User notifications"),
        (name = "Roles", description = "The closed role set"),
        (name = "Reports", description = "Attendance report generation")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login"))
                        .build(),
                ),
            );
        }
    }
}
