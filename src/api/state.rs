//! Application state - dependency injection container for handlers.

use std::sync::Arc;

use crate::infra::{Cache, Database};
use crate::services::{
    AttendanceService, AuthService, DepartmentService, EmployeeService, LeaveService,
    NotificationService, ReportService, Services, UserService,
};

/// Application state containing all services.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub employee_service: Arc<dyn EmployeeService>,
    pub department_service: Arc<dyn DepartmentService>,
    pub attendance_service: Arc<dyn AttendanceService>,
    pub leave_service: Arc<dyn LeaveService>,
    pub notification_service: Arc<dyn NotificationService>,
    pub report_service: Arc<dyn ReportService>,
    /// Redis cache
    pub cache: Arc<Cache>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from a connected database and cache.
    pub fn from_config(
        database: Arc<Database>,
        cache: Arc<Cache>,
        config: crate::config::Config,
    ) -> Self {
        let services = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: services.auth(),
            user_service: services.users(),
            employee_service: services.employees(),
            department_service: services.departments(),
            attendance_service: services.attendance(),
            leave_service: services.leaves(),
            notification_service: services.notifications(),
            report_service: services.reports(),
            cache,
            database,
        }
    }
}
