//! Service Container - centralized service access.
//!
//! Wires every service against one shared Unit of Work so handlers depend
//! on traits, not concrete implementations.

use std::sync::Arc;

use super::{
    AttendanceManager, AttendanceService, AuthService, Authenticator, DepartmentManager,
    DepartmentService, EmployeeManager, EmployeeService, LeaveCoordinator, LeaveService,
    NotificationService, Notifier, ReportGenerator, ReportService, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::Persistence;

/// Concrete container holding one instance of every service
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    employee_service: Arc<dyn EmployeeService>,
    department_service: Arc<dyn DepartmentService>,
    attendance_service: Arc<dyn AttendanceService>,
    leave_service: Arc<dyn LeaveService>,
    notification_service: Arc<dyn NotificationService>,
    report_service: Arc<dyn ReportService>,
}

impl Services {
    /// Create service container from a database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            employee_service: Arc::new(EmployeeManager::new(uow.clone())),
            department_service: Arc::new(DepartmentManager::new(uow.clone())),
            attendance_service: Arc::new(AttendanceManager::new(uow.clone())),
            leave_service: Arc::new(LeaveCoordinator::new(uow.clone())),
            notification_service: Arc::new(Notifier::new(uow.clone())),
            report_service: Arc::new(ReportGenerator::new(uow)),
        }
    }

    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    pub fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    pub fn employees(&self) -> Arc<dyn EmployeeService> {
        self.employee_service.clone()
    }

    pub fn departments(&self) -> Arc<dyn DepartmentService> {
        self.department_service.clone()
    }

    pub fn attendance(&self) -> Arc<dyn AttendanceService> {
        self.attendance_service.clone()
    }

    pub fn leaves(&self) -> Arc<dyn LeaveService> {
        self.leave_service.clone()
    }

    pub fn notifications(&self) -> Arc<dyn NotificationService> {
        self.notification_service.clone()
    }

    pub fn reports(&self) -> Arc<dyn ReportService> {
        self.report_service.clone()
    }
}
