//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Caching (Redis)
//! - Unit of Work for transaction management

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::Cache;
pub use db::{Database, Migrator};
pub use repositories::{
    AttendanceRepository, AttendanceStore, DepartmentRepository, DepartmentStore, EmployeeChanges,
    EmployeeRepository, EmployeeStore, HolidayRepository, HolidayStore, LeaveBalanceRepository,
    LeaveBalanceStore, LeaveRequestRepository, LeaveRequestStore, LeaveTypeRepository,
    LeaveTypeStore, NotificationRepository, NotificationStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};
