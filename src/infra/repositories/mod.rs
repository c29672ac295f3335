//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod attendance_repository;
mod department_repository;
mod employee_repository;
pub(crate) mod entities;
mod holiday_repository;
mod leave_repository;
mod notification_repository;
mod user_repository;

pub use attendance_repository::{AttendanceRepository, AttendanceStore};
pub use department_repository::{DepartmentRepository, DepartmentStore};
pub use employee_repository::{EmployeeChanges, EmployeeRepository, EmployeeStore};
pub use holiday_repository::{HolidayRepository, HolidayStore};
pub use leave_repository::{
    LeaveBalanceRepository, LeaveBalanceStore, LeaveRequestRepository, LeaveRequestStore,
    LeaveTypeRepository, LeaveTypeStore,
};
pub use notification_repository::{NotificationRepository, NotificationStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use attendance_repository::MockAttendanceRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use department_repository::MockDepartmentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use employee_repository::MockEmployeeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use holiday_repository::MockHolidayRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use leave_repository::{
    MockLeaveBalanceRepository, MockLeaveRequestRepository, MockLeaveTypeRepository,
};
#[cfg(any(test, feature = "test-utils"))]
pub use notification_repository::MockNotificationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
