//! Leave domain: request lifecycle, per-year balances, and the counter
//! arithmetic the lifecycle coordinator relies on.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Leave request lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "PENDING",
            LeaveStatus::Approved => "APPROVED",
            LeaveStatus::Rejected => "REJECTED",
            LeaveStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(LeaveStatus::Pending),
            "APPROVED" => Some(LeaveStatus::Approved),
            "REJECTED" => Some(LeaveStatus::Rejected),
            "CANCELLED" => Some(LeaveStatus::Cancelled),
            _ => None,
        }
    }

    /// Allowed transitions: PENDING -> {APPROVED, REJECTED, CANCELLED},
    /// APPROVED -> CANCELLED. Everything else is final.
    pub fn can_transition_to(&self, next: LeaveStatus) -> bool {
        match (self, next) {
            (LeaveStatus::Pending, LeaveStatus::Approved)
            | (LeaveStatus::Pending, LeaveStatus::Rejected)
            | (LeaveStatus::Pending, LeaveStatus::Cancelled)
            | (LeaveStatus::Approved, LeaveStatus::Cancelled) => true,
            _ => false,
        }
    }
}

impl From<&str> for LeaveStatus {
    fn from(s: &str) -> Self {
        LeaveStatus::parse(s).unwrap_or(LeaveStatus::Pending)
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Leave type catalog entry (Annual, Sick, ...)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaveType {
    pub id: Uuid,
    /// Short unique code
    #[schema(example = "ANNUAL")]
    pub code: String,
    #[schema(example = "Annual Leave")]
    pub name: String,
    /// Days allocated per year when a balance row is first created
    pub default_annual_quota: i32,
    pub active: bool,
}

/// Per-employee, per-type, per-year leave counters.
///
/// Invariant: `available() >= 0` is enforced whenever days are reserved.
#[derive(Debug, Clone, Serialize)]
pub struct LeaveBalance {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub leave_type_id: Uuid,
    pub year: i32,
    pub allocated: i32,
    pub used: i32,
    pub pending: i32,
    pub carried_forward: i32,
}

impl LeaveBalance {
    /// Days still requestable
    pub fn available(&self) -> i32 {
        self.allocated + self.carried_forward - self.used - self.pending
    }

    /// Reserve days for a new PENDING request.
    pub fn reserve(&mut self, days: i32) -> AppResult<()> {
        if days > self.available() {
            return Err(AppError::bad_request(format!(
                "Insufficient leave balance: requested {} days, {} available",
                days,
                self.available()
            )));
        }
        self.pending += days;
        Ok(())
    }

    /// Move a reservation to used on approval.
    pub fn commit(&mut self, days: i32) {
        self.pending = (self.pending - days).max(0);
        self.used += days;
    }

    /// Release a reservation on rejection or pending-cancel.
    pub fn release_pending(&mut self, days: i32) {
        self.pending = (self.pending - days).max(0);
    }

    /// Give back used days when an approved request is cancelled.
    pub fn release_used(&mut self, days: i32) {
        self.used = (self.used - days).max(0);
    }
}

/// Leave balance response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaveBalanceResponse {
    pub leave_type_id: Uuid,
    #[schema(example = "ANNUAL")]
    pub leave_type_code: String,
    pub year: i32,
    pub allocated: i32,
    pub used: i32,
    pub pending: i32,
    pub carried_forward: i32,
    pub available: i32,
}

impl LeaveBalanceResponse {
    pub fn new(balance: LeaveBalance, leave_type_code: String) -> Self {
        let available = balance.available();
        Self {
            leave_type_id: balance.leave_type_id,
            leave_type_code,
            year: balance.year,
            allocated: balance.allocated,
            used: balance.used,
            pending: balance.pending,
            carried_forward: balance.carried_forward,
            available,
        }
    }
}

/// Leave request domain entity
#[derive(Debug, Clone, Serialize)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub leave_type_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: i32,
    pub reason: Option<String>,
    pub status: LeaveStatus,
    pub approver_id: Option<Uuid>,
    pub rejection_reason: Option<String>,
    pub decided_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Leave request response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaveRequestResponse {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub leave_type_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: i32,
    pub reason: Option<String>,
    #[schema(example = "PENDING")]
    pub status: LeaveStatus,
    pub approver_id: Option<Uuid>,
    pub rejection_reason: Option<String>,
    pub decided_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<LeaveRequest> for LeaveRequestResponse {
    fn from(request: LeaveRequest) -> Self {
        Self {
            id: request.id,
            employee_id: request.employee_id,
            leave_type_id: request.leave_type_id,
            start_date: request.start_date,
            end_date: request.end_date,
            duration: request.duration,
            reason: request.reason,
            status: request.status,
            approver_id: request.approver_id,
            rejection_reason: request.rejection_reason,
            decided_at: request.decided_at,
            created_at: request.created_at,
        }
    }
}

/// Validate a leave window and compute its duration in days, inclusive of
/// both endpoints. Windows crossing a year boundary are rejected so the
/// request debits exactly one balance row.
pub fn leave_duration(start: NaiveDate, end: NaiveDate) -> AppResult<i32> {
    if end < start {
        return Err(AppError::bad_request("End date must not precede start date"));
    }
    if start.year() != end.year() {
        return Err(AppError::bad_request(
            "Leave must not cross a year boundary; submit one request per year",
        ));
    }
    Ok((end - start).num_days() as i32 + 1)
}

/// Every calendar day in [start, end]
pub fn days_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = start;
    while day <= end {
        days.push(day);
        day = day + Days::new(1);
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn balance(allocated: i32) -> LeaveBalance {
        LeaveBalance {
            id: Uuid::new_v4(),
            employee_id: Uuid::new_v4(),
            leave_type_id: Uuid::new_v4(),
            year: 2024,
            allocated,
            used: 0,
            pending: 0,
            carried_forward: 0,
        }
    }

    #[test]
    fn duration_is_inclusive() {
        assert_eq!(leave_duration(date(2024, 3, 4), date(2024, 3, 8)).unwrap(), 5);
        assert_eq!(leave_duration(date(2024, 3, 4), date(2024, 3, 4)).unwrap(), 1);
    }

    #[test]
    fn duration_rejects_inverted_and_cross_year_windows() {
        assert!(leave_duration(date(2024, 3, 8), date(2024, 3, 4)).is_err());
        assert!(leave_duration(date(2024, 12, 30), date(2025, 1, 2)).is_err());
    }

    #[test]
    fn reserve_respects_available() {
        let mut b = balance(20);
        b.reserve(5).unwrap();
        assert_eq!(b.pending, 5);
        assert_eq!(b.available(), 15);

        // pending days count against availability
        assert!(b.reserve(16).is_err());
        b.reserve(15).unwrap();
        assert_eq!(b.available(), 0);
    }

    #[test]
    fn approve_then_cancel_round_trip() {
        // the worked example: allocate 20, request 5, approve, cancel
        let mut b = balance(20);
        b.reserve(5).unwrap();
        assert_eq!((b.pending, b.used), (5, 0));

        b.commit(5);
        assert_eq!((b.pending, b.used), (0, 5));
        assert_eq!(b.available(), 15);

        b.release_used(5);
        assert_eq!((b.pending, b.used), (0, 0));
        assert_eq!(b.available(), 20);
    }

    #[test]
    fn carried_forward_extends_availability() {
        let mut b = balance(20);
        b.carried_forward = 3;
        assert_eq!(b.available(), 23);
        b.reserve(22).unwrap();
        assert_eq!(b.available(), 1);
    }

    #[test]
    fn status_transitions() {
        assert!(LeaveStatus::Pending.can_transition_to(LeaveStatus::Approved));
        assert!(LeaveStatus::Pending.can_transition_to(LeaveStatus::Rejected));
        assert!(LeaveStatus::Pending.can_transition_to(LeaveStatus::Cancelled));
        assert!(LeaveStatus::Approved.can_transition_to(LeaveStatus::Cancelled));

        assert!(!LeaveStatus::Approved.can_transition_to(LeaveStatus::Approved));
        assert!(!LeaveStatus::Rejected.can_transition_to(LeaveStatus::Cancelled));
        assert!(!LeaveStatus::Cancelled.can_transition_to(LeaveStatus::Pending));
    }

    #[test]
    fn days_in_range_covers_both_endpoints() {
        let days = days_in_range(date(2024, 6, 28), date(2024, 7, 2));
        assert_eq!(days.len(), 5);
        assert_eq!(days[0], date(2024, 6, 28));
        assert_eq!(days[4], date(2024, 7, 2));
    }
}
