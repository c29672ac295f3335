//! Leave service - the lifecycle coordinator.
//!
//! Keeps LeaveRequest status, LeaveBalance counters, and Attendance day
//! rows mutually consistent. Every state transition (create, approve,
//! reject, cancel) performs its writes inside exactly one database
//! transaction, so concurrent requests against the same balance row cannot
//! interleave half-applied updates.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    days_in_range, leave_duration, LeaveBalanceResponse, LeaveRequest, LeaveRequestResponse,
    LeaveStatus, LeaveType,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// Fields accepted when submitting a leave request
#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    pub employee_id: Uuid,
    pub leave_type_id: Uuid,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub reason: Option<String>,
    /// Client-supplied duration, verified against the computed day count
    pub duration: Option<i32>,
}

/// Leave service trait for dependency injection.
#[async_trait]
pub trait LeaveService: Send + Sync {
    /// Submit a request: reserves `duration` days on the balance and
    /// inserts a PENDING request.
    async fn create_request(&self, new_request: NewLeaveRequest)
        -> AppResult<LeaveRequestResponse>;

    /// Approve a PENDING request: moves the reservation to used and stamps
    /// a LEAVE attendance row for every day in range.
    async fn approve_request(
        &self,
        request_id: Uuid,
        approver_user_id: Uuid,
    ) -> AppResult<LeaveRequestResponse>;

    /// Reject a PENDING request: releases the reservation.
    async fn reject_request(
        &self,
        request_id: Uuid,
        approver_user_id: Uuid,
        reason: String,
    ) -> AppResult<LeaveRequestResponse>;

    /// Cancel a PENDING or APPROVED request. Cancelling an approved
    /// request reverts its attendance rows to ABSENT.
    async fn cancel_request(&self, request_id: Uuid) -> AppResult<LeaveRequestResponse>;

    async fn get_request(&self, request_id: Uuid) -> AppResult<LeaveRequest>;

    /// Requests for one employee, or all requests filtered by status
    async fn list_requests(
        &self,
        employee_id: Option<Uuid>,
        status: Option<LeaveStatus>,
    ) -> AppResult<Vec<LeaveRequestResponse>>;

    /// Current-year balances for an employee
    async fn balances(&self, employee_id: Uuid) -> AppResult<Vec<LeaveBalanceResponse>>;

    async fn create_leave_type(&self, code: String, name: String, quota: i32)
        -> AppResult<LeaveType>;

    async fn update_leave_type(
        &self,
        id: Uuid,
        name: Option<String>,
        quota: Option<i32>,
        active: Option<bool>,
    ) -> AppResult<LeaveType>;

    async fn list_leave_types(&self, include_inactive: bool) -> AppResult<Vec<LeaveType>>;
}

/// Concrete implementation of LeaveService using Unit of Work.
pub struct LeaveCoordinator<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> LeaveCoordinator<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Best-effort notification; a delivery failure never fails the
    /// transition that already committed.
    async fn notify(&self, recipient_user_id: Uuid, sender_user_id: Uuid, title: &str, message: String) {
        if let Err(e) = self
            .uow
            .notifications()
            .create(title.to_string(), message, sender_user_id, vec![recipient_user_id], None)
            .await
        {
            tracing::warn!("Failed to deliver leave notification: {}", e);
        }
    }

    /// The user account behind an employee id, if resolvable
    async fn employee_user_id(&self, employee_id: Uuid) -> AppResult<Option<Uuid>> {
        Ok(self
            .uow
            .employees()
            .find_by_id(employee_id)
            .await?
            .map(|e| e.user_id))
    }
}

#[async_trait]
impl<U: UnitOfWork> LeaveService for LeaveCoordinator<U> {
    async fn create_request(
        &self,
        new_request: NewLeaveRequest,
    ) -> AppResult<LeaveRequestResponse> {
        let employee = self
            .uow
            .employees()
            .find_by_id(new_request.employee_id)
            .await?
            .ok_or_else(|| AppError::bad_request("Employee does not exist"))?;

        let leave_type = self
            .uow
            .leave_types()
            .find_by_id(new_request.leave_type_id)
            .await?
            .ok_or_else(|| AppError::bad_request("Leave type does not exist"))?;
        if !leave_type.active {
            return Err(AppError::bad_request("Leave type is no longer available"));
        }

        let duration = leave_duration(new_request.start_date, new_request.end_date)?;
        if let Some(client_duration) = new_request.duration {
            if client_duration != duration {
                return Err(AppError::bad_request(format!(
                    "Duration mismatch: the window spans {} days",
                    duration
                )));
            }
        }

        // Overlap validation against any PENDING or APPROVED window
        let overlapping = self
            .uow
            .leave_requests()
            .list_overlapping(employee.id, new_request.start_date, new_request.end_date)
            .await?;
        if !overlapping.is_empty() {
            return Err(AppError::bad_request(
                "An overlapping leave request already exists",
            ));
        }

        let employee_id = employee.id;
        let leave_type_id = leave_type.id;
        let default_quota = leave_type.default_annual_quota;
        let year = new_request.start_date.year();
        let start_date = new_request.start_date;
        let end_date = new_request.end_date;
        let reason = new_request.reason.clone();

        // Reserve and insert atomically
        let request = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let mut balance = match ctx
                        .leave_balances()
                        .find(employee_id, leave_type_id, year)
                        .await?
                    {
                        Some(balance) => balance,
                        None => {
                            ctx.leave_balances()
                                .create(employee_id, leave_type_id, year, default_quota)
                                .await?
                        }
                    };

                    balance.reserve(duration)?;
                    ctx.leave_balances().save(&balance).await?;

                    ctx.leave_requests()
                        .insert(employee_id, leave_type_id, start_date, end_date, duration, reason)
                        .await
                })
            })
            .await?;

        tracing::info!(
            request_id = %request.id,
            employee_id = %employee_id,
            duration,
            "Leave request created"
        );

        // Let the reporting manager know a decision is waiting
        if let Some(manager_id) = employee.manager_id {
            if let Ok(Some(manager_user_id)) = self.employee_user_id(manager_id).await {
                self.notify(
                    manager_user_id,
                    employee.user_id,
                    "Leave request awaiting approval",
                    format!(
                        "A {}-day leave request from {} to {} is awaiting your decision",
                        duration, start_date, end_date
                    ),
                )
                .await;
            }
        }

        Ok(LeaveRequestResponse::from(request))
    }

    async fn approve_request(
        &self,
        request_id: Uuid,
        approver_user_id: Uuid,
    ) -> AppResult<LeaveRequestResponse> {
        // Approvers never decide their own requests
        let request = self
            .uow
            .leave_requests()
            .find_by_id(request_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if let Some(approver_employee) = self
            .uow
            .employees()
            .find_by_user_id(approver_user_id)
            .await?
        {
            if approver_employee.id == request.employee_id {
                return Err(AppError::Forbidden);
            }
        }

        let approved = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let request = ctx
                        .leave_requests()
                        .find_by_id(request_id)
                        .await?
                        .ok_or(AppError::NotFound)?;

                    // The status check lives inside the transaction so two
                    // concurrent approvals cannot both pass it
                    if !request.status.can_transition_to(LeaveStatus::Approved) {
                        return Err(AppError::bad_request(
                            "Leave request has already been processed",
                        ));
                    }

                    let year = request.start_date.year();
                    let mut balance = ctx
                        .leave_balances()
                        .find(request.employee_id, request.leave_type_id, year)
                        .await?
                        .ok_or_else(|| {
                            AppError::internal("Leave balance missing for pending request")
                        })?;

                    balance.commit(request.duration);
                    ctx.leave_balances().save(&balance).await?;

                    for day in days_in_range(request.start_date, request.end_date) {
                        ctx.attendance()
                            .stamp_leave_day(request.employee_id, day, request.id)
                            .await?;
                    }

                    ctx.leave_requests()
                        .set_status(request.id, LeaveStatus::Approved, Some(approver_user_id), None)
                        .await
                })
            })
            .await?;

        tracing::info!(request_id = %approved.id, approver = %approver_user_id, "Leave request approved");

        if let Ok(Some(employee_user_id)) = self.employee_user_id(approved.employee_id).await {
            self.notify(
                employee_user_id,
                approver_user_id,
                "Leave approved",
                format!(
                    "Your leave from {} to {} has been approved",
                    approved.start_date, approved.end_date
                ),
            )
            .await;
        }

        Ok(LeaveRequestResponse::from(approved))
    }

    async fn reject_request(
        &self,
        request_id: Uuid,
        approver_user_id: Uuid,
        reason: String,
    ) -> AppResult<LeaveRequestResponse> {
        let rejected = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let request = ctx
                        .leave_requests()
                        .find_by_id(request_id)
                        .await?
                        .ok_or(AppError::NotFound)?;

                    if !request.status.can_transition_to(LeaveStatus::Rejected) {
                        return Err(AppError::bad_request(
                            "Leave request has already been processed",
                        ));
                    }

                    let year = request.start_date.year();
                    let mut balance = ctx
                        .leave_balances()
                        .find(request.employee_id, request.leave_type_id, year)
                        .await?
                        .ok_or_else(|| {
                            AppError::internal("Leave balance missing for pending request")
                        })?;

                    balance.release_pending(request.duration);
                    ctx.leave_balances().save(&balance).await?;

                    ctx.leave_requests()
                        .set_status(
                            request.id,
                            LeaveStatus::Rejected,
                            Some(approver_user_id),
                            Some(reason),
                        )
                        .await
                })
            })
            .await?;

        tracing::info!(request_id = %rejected.id, approver = %approver_user_id, "Leave request rejected");

        if let Ok(Some(employee_user_id)) = self.employee_user_id(rejected.employee_id).await {
            self.notify(
                employee_user_id,
                approver_user_id,
                "Leave rejected",
                format!(
                    "Your leave from {} to {} was rejected",
                    rejected.start_date, rejected.end_date
                ),
            )
            .await;
        }

        Ok(LeaveRequestResponse::from(rejected))
    }

    async fn cancel_request(&self, request_id: Uuid) -> AppResult<LeaveRequestResponse> {
        let cancelled = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let request = ctx
                        .leave_requests()
                        .find_by_id(request_id)
                        .await?
                        .ok_or(AppError::NotFound)?;

                    if !request.status.can_transition_to(LeaveStatus::Cancelled) {
                        return Err(AppError::bad_request(
                            "Leave request can no longer be cancelled",
                        ));
                    }

                    let year = request.start_date.year();
                    let mut balance = ctx
                        .leave_balances()
                        .find(request.employee_id, request.leave_type_id, year)
                        .await?
                        .ok_or_else(|| {
                            AppError::internal("Leave balance missing for leave request")
                        })?;

                    match request.status {
                        LeaveStatus::Pending => balance.release_pending(request.duration),
                        LeaveStatus::Approved => {
                            balance.release_used(request.duration);
                            // Revert the stamped days; only rows linked to
                            // this request are touched
                            ctx.attendance().revert_leave_days(request.id).await?;
                        }
                        _ => unreachable!("guarded by can_transition_to"),
                    }
                    ctx.leave_balances().save(&balance).await?;

                    ctx.leave_requests()
                        .set_status(request.id, LeaveStatus::Cancelled, None, None)
                        .await
                })
            })
            .await?;

        tracing::info!(request_id = %cancelled.id, "Leave request cancelled");

        Ok(LeaveRequestResponse::from(cancelled))
    }

    async fn get_request(&self, request_id: Uuid) -> AppResult<LeaveRequest> {
        self.uow
            .leave_requests()
            .find_by_id(request_id)
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list_requests(
        &self,
        employee_id: Option<Uuid>,
        status: Option<LeaveStatus>,
    ) -> AppResult<Vec<LeaveRequestResponse>> {
        let requests = match employee_id {
            Some(employee_id) => {
                let mut requests = self.uow.leave_requests().list_for_employee(employee_id).await?;
                if let Some(status) = status {
                    requests.retain(|r| r.status == status);
                }
                requests
            }
            None => self.uow.leave_requests().list_all(status).await?,
        };

        Ok(requests.into_iter().map(LeaveRequestResponse::from).collect())
    }

    async fn balances(&self, employee_id: Uuid) -> AppResult<Vec<LeaveBalanceResponse>> {
        let year = Utc::now().year();
        let balances = self
            .uow
            .leave_balances()
            .list_for_employee(employee_id, year)
            .await?;

        let mut responses = Vec::with_capacity(balances.len());
        for balance in balances {
            let leave_type = self
                .uow
                .leave_types()
                .find_by_id(balance.leave_type_id)
                .await?
                .ok_or(AppError::NotFound)?;
            responses.push(LeaveBalanceResponse::new(balance, leave_type.code));
        }

        Ok(responses)
    }

    async fn create_leave_type(
        &self,
        code: String,
        name: String,
        quota: i32,
    ) -> AppResult<LeaveType> {
        if quota < 0 {
            return Err(AppError::bad_request("Annual quota must not be negative"));
        }
        if self.uow.leave_types().find_by_code(&code).await?.is_some() {
            return Err(AppError::conflict("Leave type"));
        }

        self.uow.leave_types().create(code, name, quota).await
    }

    async fn update_leave_type(
        &self,
        id: Uuid,
        name: Option<String>,
        quota: Option<i32>,
        active: Option<bool>,
    ) -> AppResult<LeaveType> {
        if let Some(quota) = quota {
            if quota < 0 {
                return Err(AppError::bad_request("Annual quota must not be negative"));
            }
        }

        self.uow.leave_types().update(id, name, quota, active).await
    }

    async fn list_leave_types(&self, include_inactive: bool) -> AppResult<Vec<LeaveType>> {
        self.uow.leave_types().list(include_inactive).await
    }
}
