//! Annual leave deduction on final approval.

use chrono::Datelike;
use domain::models::{LeaveBalance, LeaveBalanceLog, RequestType, ANNUAL_LEAVE};
use domain::services::{deduct, RequestEvent};
use persistence::repositories::{LeaveBalanceRepository, NewLeaveLogRow};
use sqlx::PgConnection;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::WorkflowError;

#[derive(Clone)]
pub struct LeaveLedger {
    balances: LeaveBalanceRepository,
    default_annual_days: i32,
}

impl LeaveLedger {
    pub fn new(balances: LeaveBalanceRepository, default_annual_days: i32) -> Self {
        Self {
            balances,
            default_annual_days,
        }
    }

    /// Deducts approved annual leave. Runs on the decision's connection so the
    /// deduction commits or rolls back with the decision. Returns the ledger
    /// entry written, if any.
    pub async fn apply(
        &self,
        conn: &mut PgConnection,
        event: &RequestEvent,
    ) -> Result<Option<LeaveBalanceLog>, WorkflowError> {
        let RequestEvent::FinalApproved {
            request_id,
            owner_id,
            request_type: RequestType::AnnualLeave,
            title,
            days_applied,
            decided_at,
            ..
        } = event
        else {
            return Ok(None);
        };

        let Some(days) = days_applied.filter(|days| *days > 0) else {
            warn!(request_id = %request_id, "Approved annual leave has no days_applied; balance untouched");
            return Ok(None);
        };

        let year = decided_at.year();
        let balance = self
            .balances
            .lock_or_create(conn, *owner_id, ANNUAL_LEAVE, year, self.default_annual_days)
            .await?;
        let deduction = deduct(balance.balance_days, days);

        self.balances
            .set_balance(conn, *owner_id, ANNUAL_LEAVE, year, deduction.balance_after)
            .await?;
        let reason = format!("Approved leave: {title}");
        let log = self
            .balances
            .insert_log(
                conn,
                NewLeaveLogRow {
                    user_id: *owner_id,
                    leave_type: ANNUAL_LEAVE,
                    year,
                    change_days: deduction.change_days,
                    balance_after: deduction.balance_after,
                    request_id: Some(*request_id),
                    reason: Some(&reason),
                },
            )
            .await?;

        info!(
            request_id = %request_id,
            user_id = %owner_id,
            year,
            requested_days = days,
            change_days = deduction.change_days,
            balance_after = deduction.balance_after,
            "Annual leave deducted"
        );
        Ok(Some(log.into()))
    }

    /// Current annual leave balance, if a row exists for the year.
    pub async fn balance(
        &self,
        user_id: Uuid,
        year: i32,
    ) -> Result<Option<LeaveBalance>, WorkflowError> {
        Ok(self
            .balances
            .find(user_id, ANNUAL_LEAVE, year)
            .await?
            .map(Into::into))
    }

    /// Ledger entries for a user and year, oldest first.
    pub async fn history(
        &self,
        user_id: Uuid,
        year: i32,
    ) -> Result<Vec<LeaveBalanceLog>, WorkflowError> {
        Ok(self
            .balances
            .list_logs(user_id, year)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}
