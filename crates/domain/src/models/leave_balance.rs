//! Leave balance models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Leave type whose balance approved requests deduct from.
pub const ANNUAL_LEAVE: &str = "Annual leave";

/// Remaining days of one leave type for a user and year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    pub user_id: Uuid,
    pub leave_type: String,
    pub year: i32,
    pub balance_days: i32,
    pub updated_at: DateTime<Utc>,
}

/// Audit row for a balance change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalanceLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub leave_type: String,
    pub year: i32,
    pub change_days: i32,
    pub balance_after: i32,
    pub request_id: Option<Uuid>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
