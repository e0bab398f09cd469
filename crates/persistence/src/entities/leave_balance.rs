//! Leave balance entities (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the leave_balances table.
#[derive(Debug, Clone, FromRow)]
pub struct LeaveBalanceEntity {
    pub user_id: Uuid,
    pub leave_type: String,
    pub year: i32,
    pub balance_days: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<LeaveBalanceEntity> for domain::models::LeaveBalance {
    fn from(entity: LeaveBalanceEntity) -> Self {
        Self {
            user_id: entity.user_id,
            leave_type: entity.leave_type,
            year: entity.year,
            balance_days: entity.balance_days,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the leave_balance_logs table.
#[derive(Debug, Clone, FromRow)]
pub struct LeaveBalanceLogEntity {
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

impl From<LeaveBalanceLogEntity> for domain::models::LeaveBalanceLog {
    fn from(entity: LeaveBalanceLogEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            leave_type: entity.leave_type,
            year: entity.year,
            change_days: entity.change_days,
            balance_after: entity.balance_after,
            request_id: entity.request_id,
            reason: entity.reason,
            created_at: entity.created_at,
        }
    }
}
