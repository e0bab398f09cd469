//! Leave balance repository for database operations.

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::{LeaveBalanceEntity, LeaveBalanceLogEntity};
use crate::metrics::QueryTimer;

/// Values for a leave ledger entry.
#[derive(Debug, Clone)]
pub struct NewLeaveLogRow<'a> {
    pub user_id: Uuid,
    pub leave_type: &'a str,
    pub year: i32,
    pub change_days: i32,
    pub balance_after: i32,
    pub request_id: Option<Uuid>,
    pub reason: Option<&'a str>,
}

/// Repository for leave balances and their audit log.
#[derive(Clone)]
pub struct LeaveBalanceRepository {
    pool: PgPool,
}

impl LeaveBalanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lock a balance row, creating it with `default_days` first if absent.
    pub async fn lock_or_create(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        leave_type: &str,
        year: i32,
        default_days: i32,
    ) -> Result<LeaveBalanceEntity, sqlx::Error> {
        let timer = QueryTimer::new("lock_or_create_leave_balance");
        sqlx::query(
            r#"
            INSERT INTO leave_balances (user_id, leave_type, year, balance_days)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, leave_type, year) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(leave_type)
        .bind(year)
        .bind(default_days)
        .execute(&mut *conn)
        .await?;

        let result = sqlx::query_as::<_, LeaveBalanceEntity>(
            r#"
            SELECT user_id, leave_type, year, balance_days, updated_at
            FROM leave_balances
            WHERE user_id = $1 AND leave_type = $2 AND year = $3
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .bind(leave_type)
        .bind(year)
        .fetch_one(&mut *conn)
        .await;
        timer.record();
        result
    }

    pub async fn set_balance(
        &self,
        conn: &mut PgConnection,
        user_id: Uuid,
        leave_type: &str,
        year: i32,
        balance_days: i32,
    ) -> Result<LeaveBalanceEntity, sqlx::Error> {
        let timer = QueryTimer::new("set_leave_balance");
        let result = sqlx::query_as::<_, LeaveBalanceEntity>(
            r#"
            UPDATE leave_balances
            SET balance_days = $4, updated_at = NOW()
            WHERE user_id = $1 AND leave_type = $2 AND year = $3
            RETURNING user_id, leave_type, year, balance_days, updated_at
            "#,
        )
        .bind(user_id)
        .bind(leave_type)
        .bind(year)
        .bind(balance_days)
        .fetch_one(&mut *conn)
        .await;
        timer.record();
        result
    }

    pub async fn insert_log(
        &self,
        conn: &mut PgConnection,
        row: NewLeaveLogRow<'_>,
    ) -> Result<LeaveBalanceLogEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_leave_balance_log");
        let result = sqlx::query_as::<_, LeaveBalanceLogEntity>(
            r#"
            INSERT INTO leave_balance_logs (
                user_id, leave_type, year, change_days, balance_after, request_id, reason
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, leave_type, year, change_days, balance_after,
                      request_id, reason, created_at
            "#,
        )
        .bind(row.user_id)
        .bind(row.leave_type)
        .bind(row.year)
        .bind(row.change_days)
        .bind(row.balance_after)
        .bind(row.request_id)
        .bind(row.reason)
        .fetch_one(&mut *conn)
        .await;
        timer.record();
        result
    }

    pub async fn find(
        &self,
        user_id: Uuid,
        leave_type: &str,
        year: i32,
    ) -> Result<Option<LeaveBalanceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_leave_balance");
        let result = sqlx::query_as::<_, LeaveBalanceEntity>(
            r#"
            SELECT user_id, leave_type, year, balance_days, updated_at
            FROM leave_balances
            WHERE user_id = $1 AND leave_type = $2 AND year = $3
            "#,
        )
        .bind(user_id)
        .bind(leave_type)
        .bind(year)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Ledger entries for a user and year, oldest first.
    pub async fn list_logs(
        &self,
        user_id: Uuid,
        year: i32,
    ) -> Result<Vec<LeaveBalanceLogEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_leave_balance_logs");
        let result = sqlx::query_as::<_, LeaveBalanceLogEntity>(
            r#"
            SELECT id, user_id, leave_type, year, change_days, balance_after,
                   request_id, reason, created_at
            FROM leave_balance_logs
            WHERE user_id = $1 AND year = $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(year)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
