//! Request repository for database operations.

use domain::models::{Stage, StageSet, StageState};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::{RequestEntity, RequestStatusEntity, StageStatusDb};
use crate::metrics::QueryTimer;

/// Request columns plus the owner's department.
const SELECT_REQUEST: &str = r#"
    SELECT r.id, r.user_id, r.request_type, r.title, r.description, r.amount,
           r.attachment_path, r.details, r.status_id,
           r.hod_status, r.hod_remark, r.hod_approved_at,
           r.hrm_status, r.hrm_remark, r.hrm_approved_at,
           r.auditor_status, r.auditor_remark, r.auditor_approved_at,
           r.finance_status, r.finance_remark, r.finance_approved_at,
           r.ed_status, r.ed_remark, r.ed_approved_at,
           u.department AS owner_department, r.created_at, r.updated_at
    FROM requests r
    JOIN users u ON u.id = r.user_id
"#;

/// Values for a new request row.
#[derive(Debug, Clone)]
pub struct NewRequestRow<'a> {
    pub user_id: Uuid,
    pub request_type: &'a str,
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub amount: Option<Decimal>,
    pub attachment_path: Option<&'a str>,
    pub details: &'a serde_json::Value,
    pub stages: &'a StageSet,
}

fn stage_column(stages: &StageSet, stage: Stage) -> Option<StageStatusDb> {
    stages.status(stage).map(StageStatusDb::from)
}

/// Repository for request-related database operations.
#[derive(Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert a request and return its id. Stages the type skips are stored as NULL.
    pub async fn create(&self, row: NewRequestRow<'_>) -> Result<Uuid, sqlx::Error> {
        let timer = QueryTimer::new("create_request");
        let result = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO requests (
                user_id, request_type, title, description, amount, attachment_path, details,
                hod_status, hrm_status, auditor_status, finance_status, ed_status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING id
            "#,
        )
        .bind(row.user_id)
        .bind(row.request_type)
        .bind(row.title)
        .bind(row.description)
        .bind(row.amount)
        .bind(row.attachment_path)
        .bind(row.details)
        .bind(stage_column(row.stages, Stage::Hod))
        .bind(stage_column(row.stages, Stage::Hrm))
        .bind(stage_column(row.stages, Stage::Auditor))
        .bind(stage_column(row.stages, Stage::Finance))
        .bind(stage_column(row.stages, Stage::Ed))
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a request by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<RequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_request_by_id");
        let sql = format!("{SELECT_REQUEST} WHERE r.id = $1");
        let result = sqlx::query_as::<_, RequestEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Load a request and lock its row for the rest of the transaction.
    pub async fn lock_for_update(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<RequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("lock_request_for_update");
        let sql = format!("{SELECT_REQUEST} WHERE r.id = $1 FOR UPDATE OF r");
        let result = sqlx::query_as::<_, RequestEntity>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await;
        timer.record();
        result
    }

    /// Write one stage decision together with the re-derived aggregate status.
    pub async fn write_decision(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        stage: Stage,
        state: &StageState,
        status_id: i16,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("write_request_decision");
        let columns = stage.columns();
        let sql = format!(
            r#"
            UPDATE requests
            SET {} = $2, {} = $3, {} = $4, status_id = $5, updated_at = NOW()
            WHERE id = $1
            "#,
            columns.status, columns.remark, columns.decided_at
        );
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(StageStatusDb::from(state.status))
            .bind(state.remark.as_deref())
            .bind(state.decided_at)
            .bind(status_id)
            .execute(&mut *conn)
            .await
            .map(|done| done.rows_affected());
        timer.record();
        result
    }

    /// Requests owned by a user, newest first.
    pub async fn list_for_owner(&self, user_id: Uuid) -> Result<Vec<RequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_requests_for_owner");
        let sql = format!("{SELECT_REQUEST} WHERE r.user_id = $1 ORDER BY r.created_at DESC");
        let result = sqlx::query_as::<_, RequestEntity>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Requests with the given aggregate status, newest first.
    pub async fn list_by_status(&self, status_id: i16) -> Result<Vec<RequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_requests_by_status");
        let sql = format!("{SELECT_REQUEST} WHERE r.status_id = $1 ORDER BY r.created_at DESC");
        let result = sqlx::query_as::<_, RequestEntity>(&sql)
            .bind(status_id)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Every request, newest first.
    pub async fn list_all(&self) -> Result<Vec<RequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_requests");
        let sql = format!("{SELECT_REQUEST} ORDER BY r.created_at DESC");
        let result = sqlx::query_as::<_, RequestEntity>(&sql)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// The request_statuses lookup table.
    pub async fn list_statuses(&self) -> Result<Vec<RequestStatusEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_request_statuses");
        let result = sqlx::query_as::<_, RequestStatusEntity>(
            "SELECT id, status_name FROM request_statuses ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
