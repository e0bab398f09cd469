//! Voucher repository for database operations.

use chrono::NaiveDate;
use domain::models::{VoucherStage, VoucherType};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::entities::{StageStatusDb, VoucherEntity, VoucherTypeDb};
use crate::metrics::QueryTimer;

const VOUCHER_COLUMNS: &str = r#"
    id, request_id, voucher_type, pv_no, voucher_date, activity, payee_name, budget_code,
    particulars, amount, total, amount_words, prepared_by,
    finance_status, finance_remark, finance_approved_at,
    ed_status, ed_remark, ed_approved_at, created_at, updated_at
"#;

/// Values for a new voucher row. Both approvers start pending.
#[derive(Debug, Clone)]
pub struct NewVoucherRow<'a> {
    pub request_id: Option<Uuid>,
    pub voucher_type: VoucherType,
    pub pv_no: &'a str,
    pub date: NaiveDate,
    pub activity: Option<&'a str>,
    pub payee_name: &'a str,
    pub budget_code: Option<&'a str>,
    pub particulars: Option<&'a str>,
    pub amount: Decimal,
    pub total: Decimal,
    pub amount_words: &'a str,
    pub prepared_by: Uuid,
}

/// Repository for voucher-related database operations.
#[derive(Clone)]
pub struct VoucherRepository {
    pool: PgPool,
}

impl VoucherRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Insert a voucher.
    pub async fn create(&self, row: NewVoucherRow<'_>) -> Result<VoucherEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_voucher");
        let sql = format!(
            r#"
            INSERT INTO vouchers (
                request_id, voucher_type, pv_no, voucher_date, activity, payee_name,
                budget_code, particulars, amount, total, amount_words, prepared_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {VOUCHER_COLUMNS}
            "#
        );
        let result = sqlx::query_as::<_, VoucherEntity>(&sql)
            .bind(row.request_id)
            .bind(VoucherTypeDb::from(row.voucher_type))
            .bind(row.pv_no)
            .bind(row.date)
            .bind(row.activity)
            .bind(row.payee_name)
            .bind(row.budget_code)
            .bind(row.particulars)
            .bind(row.amount)
            .bind(row.total)
            .bind(row.amount_words)
            .bind(row.prepared_by)
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Find a voucher by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<VoucherEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_voucher_by_id");
        let sql = format!("SELECT {VOUCHER_COLUMNS} FROM vouchers WHERE id = $1");
        let result = sqlx::query_as::<_, VoucherEntity>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Load a voucher and lock its row for the rest of the transaction.
    pub async fn lock_for_update(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<VoucherEntity>, sqlx::Error> {
        let timer = QueryTimer::new("lock_voucher_for_update");
        let sql = format!("SELECT {VOUCHER_COLUMNS} FROM vouchers WHERE id = $1 FOR UPDATE");
        let result = sqlx::query_as::<_, VoucherEntity>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await;
        timer.record();
        result
    }

    /// Persist both approver states of a voucher.
    pub async fn write_stages(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        finance: &VoucherStage,
        ed: &VoucherStage,
    ) -> Result<VoucherEntity, sqlx::Error> {
        let timer = QueryTimer::new("write_voucher_stages");
        let sql = format!(
            r#"
            UPDATE vouchers
            SET finance_status = $2, finance_remark = $3, finance_approved_at = $4,
                ed_status = $5, ed_remark = $6, ed_approved_at = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING {VOUCHER_COLUMNS}
            "#
        );
        let result = sqlx::query_as::<_, VoucherEntity>(&sql)
            .bind(id)
            .bind(StageStatusDb::from(finance.status))
            .bind(finance.remark.as_deref())
            .bind(finance.decided_at)
            .bind(StageStatusDb::from(ed.status))
            .bind(ed.remark.as_deref())
            .bind(ed.decided_at)
            .fetch_one(&mut *conn)
            .await;
        timer.record();
        result
    }

    /// Vouchers whose Finance decision has the given status, newest first.
    pub async fn list_by_finance_status(
        &self,
        status: StageStatusDb,
    ) -> Result<Vec<VoucherEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_vouchers_by_finance_status");
        let sql = format!(
            "SELECT {VOUCHER_COLUMNS} FROM vouchers WHERE finance_status = $1 ORDER BY created_at DESC"
        );
        let result = sqlx::query_as::<_, VoucherEntity>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Every voucher, newest first.
    pub async fn list_all(&self) -> Result<Vec<VoucherEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_all_vouchers");
        let sql = format!("SELECT {VOUCHER_COLUMNS} FROM vouchers ORDER BY created_at DESC");
        let result = sqlx::query_as::<_, VoucherEntity>(&sql)
            .fetch_all(&self.pool)
            .await;
        timer.record();
        result
    }
}
