//! Voucher message repository for database operations.

use domain::models::NewVoucherMessage;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::VoucherMessageEntity;
use crate::metrics::QueryTimer;

/// Repository for the Finance/ED message thread on vouchers.
#[derive(Clone)]
pub struct VoucherMessageRepository {
    pool: PgPool,
}

impl VoucherMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a message.
    pub async fn create(
        &self,
        message: &NewVoucherMessage,
    ) -> Result<VoucherMessageEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_voucher_message");
        let result = sqlx::query_as::<_, VoucherMessageEntity>(
            r#"
            INSERT INTO voucher_messages (voucher_id, sender_id, recipient_id, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id, voucher_id, sender_id, recipient_id, message, is_read, created_at
            "#,
        )
        .bind(message.voucher_id)
        .bind(message.sender_id)
        .bind(message.recipient_id)
        .bind(&message.message)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Messages on a voucher, oldest first.
    pub async fn list_for_voucher(
        &self,
        voucher_id: Uuid,
    ) -> Result<Vec<VoucherMessageEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_voucher_messages");
        let result = sqlx::query_as::<_, VoucherMessageEntity>(
            r#"
            SELECT id, voucher_id, sender_id, recipient_id, message, is_read, created_at
            FROM voucher_messages
            WHERE voucher_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(voucher_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Mark a voucher's messages addressed to `recipient_id` as read.
    pub async fn mark_read(&self, voucher_id: Uuid, recipient_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("mark_voucher_messages_read");
        let result = sqlx::query(
            r#"
            UPDATE voucher_messages
            SET is_read = TRUE
            WHERE voucher_id = $1 AND recipient_id = $2 AND NOT is_read
            "#,
        )
        .bind(voucher_id)
        .bind(recipient_id)
        .execute(&self.pool)
        .await
        .map(|done| done.rows_affected());
        timer.record();
        result
    }

    /// Unread messages addressed to a user across all vouchers.
    pub async fn count_unread(&self, recipient_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_unread_voucher_messages");
        let result = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM voucher_messages WHERE recipient_id = $1 AND NOT is_read",
        )
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
