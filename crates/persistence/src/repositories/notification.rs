//! Notification repository for database operations.

use domain::models::NewNotification;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::NotificationEntity;
use crate::metrics::QueryTimer;

/// Repository for the append-only notification inbox.
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        notification: &NewNotification,
    ) -> Result<NotificationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_notification");
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            INSERT INTO notifications (user_id, title, message, request_id, voucher_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, title, message, request_id, voucher_id, is_read, created_at
            "#,
        )
        .bind(notification.user_id)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.request_id)
        .bind(notification.voucher_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// A user's notifications, newest first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NotificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_notifications_for_user");
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            SELECT id, user_id, title, message, request_id, voucher_id, is_read, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn count_unread(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_unread_notifications");
        let result = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND NOT is_read",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Mark one notification read. Only the owner's row is touched.
    pub async fn mark_read(&self, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("mark_notification_read");
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map(|done| done.rows_affected() > 0);
        timer.record();
        result
    }

    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("mark_all_notifications_read");
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND NOT is_read",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map(|done| done.rows_affected());
        timer.record();
        result
    }
}
