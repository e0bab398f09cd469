//! Notification entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct NotificationEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub request_id: Option<Uuid>,
    pub voucher_id: Option<Uuid>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationEntity> for domain::models::Notification {
    fn from(entity: NotificationEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            title: entity.title,
            message: entity.message,
            request_id: entity.request_id,
            voucher_id: entity.voucher_id,
            is_read: entity.is_read,
            created_at: entity.created_at,
        }
    }
}
