//! Staff user entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role_id: i16,
    pub department: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            display_name: entity.display_name,
            email: entity.email,
            role_id: entity.role_id,
            department: entity.department,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}
