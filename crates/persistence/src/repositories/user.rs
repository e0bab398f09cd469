//! User repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::UserEntity;
use crate::metrics::QueryTimer;

/// Repository for staff accounts.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a user.
    pub async fn create(
        &self,
        display_name: &str,
        email: &str,
        role_id: i16,
        department: Option<&str>,
    ) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_user");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (display_name, email, role_id, department)
            VALUES ($1, $2, $3, $4)
            RETURNING id, display_name, email, role_id, department, is_active, created_at
            "#,
        )
        .bind(display_name)
        .bind(email)
        .bind(role_id)
        .bind(department)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, display_name, email, role_id, department, is_active, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The current occupant of a role: the longest-standing active user holding it.
    pub async fn find_active_by_role(&self, role_id: i16) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_active_user_by_role");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, display_name, email, role_id, department, is_active, created_at
            FROM users
            WHERE role_id = $1 AND is_active
            ORDER BY created_at ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
