//! Staff directory: account creation and actor lookup.

use domain::models::{Actor, Role, User};
use persistence::repositories::UserRepository;
use tracing::info;
use uuid::Uuid;

use crate::error::WorkflowError;

#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
}

impl UserService {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    pub async fn create_user(
        &self,
        display_name: &str,
        email: &str,
        role: Role,
        department: Option<&str>,
    ) -> Result<User, WorkflowError> {
        let user: User = self
            .users
            .create(display_name.trim(), email.trim(), role.id(), department)
            .await?
            .into();
        info!(user_id = %user.id, role = %role, "User created");
        Ok(user)
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, WorkflowError> {
        self.users
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| WorkflowError::not_found("User", id))
    }

    /// Actor context for an active user, with role and department from the directory.
    pub async fn actor_for(&self, id: Uuid) -> Result<Actor, WorkflowError> {
        let user = self.get_user(id).await?;
        if !user.is_active {
            return Err(WorkflowError::not_found("Active user", id));
        }
        Ok(user.as_actor())
    }

    /// Current occupant of a role, if any.
    pub async fn role_holder(&self, role: Role) -> Result<Option<User>, WorkflowError> {
        Ok(self.users.find_active_by_role(role.id()).await?.map(Into::into))
    }
}
