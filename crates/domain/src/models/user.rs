//! Workflow participants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::role::{Actor, Role};

/// A chamber staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role_id: i16,
    pub department: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Option<Role> {
        Role::from_id(self.role_id)
    }

    /// Actor context for calls made on this user's behalf.
    pub fn as_actor(&self) -> Actor {
        Actor {
            user_id: self.id,
            role_id: self.role_id,
            department: self.department.clone(),
        }
    }
}
