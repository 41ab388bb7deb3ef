use super::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who is acting. Recovered from a verified session token and passed explicitly
/// into every guarded operation; `None` in its place means an anonymous caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: Uuid, username: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            username: username.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.user_id == owner_id
    }
}
