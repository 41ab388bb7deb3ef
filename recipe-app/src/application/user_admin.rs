use super::guard::{enforce, require_identity, Action, Resource};
use crate::domain::{Identity, User};
use crate::infrastructure::db::UserRepository;
use recipe_errors::AppError;
use uuid::Uuid;

pub struct UserAdmin {
    users: UserRepository,
}

impl UserAdmin {
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// Every account, oldest first. Admin only.
    pub async fn list_users(&self, actor: Option<&Identity>) -> Result<Vec<User>, AppError> {
        enforce(actor, Action::Read, &Resource::UserDirectory)?;
        Ok(self
            .users
            .list_all()
            .await?
            .into_iter()
            .map(User::from)
            .collect())
    }

    pub async fn get_user(&self, actor: Option<&Identity>, user_id: Uuid) -> Result<User, AppError> {
        enforce(actor, Action::Read, &Resource::UserAccount { user_id })?;
        self.users
            .find_by_id(user_id)
            .await?
            .map(User::from)
            .ok_or_else(|| AppError::not_found("User"))
    }

    /// Removes the account and everything it owns.
    pub async fn delete_user(&self, actor: Option<&Identity>, user_id: Uuid) -> Result<(), AppError> {
        let admin = require_identity(actor)?;
        let target = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;
        enforce(actor, Action::Delete, &Resource::UserAccount { user_id: target.id })?;

        self.users.delete(target.id).await?;
        tracing::info!(
            user_id = %target.id,
            by = %admin.user_id,
            "Admin {} deleted user {}",
            admin.username,
            target.username
        );
        Ok(())
    }
}
