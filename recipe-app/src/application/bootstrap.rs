use super::Authenticator;
use crate::config::BootstrapSettings;
use crate::domain::{Registration, Role};
use crate::infrastructure::db::UserRepository;
use recipe_errors::AppError;
use std::sync::Arc;

/// Start-up seeding. The only place roles other than USER are assigned.
pub struct Bootstrap {
    authenticator: Arc<Authenticator>,
    users: UserRepository,
}

impl Bootstrap {
    pub fn new(authenticator: Arc<Authenticator>, users: UserRepository) -> Self {
        Self {
            authenticator,
            users,
        }
    }

    pub async fn run(&self, settings: &BootstrapSettings) -> Result<(), AppError> {
        self.ensure_admin(settings).await?;
        for username in &settings.cooks {
            self.promote_to_cook(username).await?;
        }
        Ok(())
    }

    async fn ensure_admin(&self, settings: &BootstrapSettings) -> Result<(), AppError> {
        let Some(password) = settings.admin_password.as_ref() else {
            tracing::info!("ADMIN_PASSWORD not set, skipping admin bootstrap");
            return Ok(());
        };

        if self
            .users
            .find_by_username(&settings.admin_username)
            .await?
            .is_some()
        {
            tracing::info!("Admin user {} already exists", settings.admin_username);
            return Ok(());
        }

        let registration = Registration::new(
            settings.admin_username.clone(),
            settings.admin_email.clone(),
            password.clone(),
        );
        let admin = self
            .authenticator
            .create_account(registration, Role::Admin)
            .await?;
        tracing::info!(user_id = %admin.id, "Created admin user {}", admin.username);
        Ok(())
    }

    async fn promote_to_cook(&self, username: &str) -> Result<(), AppError> {
        let Some(account) = self.users.find_by_username(username).await? else {
            tracing::warn!("Cannot promote {}: no such user", username);
            return Ok(());
        };
        if account.role != Role::User {
            tracing::debug!("{} already has role {}", username, account.role);
            return Ok(());
        }

        let promoted = self.users.update_role(account, Role::Cook).await?;
        tracing::info!(user_id = %promoted.id, "Promoted {} to COOK", promoted.username);
        Ok(())
    }
}
