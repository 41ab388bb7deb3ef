use crate::domain::{Identity, Registration, Role};
use crate::infrastructure::db::entities::user;
use crate::infrastructure::db::{violation, NewUserRecord, UserRepository, Violation};
use crate::infrastructure::security::{CredentialHasher, InputSanitizer, TokenSigner};
use recipe_errors::AppError;
use serde::Serialize;
use uuid::Uuid;

/// Returned by a successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    pub token: String,
    pub username: String,
    pub role: Role,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

pub struct Authenticator {
    users: UserRepository,
    hasher: CredentialHasher,
    tokens: TokenSigner,
}

impl Authenticator {
    pub fn new(users: UserRepository, hasher: CredentialHasher, tokens: TokenSigner) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Self-registration always yields a plain USER account.
    pub async fn register(&self, registration: Registration) -> Result<Uuid, AppError> {
        let created = self.create_account(registration, Role::User).await?;
        tracing::info!(user_id = %created.id, "Registered user {}", created.username);
        Ok(created.id)
    }

    /// Account creation with an explicit role, reserved for start-up seeding.
    pub(crate) async fn create_account(
        &self,
        registration: Registration,
        role: Role,
    ) -> Result<user::Model, AppError> {
        let registration = InputSanitizer::validate_registration(registration)?;

        if self.users.find_by_username(&registration.username).await?.is_some() {
            return Err(AppError::DuplicateUsername);
        }
        if self.users.find_by_email(&registration.email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let password_hash = self.hasher.hash(registration.password).await?;
        let record = NewUserRecord {
            username: registration.username,
            email: registration.email,
            password_hash,
            role,
        };

        // A concurrent registration can still win the race past the checks above.
        self.users.create(record).await.map_err(|e| match violation(&e) {
            Some(Violation::Unique(detail)) if detail.contains("email") => AppError::DuplicateEmail,
            Some(Violation::Unique(_)) => AppError::DuplicateUsername,
            _ => e.into(),
        })
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<SessionToken, AppError> {
        let Some(account) = self.users.find_by_username(username.trim()).await? else {
            tracing::warn!("Failed login for unknown user {}", username);
            return Err(AppError::InvalidCredentials);
        };

        let verified = self
            .hasher
            .verify(password.to_string(), account.password_hash.clone())
            .await?;
        if !verified {
            tracing::warn!(user_id = %account.id, "Failed login for {}", account.username);
            return Err(AppError::InvalidCredentials);
        }

        let identity = account.identity();
        let issued = self.tokens.sign(&identity)?;
        tracing::info!(user_id = %account.id, "User {} logged in", account.username);

        Ok(SessionToken {
            token: issued.token,
            username: identity.username,
            role: identity.role,
            expires_at: issued.expires_at,
        })
    }

    /// Checks signature and expiry only; no database round trip.
    pub fn verify(&self, token: &str) -> Result<Identity, AppError> {
        self.tokens.verify(token).map_err(AppError::from)
    }
}
