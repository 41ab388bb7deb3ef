use crate::domain::{Identity, Role};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use recipe_errors::AppError;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    username: String,
    role: Role,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token signature does not match")]
    BadSignature,
    #[error("token has expired")]
    Expired,
    #[error("token could not be encoded: {0}")]
    Encoding(String),
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AppError::ExpiredToken,
            TokenError::Malformed | TokenError::BadSignature => AppError::InvalidToken,
            TokenError::Encoding(msg) => AppError::Internal(msg),
        }
    }
}

/// Session token issued at login.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Stateless session tokens: `base64url(claims) "." base64url(HMAC-SHA256(claims))`.
/// Verification needs only the key, never the database.
#[derive(Clone)]
pub struct TokenSigner {
    key: Vec<u8>,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Self {
        Self {
            key: secret.as_ref().to_vec(),
            ttl,
        }
    }

    pub fn sign(&self, identity: &Identity) -> Result<IssuedToken, TokenError> {
        self.sign_at(identity, Utc::now())
    }

    pub fn sign_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Encoding("token expiry is out of range".to_string()))?;
        let claims = Claims {
            sub: identity.user_id,
            username: identity.username.clone(),
            role: identity.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let payload = serde_json::to_vec(&claims).map_err(|e| TokenError::Encoding(e.to_string()))?;
        let payload = URL_SAFE_NO_PAD.encode(payload);
        let signature = URL_SAFE_NO_PAD.encode(self.mac(payload.as_bytes())?.finalize().into_bytes());

        Ok(IssuedToken {
            token: format!("{}.{}", payload, signature),
            expires_at,
        })
    }

    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Signature first, then expiry: claims are never read from an unsigned payload.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, TokenError> {
        let (payload, signature) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::Malformed)?;

        self.mac(payload.as_bytes())?
            .verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenError::Malformed)?;
        let claims: Claims = serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)?;

        if claims.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(Identity::new(claims.sub, claims.username, claims.role))
    }

    fn mac(&self, data: &[u8]) -> Result<HmacSha256, TokenError> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;
        mac.update(data);
        Ok(mac)
    }
}
