use serde::{Deserialize, Serialize};

/// Coarse classification used to pick the HTTP status of an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Validation,
    Authentication,
    Authorization,
    NotFound,
    Conflict,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Score must be an integer between 1 and 5")]
    InvalidScore,

    #[error("Username already taken")]
    DuplicateUsername,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Session token has expired")]
    ExpiredToken,

    #[error("Session token is invalid")]
    InvalidToken,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("{0}")]
    Forbidden(String),

    #[error("Admin user cannot delete their own account")]
    SelfDeletionForbidden,

    #[error("You cannot follow yourself")]
    SelfFollowForbidden,

    #[error("You can only follow users with the COOK or ADMIN role")]
    TargetMustBeCookOrAdmin,

    #[error("You are already following this user")]
    AlreadyFollowing,

    #[error("You are not following this user")]
    NotFollowing,

    #[error("Recipe not found")]
    RecipeNotFound,

    #[error("{0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden(reason.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::InvalidScore => ErrorKind::Validation,
            Self::InvalidCredentials
            | Self::ExpiredToken
            | Self::InvalidToken
            | Self::Unauthenticated => ErrorKind::Authentication,
            Self::Forbidden(_) => ErrorKind::Authorization,
            Self::NotFollowing | Self::RecipeNotFound | Self::NotFound(_) => ErrorKind::NotFound,
            Self::DuplicateUsername
            | Self::DuplicateEmail
            | Self::SelfDeletionForbidden
            | Self::SelfFollowForbidden
            | Self::TargetMustBeCookOrAdmin
            | Self::AlreadyFollowing => ErrorKind::Conflict,
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Message safe to hand to a client. Internal faults never leak their detail.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::Internal => "Something went wrong on the server".to_string(),
            _ => self.to_string(),
        }
    }
}

#[cfg(feature = "db")]
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

#[cfg(feature = "http")]
mod http_impl {
    use super::{AppError, ErrorKind};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse {
        error: String,
    }

    impl AppError {
        pub fn status_code(&self) -> StatusCode {
            match self.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
                ErrorKind::Authorization => StatusCode::FORBIDDEN,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict => match self {
                    AppError::AlreadyFollowing => StatusCode::CONFLICT,
                    _ => StatusCode::BAD_REQUEST,
                },
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            if status.is_server_error() {
                tracing::error!("Request failed: {}", self);
            }
            let body = ErrorResponse {
                error: self.user_message(),
            };
            (status, Json(body)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy() {
        assert_eq!(AppError::InvalidScore.kind(), ErrorKind::Validation);
        assert_eq!(AppError::ExpiredToken.kind(), ErrorKind::Authentication);
        assert_eq!(AppError::forbidden("nope").kind(), ErrorKind::Authorization);
        assert_eq!(AppError::NotFollowing.kind(), ErrorKind::NotFound);
        assert_eq!(AppError::SelfDeletionForbidden.kind(), ErrorKind::Conflict);
        assert_eq!(AppError::Database("boom".into()).kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err = AppError::Database("relation \"users\" does not exist".into());
        assert!(!err.user_message().contains("users"));
        assert_eq!(
            AppError::InvalidCredentials.user_message(),
            "Invalid username or password"
        );
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_status_codes() {
        use axum::http::StatusCode;

        assert_eq!(AppError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::RecipeNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::DuplicateEmail.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::AlreadyFollowing.status_code(), StatusCode::CONFLICT);
    }
}
