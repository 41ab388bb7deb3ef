use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use recipe_app::domain::Identity;
use recipe_app::AppContext;
use recipe_errors::AppError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// The caller of a request: `Some` with a verified bearer token, `None` when no
/// `Authorization` header was sent. A header that is present but does not
/// carry a valid token rejects the request with 401.
pub struct Actor(pub Option<Identity>);

impl Actor {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }
}

impl FromRequestParts<AppContext> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, ctx: &AppContext) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Self(None));
        };

        let token = header
            .to_str()
            .ok()
            .and_then(bearer_token)
            .ok_or(AppError::InvalidToken)?;

        ctx.authenticator.verify(token).map(|identity| Self(Some(identity)))
    }
}

/// JSON body or response. Malformed bodies reject with a 400 `{"error": ...}`.
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(body_error(rejection)),
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Path parameters. Unparseable segments reject with a 400 `{"error": ...}`.
pub struct Path<T>(pub T);

impl<S, T> FromRequestParts<S> for Path<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(path_error(rejection)),
        }
    }
}

/// Query string. Bad parameters reject with a 400 `{"error": ...}`.
pub struct Query<T>(pub T);

impl<S, T> FromRequestParts<S> for Query<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Query::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(query_error(rejection)),
        }
    }
}

fn body_error(rejection: JsonRejection) -> AppError {
    tracing::debug!("Rejected request body: {}", rejection);
    AppError::Validation(rejection.body_text())
}

fn path_error(rejection: PathRejection) -> AppError {
    tracing::debug!("Rejected path: {}", rejection);
    AppError::Validation(rejection.body_text())
}

fn query_error(rejection: QueryRejection) -> AppError {
    tracing::debug!("Rejected query: {}", rejection);
    AppError::Validation(rejection.body_text())
}

fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
