use crate::extract::Json;
use axum::extract::State;
use recipe_app::domain::{Registration, Role};
use recipe_app::AppContext;
use recipe_errors::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    message: &'static str,
    user_id: Uuid,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    token: String,
    username: String,
    role: Role,
}

pub async fn register(
    State(ctx): State<AppContext>,
    Json(registration): Json<Registration>,
) -> Result<Json<RegisterResponse>, AppError> {
    let user_id = ctx.authenticator.register(registration).await?;
    Ok(Json(RegisterResponse {
        message: "User registered successfully",
        user_id,
    }))
}

pub async fn login(
    State(ctx): State<AppContext>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let session = ctx
        .authenticator
        .authenticate(&request.username, &request.password)
        .await?;
    Ok(Json(LoginResponse {
        token: session.token,
        username: session.username,
        role: session.role,
    }))
}
