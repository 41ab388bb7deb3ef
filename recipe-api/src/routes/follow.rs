use crate::extract::{Actor, Json, Path};
use axum::extract::State;
use axum::http::StatusCode;
use recipe_app::domain::FollowStatus;
use recipe_app::AppContext;
use recipe_errors::AppError;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
pub struct FollowResponse {
    message: &'static str,
}

pub async fn follow(
    State(ctx): State<AppContext>,
    actor: Actor,
    Path(user_id): Path<Uuid>,
) -> Result<Json<FollowResponse>, AppError> {
    ctx.social_graph.follow(actor.identity(), user_id).await?;
    Ok(Json(FollowResponse {
        message: "Successfully followed user",
    }))
}

pub async fn unfollow(
    State(ctx): State<AppContext>,
    actor: Actor,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ctx.social_graph.unfollow(actor.identity(), user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn status(
    State(ctx): State<AppContext>,
    actor: Actor,
    Path(user_id): Path<Uuid>,
) -> Result<Json<FollowStatus>, AppError> {
    Ok(Json(ctx.social_graph.status(actor.identity(), user_id).await?))
}
