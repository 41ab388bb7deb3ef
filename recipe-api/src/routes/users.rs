use crate::extract::{Actor, Json, Path};
use axum::extract::State;
use axum::http::StatusCode;
use recipe_app::domain::{RecipeSummary, User};
use recipe_app::AppContext;
use recipe_errors::AppError;
use uuid::Uuid;

pub async fn list(State(ctx): State<AppContext>, actor: Actor) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(ctx.user_admin.list_users(actor.identity()).await?))
}

pub async fn get(
    State(ctx): State<AppContext>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    Ok(Json(ctx.user_admin.get_user(actor.identity(), id).await?))
}

pub async fn delete(
    State(ctx): State<AppContext>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ctx.user_admin.delete_user(actor.identity(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Public profile listing.
pub async fn recipes(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RecipeSummary>>, AppError> {
    Ok(Json(ctx.feed_composer.authored_feed(id).await?))
}
