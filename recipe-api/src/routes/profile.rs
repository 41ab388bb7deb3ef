use crate::extract::{Actor, Json};
use axum::extract::State;
use recipe_app::domain::{CommentView, RatingView, RecipeSummary};
use recipe_app::AppContext;
use recipe_errors::AppError;

pub async fn my_recipes(
    State(ctx): State<AppContext>,
    actor: Actor,
) -> Result<Json<Vec<RecipeSummary>>, AppError> {
    Ok(Json(ctx.feed_composer.my_recipes(actor.identity()).await?))
}

pub async fn my_comments(
    State(ctx): State<AppContext>,
    actor: Actor,
) -> Result<Json<Vec<CommentView>>, AppError> {
    Ok(Json(ctx.comment_ledger.my_comments(actor.identity()).await?))
}

pub async fn my_ratings(
    State(ctx): State<AppContext>,
    actor: Actor,
) -> Result<Json<Vec<RatingView>>, AppError> {
    Ok(Json(ctx.rating_ledger.my_ratings(actor.identity()).await?))
}
