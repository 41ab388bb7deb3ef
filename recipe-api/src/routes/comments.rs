use crate::extract::{Actor, Json, Path};
use axum::extract::State;
use axum::http::StatusCode;
use recipe_app::domain::CommentView;
use recipe_app::AppContext;
use recipe_errors::AppError;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct NewComment {
    content: String,
}

pub async fn list(
    State(ctx): State<AppContext>,
    Path(recipe_id): Path<Uuid>,
) -> Result<Json<Vec<CommentView>>, AppError> {
    Ok(Json(ctx.comment_ledger.comments_for(recipe_id).await?))
}

pub async fn create(
    State(ctx): State<AppContext>,
    actor: Actor,
    Path(recipe_id): Path<Uuid>,
    Json(body): Json<NewComment>,
) -> Result<Json<CommentView>, AppError> {
    let comment = ctx
        .comment_ledger
        .post(actor.identity(), recipe_id, &body.content)
        .await?;
    Ok(Json(comment))
}

pub async fn delete(
    State(ctx): State<AppContext>,
    actor: Actor,
    Path((recipe_id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    ctx.comment_ledger
        .delete(actor.identity(), recipe_id, comment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
