use crate::extract::{Actor, Json, Path, Query};
use axum::extract::State;
use axum::http::StatusCode;
use recipe_app::domain::{Category, RecipeDetail, RecipeDraft, RecipeSummary};
use recipe_app::AppContext;
use recipe_errors::AppError;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    keyword: String,
}

pub async fn list(State(ctx): State<AppContext>) -> Result<Json<Vec<RecipeSummary>>, AppError> {
    Ok(Json(ctx.feed_composer.global_feed().await?))
}

pub async fn feed(
    State(ctx): State<AppContext>,
    actor: Actor,
) -> Result<Json<Vec<RecipeSummary>>, AppError> {
    Ok(Json(ctx.feed_composer.personal_feed(actor.identity()).await?))
}

pub async fn top_rated(State(ctx): State<AppContext>) -> Result<Json<Vec<RecipeSummary>>, AppError> {
    Ok(Json(ctx.recipe_catalog.top_rated().await?))
}

pub async fn search(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<RecipeSummary>>, AppError> {
    Ok(Json(ctx.recipe_catalog.search(&params.keyword).await?))
}

pub async fn by_category(
    State(ctx): State<AppContext>,
    Path(category): Path<String>,
) -> Result<Json<Vec<RecipeSummary>>, AppError> {
    let category: Category = category.parse().map_err(AppError::Validation)?;
    Ok(Json(ctx.recipe_catalog.by_category(category).await?))
}

pub async fn get(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeDetail>, AppError> {
    Ok(Json(ctx.recipe_catalog.get(id).await?))
}

pub async fn create(
    State(ctx): State<AppContext>,
    actor: Actor,
    Json(draft): Json<RecipeDraft>,
) -> Result<(StatusCode, Json<RecipeDetail>), AppError> {
    let created = ctx.recipe_catalog.create(actor.identity(), draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(ctx): State<AppContext>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(draft): Json<RecipeDraft>,
) -> Result<Json<RecipeDetail>, AppError> {
    Ok(Json(ctx.recipe_catalog.update(actor.identity(), id, draft).await?))
}

pub async fn delete(
    State(ctx): State<AppContext>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ctx.recipe_catalog.delete(actor.identity(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
