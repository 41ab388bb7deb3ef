use crate::extract::{Actor, Json, Path};
use axum::extract::State;
use recipe_app::domain::{Rating, RatingView};
use recipe_app::AppContext;
use recipe_errors::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize)]
pub struct NewRating {
    score: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageResponse {
    average_rating: f64,
}

pub async fn submit(
    State(ctx): State<AppContext>,
    actor: Actor,
    Path(recipe_id): Path<Uuid>,
    Json(body): Json<NewRating>,
) -> Result<Json<Rating>, AppError> {
    let rating = ctx
        .rating_ledger
        .submit(actor.identity(), recipe_id, body.score)
        .await?;
    Ok(Json(rating))
}

pub async fn list(
    State(ctx): State<AppContext>,
    Path(recipe_id): Path<Uuid>,
) -> Result<Json<Vec<RatingView>>, AppError> {
    Ok(Json(ctx.rating_ledger.ratings_for(recipe_id).await?))
}

pub async fn average(
    State(ctx): State<AppContext>,
    Path(recipe_id): Path<Uuid>,
) -> Result<Json<AverageResponse>, AppError> {
    let average_rating = ctx.rating_ledger.average_for(recipe_id).await?;
    Ok(Json(AverageResponse { average_rating }))
}
