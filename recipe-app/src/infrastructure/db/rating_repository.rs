use super::entities::{rating, recipe, user, Rating, Recipe, User};
use crate::domain::{RatingTally, Score};
use sea_orm::sea_query::OnConflict;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, FromQueryResult};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, FromQueryResult)]
struct TallyRow {
    recipe_id: Uuid,
    total: i64,
    rating_count: i64,
}

#[derive(Clone)]
pub struct RatingRepository {
    db: DatabaseConnection,
}

impl RatingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find(&self, user_id: Uuid, recipe_id: Uuid) -> Result<Option<rating::Model>, DbErr> {
        Rating::find_by_id((user_id, recipe_id)).one(&self.db).await
    }

    pub async fn update_score(
        &self,
        existing: rating::Model,
        score: Score,
    ) -> Result<rating::Model, DbErr> {
        let mut active: rating::ActiveModel = existing.into();
        active.score = Set(score.value());
        active.updated_at = Set(chrono::Utc::now());
        active.update(&self.db).await
    }

    /// Inserts the rating, or overwrites the score of the row already stored
    /// for the same (user, recipe) pair. The conflict target is the primary
    /// key, so racing first submissions still end up as a single row.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
        score: Score,
    ) -> Result<rating::Model, DbErr> {
        let now = chrono::Utc::now();
        let active = rating::ActiveModel {
            user_id: Set(user_id),
            recipe_id: Set(recipe_id),
            id: Set(Uuid::new_v4()),
            score: Set(score.value()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Rating::insert(active)
            .on_conflict(
                OnConflict::columns([rating::Column::UserId, rating::Column::RecipeId])
                    .update_columns([rating::Column::Score, rating::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        self.find(user_id, recipe_id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Rating not found after upsert".to_string()))
    }

    /// Score sums and counts per recipe. Recipes without ratings are absent
    /// from the map.
    pub async fn tallies(&self, recipe_ids: &[Uuid]) -> Result<HashMap<Uuid, RatingTally>, DbErr> {
        if recipe_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Rating::find()
            .select_only()
            .column(rating::Column::RecipeId)
            .column_as(rating::Column::Score.sum(), "total")
            .column_as(rating::Column::Score.count(), "rating_count")
            .filter(rating::Column::RecipeId.is_in(recipe_ids.to_vec()))
            .group_by(rating::Column::RecipeId)
            .into_model::<TallyRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                (
                    row.recipe_id,
                    RatingTally {
                        total: row.total,
                        count: row.rating_count,
                    },
                )
            })
            .collect())
    }

    pub async fn tally(&self, recipe_id: Uuid) -> Result<RatingTally, DbErr> {
        let tallies = self.tallies(&[recipe_id]).await?;
        Ok(tallies.get(&recipe_id).copied().unwrap_or_default())
    }

    /// Newest first, with the rater.
    pub async fn list_for_recipe(
        &self,
        recipe_id: Uuid,
    ) -> Result<Vec<(rating::Model, Option<user::Model>)>, DbErr> {
        Rating::find()
            .filter(rating::Column::RecipeId.eq(recipe_id))
            .find_also_related(User)
            .order_by_desc(rating::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Newest first, with the rated recipe.
    pub async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(rating::Model, Option<recipe::Model>)>, DbErr> {
        Rating::find()
            .filter(rating::Column::UserId.eq(user_id))
            .find_also_related(Recipe)
            .order_by_desc(rating::Column::CreatedAt)
            .all(&self.db)
            .await
    }
}
