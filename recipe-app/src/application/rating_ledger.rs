use super::comment_ledger::missing_reference;
use super::guard::{enforce, require_identity, Action, Resource};
use crate::domain::{Identity, Rating, RatingView, Score};
use crate::infrastructure::db::{
    violation, RatingRepository, RecipeRepository, UserRepository, Violation,
};
use recipe_errors::AppError;
use uuid::Uuid;

pub struct RatingLedger {
    ratings: RatingRepository,
    recipes: RecipeRepository,
    users: UserRepository,
}

impl RatingLedger {
    pub fn new(ratings: RatingRepository, recipes: RecipeRepository, users: UserRepository) -> Self {
        Self {
            ratings,
            recipes,
            users,
        }
    }

    /// Upsert keyed by (caller, recipe). A second submission rewrites the
    /// score of the existing row; its id and creation time stay the same.
    pub async fn submit(
        &self,
        actor: Option<&Identity>,
        recipe_id: Uuid,
        score: i32,
    ) -> Result<Rating, AppError> {
        enforce(actor, Action::Create, &Resource::Ratings)?;
        let rater = require_identity(actor)?;
        let score = Score::try_from(score)?;

        if let Some(existing) = self.ratings.find(rater.user_id, recipe_id).await? {
            let updated = self.ratings.update_score(existing, score).await?;
            tracing::debug!(rating_id = %updated.id, "Rating updated");
            return Ok(updated.into());
        }

        if !self.recipes.exists(recipe_id).await? {
            return Err(AppError::RecipeNotFound);
        }

        let stored = match self.ratings.upsert(rater.user_id, recipe_id, score).await {
            Ok(stored) => stored,
            Err(e) if violation(&e) == Some(Violation::MissingReference) => {
                return Err(missing_reference(&self.recipes, recipe_id).await);
            }
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(rating_id = %stored.id, "Rating stored");
        Ok(stored.into())
    }

    /// Mean score of the recipe, 0.0 when nobody has rated it.
    pub async fn average_for(&self, recipe_id: Uuid) -> Result<f64, AppError> {
        Ok(self.ratings.tally(recipe_id).await?.average())
    }

    /// Newest first.
    pub async fn ratings_for(&self, recipe_id: Uuid) -> Result<Vec<RatingView>, AppError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(AppError::RecipeNotFound)?;
        let recipe_ref = recipe.to_ref();

        Ok(self
            .ratings
            .list_for_recipe(recipe_id)
            .await?
            .into_iter()
            .filter_map(|(rating, rater)| {
                rater.map(|rater| RatingView {
                    id: rating.id,
                    score: rating.score,
                    user: rater.to_ref(),
                    recipe: recipe_ref.clone(),
                    created_at: rating.created_at,
                    updated_at: rating.updated_at,
                })
            })
            .collect())
    }

    /// Newest first, each joined with the recipe it rates.
    pub async fn ratings_by_user(&self, user_id: Uuid) -> Result<Vec<RatingView>, AppError> {
        let user_ref = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?
            .to_ref();

        Ok(self
            .ratings
            .list_by_user(user_id)
            .await?
            .into_iter()
            .filter_map(|(rating, recipe)| {
                recipe.map(|recipe| RatingView {
                    id: rating.id,
                    score: rating.score,
                    user: user_ref.clone(),
                    recipe: recipe.to_ref(),
                    created_at: rating.created_at,
                    updated_at: rating.updated_at,
                })
            })
            .collect())
    }

    pub async fn my_ratings(&self, actor: Option<&Identity>) -> Result<Vec<RatingView>, AppError> {
        enforce(actor, Action::Read, &Resource::PersonalFeed)?;
        let identity = require_identity(actor)?;
        self.ratings_by_user(identity.user_id).await
    }
}
