use super::feed_composer::annotate;
use super::guard::{enforce, require_identity, Action, Resource};
use crate::domain::{Category, Identity, RecipeDetail, RecipeDraft, RecipeSummary, UserRef};
use crate::infrastructure::db::entities::{recipe, user};
use crate::infrastructure::db::{violation, RatingRepository, RecipeFilter, RecipeRepository, Violation};
use crate::infrastructure::security::InputSanitizer;
use recipe_errors::AppError;
use uuid::Uuid;

pub struct RecipeCatalog {
    recipes: RecipeRepository,
    ratings: RatingRepository,
}

impl RecipeCatalog {
    pub fn new(recipes: RecipeRepository, ratings: RatingRepository) -> Self {
        Self { recipes, ratings }
    }

    pub async fn create(
        &self,
        actor: Option<&Identity>,
        draft: RecipeDraft,
    ) -> Result<RecipeDetail, AppError> {
        enforce(actor, Action::Create, &Resource::RecipeCatalog)?;
        let author = require_identity(actor)?;
        let draft = InputSanitizer::validate_recipe(draft)?;

        // A token can outlive its account.
        let created = self
            .recipes
            .create(author.user_id, &draft)
            .await
            .map_err(|e| match violation(&e) {
                Some(Violation::MissingReference) => AppError::Unauthenticated,
                _ => e.into(),
            })?;
        tracing::info!(recipe_id = %created.id, owner = %author.user_id, "Recipe created");

        Ok(detail(
            created,
            UserRef {
                id: author.user_id,
                username: author.username.clone(),
            },
            0.0,
        ))
    }

    pub async fn get(&self, recipe_id: Uuid) -> Result<RecipeDetail, AppError> {
        let (recipe, author) = self
            .recipes
            .find_with_author(recipe_id)
            .await?
            .ok_or(AppError::RecipeNotFound)?;
        let average = self.ratings.tally(recipe_id).await?.average();
        Ok(detail(recipe, author_ref(author)?, average))
    }

    pub async fn by_category(&self, category: Category) -> Result<Vec<RecipeSummary>, AppError> {
        self.list(RecipeFilter::Category(category)).await
    }

    /// Case-insensitive match on title or description. A blank keyword matches everything.
    pub async fn search(&self, keyword: &str) -> Result<Vec<RecipeSummary>, AppError> {
        let keyword = InputSanitizer::sanitize_keyword(keyword);
        if keyword.is_empty() {
            return self.list(RecipeFilter::All).await;
        }
        self.list(RecipeFilter::Keyword(keyword)).await
    }

    /// Highest average first; unrated recipes sort last at 0.0.
    pub async fn top_rated(&self) -> Result<Vec<RecipeSummary>, AppError> {
        let mut summaries = self.list(RecipeFilter::All).await?;
        summaries.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));
        Ok(summaries)
    }

    /// Loads the recipe, authorizes against its current owner, then replaces
    /// every mutable field.
    pub async fn update(
        &self,
        actor: Option<&Identity>,
        recipe_id: Uuid,
        draft: RecipeDraft,
    ) -> Result<RecipeDetail, AppError> {
        require_identity(actor)?;
        let (existing, author) = self
            .recipes
            .find_with_author(recipe_id)
            .await?
            .ok_or(AppError::RecipeNotFound)?;
        enforce(
            actor,
            Action::Update,
            &Resource::Recipe {
                owner_id: existing.user_id,
            },
        )?;
        let draft = InputSanitizer::validate_recipe(draft)?;

        let updated = self.recipes.update(existing, &draft).await?;
        let average = self.ratings.tally(recipe_id).await?.average();
        Ok(detail(updated, author_ref(author)?, average))
    }

    pub async fn delete(&self, actor: Option<&Identity>, recipe_id: Uuid) -> Result<(), AppError> {
        let identity = require_identity(actor)?;
        let existing = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(AppError::RecipeNotFound)?;
        enforce(
            actor,
            Action::Delete,
            &Resource::Recipe {
                owner_id: existing.user_id,
            },
        )?;

        self.recipes.delete(recipe_id).await?;
        tracing::info!(recipe_id = %recipe_id, by = %identity.user_id, "Recipe deleted");
        Ok(())
    }

    async fn list(&self, filter: RecipeFilter) -> Result<Vec<RecipeSummary>, AppError> {
        let rows = self.recipes.list_with_authors(filter).await?;
        annotate(&self.ratings, rows).await
    }
}

fn author_ref(author: Option<user::Model>) -> Result<UserRef, AppError> {
    author
        .map(|author| author.to_ref())
        .ok_or_else(|| AppError::Internal("recipe has no author row".to_string()))
}

fn detail(recipe: recipe::Model, author: UserRef, average_rating: f64) -> RecipeDetail {
    RecipeDetail {
        id: recipe.id,
        title: recipe.title,
        description: recipe.description,
        ingredients: recipe.ingredients,
        instructions: recipe.instructions,
        category: recipe.category,
        image_url: recipe.image_url,
        video_url: recipe.video_url,
        user: author,
        average_rating,
        created_at: recipe.created_at,
        updated_at: recipe.updated_at,
    }
}
