use super::guard::{enforce, require_identity, Action, Resource};
use crate::domain::{CommentView, Identity, UserRef};
use crate::infrastructure::db::{
    violation, CommentRepository, RecipeRepository, UserRepository, Violation,
};
use crate::infrastructure::security::InputSanitizer;
use recipe_errors::AppError;
use uuid::Uuid;

pub struct CommentLedger {
    comments: CommentRepository,
    recipes: RecipeRepository,
    users: UserRepository,
}

impl CommentLedger {
    pub fn new(comments: CommentRepository, recipes: RecipeRepository, users: UserRepository) -> Self {
        Self {
            comments,
            recipes,
            users,
        }
    }

    pub async fn post(
        &self,
        actor: Option<&Identity>,
        recipe_id: Uuid,
        content: &str,
    ) -> Result<CommentView, AppError> {
        enforce(actor, Action::Create, &Resource::Comments)?;
        let author = require_identity(actor)?;
        let content = InputSanitizer::validate_comment(content)?;

        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(AppError::RecipeNotFound)?;
        let stored = match self.comments.create(author.user_id, recipe_id, content).await {
            Ok(stored) => stored,
            Err(e) if violation(&e) == Some(Violation::MissingReference) => {
                return Err(missing_reference(&self.recipes, recipe_id).await);
            }
            Err(e) => return Err(e.into()),
        };

        Ok(CommentView {
            id: stored.id,
            content: stored.content,
            user: UserRef {
                id: author.user_id,
                username: author.username.clone(),
            },
            recipe: recipe.to_ref(),
            created_at: stored.created_at,
        })
    }

    /// Newest first.
    pub async fn comments_for(&self, recipe_id: Uuid) -> Result<Vec<CommentView>, AppError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or(AppError::RecipeNotFound)?;
        let recipe_ref = recipe.to_ref();

        Ok(self
            .comments
            .list_for_recipe(recipe_id)
            .await?
            .into_iter()
            .filter_map(|(comment, author)| {
                author.map(|author| CommentView {
                    id: comment.id,
                    content: comment.content,
                    user: author.to_ref(),
                    recipe: recipe_ref.clone(),
                    created_at: comment.created_at,
                })
            })
            .collect())
    }

    /// Newest first, each joined with the recipe it belongs to.
    pub async fn comments_by_user(&self, user_id: Uuid) -> Result<Vec<CommentView>, AppError> {
        let user_ref = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?
            .to_ref();

        Ok(self
            .comments
            .list_by_user(user_id)
            .await?
            .into_iter()
            .filter_map(|(comment, recipe)| {
                recipe.map(|recipe| CommentView {
                    id: comment.id,
                    content: comment.content,
                    user: user_ref.clone(),
                    recipe: recipe.to_ref(),
                    created_at: comment.created_at,
                })
            })
            .collect())
    }

    pub async fn my_comments(&self, actor: Option<&Identity>) -> Result<Vec<CommentView>, AppError> {
        enforce(actor, Action::Read, &Resource::PersonalFeed)?;
        let identity = require_identity(actor)?;
        self.comments_by_user(identity.user_id).await
    }

    /// Load, then authorize against the comment's current author.
    pub async fn delete(
        &self,
        actor: Option<&Identity>,
        recipe_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), AppError> {
        let identity = require_identity(actor)?;
        let existing = self
            .comments
            .find_by_id(comment_id)
            .await?
            .filter(|comment| comment.recipe_id == recipe_id)
            .ok_or_else(|| AppError::not_found("Comment"))?;
        enforce(
            actor,
            Action::Delete,
            &Resource::Comment {
                author_id: existing.user_id,
            },
        )?;

        self.comments.delete(comment_id).await?;
        tracing::info!(comment_id = %comment_id, by = %identity.user_id, "Comment deleted");
        Ok(())
    }
}

/// Resolves a dangling foreign key on insert: either the recipe went away
/// after it was checked, or the caller's account no longer exists.
pub(crate) async fn missing_reference(recipes: &RecipeRepository, recipe_id: Uuid) -> AppError {
    match recipes.exists(recipe_id).await {
        Ok(false) => AppError::RecipeNotFound,
        Ok(true) => AppError::Unauthenticated,
        Err(e) => e.into(),
    }
}
