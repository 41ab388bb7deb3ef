use super::entities::{comment, rating, recipe, user, Comment, Rating, Recipe, User};
use crate::domain::{Category, RecipeDraft};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, TransactionTrait};
use uuid::Uuid;

pub type RecipeWithAuthor = (recipe::Model, Option<user::Model>);

/// Which recipes a listing should return.
#[derive(Debug, Clone)]
pub enum RecipeFilter {
    All,
    Category(Category),
    /// Case-insensitive substring of the title or the description.
    Keyword(String),
    Author(Uuid),
    Authors(Vec<Uuid>),
}

#[derive(Clone)]
pub struct RecipeRepository {
    db: DatabaseConnection,
}

impl RecipeRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, owner_id: Uuid, draft: &RecipeDraft) -> Result<recipe::Model, DbErr> {
        let now = chrono::Utc::now();
        let active = recipe::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(draft.title.clone()),
            description: Set(draft.description.clone()),
            ingredients: Set(draft.ingredients.clone()),
            instructions: Set(draft.instructions.clone()),
            category: Set(draft.category),
            image_url: Set(draft.image_url.clone()),
            video_url: Set(draft.video_url.clone()),
            user_id: Set(owner_id),
            created_at: Set(now),
            updated_at: Set(now),
        };
        active.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<recipe::Model>, DbErr> {
        Recipe::find_by_id(id).one(&self.db).await
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool, DbErr> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    pub async fn find_with_author(&self, id: Uuid) -> Result<Option<RecipeWithAuthor>, DbErr> {
        Recipe::find_by_id(id)
            .find_also_related(User)
            .one(&self.db)
            .await
    }

    /// Newest first.
    pub async fn list_with_authors(
        &self,
        filter: RecipeFilter,
    ) -> Result<Vec<RecipeWithAuthor>, DbErr> {
        let query = Recipe::find().find_also_related(User);
        let query = match filter {
            RecipeFilter::All => query,
            RecipeFilter::Category(category) => {
                query.filter(recipe::Column::Category.eq(category))
            }
            RecipeFilter::Keyword(keyword) => {
                let pattern = format!("%{}%", keyword.to_lowercase());
                query.filter(
                    Condition::any()
                        .add(
                            Expr::expr(Func::lower(Expr::col((
                                recipe::Entity,
                                recipe::Column::Title,
                            ))))
                            .like(pattern.clone()),
                        )
                        .add(
                            Expr::expr(Func::lower(Expr::col((
                                recipe::Entity,
                                recipe::Column::Description,
                            ))))
                            .like(pattern),
                        ),
                )
            }
            RecipeFilter::Author(owner_id) => query.filter(recipe::Column::UserId.eq(owner_id)),
            RecipeFilter::Authors(owner_ids) => {
                if owner_ids.is_empty() {
                    return Ok(Vec::new());
                }
                query.filter(recipe::Column::UserId.is_in(owner_ids))
            }
        };

        query
            .order_by_desc(recipe::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Replaces every mutable field. Owner and creation time are left alone.
    pub async fn update(
        &self,
        existing: recipe::Model,
        draft: &RecipeDraft,
    ) -> Result<recipe::Model, DbErr> {
        let mut active: recipe::ActiveModel = existing.into();
        active.title = Set(draft.title.clone());
        active.description = Set(draft.description.clone());
        active.ingredients = Set(draft.ingredients.clone());
        active.instructions = Set(draft.instructions.clone());
        active.category = Set(draft.category);
        active.image_url = Set(draft.image_url.clone());
        active.video_url = Set(draft.video_url.clone());
        active.updated_at = Set(chrono::Utc::now());
        active.update(&self.db).await
    }

    /// Deletes the recipe with its ratings and comments.
    pub async fn delete(&self, id: Uuid) -> Result<u64, DbErr> {
        let txn = self.db.begin().await?;

        Rating::delete_many()
            .filter(rating::Column::RecipeId.eq(id))
            .exec(&txn)
            .await?;
        Comment::delete_many()
            .filter(comment::Column::RecipeId.eq(id))
            .exec(&txn)
            .await?;
        let result = Recipe::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected)
    }
}
