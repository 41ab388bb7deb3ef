use super::entities::{comment, recipe, user, Comment, Recipe, User};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct CommentRepository {
    db: DatabaseConnection,
}

impl CommentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        recipe_id: Uuid,
        content: String,
    ) -> Result<comment::Model, DbErr> {
        let active = comment::ActiveModel {
            id: Set(Uuid::new_v4()),
            content: Set(content),
            user_id: Set(user_id),
            recipe_id: Set(recipe_id),
            created_at: Set(chrono::Utc::now()),
        };
        active.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<comment::Model>, DbErr> {
        Comment::find_by_id(id).one(&self.db).await
    }

    /// Newest first, with the author.
    pub async fn list_for_recipe(
        &self,
        recipe_id: Uuid,
    ) -> Result<Vec<(comment::Model, Option<user::Model>)>, DbErr> {
        Comment::find()
            .filter(comment::Column::RecipeId.eq(recipe_id))
            .find_also_related(User)
            .order_by_desc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Newest first, with the recipe commented on.
    pub async fn list_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(comment::Model, Option<recipe::Model>)>, DbErr> {
        Comment::find()
            .filter(comment::Column::UserId.eq(user_id))
            .find_also_related(Recipe)
            .order_by_desc(comment::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<u64, DbErr> {
        let result = Comment::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}
