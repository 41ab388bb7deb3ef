use super::entities::{comment, follow, rating, recipe, user, Comment, Follow, Rating, Recipe, User};
use crate::domain::Role;
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr, TransactionTrait};
use uuid::Uuid;

/// Row to insert; the password is already hashed.
pub struct NewUserRecord {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<user::Model>, DbErr> {
        User::find_by_id(id).one(&self.db).await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, DbErr> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<user::Model>, DbErr> {
        User::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn create(&self, record: NewUserRecord) -> Result<user::Model, DbErr> {
        let active = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(record.username),
            email: Set(record.email),
            password_hash: Set(record.password_hash),
            role: Set(record.role),
            created_at: Set(chrono::Utc::now()),
        };
        active.insert(&self.db).await
    }

    pub async fn update_role(&self, existing: user::Model, role: Role) -> Result<user::Model, DbErr> {
        let mut active: user::ActiveModel = existing.into();
        active.role = Set(role);
        active.update(&self.db).await
    }

    /// Removes the account together with everything hanging off it: follow
    /// edges in both directions, the user's ratings and comments, and the
    /// user's recipes with their ratings and comments. Returns the number of
    /// user rows removed.
    pub async fn delete(&self, id: Uuid) -> Result<u64, DbErr> {
        let txn = self.db.begin().await?;

        Follow::delete_many()
            .filter(
                Condition::any()
                    .add(follow::Column::FollowerId.eq(id))
                    .add(follow::Column::FolloweeId.eq(id)),
            )
            .exec(&txn)
            .await?;
        Rating::delete_many()
            .filter(rating::Column::UserId.eq(id))
            .exec(&txn)
            .await?;
        Comment::delete_many()
            .filter(comment::Column::UserId.eq(id))
            .exec(&txn)
            .await?;

        let recipe_ids: Vec<Uuid> = Recipe::find()
            .select_only()
            .column(recipe::Column::Id)
            .filter(recipe::Column::UserId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;
        if !recipe_ids.is_empty() {
            Rating::delete_many()
                .filter(rating::Column::RecipeId.is_in(recipe_ids.clone()))
                .exec(&txn)
                .await?;
            Comment::delete_many()
                .filter(comment::Column::RecipeId.is_in(recipe_ids.clone()))
                .exec(&txn)
                .await?;
            Recipe::delete_many()
                .filter(recipe::Column::Id.is_in(recipe_ids))
                .exec(&txn)
                .await?;
        }

        let result = User::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(result.rows_affected)
    }
}
