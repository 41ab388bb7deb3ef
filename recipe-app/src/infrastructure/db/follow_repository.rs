use super::entities::{follow, Follow};
use sea_orm::{entity::*, query::*, DatabaseConnection, DbErr};
use uuid::Uuid;

#[derive(Clone)]
pub struct FollowRepository {
    db: DatabaseConnection,
}

impl FollowRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn exists(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool, DbErr> {
        let edge = Follow::find_by_id((follower_id, followee_id))
            .one(&self.db)
            .await?;
        Ok(edge.is_some())
    }

    /// Fails with a unique-constraint violation if the edge already exists.
    pub async fn create(&self, follower_id: Uuid, followee_id: Uuid) -> Result<follow::Model, DbErr> {
        let active = follow::ActiveModel {
            follower_id: Set(follower_id),
            followee_id: Set(followee_id),
            id: Set(Uuid::new_v4()),
            created_at: Set(chrono::Utc::now()),
        };
        active.insert(&self.db).await
    }

    /// Returns the number of edges removed (0 or 1).
    pub async fn delete(&self, follower_id: Uuid, followee_id: Uuid) -> Result<u64, DbErr> {
        let result = Follow::delete_by_id((follower_id, followee_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn followee_ids(&self, follower_id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        Follow::find()
            .select_only()
            .column(follow::Column::FolloweeId)
            .filter(follow::Column::FollowerId.eq(follower_id))
            .into_tuple()
            .all(&self.db)
            .await
    }
}
