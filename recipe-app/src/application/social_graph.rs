use super::guard::{enforce, require_identity, Action, Resource};
use crate::domain::{FollowStatus, Identity};
use crate::infrastructure::db::{translate, FollowRepository, UserRepository};
use recipe_errors::AppError;
use std::collections::HashSet;
use uuid::Uuid;

pub struct SocialGraph {
    follows: FollowRepository,
    users: UserRepository,
}

impl SocialGraph {
    pub fn new(follows: FollowRepository, users: UserRepository) -> Self {
        Self { follows, users }
    }

    /// The caller starts following `followee_id`.
    pub async fn follow(&self, actor: Option<&Identity>, followee_id: Uuid) -> Result<(), AppError> {
        enforce(actor, Action::Create, &Resource::FollowGraph)?;
        let follower = require_identity(actor)?;

        if follower.user_id == followee_id {
            return Err(AppError::SelfFollowForbidden);
        }

        let followee = self
            .users
            .find_by_id(followee_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;
        if !followee.role.is_followable() {
            return Err(AppError::TargetMustBeCookOrAdmin);
        }

        if self.follows.exists(follower.user_id, followee_id).await? {
            return Err(AppError::AlreadyFollowing);
        }

        self.follows
            .create(follower.user_id, followee_id)
            .await
            .map_err(|e| translate(e, AppError::AlreadyFollowing, AppError::Unauthenticated))?;

        tracing::info!(
            follower = %follower.user_id,
            followee = %followee_id,
            "{} now follows {}",
            follower.username,
            followee.username
        );
        Ok(())
    }

    pub async fn unfollow(&self, actor: Option<&Identity>, followee_id: Uuid) -> Result<(), AppError> {
        enforce(actor, Action::Delete, &Resource::FollowGraph)?;
        let follower = require_identity(actor)?;

        let removed = self.follows.delete(follower.user_id, followee_id).await?;
        if removed == 0 {
            return Err(AppError::NotFollowing);
        }
        Ok(())
    }

    /// Follow status of the caller towards `followee_id`.
    pub async fn status(
        &self,
        actor: Option<&Identity>,
        followee_id: Uuid,
    ) -> Result<FollowStatus, AppError> {
        enforce(actor, Action::Read, &Resource::FollowGraph)?;
        let follower = require_identity(actor)?;

        Ok(FollowStatus {
            is_following: self.is_following(follower.user_id, followee_id).await?,
        })
    }

    pub async fn is_following(&self, follower_id: Uuid, followee_id: Uuid) -> Result<bool, AppError> {
        Ok(self.follows.exists(follower_id, followee_id).await?)
    }

    pub async fn followee_ids_of(&self, follower_id: Uuid) -> Result<HashSet<Uuid>, AppError> {
        Ok(self
            .follows
            .followee_ids(follower_id)
            .await?
            .into_iter()
            .collect())
    }
}
