//! Central authorization policy.
//!
//! Every role and ownership decision in the service layer goes through
//! [`authorize`]. The function is pure: callers load the resource first and
//! pass its *current* owner, so a decision is never made on a stale snapshot.

use crate::domain::Identity;
use recipe_errors::AppError;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Read,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// The recipe collection: listings, search, and the target of creation.
    RecipeCatalog,
    Recipe { owner_id: Uuid },
    /// Comments under a recipe.
    Comments,
    Comment { author_id: Uuid },
    Ratings,
    FollowGraph,
    /// Views built around the caller: following feed, "my" listings.
    PersonalFeed,
    /// The list of all accounts.
    UserDirectory,
    UserAccount { user_id: Uuid },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    Unauthenticated,
    Forbidden(&'static str),
    SelfDeletionForbidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            Self::Allow => Ok(()),
            Self::Deny(DenyReason::Unauthenticated) => Err(AppError::Unauthenticated),
            Self::Deny(DenyReason::Forbidden(reason)) => Err(AppError::forbidden(reason)),
            Self::Deny(DenyReason::SelfDeletionForbidden) => Err(AppError::SelfDeletionForbidden),
        }
    }
}

/// Evaluates the policy table. The first matching rule wins:
///
/// 1. public reads of recipes, comments and ratings
/// 2. everything else needs an identity
/// 3. recipe creation needs COOK or ADMIN
/// 4. recipe and comment mutation needs ownership or ADMIN
/// 5. user administration needs ADMIN, and an admin may not delete themselves
/// 6. remaining authenticated actions are open to any role
pub fn authorize(actor: Option<&Identity>, action: Action, resource: &Resource) -> Decision {
    use Resource::*;

    if action == Action::Read
        && matches!(
            resource,
            RecipeCatalog | Recipe { .. } | Comments | Comment { .. } | Ratings
        )
    {
        return Decision::Allow;
    }

    let Some(identity) = actor else {
        return Decision::Deny(DenyReason::Unauthenticated);
    };

    match (action, resource) {
        (Action::Create, RecipeCatalog) => {
            if identity.role.can_author_recipes() {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::Forbidden(
                    "Only cooks and admins can publish recipes",
                ))
            }
        }
        (Action::Update | Action::Delete, Recipe { owner_id }) => {
            owner_or_admin(identity, *owner_id, "You can only modify your own recipes")
        }
        (Action::Update | Action::Delete, Comment { author_id }) => {
            owner_or_admin(identity, *author_id, "You can only modify your own comments")
        }
        (Action::Read, UserDirectory) => admin_only(identity),
        (Action::Delete, UserAccount { user_id }) => {
            if !identity.is_admin() {
                Decision::Deny(DenyReason::Forbidden("Only admins can delete users"))
            } else if identity.user_id == *user_id {
                Decision::Deny(DenyReason::SelfDeletionForbidden)
            } else {
                Decision::Allow
            }
        }
        (Action::Read, UserAccount { .. }) => Decision::Allow,
        (Action::Create, Comments | Ratings) => Decision::Allow,
        (_, FollowGraph) => Decision::Allow,
        (Action::Read, PersonalFeed) => Decision::Allow,
        _ => Decision::Deny(DenyReason::Forbidden("This action is not permitted")),
    }
}

/// Runs [`authorize`] and turns a denial into an error, logging it.
pub fn enforce(actor: Option<&Identity>, action: Action, resource: &Resource) -> Result<(), AppError> {
    let decision = authorize(actor, action, resource);
    if let Decision::Deny(reason) = decision {
        tracing::warn!(
            actor = ?actor.map(|i| i.user_id),
            ?action,
            ?resource,
            ?reason,
            "Access denied"
        );
    }
    decision.into_result()
}

/// Unwraps the caller's identity or fails with `Unauthenticated`.
pub fn require_identity(actor: Option<&Identity>) -> Result<&Identity, AppError> {
    actor.ok_or(AppError::Unauthenticated)
}

fn owner_or_admin(identity: &Identity, owner_id: Uuid, reason: &'static str) -> Decision {
    if identity.owns(owner_id) || identity.is_admin() {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::Forbidden(reason))
    }
}

fn admin_only(identity: &Identity) -> Decision {
    if identity.is_admin() {
        Decision::Allow
    } else {
        Decision::Deny(DenyReason::Forbidden("Admin access required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn identity(role: Role) -> Identity {
        Identity::new(Uuid::new_v4(), format!("{}-user", role), role)
    }

    #[test]
    fn test_public_reads_need_no_identity() {
        let owner_id = Uuid::new_v4();
        for resource in [
            Resource::RecipeCatalog,
            Resource::Recipe { owner_id },
            Resource::Comments,
            Resource::Comment { author_id: owner_id },
            Resource::Ratings,
        ] {
            assert_eq!(authorize(None, Action::Read, &resource), Decision::Allow);
        }
    }

    #[test]
    fn test_anonymous_writes_are_unauthenticated() {
        let expected = Decision::Deny(DenyReason::Unauthenticated);
        assert_eq!(authorize(None, Action::Create, &Resource::RecipeCatalog), expected);
        assert_eq!(authorize(None, Action::Create, &Resource::Ratings), expected);
        assert_eq!(authorize(None, Action::Read, &Resource::PersonalFeed), expected);
        assert_eq!(authorize(None, Action::Create, &Resource::FollowGraph), expected);
        assert_eq!(authorize(None, Action::Read, &Resource::UserDirectory), expected);
    }

    #[test]
    fn test_recipe_creation_by_role() {
        let create = |role| authorize(Some(&identity(role)), Action::Create, &Resource::RecipeCatalog);
        assert!(!create(Role::User).is_allowed());
        assert!(create(Role::Cook).is_allowed());
        assert!(create(Role::Admin).is_allowed());
    }

    #[test]
    fn test_recipe_mutation_needs_owner_or_admin() {
        let owner = identity(Role::Cook);
        let stranger = identity(Role::Cook);
        let admin = identity(Role::Admin);
        let recipe = Resource::Recipe { owner_id: owner.user_id };

        for action in [Action::Update, Action::Delete] {
            assert!(authorize(Some(&owner), action, &recipe).is_allowed());
            assert!(authorize(Some(&admin), action, &recipe).is_allowed());
            assert!(matches!(
                authorize(Some(&stranger), action, &recipe),
                Decision::Deny(DenyReason::Forbidden(_))
            ));
        }
    }

    #[test]
    fn test_comment_deletion_needs_author_or_admin() {
        let author = identity(Role::User);
        let other = identity(Role::User);
        let comment = Resource::Comment { author_id: author.user_id };

        assert!(authorize(Some(&author), Action::Delete, &comment).is_allowed());
        assert!(!authorize(Some(&other), Action::Delete, &comment).is_allowed());
        assert!(authorize(Some(&identity(Role::Admin)), Action::Delete, &comment).is_allowed());
    }

    #[test]
    fn test_user_administration() {
        let admin = identity(Role::Admin);
        let cook = identity(Role::Cook);

        assert!(authorize(Some(&admin), Action::Read, &Resource::UserDirectory).is_allowed());
        assert!(!authorize(Some(&cook), Action::Read, &Resource::UserDirectory).is_allowed());

        let target = Resource::UserAccount { user_id: cook.user_id };
        assert!(authorize(Some(&admin), Action::Delete, &target).is_allowed());
        assert!(!authorize(Some(&cook), Action::Delete, &target).is_allowed());
    }

    #[test]
    fn test_admin_cannot_delete_self() {
        let admin = identity(Role::Admin);
        let own_account = Resource::UserAccount { user_id: admin.user_id };
        assert_eq!(
            authorize(Some(&admin), Action::Delete, &own_account),
            Decision::Deny(DenyReason::SelfDeletionForbidden)
        );
        assert_eq!(
            authorize(Some(&admin), Action::Delete, &own_account).into_result(),
            Err(AppError::SelfDeletionForbidden)
        );
    }

    #[test]
    fn test_unlisted_actions_are_forbidden() {
        let admin = identity(Role::Admin);
        assert!(!authorize(Some(&admin), Action::Delete, &Resource::Ratings).is_allowed());
        assert!(!authorize(Some(&admin), Action::Update, &Resource::RecipeCatalog).is_allowed());
    }

    #[test]
    fn test_denials_map_to_taxonomy() {
        assert_eq!(
            Decision::Deny(DenyReason::Unauthenticated).into_result(),
            Err(AppError::Unauthenticated)
        );
        assert!(matches!(
            Decision::Deny(DenyReason::Forbidden("no")).into_result(),
            Err(AppError::Forbidden(_))
        ));
    }
}
