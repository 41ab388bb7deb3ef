mod comment;
mod follow;
mod identity;
mod rating;
mod recipe;
mod user;

pub use comment::CommentView;
pub use follow::FollowStatus;
pub use identity::Identity;
pub use rating::{Rating, RatingTally, RatingView, Score};
pub use recipe::{Category, RecipeDetail, RecipeDraft, RecipeRef, RecipeSummary};
pub use user::{Registration, Role, User, UserRef};
