mod authenticator;
mod bootstrap;
mod comment_ledger;
mod feed_composer;
pub mod guard;
mod rating_ledger;
mod recipe_catalog;
mod social_graph;
mod user_admin;

pub use authenticator::{Authenticator, SessionToken};
pub use bootstrap::Bootstrap;
pub use comment_ledger::CommentLedger;
pub use feed_composer::FeedComposer;
pub use rating_ledger::RatingLedger;
pub use recipe_catalog::RecipeCatalog;
pub use social_graph::SocialGraph;
pub use user_admin::UserAdmin;
