pub mod comment;
pub mod follow;
pub mod rating;
pub mod recipe;
pub mod user;

pub use comment::Entity as Comment;
pub use follow::Entity as Follow;
pub use rating::Entity as Rating;
pub use recipe::Entity as Recipe;
pub use user::Entity as User;
