#![allow(dead_code)]

use recipe_app::domain::{Category, Identity, RecipeDetail, RecipeDraft, Registration, Role};
use recipe_app::infrastructure::db::{run_migrations, UserRepository};
use recipe_app::infrastructure::security::TokenSigner;
use recipe_app::AppContext;
use sea_orm::{Database, DatabaseConnection};

pub const SECRET: &str = "an-integration-test-secret-of-32-bytes!";

pub async fn setup() -> (AppContext, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    run_migrations(&db).await.unwrap();
    let tokens = TokenSigner::new(SECRET, chrono::Duration::hours(1));
    (AppContext::new(db.clone(), tokens), db)
}

/// Registers `username` and assigns `role` the way start-up seeding would.
pub async fn user_with_role(
    ctx: &AppContext,
    db: &DatabaseConnection,
    username: &str,
    role: Role,
) -> Identity {
    let id = ctx
        .authenticator
        .register(Registration::new(
            username,
            format!("{username}@example.com"),
            "password123",
        ))
        .await
        .unwrap();

    let users = UserRepository::new(db.clone());
    let account = users.find_by_id(id).await.unwrap().unwrap();
    let account = if role == Role::User {
        account
    } else {
        users.update_role(account, role).await.unwrap()
    };
    account.identity()
}

pub fn draft(title: &str) -> RecipeDraft {
    RecipeDraft {
        title: title.to_string(),
        description: format!("{title} description"),
        ingredients: "flour, water, salt".to_string(),
        instructions: "Mix and bake.".to_string(),
        category: Category::Vegetarian,
        image_url: None,
        video_url: None,
    }
}

pub async fn publish(ctx: &AppContext, author: &Identity, title: &str) -> RecipeDetail {
    ctx.recipe_catalog
        .create(Some(author), draft(title))
        .await
        .unwrap()
}

/// Keeps creation timestamps strictly ordered.
pub async fn tick() {
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
}
