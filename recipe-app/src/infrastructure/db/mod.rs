pub mod entities;
mod comment_repository;
mod follow_repository;
mod rating_repository;
mod recipe_repository;
mod user_repository;

pub use comment_repository::CommentRepository;
pub use follow_repository::FollowRepository;
pub use rating_repository::RatingRepository;
pub use recipe_repository::{RecipeFilter, RecipeRepository, RecipeWithAuthor};
pub use user_repository::{NewUserRecord, UserRepository};

use recipe_errors::AppError;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
    SqlErr,
};
use std::time::Duration;

/// Constraint failure reported by the store on a write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Unique or primary key clash; carries the backend's message.
    Unique(String),
    /// A foreign key points at a row that no longer exists.
    MissingReference,
}

pub fn violation(err: &DbErr) -> Option<Violation> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => Some(Violation::Unique(detail)),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => Some(Violation::MissingReference),
        _ => None,
    }
}

/// Maps constraint failures onto domain errors; anything else stays a database error.
pub fn translate(err: DbErr, on_duplicate: AppError, on_missing_reference: AppError) -> AppError {
    match violation(&err) {
        Some(Violation::Unique(_)) => on_duplicate,
        Some(Violation::MissingReference) => on_missing_reference,
        None => err.into(),
    }
}

pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .sqlx_logging(false);

    Database::connect(opt).await
}

/// Creates every table that does not exist yet. Referenced tables come first
/// so foreign keys resolve on every backend.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, entities::User).await?;
    create_table(db, &schema, entities::Recipe).await?;
    create_table(db, &schema, entities::Rating).await?;
    create_table(db, &schema, entities::Comment).await?;
    create_table(db, &schema, entities::Follow).await?;

    tracing::info!("Database schema is up to date");
    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(db.get_database_backend().build(&statement)).await?;
    Ok(())
}
