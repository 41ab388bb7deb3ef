use crate::application::{
    Authenticator, Bootstrap, CommentLedger, FeedComposer, RatingLedger, RecipeCatalog,
    SocialGraph, UserAdmin,
};
use crate::config::AppConfig;
use crate::infrastructure::db::{
    self, CommentRepository, FollowRepository, RatingRepository, RecipeRepository, UserRepository,
};
use crate::infrastructure::security::{CredentialHasher, TokenSigner};
use recipe_errors::AppError;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppContext {
    pub authenticator: Arc<Authenticator>,
    pub social_graph: Arc<SocialGraph>,
    pub recipe_catalog: Arc<RecipeCatalog>,
    pub feed_composer: Arc<FeedComposer>,
    pub rating_ledger: Arc<RatingLedger>,
    pub comment_ledger: Arc<CommentLedger>,
    pub user_admin: Arc<UserAdmin>,
    pub bootstrap: Arc<Bootstrap>,
}

impl AppContext {
    pub fn new(db: DatabaseConnection, tokens: TokenSigner) -> Self {
        let users = UserRepository::new(db.clone());
        let recipes = RecipeRepository::new(db.clone());
        let ratings = RatingRepository::new(db.clone());
        let comments = CommentRepository::new(db.clone());
        let follows = FollowRepository::new(db);

        let authenticator = Arc::new(Authenticator::new(
            users.clone(),
            CredentialHasher::new(),
            tokens,
        ));
        let social_graph = Arc::new(SocialGraph::new(follows, users.clone()));

        Self {
            bootstrap: Arc::new(Bootstrap::new(authenticator.clone(), users.clone())),
            authenticator,
            recipe_catalog: Arc::new(RecipeCatalog::new(recipes.clone(), ratings.clone())),
            feed_composer: Arc::new(FeedComposer::new(
                recipes.clone(),
                ratings.clone(),
                social_graph.clone(),
            )),
            rating_ledger: Arc::new(RatingLedger::new(ratings, recipes.clone(), users.clone())),
            comment_ledger: Arc::new(CommentLedger::new(comments, recipes, users.clone())),
            user_admin: Arc::new(UserAdmin::new(users)),
            social_graph,
        }
    }

    /// Connects, brings the schema up to date and wires every service.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let conn = db::create_connection(&config.database_url).await?;
        db::run_migrations(&conn).await?;
        tracing::info!("Connected to database");

        let tokens = TokenSigner::new(&config.token_secret, config.token_ttl());
        Ok(Self::new(conn, tokens))
    }
}
