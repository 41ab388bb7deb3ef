use super::guard::{enforce, require_identity, Action, Resource};
use super::SocialGraph;
use crate::domain::{Identity, RecipeSummary};
use crate::infrastructure::db::{RatingRepository, RecipeFilter, RecipeRepository, RecipeWithAuthor};
use recipe_errors::AppError;
use std::sync::Arc;
use uuid::Uuid;

/// Read-side views that join recipes, authors, the follow graph and ratings.
pub struct FeedComposer {
    recipes: RecipeRepository,
    ratings: RatingRepository,
    graph: Arc<SocialGraph>,
}

impl FeedComposer {
    pub fn new(recipes: RecipeRepository, ratings: RatingRepository, graph: Arc<SocialGraph>) -> Self {
        Self {
            recipes,
            ratings,
            graph,
        }
    }

    pub async fn global_feed(&self) -> Result<Vec<RecipeSummary>, AppError> {
        self.summaries(RecipeFilter::All).await
    }

    /// Recipes by everyone `user_id` follows, newest first. Following nobody
    /// yields an empty feed, never the global one.
    pub async fn following_feed(&self, user_id: Uuid) -> Result<Vec<RecipeSummary>, AppError> {
        let followees = self.graph.followee_ids_of(user_id).await?;
        if followees.is_empty() {
            return Ok(Vec::new());
        }
        self.summaries(RecipeFilter::Authors(followees.into_iter().collect()))
            .await
    }

    pub async fn authored_feed(&self, user_id: Uuid) -> Result<Vec<RecipeSummary>, AppError> {
        self.summaries(RecipeFilter::Author(user_id)).await
    }

    /// The caller's following feed.
    pub async fn personal_feed(&self, actor: Option<&Identity>) -> Result<Vec<RecipeSummary>, AppError> {
        enforce(actor, Action::Read, &Resource::PersonalFeed)?;
        let identity = require_identity(actor)?;
        self.following_feed(identity.user_id).await
    }

    /// The caller's own recipes.
    pub async fn my_recipes(&self, actor: Option<&Identity>) -> Result<Vec<RecipeSummary>, AppError> {
        enforce(actor, Action::Read, &Resource::PersonalFeed)?;
        let identity = require_identity(actor)?;
        self.authored_feed(identity.user_id).await
    }

    async fn summaries(&self, filter: RecipeFilter) -> Result<Vec<RecipeSummary>, AppError> {
        let rows = self.recipes.list_with_authors(filter).await?;
        annotate(&self.ratings, rows).await
    }
}

/// Attaches the live average rating to each recipe in one grouped query.
pub(crate) async fn annotate(
    ratings: &RatingRepository,
    rows: Vec<RecipeWithAuthor>,
) -> Result<Vec<RecipeSummary>, AppError> {
    let ids: Vec<Uuid> = rows.iter().map(|(recipe, _)| recipe.id).collect();
    let tallies = ratings.tallies(&ids).await?;

    Ok(rows
        .into_iter()
        .filter_map(|(recipe, author)| {
            let author = author?;
            Some(RecipeSummary {
                average_rating: tallies
                    .get(&recipe.id)
                    .copied()
                    .unwrap_or_default()
                    .average(),
                id: recipe.id,
                title: recipe.title,
                description: recipe.description,
                image_url: recipe.image_url,
                category: recipe.category,
                author_id: recipe.user_id,
                author_username: author.username,
                created_at: recipe.created_at,
            })
        })
        .collect())
}
