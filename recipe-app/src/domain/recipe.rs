use super::UserRef;
use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    #[sea_orm(string_value = "VEGETARIAN")]
    Vegetarian,
    #[sea_orm(string_value = "VEGAN")]
    Vegan,
    #[sea_orm(string_value = "NON_VEGETARIAN")]
    NonVegetarian,
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "VEGETARIAN" => Ok(Self::Vegetarian),
            "VEGAN" => Ok(Self::Vegan),
            "NON_VEGETARIAN" => Ok(Self::NonVegetarian),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Mutable recipe content, as submitted on create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub category: Category,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRef {
    pub id: uuid::Uuid,
    pub title: String,
}

/// Card projection shared by every feed and listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSummary {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub category: Category,
    pub author_id: uuid::Uuid,
    pub author_username: String,
    pub average_rating: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetail {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: String,
    pub ingredients: String,
    pub instructions: String,
    pub category: Category,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    pub user: UserRef,
    pub average_rating: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
