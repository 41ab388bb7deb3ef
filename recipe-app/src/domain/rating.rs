use super::{RecipeRef, UserRef};
use recipe_errors::AppError;
use serde::{Deserialize, Serialize};

/// A rating score, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Score(u8);

impl Score {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    pub fn value(self) -> i32 {
        i32::from(self.0)
    }
}

impl TryFrom<i32> for Score {
    type Error = AppError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(AppError::InvalidScore)
        }
    }
}

impl From<Score> for i32 {
    fn from(score: Score) -> Self {
        score.value()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: uuid::Uuid,
    pub score: i32,
    pub user_id: uuid::Uuid,
    pub recipe_id: uuid::Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Rating joined with the rater and the rated recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingView {
    pub id: uuid::Uuid,
    pub score: i32,
    pub user: UserRef,
    pub recipe: RecipeRef,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Sum and count of the scores of one recipe.
///
/// Both the single-recipe average and the bulk feed annotation go through
/// [`RatingTally::average`], so they always agree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingTally {
    pub total: i64,
    pub count: i64,
}

impl RatingTally {
    pub fn average(&self) -> f64 {
        if self.count <= 0 {
            0.0
        } else {
            self.total as f64 / self.count as f64
        }
    }
}
