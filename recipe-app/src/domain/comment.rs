use super::{RecipeRef, UserRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: uuid::Uuid,
    pub content: String,
    pub user: UserRef,
    pub recipe: RecipeRef,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
