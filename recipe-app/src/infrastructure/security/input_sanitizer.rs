use crate::domain::{RecipeDraft, Registration};
use recipe_errors::AppError;
use std::sync::OnceLock;

const MAX_USERNAME_LENGTH: usize = 50;
const MAX_EMAIL_LENGTH: usize = 100;
const MAX_PASSWORD_LENGTH: usize = 255;
const MAX_TITLE_LENGTH: usize = 100;
const MAX_DESCRIPTION_LENGTH: usize = 1000;
const MAX_INGREDIENTS_LENGTH: usize = 5000;
const MAX_INSTRUCTIONS_LENGTH: usize = 10000;
const MAX_COMMENT_LENGTH: usize = 1000;
const MAX_URL_LENGTH: usize = 2048;
const MAX_KEYWORD_LENGTH: usize = 100;

fn email_pattern() -> &'static regex_lite::Regex {
    static PATTERN: OnceLock<regex_lite::Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|_| regex_lite::Regex::new(".^").unwrap())
    })
}

pub struct InputSanitizer;

impl InputSanitizer {
    /// Trims the username and email. The password is kept byte for byte.
    pub fn validate_registration(registration: Registration) -> Result<Registration, AppError> {
        let username = Self::required("Username", &registration.username, MAX_USERNAME_LENGTH)?;
        let email = Self::required("Email", &registration.email, MAX_EMAIL_LENGTH)?;
        if !email_pattern().is_match(&email) {
            return Err(AppError::Validation("Email is not valid".to_string()));
        }
        if registration.password.trim().is_empty() {
            return Err(AppError::Validation("Password must not be blank".to_string()));
        }
        if registration.password.chars().count() > MAX_PASSWORD_LENGTH {
            return Err(AppError::Validation(format!(
                "Password must be at most {} characters",
                MAX_PASSWORD_LENGTH
            )));
        }

        Ok(Registration {
            username,
            email,
            password: registration.password,
        })
    }

    pub fn validate_recipe(draft: RecipeDraft) -> Result<RecipeDraft, AppError> {
        Ok(RecipeDraft {
            title: Self::required("Title", &draft.title, MAX_TITLE_LENGTH)?,
            description: Self::required("Description", &draft.description, MAX_DESCRIPTION_LENGTH)?,
            ingredients: Self::required("Ingredients", &draft.ingredients, MAX_INGREDIENTS_LENGTH)?,
            instructions: Self::required(
                "Instructions",
                &draft.instructions,
                MAX_INSTRUCTIONS_LENGTH,
            )?,
            category: draft.category,
            image_url: Self::optional_url("Image URL", draft.image_url)?,
            video_url: Self::optional_url("Video URL", draft.video_url)?,
        })
    }

    pub fn validate_comment(content: &str) -> Result<String, AppError> {
        Self::required("Comment", content, MAX_COMMENT_LENGTH)
    }

    /// Search keywords are trimmed and capped; control characters are dropped.
    pub fn sanitize_keyword(keyword: &str) -> String {
        keyword
            .trim()
            .chars()
            .filter(|c| !c.is_control())
            .take(MAX_KEYWORD_LENGTH)
            .collect()
    }

    fn required(field: &str, value: &str, max_len: usize) -> Result<String, AppError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AppError::Validation(format!("{} must not be blank", field)));
        }
        if value.chars().count() > max_len {
            return Err(AppError::Validation(format!(
                "{} must be at most {} characters",
                field, max_len
            )));
        }
        Ok(value.to_string())
    }

    fn optional_url(field: &str, value: Option<String>) -> Result<Option<String>, AppError> {
        let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
            return Ok(None);
        };
        if value.len() > MAX_URL_LENGTH {
            return Err(AppError::Validation(format!("{} is too long", field)));
        }
        if value.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(AppError::Validation(format!("{} is not valid", field)));
        }
        Ok(Some(value))
    }
}
