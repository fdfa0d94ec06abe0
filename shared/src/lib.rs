use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TITLE_MAX_CHARS: usize = 255;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Spring-style page envelope; the UI only consumes `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPageResponse {
    pub content: Vec<Task>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    pub number: u32,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Error envelope the backend attaches to 4xx/5xx responses. Every field
/// is optional on parse; the client only surfaces `message`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<Vec<String>>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Title cannot exceed 255 characters")]
    TitleTooLong,
    #[error("Description cannot exceed 1000 characters")]
    DescriptionTooLong,
}

/// Trims and checks the title invariant: non-empty, at most 255 chars.
pub fn validate_title(raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if trimmed.chars().count() > TITLE_MAX_CHARS {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(trimmed)
}

/// Trims the description; an empty one collapses to `None`.
pub fn validate_description(raw: &str) -> Result<Option<&str>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(ValidationError::DescriptionTooLong);
    }
    Ok(Some(trimmed))
}

impl CreateTaskRequest {
    pub fn from_input(title: &str, description: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            title: validate_title(title)?.to_string(),
            description: validate_description(description)?.map(str::to_string),
        })
    }
}

impl UpdateTaskRequest {
    /// Request body for the edit dialog: title and description only.
    /// A cleared description is omitted, leaving the stored value alone.
    pub fn edit(title: &str, description: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            title: Some(validate_title(title)?.to_string()),
            description: validate_description(description)?.map(str::to_string),
            completed: None,
        })
    }
}
