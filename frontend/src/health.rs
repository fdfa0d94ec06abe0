use chrono::{DateTime, Utc};
use todo_shared::HealthResponse;

use crate::api::ApiError;

/// Client-side view of backend reachability, derived from the health
/// endpoint's outcome. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub is_healthy: bool,
    pub message: String,
    pub last_checked: Option<DateTime<Utc>>,
}

impl HealthStatus {
    /// State before the first check has run.
    pub fn unchecked() -> Self {
        Self {
            is_healthy: false,
            message: "Not checked".to_string(),
            last_checked: None,
        }
    }

    /// Three-way classification: any 2xx is healthy, an HTTP error
    /// response means the backend answered but is unwell, and a
    /// transport failure means it never answered at all.
    pub fn from_result(result: &Result<HealthResponse, ApiError>, checked_at: DateTime<Utc>) -> Self {
        let (is_healthy, message) = match result {
            Ok(_) => (true, "Backend connected"),
            Err(err) if err.is_offline() => (false, "Backend offline"),
            Err(_) => (false, "Backend error"),
        };
        Self {
            is_healthy,
            message: message.to_string(),
            last_checked: Some(checked_at),
        }
    }
}
