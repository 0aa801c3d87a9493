// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for entire application

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

/// Application-specific error types
/// DOCUMENTATION: Each variant maps to an HTTP status code and error response.
/// DatabaseError and SerializationError carry internal detail and are
/// replaced by `Internal` at the handler boundary before reaching a client.
#[derive(Error, Debug)]
pub enum ProjectsError {
    #[error("Project not found")]
    ProjectNotFound(String),

    #[error("Photo not found in project")]
    PhotoNotFound { project_id: String, photo_id: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Fixed, client-safe message for an unexpected failure
    #[error("{0}")]
    Internal(&'static str),
}

impl ProjectsError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ProjectsError::ProjectNotFound(_) | ProjectsError::PhotoNotFound { .. }
        )
    }

    /// Keep client-facing errors, log and mask everything else
    /// DOCUMENTATION: Used by handlers as `.map_err(ProjectsError::masked("..."))`
    pub fn masked(message: &'static str) -> impl FnOnce(ProjectsError) -> ProjectsError {
        move |err| {
            if err.is_not_found()
                || matches!(err, ProjectsError::ValidationError(_) | ProjectsError::Internal(_))
            {
                return err;
            }
            log::error!("{}: {}", message, err);
            ProjectsError::Internal(message)
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ProjectsError::ProjectNotFound(_) | ProjectsError::PhotoNotFound { .. } => "NOT_FOUND",
            ProjectsError::ValidationError(_) => "VALIDATION_ERROR",
            ProjectsError::DatabaseError(_) => "DATABASE_ERROR",
            ProjectsError::SerializationError(_) => "SERIALIZATION_ERROR",
            ProjectsError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for ProjectsError {
    fn from(err: serde_json::Error) -> Self {
        ProjectsError::SerializationError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ProjectsError {
    fn from(err: validator::ValidationErrors) -> Self {
        ProjectsError::ValidationError(err.to_string())
    }
}

/// Convert ProjectsError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for ProjectsError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ProjectsError::ProjectNotFound(id) => log::debug!("Project {} not found", id),
            ProjectsError::PhotoNotFound {
                project_id,
                photo_id,
            } => log::debug!("Photo {} not found in project {}", photo_id, project_id),
            _ => {}
        }

        let message = match self {
            ProjectsError::DatabaseError(_) | ProjectsError::SerializationError(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "error": {
                "code": self.code(),
                "message": message,
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ProjectsError::ProjectNotFound(_) => StatusCode::NOT_FOUND,
            ProjectsError::PhotoNotFound { .. } => StatusCode::NOT_FOUND,
            ProjectsError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ProjectsError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProjectsError::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProjectsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
