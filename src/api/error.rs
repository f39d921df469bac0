use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scheduling::SchedulingError;
use crate::utils::logging::log_api_error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Scheduling(#[from] SchedulingError),
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// JSON body returned with every error status
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn validation(error: impl std::fmt::Display) -> Self {
        ApiError::Validation(error.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Scheduling(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log_api_error(status.as_str(), &self.to_string());
        } else {
            tracing::debug!("Request rejected with {}: {}", status, self);
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(SchedulingError::UnknownTimezone("Mars/Colony".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::validation("bad").status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound("Configuration".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(sqlx::Error::RowNotFound).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ApiError::from(SchedulingError::UnknownTimezone("Mars/Colony".into())).to_string(),
            "Unknown timezone: Mars/Colony"
        );
        assert_eq!(ApiError::NotFound("Calendar entry".into()).to_string(), "Calendar entry not found");
    }
}
