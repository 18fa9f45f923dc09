use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::triage::TriageServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Process-boundary error shared by the server and the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("triage error: {0}")]
    Triage(#[from] TriageServiceError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Triage(TriageServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Triage(TriageServiceError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::triage::{CaseId, StoreError};

    #[test]
    fn triage_errors_keep_their_status() {
        let missing = AppError::from(TriageServiceError::NotFound(CaseId("case-9".to_string())));
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let invalid = AppError::from(TriageServiceError::InvalidInput("empty".to_string()));
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let store = AppError::from(TriageServiceError::Store(StoreError::Unavailable(
            "offline".to_string(),
        )));
        assert_eq!(store.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let config = AppError::from(ConfigError::InvalidPort);
        assert_eq!(
            config.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_name_the_failing_layer() {
        let config = AppError::from(ConfigError::InvalidPort);
        assert_eq!(
            config.to_string(),
            "configuration error: APP_PORT must be a valid u16"
        );
    }
}
