use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::catalog::CatalogError;
use crate::workflows::matchmaking::{EngineError, QuestionBankError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Engine(EngineError),
    Bank(QuestionBankError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Engine(EngineError::InvalidTransition { .. }) => StatusCode::CONFLICT,
            AppError::Engine(
                EngineError::UnknownQuestion { .. } | EngineError::InvalidAnswerValue { .. },
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Bank(_) => StatusCode::BAD_REQUEST,
            AppError::Engine(EngineError::EmptyCandidatePool | EngineError::Catalog(_))
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Engine(err) => write!(f, "matchmaking error: {}", err),
            AppError::Bank(err) => write!(f, "question bank error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Engine(err) => Some(err),
            AppError::Bank(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<EngineError> for AppError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Engine(EngineError::Catalog(value))
    }
}

impl From<QuestionBankError> for AppError {
    fn from(value: QuestionBankError) -> Self {
        Self::Bank(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::matchmaking::Phase;

    #[test]
    fn engine_errors_map_to_client_statuses() {
        let conflict = AppError::from(EngineError::InvalidTransition {
            operation: "attempt a reveal",
            phase: Phase::Questioning,
        });
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let invalid = AppError::from(EngineError::InvalidAnswerValue {
            question_id: "mirror".to_string(),
            value: "never".to_string(),
        });
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            invalid.to_string(),
            "matchmaking error: 'never' is not an option of question 'mirror'"
        );

        let empty = AppError::from(EngineError::EmptyCandidatePool);
        assert_eq!(empty.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
