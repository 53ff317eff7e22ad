use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::landings::router::case_error_status;
use crate::workflows::landings::{CaseServiceError, LandingImportError, SubmissionViolation};
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
    Server(axum::Error),
    Import(LandingImportError),
    Payload(serde_json::Error),
    Case(CaseServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Payload(err) => write!(f, "invalid document payload: {}", err),
            AppError::Case(err) => write!(f, "case error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Payload(err) => Some(err),
            AppError::Case(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Import(_) | AppError::Payload(_) => StatusCode::BAD_REQUEST,
            AppError::Case(err) => case_error_status(err),
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

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

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<LandingImportError> for AppError {
    fn from(value: LandingImportError) -> Self {
        Self::Import(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Payload(value)
    }
}

impl From<CaseServiceError> for AppError {
    fn from(value: CaseServiceError) -> Self {
        Self::Case(value)
    }
}

impl From<SubmissionViolation> for AppError {
    fn from(value: SubmissionViolation) -> Self {
        Self::Case(CaseServiceError::Submission(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::landings::RepositoryError;

    #[test]
    fn case_errors_share_the_router_status_codes() {
        let cases = [
            (
                AppError::from(SubmissionViolation::MissingDocumentNumber),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::from(CaseServiceError::Repository(RepositoryError::NotFound)),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::from(CaseServiceError::Repository(RepositoryError::Conflict)),
                StatusCode::CONFLICT,
            ),
            (
                AppError::from(CaseServiceError::AlreadyVoid("GBR-2024-CC-1".to_string())),
                StatusCode::CONFLICT,
            ),
            (
                AppError::from(CaseServiceError::Repository(RepositoryError::Unavailable(
                    "offline".to_string(),
                ))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
