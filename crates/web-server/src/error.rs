use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Rejected form input. Answered with a plain-text message, not an error status.
    #[error("{0}")]
    Validation(String),
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
    #[error("Results error: {0}")]
    Analyzer(#[from] analyzer::error::AnalyzerError),
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),
}

impl From<core_types::CoreError> for AppError {
    fn from(err: core_types::CoreError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(message) => {
                tracing::debug!(%message, "Form input rejected.");
                return (StatusCode::OK, message).into_response();
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Analyzer(analyzer_err) => {
                tracing::error!(error = ?analyzer_err, "Results error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while computing results".to_string(),
                )
            }
            AppError::Template(template_err) => {
                tracing::error!(error = ?template_err, "Template error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A page could not be rendered".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
