use std::io;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("method {0} not allowed on the submission endpoint")]
    MethodNotAllowed(String),
    #[error("neither username/password nor API key provided")]
    MissingCredentials,
    #[error("failed to call ServiceNow: {0}")]
    Transport(String),
    #[error("failed to read ServiceNow response: {0}")]
    ResponseRead(String),
    #[error("failed to parse ServiceNow response: {0}")]
    ResponseDecode(String),
    #[error("no incident number in the ServiceNow response")]
    MissingIncidentNumber,
    #[error("failed to render page: {0}")]
    Render(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::MissingCredentials => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the browser. Details stay in the log.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::MethodNotAllowed(_) => "Method not allowed",
            AppError::MissingCredentials => "Authentication data missing",
            AppError::Transport(_) => "Error sending the request",
            AppError::ResponseRead(_) => "Error reading the response",
            AppError::ResponseDecode(_) => "Error processing the response",
            AppError::MissingIncidentNumber => {
                "Error: Incident number missing in ServiceNow response"
            }
            AppError::Render(_) => "Error rendering the page",
            AppError::Configuration(_) | AppError::Io(_) => "Error creating the request",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("Request failed: {self}");
        (self.status(), self.public_message()).into_response()
    }
}
