use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::ParseError;
use line_bot::{RenderError, WebhookError};

use serde::Serialize;
pub use collaborators::{CollaboratorError, Messenger, RowStore};
pub use server::{ServerState, router, run_with_listener};
pub use webhook::{BatchPolicy, FailedEvent, WebhookOutcome, WebhookService, WebhookServiceBuilder};

mod collaborators;
mod server;
mod webhook;

pub enum ServerError {
    Webhook(WebhookError),
    Parse(ParseError),
    Collaborator(CollaboratorError),
    Render(RenderError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Webhook(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ServerError::Parse(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            ServerError::Collaborator(err) => {
                tracing::error!("collaborator error: {err}");
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            ServerError::Render(err) => {
                tracing::error!("render error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<WebhookError> for ServerError {
    fn from(value: WebhookError) -> Self {
        Self::Webhook(value)
    }
}

impl From<ParseError> for ServerError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<CollaboratorError> for ServerError {
    fn from(value: CollaboratorError) -> Self {
        Self::Collaborator(value)
    }
}

impl From<RenderError> for ServerError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}
