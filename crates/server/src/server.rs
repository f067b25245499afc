use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Error as AxumError, Header},
};
use notion::MAIN_DATABASE;
use serde::Serialize;

use std::sync::Arc;

use crate::{ServerError, WebhookOutcome, WebhookService};

static LINE_SIGNATURE_HEADER: axum::http::HeaderName =
    axum::http::HeaderName::from_static("x-line-signature");

#[derive(Clone)]
pub struct ServerState {
    pub webhook: Arc<WebhookService>,
}

/// `TypedHeader` for the LINE signature header
///
/// Webhook deliveries carry the body signature in "x-line-signature".
#[derive(Debug)]
struct LineSignature(String);

impl Header for LineSignature {
    fn name() -> &'static axum::http::HeaderName {
        &LINE_SIGNATURE_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };

        Ok(LineSignature(value.to_string()))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        match axum::http::HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-line-signature header"),
        }
    }
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn line_webhooks(
    State(state): State<ServerState>,
    signature: Option<TypedHeader<LineSignature>>,
    body: Bytes,
) -> Result<Json<WebhookOutcome>, ServerError> {
    transfer(&state, MAIN_DATABASE, signature, &body).await
}

async fn line_webhooks_for(
    State(state): State<ServerState>,
    Path(database): Path<String>,
    signature: Option<TypedHeader<LineSignature>>,
    body: Bytes,
) -> Result<Json<WebhookOutcome>, ServerError> {
    transfer(&state, &database, signature, &body).await
}

async fn transfer(
    state: &ServerState,
    database: &str,
    signature: Option<TypedHeader<LineSignature>>,
    body: &[u8],
) -> Result<Json<WebhookOutcome>, ServerError> {
    let Some(TypedHeader(LineSignature(signature))) = signature else {
        return Err(ServerError::Generic(
            "missing x-line-signature header".to_string(),
        ));
    };

    let outcome = state.webhook.transfer(database, body, &signature).await?;
    Ok(Json(outcome))
}

pub fn router(webhook: WebhookService) -> Router {
    let state = ServerState {
        webhook: Arc::new(webhook),
    };

    Router::new()
        .route("/health", get(health))
        .route("/api/line/webhooks", post(line_webhooks))
        .route("/api/line/webhooks/{database}", post(line_webhooks_for))
        .with_state(state)
}

pub async fn run_with_listener(
    webhook: WebhookService,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(webhook)).await
}
