use api_types::reply::{Message, ReplyMessageRequest};
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "https://api.line.me";

/// Client for the LINE Messaging API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },
    #[error("invalid channel access token: {0}")]
    InvalidToken(String),
}

impl ApiClient {
    pub fn new(access_token: &str, base_url: &str) -> Result<Self, ApiError> {
        let mut auth = header::HeaderValue::try_from(format!("Bearer {access_token}"))
            .map_err(|err| ApiError::InvalidToken(err.to_string()))?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn post_json_unit<TReq: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<(), ApiError> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let message = match resp.json::<ErrorBody>().await {
            Ok(err) => err.message,
            Err(_) => "server error".to_string(),
        };
        Err(ApiError::Server { status, message })
    }

    /// Answers the event that carried `reply_token`.
    pub async fn reply(&self, reply_token: &str, messages: Vec<Message>) -> Result<(), ApiError> {
        self.post_json_unit(
            "/v2/bot/message/reply",
            &ReplyMessageRequest {
                reply_token: reply_token.to_string(),
                messages,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_and_path_with_one_slash() {
        let client = ApiClient::new("token", "https://api.line.me/").unwrap();
        assert_eq!(
            client.url("/v2/bot/message/reply"),
            "https://api.line.me/v2/bot/message/reply"
        );
    }

    #[test]
    fn rejects_token_with_newline() {
        let err = ApiClient::new("bad\ntoken", DEFAULT_API_BASE).unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken(_)));
    }
}
