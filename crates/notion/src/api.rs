use api_types::notion::{PageCreate, Parent};
use engine::Record;
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;

use crate::row_properties;

pub const DEFAULT_API_BASE: &str = "https://api.notion.com";
pub const NOTION_VERSION: &str = "2022-06-28";

/// Client for the Notion API.
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
    #[error("invalid integration secret: {0}")]
    InvalidSecret(String),
}

impl ApiClient {
    pub fn new(secret: &str, base_url: &str) -> Result<Self, ApiError> {
        let mut auth = header::HeaderValue::try_from(format!("Bearer {secret}"))
            .map_err(|err| ApiError::InvalidSecret(err.to_string()))?;
        auth.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            "notion-version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

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

    async fn post_json<TReq: serde::Serialize + ?Sized, TResp: for<'de> serde::Deserialize<'de>>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TResp, ApiError> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<TResp>().await?);
        }

        let message = match resp.json::<ErrorBody>().await {
            Ok(err) => err.message,
            Err(_) => "server error".to_string(),
        };
        Err(ApiError::Server { status, message })
    }

    /// Adds `record` as a new row of `database_id` and returns the created
    /// page object.
    pub async fn create_page(
        &self,
        database_id: &str,
        record: &Record,
    ) -> Result<serde_json::Value, ApiError> {
        let page: serde_json::Value = self
            .post_json(
                "/v1/pages",
                &PageCreate {
                    parent: Parent {
                        database_id: database_id.to_string(),
                    },
                    properties: row_properties(record),
                },
            )
            .await?;

        tracing::debug!(
            "created page {} in {database_id}",
            page.get("id").and_then(|id| id.as_str()).unwrap_or("?")
        );
        Ok(page)
    }
}
