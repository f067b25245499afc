//! Processing of one webhook delivery: verify, parse each message, store the
//! entry, reply to the sender.
use std::sync::Arc;

use engine::{Record, Template};
use line_bot::{WebhookError, WebhookParser};
use notion::Databases;
use serde::{Deserialize, Serialize};

use crate::{
    ServerError,
    collaborators::{Messenger, RowStore},
};

/// What to do with the rest of a batch when a message cannot be parsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Fail the whole request on the first bad message.
    #[default]
    Abort,
    /// Record the failure and go on with the next event.
    Skip,
}

#[derive(Debug, Serialize)]
pub struct FailedEvent {
    pub index: usize,
    pub error: String,
}

/// Summary returned to the webhook caller.
#[derive(Debug, Serialize)]
pub struct WebhookOutcome {
    pub status: &'static str,
    pub row_data: Vec<Record>,
    pub texts: Vec<String>,
    pub rows: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<FailedEvent>,
}

impl Default for WebhookOutcome {
    fn default() -> Self {
        Self {
            status: "ok",
            row_data: Vec::new(),
            texts: Vec::new(),
            rows: Vec::new(),
            failed: Vec::new(),
        }
    }
}

pub struct WebhookService {
    parser: WebhookParser,
    databases: Databases,
    store: Arc<dyn RowStore>,
    messenger: Arc<dyn Messenger>,
    template: Template,
    policy: BatchPolicy,
    reply_on_error: bool,
}

impl WebhookService {
    /// Return a builder for `WebhookService`.
    pub fn builder() -> WebhookServiceBuilder {
        WebhookServiceBuilder::default()
    }

    /// Handles one delivery addressed to the database named `database`.
    ///
    /// Events are processed one after the other: an entry is stored and
    /// answered before the next event is looked at.
    pub async fn transfer(
        &self,
        database: &str,
        body: &[u8],
        signature: &str,
    ) -> Result<WebhookOutcome, ServerError> {
        let events = self.parser.parse(body, signature).map_err(|err| {
            if let WebhookError::InvalidSignature = err {
                tracing::warn!(
                    "Invalid signature. Please check your channel access token/channel secret."
                );
            }
            ServerError::Webhook(err)
        })?;

        let database_id = self.databases.resolve(database);
        let mut outcome = WebhookOutcome::default();

        for (index, event) in events.iter().enumerate() {
            let Some((reply_token, text)) = event.text_message() else {
                tracing::debug!("skipping event #{index}: not a text message");
                continue;
            };

            let record = match engine::parse(text) {
                Ok(record) => record,
                Err(err) => {
                    tracing::warn!("failed to parse event #{index}: {err}");
                    if self.reply_on_error
                        && let Some(token) = reply_token
                        && let Err(reply_err) = self
                            .messenger
                            .reply(token, line_bot::entry_rejected(&err))
                            .await
                    {
                        tracing::warn!("failed to report parse error: {reply_err}");
                    }

                    match self.policy {
                        BatchPolicy::Abort => return Err(ServerError::Parse(err)),
                        BatchPolicy::Skip => {
                            outcome.failed.push(FailedEvent {
                                index,
                                error: err.to_string(),
                            });
                            continue;
                        }
                    }
                }
            };

            let row = self.store.create(database_id, &record).await?;
            let messages = line_bot::entry_added(&record, &self.template)?;
            match reply_token {
                Some(token) => self.messenger.reply(token, messages).await?,
                None => tracing::debug!("event #{index} has no reply token"),
            }

            tracing::info!("stored entry: {record}");
            outcome.texts.push(text.to_string());
            outcome.row_data.push(record);
            outcome.rows.push(row);
        }

        Ok(outcome)
    }
}

#[derive(Default)]
pub struct WebhookServiceBuilder {
    channel_secret: String,
    databases: Option<Databases>,
    store: Option<Arc<dyn RowStore>>,
    messenger: Option<Arc<dyn Messenger>>,
    template: Option<Template>,
    policy: BatchPolicy,
    reply_on_error: bool,
}

impl WebhookServiceBuilder {
    pub fn channel_secret(mut self, secret: &str) -> WebhookServiceBuilder {
        self.channel_secret = secret.to_string();
        self
    }

    pub fn databases(mut self, databases: Databases) -> WebhookServiceBuilder {
        self.databases = Some(databases);
        self
    }

    pub fn store(mut self, store: Arc<dyn RowStore>) -> WebhookServiceBuilder {
        self.store = Some(store);
        self
    }

    pub fn messenger(mut self, messenger: Arc<dyn Messenger>) -> WebhookServiceBuilder {
        self.messenger = Some(messenger);
        self
    }

    /// Reply template. Defaults to [`line_bot::DEFAULT_TEMPLATE`].
    pub fn template(mut self, template: Template) -> WebhookServiceBuilder {
        self.template = Some(template);
        self
    }

    pub fn policy(mut self, policy: BatchPolicy) -> WebhookServiceBuilder {
        self.policy = policy;
        self
    }

    pub fn reply_on_error(mut self, reply_on_error: bool) -> WebhookServiceBuilder {
        self.reply_on_error = reply_on_error;
        self
    }

    pub fn build(self) -> Result<WebhookService, String> {
        tracing::info!("Initializing webhook service...");
        if self.channel_secret.is_empty() {
            return Err("missing channel secret".to_string());
        }

        Ok(WebhookService {
            parser: WebhookParser::new(&self.channel_secret),
            databases: self.databases.ok_or("missing databases")?,
            store: self.store.ok_or("missing row store")?,
            messenger: self.messenger.ok_or("missing messenger")?,
            template: self
                .template
                .unwrap_or_else(|| Template::json(line_bot::DEFAULT_TEMPLATE)),
            policy: self.policy,
            reply_on_error: self.reply_on_error,
        })
    }
}
