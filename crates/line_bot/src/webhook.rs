use api_types::webhook::{Event, WebhookBody};

use crate::signature;

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("malformed webhook body: {0}")]
    Malformed(String),
}

/// Verifies and decodes webhook deliveries for one channel.
#[derive(Clone)]
pub struct WebhookParser {
    channel_secret: String,
}

impl std::fmt::Debug for WebhookParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookParser").finish_non_exhaustive()
    }
}

impl WebhookParser {
    pub fn new(channel_secret: &str) -> Self {
        Self {
            channel_secret: channel_secret.to_string(),
        }
    }

    /// Returns the events of `body` once `signature` has been checked.
    pub fn parse(&self, body: &[u8], signature: &str) -> Result<Vec<Event>, WebhookError> {
        if !signature::verify(&self.channel_secret, body, signature) {
            return Err(WebhookError::InvalidSignature);
        }

        let body = std::str::from_utf8(body)
            .map_err(|_| WebhookError::Malformed("body is not valid UTF-8".to_string()))?;
        let body: WebhookBody =
            serde_json::from_str(body).map_err(|err| WebhookError::Malformed(err.to_string()))?;

        tracing::debug!(
            "received {} event(s) for {}",
            body.events.len(),
            body.destination
        );
        Ok(body.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = br#"{"destination":"U0","events":[{"type":"message","replyToken":"t","message":{"type":"text","id":"1","text":"Lunch\n50"}}]}"#;

    #[test]
    fn parses_signed_body() {
        let parser = WebhookParser::new("secret");
        let signature = signature::sign("secret", BODY).unwrap();

        let events = parser.parse(BODY, &signature).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].text_message(), Some((Some("t"), "Lunch\n50")));
    }

    #[test]
    fn rejects_wrong_signature_before_decoding() {
        let parser = WebhookParser::new("secret");
        let signature = signature::sign("other", b"not json").unwrap();

        let err = parser.parse(b"not json", &signature).unwrap_err();
        assert!(matches!(err, WebhookError::InvalidSignature));
    }

    #[test]
    fn rejects_signed_garbage() {
        let parser = WebhookParser::new("secret");
        let signature = signature::sign("secret", b"not json").unwrap();

        let err = parser.parse(b"not json", &signature).unwrap_err();
        assert!(matches!(err, WebhookError::Malformed(_)));
    }
}
