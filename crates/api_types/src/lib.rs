use serde::{Deserialize, Serialize};

pub mod webhook {
    //! Body of a LINE Messaging API webhook call.
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WebhookBody {
        /// User id of the bot receiving the events.
        #[serde(default)]
        pub destination: String,
        #[serde(default)]
        pub events: Vec<Event>,
    }

    /// A webhook event.
    ///
    /// Only message events are modeled, every other type (follow, postback,
    /// ...) decodes to `Other`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(tag = "type", rename_all = "camelCase")]
    pub enum Event {
        Message(MessageEvent),
        #[serde(other)]
        Other,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MessageEvent {
        /// Missing for events delivered in standby mode.
        pub reply_token: Option<String>,
        pub message: MessageContent,
        #[serde(default)]
        pub timestamp: i64,
        pub source: Option<Source>,
        pub webhook_event_id: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(tag = "type", rename_all = "camelCase")]
    pub enum MessageContent {
        Text { id: String, text: String },
        #[serde(other)]
        Other,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Source {
        #[serde(rename = "type")]
        pub kind: String,
        pub user_id: Option<String>,
        pub group_id: Option<String>,
        pub room_id: Option<String>,
    }

    impl Event {
        /// Reply token and text of a text message event.
        pub fn text_message(&self) -> Option<(Option<&str>, &str)> {
            match self {
                Event::Message(MessageEvent {
                    reply_token,
                    message: MessageContent::Text { text, .. },
                    ..
                }) => Some((reply_token.as_deref(), text.as_str())),
                _ => None,
            }
        }
    }
}

pub mod reply {
    //! Body of the LINE reply endpoint.
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ReplyMessageRequest {
        pub reply_token: String,
        pub messages: Vec<Message>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "type", rename_all = "camelCase")]
    pub enum Message {
        Text {
            text: String,
        },
        #[serde(rename_all = "camelCase")]
        Flex {
            alt_text: String,
            /// Flex container (bubble or carousel).
            contents: serde_json::Value,
        },
    }
}

pub mod notion {
    //! Body of the Notion "create a page" endpoint.
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PageCreate {
        pub parent: Parent,
        pub properties: serde_json::Value,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Parent {
        pub database_id: String,
    }
}
