//! Reply messages sent back for an entry.
use api_types::reply::Message;
use engine::{ParseError, Record, Template};

/// Built-in Flex bubble showing a stored entry.
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/entry_row.json");

pub const ENTRY_ADDED: &str = "Added to Notion";

#[derive(Debug, thiserror::Error)]
#[error("rendered template is not valid JSON: {0}")]
pub struct RenderError(#[from] serde_json::Error);

/// Confirmation for a stored entry: a short text and the rendered bubble.
pub fn entry_added(record: &Record, template: &Template) -> Result<Vec<Message>, RenderError> {
    let contents = serde_json::from_str(&template.render(record))?;

    Ok(vec![
        Message::Text {
            text: ENTRY_ADDED.to_string(),
        },
        Message::Flex {
            alt_text: ENTRY_ADDED.to_string(),
            contents,
        },
    ])
}

/// Notice for a message that could not be parsed.
pub fn entry_rejected(err: &ParseError) -> Vec<Message> {
    vec![Message::Text {
        text: format!("Entry not added. {err}"),
    }]
}
