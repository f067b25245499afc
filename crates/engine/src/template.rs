//! Placeholder templates used to render a [`Record`] into a reply.
//!
//! A template is any text holding the tokens of [`PLACEHOLDERS`]. Rendering
//! replaces each token with the matching record value in a single pass, so a
//! value that happens to contain a token is written as is.
//!
//! `comment` has no placeholder and is never rendered.
use std::{io::ErrorKind, path::Path};

use crate::{Field, Record, TemplateError};

/// Tokens recognized in a template and the field each one stands for.
pub const PLACEHOLDERS: [(&str, Field); 5] = [
    ("#TITLE", Field::Title),
    ("#AMOUNT", Field::Amount),
    ("#DATE", Field::Date),
    ("#IN_OUT", Field::InOut),
    ("#CATEGORY", Field::Category),
];

/// How substituted values are written into the template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Escape {
    /// Values land inside JSON string literals.
    Json,
    None,
}

#[derive(Clone, Debug)]
pub struct Template {
    source: String,
    escape: Escape,
}

impl Template {
    /// Template for a JSON document; values are escaped as string content.
    pub fn json(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            escape: Escape::Json,
        }
    }

    /// Template for plain text; values are inserted verbatim.
    pub fn plain(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            escape: Escape::None,
        }
    }

    /// Loads a JSON template from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => TemplateError::NotFound(path.to_path_buf()),
            _ => TemplateError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;
        tracing::debug!("loaded reply template from {}", path.display());
        Ok(Self::json(source))
    }

    /// Renders `record` into the template.
    pub fn render(&self, record: &Record) -> String {
        let values = PLACEHOLDERS.map(|(token, field)| (token, field_value(record, field)));

        let mut out = String::with_capacity(self.source.len());
        let mut rest = self.source.as_str();
        while let Some(pos) = rest.find('#') {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];
            match values.iter().find(|(token, _)| tail.starts_with(token)) {
                Some((token, value)) => {
                    self.push_value(&mut out, value);
                    rest = &tail[token.len()..];
                }
                None => {
                    out.push('#');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);

        out
    }

    fn push_value(&self, out: &mut String, value: &str) {
        match self.escape {
            Escape::None => out.push_str(value),
            Escape::Json => match serde_json::to_string(value) {
                // Drop the surrounding quotes, the template provides them.
                Ok(quoted) => out.push_str(&quoted[1..quoted.len() - 1]),
                Err(err) => {
                    tracing::warn!("failed to escape template value: {err}");
                    out.push_str(value);
                }
            },
        }
    }
}

fn field_value(record: &Record, field: Field) -> String {
    match field {
        Field::Title => record.title.clone(),
        Field::InOut => record.in_out.clone(),
        Field::Category => record.category.clone(),
        Field::Amount => record.amount.to_string(),
        Field::Date => record.date_string(),
        Field::Comment => record.comment.clone(),
    }
}
