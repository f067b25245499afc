//! Notion collaborator: stores entries as rows of a ledger database.

pub use api::{ApiClient, ApiError, DEFAULT_API_BASE, NOTION_VERSION};
pub use databases::{Databases, MAIN_DATABASE, MissingMainDatabase};
pub use properties::row_properties;

mod api;
mod databases;
mod properties;
