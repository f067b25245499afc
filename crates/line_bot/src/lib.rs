//! LINE Messaging API collaborator.
//!
//! Verifies and decodes webhook deliveries, and sends replies. It knows
//! nothing about storage: entries reach it already parsed.

pub use api::{ApiClient, ApiError, DEFAULT_API_BASE};
pub use reply::{DEFAULT_TEMPLATE, ENTRY_ADDED, RenderError, entry_added, entry_rejected};
pub use webhook::{WebhookError, WebhookParser};

mod api;
mod reply;
pub mod signature;
mod webhook;
