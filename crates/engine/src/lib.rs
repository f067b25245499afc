//! Entry parsing and reply rendering for chat-driven expense tracking.
//!
//! The crate is pure: it neither stores nor sends anything. A message text
//! goes through [`parse`] to become a [`Record`], and a [`Template`] turns the
//! record into the body of a reply.

pub use error::{ParseError, TemplateError};
pub use parsing::{Guard, POSITIONAL_LAYOUT, parse, parse_at};
pub use record::{DATE_FORMAT, Field, Record};
pub use template::{PLACEHOLDERS, Template};

mod error;
mod parsing;
pub mod record;
mod template;
