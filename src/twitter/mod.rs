//! Twitter/X API integration module.
//!
//! This module contains the OAuth 1.0a signed timeline reader and the low-level
//! request helpers it is built on.

mod api;
mod timeline;

// Re-export public API
pub use timeline::{TimelineReader, TwitterClient};

// Crate-internal re-exports (used by tests and other modules)
pub(crate) use api::sanitize_for_logging;
#[allow(unused_imports)]
pub(crate) use timeline::parse_timeline;
