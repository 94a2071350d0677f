//! # Tweetmojo Library
//!
//! Turns an "offer tweet" into an Instamojo offer. The latest tweet of a Twitter/X account
//! is read with OAuth 1.0a, checked for the `instamoffer` marker, parsed into `key=value`
//! parameters and, when complete, used to drive the Instamojo REST API: log in, obtain
//! upload URLs, re-host the referenced files and create the offer.
//!
//! ## Offer tweet format
//!
//! ```text
//! instamoffer title="My ebook" desc="A short read" file=https://example.com/book.pdf base=100 currency=INR cover=https://example.com/cover.png
//! ```
//!
//! `title`, `desc`, `file`, `currency` and `base` are required, `cover` is optional.
//!
//! ## Configuration
//!
//! Credentials come from environment variables, see [`AppConfig::from_env`].

pub mod config;
pub mod error;
pub mod instamojo;
pub mod oauth;
pub mod offer;
pub mod orchestrator;
pub mod twitter;

// Re-export commonly used types and functions
pub use config::{get_log_file, AppConfig, InstamojoCredentials, TwitterCredentials};
pub use error::{Error, Result};
pub use instamojo::{InstamojoClient, PaymentService};
pub use oauth::build_oauth1_header;
pub use orchestrator::{run_offer, OfferReport};
pub use twitter::{TimelineReader, TwitterClient};
