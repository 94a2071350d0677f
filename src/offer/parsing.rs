//! Text parsing for offer tweets.
//!
//! An offer tweet starts with `instamoffer` (any casing) and carries its parameters as
//! `key=value` or `key="quoted value"` tokens.

use std::collections::HashMap;

use log::{debug, error};

/// Parameters parsed out of an offer tweet, values kept exactly as written.
pub type OfferParams = HashMap<String, String>;

/// The marker every offer tweet starts with, compared case-insensitively.
pub const OFFER_COMMAND_PREFIX: &str = "instamoffer";

/// Checks whether a tweet is an Instamojo offer command.
///
/// # Examples
///
/// ```rust
/// use tweetmojo::offer::is_offer_command;
///
/// assert!(is_offer_command("InstaMoffer title=\"Book\""));
/// assert!(!is_offer_command("just a tweet"));
/// ```
pub fn is_offer_command(text: &str) -> bool {
    text.to_lowercase().starts_with(OFFER_COMMAND_PREFIX)
}

/// Parses an offer tweet into its `key=value` parameters.
///
/// The first character of the tweet is skipped before scanning. A value is either a
/// double-quoted string, which may contain spaces and keeps its quotes, or a bare token
/// up to the next whitespace. Keys are case-sensitive and a repeated key keeps its last
/// value.
///
/// # Parameters
///
/// - `text`: The tweet text
///
/// # Returns
///
/// The parsed parameters; empty when no token matches.
pub fn parse_offer_command(text: &str) -> OfferParams {
    let re = match regex::Regex::new(r#"(\S+)=(".*?"|\S+)"#) {
        Ok(re) => re,
        Err(e) => {
            error!("Failed to compile offer token pattern: {}", e);
            return OfferParams::new();
        }
    };

    let mut chars = text.chars();
    chars.next();
    let body = chars.as_str();

    let params: OfferParams = re
        .captures_iter(body)
        .filter_map(|cap| match (cap.get(1), cap.get(2)) {
            (Some(key), Some(value)) => Some((key.as_str().to_string(), value.as_str().to_string())),
            _ => None,
        })
        .collect();

    debug!("Parsed {} offer parameter(s)", params.len());
    params
}
