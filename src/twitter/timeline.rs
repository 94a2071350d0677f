//! Timeline reads for the Twitter API.
//!
//! This module fetches the most recent tweets of a user through the v1.1
//! `statuses/user_timeline` endpoint, signed with OAuth 1.0a.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::Deserialize;

use crate::config::TwitterCredentials;
use crate::error::{Error, Result};
use crate::oauth::build_oauth1_header;

use super::api::{sanitize_for_logging, send_request};

/// Reads the latest posts of an account.
#[async_trait]
pub trait TimelineReader: Send + Sync {
    /// Returns the text of the `count` most recent posts of `username`, most recent first.
    async fn fetch_recent_posts(&self, username: &str, count: u32) -> Result<Vec<String>>;
}

/// One element of the user timeline array. Only the text is used.
#[derive(Debug, Deserialize)]
struct TimelineEntry {
    text: String,
}

/// Twitter API client for user timeline reads.
#[derive(Debug, Clone)]
pub struct TwitterClient {
    client: Client,
    credentials: TwitterCredentials,
    api_base: String,
}

impl TwitterClient {
    /// Creates a client for the API rooted at `api_base` (must end with `/`).
    pub fn new(credentials: TwitterCredentials, api_base: impl Into<String>) -> Self {
        TwitterClient {
            client: Client::new(),
            credentials,
            api_base: api_base.into(),
        }
    }
}

/// Decodes a user timeline body into tweet texts, preserving order.
pub(crate) fn parse_timeline(body: &str) -> Result<Vec<String>> {
    let entries: Vec<TimelineEntry> = serde_json::from_str(body).map_err(|e| {
        debug!(
            "Unexpected timeline body: {}",
            sanitize_for_logging(body, 200)
        );
        Error::RemoteService(format!("Unexpected user timeline response: {}", e))
    })?;
    Ok(entries.into_iter().map(|entry| entry.text).collect())
}

#[async_trait]
impl TimelineReader for TwitterClient {
    /// Fetches the latest tweets posted by `username`.
    ///
    /// # Parameters
    ///
    /// - `username`: The screen name to read, must not be empty
    /// - `count`: How many tweets to request, at least 1
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<String>)`: Tweet texts, most recent first
    /// - `Err(Error::Usage)`: If `username` is empty or `count` is zero
    /// - `Err(Error::RemoteService)`: If the request fails or the body is not a tweet array
    async fn fetch_recent_posts(&self, username: &str, count: u32) -> Result<Vec<String>> {
        if username.trim().is_empty() {
            return Err(Error::Usage("username cannot be empty".to_string()));
        }
        if count == 0 {
            return Err(Error::Usage("tweet count must be at least 1".to_string()));
        }

        info!("Fetching {} most recent tweet(s) for @{}", count, username);

        let url = format!("{}statuses/user_timeline.json", self.api_base);
        let count = count.to_string();
        let query = [("screen_name", username), ("count", count.as_str())];

        debug!("Building OAuth 1.0a authorization header");
        let auth_header = build_oauth1_header("GET", &url, &query, &self.credentials);

        debug!("Request URL: {}", url);
        debug!("Request headers: Authorization: OAuth [REDACTED]");

        let request_builder = self
            .client
            .get(&url)
            .query(&query)
            .header("Authorization", auth_header);

        let response_text = send_request(request_builder, "user_timeline").await?;
        let tweets = parse_timeline(&response_text)?;

        info!("Fetched {} tweet(s) for @{}", tweets.len(), username);
        Ok(tweets)
    }
}
