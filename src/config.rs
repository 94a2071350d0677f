//! Configuration module for tweetmojo.
//!
//! This module contains the credential structures and environment variable handling
//! for the Twitter/X timeline read and the Instamojo API calls.

use log::{debug, error, info, warn};
use std::env;

use crate::error::{Error, Result};

/// Default base URL for the Twitter/X v1.1 REST API.
pub const DEFAULT_TWITTER_API_BASE: &str = "https://api.twitter.com/1.1/";

/// Default base URL for the Instamojo v1 REST API.
pub const DEFAULT_INSTAMOJO_API_BASE: &str = "https://www.instamojo.com/api/1/";

/// Default path of the local log file.
pub const DEFAULT_LOG_FILE: &str = "debug.log";

/// OAuth 1.0a credentials for the Twitter/X account the timeline is read with.
#[derive(Debug, Clone)]
pub struct TwitterCredentials {
    /// The application's consumer key
    pub consumer_key: String,
    /// The application's consumer secret
    pub consumer_secret: String,
    /// The resource owner's access token
    pub token: String,
    /// The resource owner's access token secret
    pub token_secret: String,
}

/// Credentials for the Instamojo account offers are created under.
#[derive(Debug, Clone)]
pub struct InstamojoCredentials {
    /// Application id sent as `X-App-Id` on every call
    pub app_id: String,
    pub username: String,
    pub password: String,
}

/// Everything a run needs, loaded once at process start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub twitter: TwitterCredentials,
    pub instamojo: InstamojoCredentials,
    /// Base URL of the Twitter API, always ending in `/`
    pub twitter_api_base: String,
    /// Base URL of the Instamojo API, always ending in `/`
    pub instamojo_api_base: String,
}

/// Masks a secret for logging, keeping at most the first and last eight characters.
///
/// # Example
///
/// ```rust
/// use tweetmojo::config::mask_secret;
///
/// assert_eq!(mask_secret("abcdefghijklmnopqrstuvwxyz"), "abcdefgh...stuvwxyz");
/// assert_eq!(mask_secret("short"), "short...");
/// ```
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    let len = chars.len();

    let prefix: String = chars.iter().take(8).collect();
    if len > 16 {
        let suffix: String = chars[len - 8..].iter().collect();
        format!("{}...{}", prefix, suffix)
    } else {
        format!("{}...", prefix)
    }
}

/// Ensures a base URL ends with a trailing slash so relative paths join onto it.
fn normalize_base(base: String) -> String {
    if base.ends_with('/') {
        base
    } else {
        format!("{}/", base)
    }
}

impl AppConfig {
    /// Creates a new `AppConfig` by loading credentials from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `TWITTER_CONSUMER_KEY`, `TWITTER_CONSUMER_SECRET`: Twitter application credentials
    /// - `TWITTER_TOKEN`, `TWITTER_TOKEN_SECRET`: Twitter resource owner credentials
    /// - `MOJO_APPID`: Instamojo application id
    /// - `MOJO_USERNAME`, `MOJO_PASSWORD`: Instamojo account credentials
    ///
    /// # Optional Environment Variables
    ///
    /// - `TWITTER_API_BASE`: defaults to [`DEFAULT_TWITTER_API_BASE`]
    /// - `INSTAMOJO_API_BASE`: defaults to [`DEFAULT_INSTAMOJO_API_BASE`]
    ///
    /// # Returns
    ///
    /// - `Ok(AppConfig)`: If every required variable is present and non-empty
    /// - `Err(Error::Config)`: Naming the first missing or empty variable
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here with `std::env::var`; tests pass a map instead.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        info!("Loading tweetmojo configuration");

        let required = |key: &str| -> Result<String> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => {
                    info!("Found {} with length: {}", key, value.len());
                    Ok(value)
                }
                Some(_) => {
                    error!("{} is set but empty", key);
                    Err(Error::Config(format!("{} cannot be empty", key)))
                }
                None => {
                    error!("Make sure the {} environment variable is set", key);
                    Err(Error::Config(format!(
                        "Missing {} environment variable",
                        key
                    )))
                }
            }
        };

        let twitter = TwitterCredentials {
            consumer_key: required("TWITTER_CONSUMER_KEY")?,
            consumer_secret: required("TWITTER_CONSUMER_SECRET")?,
            token: required("TWITTER_TOKEN")?,
            token_secret: required("TWITTER_TOKEN_SECRET")?,
        };
        debug!(
            "Twitter consumer key (masked): {}, token (masked): {}",
            mask_secret(&twitter.consumer_key),
            mask_secret(&twitter.token)
        );

        let instamojo = InstamojoCredentials {
            app_id: required("MOJO_APPID")?,
            username: required("MOJO_USERNAME")?,
            password: required("MOJO_PASSWORD")?,
        };
        debug!(
            "Instamojo app id (masked): {}, username: {}",
            mask_secret(&instamojo.app_id),
            instamojo.username
        );

        let twitter_api_base = match lookup("TWITTER_API_BASE") {
            Some(base) if !base.is_empty() => {
                warn!("Using non-default Twitter API base: {}", base);
                normalize_base(base)
            }
            _ => DEFAULT_TWITTER_API_BASE.to_string(),
        };

        let instamojo_api_base = match lookup("INSTAMOJO_API_BASE") {
            Some(base) if !base.is_empty() => {
                warn!("Using non-default Instamojo API base: {}", base);
                normalize_base(base)
            }
            _ => DEFAULT_INSTAMOJO_API_BASE.to_string(),
        };

        info!("tweetmojo configuration loaded successfully");

        Ok(AppConfig {
            twitter,
            instamojo,
            twitter_api_base,
            instamojo_api_base,
        })
    }
}

/// Gets the log file path from the environment or returns the default.
///
/// This function reads the `TWEETMOJO_LOG_FILE` environment variable. It is read on its
/// own, before the logger exists, so it never logs.
///
/// # Returns
///
/// The configured path, or [`DEFAULT_LOG_FILE`] when unset or empty.
pub fn get_log_file() -> String {
    env::var("TWEETMOJO_LOG_FILE")
        .ok()
        .filter(|path| !path.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
}
