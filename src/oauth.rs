//! OAuth authentication module for Twitter/X API integration.
//!
//! This module implements OAuth 1.0a request signing with HMAC-SHA1, which the v1.1
//! user timeline endpoint requires for user-context reads.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use rand::{distributions::Alphanumeric, Rng};
use sha1::Sha1;

use crate::config::TwitterCredentials;

type HmacSha1 = Hmac<Sha1>;

const OAUTH_SIGNATURE_METHOD: &str = "HMAC-SHA1";
const OAUTH_VERSION: &str = "1.0";

/// Percent-encodes a string as RFC 3986 requires for OAuth (only `A-Z a-z 0-9 - . _ ~`
/// pass through).
fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Computes the OAuth 1.0a HMAC-SHA1 signature for a request.
///
/// # Parameters
///
/// - `method`: The HTTP method, e.g. `GET`
/// - `base_url`: The request URL without query string
/// - `params`: Every query/body parameter plus every `oauth_*` parameter except the
///   signature itself, unencoded
/// - `consumer_secret`: The application's consumer secret
/// - `token_secret`: The resource owner's token secret
///
/// # Returns
///
/// The base64-encoded signature.
pub fn sign_request(
    method: &str,
    base_url: &str,
    params: &[(&str, &str)],
    consumer_secret: &str,
    token_secret: &str,
) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let parameter_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let base_string = format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(base_url),
        percent_encode(&parameter_string)
    );
    let signing_key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );

    let mut mac = HmacSha1::new_from_slice(signing_key.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(base_string.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Builds an OAuth 1.0a `Authorization` header with an explicit nonce and timestamp.
///
/// # Returns
///
/// A header value of the form
/// ```text
/// OAuth oauth_consumer_key="...", oauth_nonce="...", oauth_signature="...", ...
/// ```
pub fn build_oauth1_header_with(
    method: &str,
    base_url: &str,
    query: &[(&str, &str)],
    credentials: &TwitterCredentials,
    nonce: &str,
    timestamp: i64,
) -> String {
    let timestamp = timestamp.to_string();
    let oauth_params: [(&str, &str); 6] = [
        ("oauth_consumer_key", credentials.consumer_key.as_str()),
        ("oauth_nonce", nonce),
        ("oauth_signature_method", OAUTH_SIGNATURE_METHOD),
        ("oauth_timestamp", timestamp.as_str()),
        ("oauth_token", credentials.token.as_str()),
        ("oauth_version", OAUTH_VERSION),
    ];

    let mut all_params: Vec<(&str, &str)> = query.to_vec();
    all_params.extend_from_slice(&oauth_params);

    let signature = sign_request(
        method,
        base_url,
        &all_params,
        &credentials.consumer_secret,
        &credentials.token_secret,
    );

    let mut header_params: Vec<(&str, String)> = oauth_params
        .iter()
        .map(|(k, v)| (*k, v.to_string()))
        .collect();
    header_params.push(("oauth_signature", signature));
    header_params.sort();

    let fields = header_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    format!("OAuth {}", fields)
}

/// Builds an OAuth 1.0a `Authorization` header with a fresh nonce and the current time.
///
/// # Example
///
/// ```rust
/// use tweetmojo::config::TwitterCredentials;
/// use tweetmojo::build_oauth1_header;
///
/// let credentials = TwitterCredentials {
///     consumer_key: "key".to_string(),
///     consumer_secret: "secret".to_string(),
///     token: "token".to_string(),
///     token_secret: "token_secret".to_string(),
/// };
/// let header = build_oauth1_header(
///     "GET",
///     "https://api.twitter.com/1.1/statuses/user_timeline.json",
///     &[("screen_name", "jack"), ("count", "1")],
///     &credentials,
/// );
/// assert!(header.starts_with("OAuth "));
/// ```
pub fn build_oauth1_header(
    method: &str,
    base_url: &str,
    query: &[(&str, &str)],
    credentials: &TwitterCredentials,
) -> String {
    let nonce: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    let timestamp = chrono::Utc::now().timestamp();
    build_oauth1_header_with(method, base_url, query, credentials, &nonce, timestamp)
}
