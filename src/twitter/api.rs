//! Core Twitter API utilities.
//!
//! This module contains low-level helpers for sending signed requests to the Twitter API
//! and logging their outcome safely.

use log::{debug, error, info};

use crate::error::{Error, Result};

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// This function:
/// - Truncates long text to prevent log flooding
/// - Replaces control characters that could manipulate log output
/// - Escapes newlines to prevent log injection
///
/// # Parameters
///
/// - `text`: The text to sanitize
/// - `max_len`: Maximum length in characters before truncation
///
/// # Returns
///
/// A sanitized string safe for logging
pub(crate) fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' => ' ',
            '\r' => ' ',
            '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.chars().count() > max_len {
        let truncated: String = sanitized.chars().take(max_len).collect();
        format!(
            "{}... [truncated, {} total bytes]",
            truncated,
            text.len()
        )
    } else {
        sanitized
    }
}

/// Sends a prepared request to the Twitter API and returns the body on success.
///
/// There is no retry: a non-success status is reported as
/// [`Error::RemoteService`] together with the operation name.
///
/// # Parameters
///
/// - `request_builder`: A configured, already signed `reqwest::RequestBuilder`
/// - `operation_name`: Human-readable name for the operation (for logging)
///
/// # Returns
///
/// - `Ok(String)`: The API response body on success
/// - `Err(Error::RemoteService)`: If the request fails or the API returns an error status
pub(crate) async fn send_request(
    request_builder: reqwest::RequestBuilder,
    operation_name: &str,
) -> Result<String> {
    info!("Making signed request for operation: {}", operation_name);

    let response = request_builder.send().await?;

    let status = response.status();
    info!(
        "Received response with status: {} for operation: {}",
        status, operation_name
    );

    let response_text = response.text().await?;

    if status.is_success() {
        info!("Operation '{}' completed successfully", operation_name);
        debug!(
            "Response summary for '{}': {} bytes received",
            operation_name,
            response_text.len()
        );
        return Ok(response_text);
    }

    error!("Operation '{}' failed - Status: {}", operation_name, status);
    debug!(
        "Error response for '{}': {}",
        operation_name,
        sanitize_for_logging(&response_text, 200)
    );
    Err(Error::RemoteService(format!(
        "Twitter API error for operation '{}' ({})",
        operation_name, status
    )))
}
