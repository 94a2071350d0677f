//! Validation of parsed offer parameters and assembly of the offer payload.

use serde::Serialize;

use crate::error::{Error, Result};

use super::parsing::OfferParams;

/// Parameters every offer tweet must carry.
pub const REQUIRED_FIELDS: [&str; 5] = ["title", "desc", "file", "currency", "base"];

/// Optional parameter naming a cover image URL.
pub const COVER_FIELD: &str = "cover";

/// Form fields sent to Instamojo's offer creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferPayload {
    pub title: String,
    pub description: String,
    pub currency: String,
    pub base_price: String,
    /// Raw response of the main file upload
    pub file_upload_json: String,
    /// Raw response of the cover image upload, absent without a cover
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_json: Option<String>,
}

/// Returns the required parameters missing from `params`, in declaration order.
pub fn missing_fields(params: &OfferParams) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !params.contains_key(*field))
        .collect()
}

/// Checks that every required parameter is present. Values are not inspected.
pub fn has_required_fields(params: &OfferParams) -> bool {
    missing_fields(params).is_empty()
}

/// Strips one pair of surrounding double quotes, if present.
pub fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Uppercases the first character and lowercases the rest.
///
/// ```rust
/// use tweetmojo::offer::capitalize;
///
/// assert_eq!(capitalize("hello World"), "Hello world");
/// ```
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn required<'a>(params: &'a OfferParams, key: &str) -> Result<&'a str> {
    params
        .get(key)
        .map(|value| unquote(value))
        .ok_or_else(|| Error::InvalidOfferFormat {
            missing: vec![key.to_string()],
        })
}

/// Builds the offer creation payload from parsed parameters and upload results.
///
/// Every value is unquoted; title and description are also capitalized.
///
/// # Returns
///
/// - `Ok(OfferPayload)`: The form fields for offer creation
/// - `Err(Error::InvalidOfferFormat)`: If a required parameter is missing
pub fn build_offer_payload(
    params: &OfferParams,
    file_upload_json: String,
    cover_image_json: Option<String>,
) -> Result<OfferPayload> {
    Ok(OfferPayload {
        title: capitalize(required(params, "title")?),
        description: capitalize(required(params, "desc")?),
        currency: required(params, "currency")?.to_string(),
        base_price: required(params, "base")?.to_string(),
        file_upload_json,
        cover_image_json,
    })
}
