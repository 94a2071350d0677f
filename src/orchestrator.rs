//! The offer run: one tweet in, one Instamojo offer out.
//!
//! Every step runs after the previous one completes and the first failure ends the run.

use log::{debug, error, info};
use serde_json::Value;

use crate::config::InstamojoCredentials;
use crate::error::{Error, Result};
use crate::instamojo::PaymentService;
use crate::offer::{
    build_offer_payload, is_offer_command, missing_fields, parse_offer_command, unquote,
    OfferPayload, COVER_FIELD,
};
use crate::twitter::{sanitize_for_logging, TimelineReader};

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct OfferReport {
    /// The form fields sent to offer creation
    pub payload: OfferPayload,
    /// Instamojo's decoded offer creation response
    pub response: Value,
}

/// Requests an upload URL and unwraps it, failing if Instamojo reports no URL.
async fn resolve_upload_url<P>(payments: &P, purpose: &str) -> Result<String>
where
    P: PaymentService + ?Sized,
{
    let response = payments.request_upload_url().await?;
    match (response.success, response.upload_url) {
        (true, Some(url)) => {
            debug!("Got upload URL for {}", purpose);
            Ok(url)
        }
        _ => {
            error!(
                "Unable to get file upload URL for {}: {}",
                purpose,
                response.message.as_deref().unwrap_or("no message")
            );
            Err(Error::UploadUrlUnavailable(purpose.to_string()))
        }
    }
}

/// Turns the latest tweet of `username` into an Instamojo offer.
///
/// # Steps
///
/// 1. Fetch the most recent tweet
/// 2. Check it is an offer command, parse and validate its parameters
/// 3. Log into Instamojo
/// 4. Request an upload URL for the main file, and one for the cover when given
/// 5. Re-host the main file, then the cover
/// 6. Create the offer
///
/// # Returns
///
/// - `Ok(OfferReport)`: The payload sent and Instamojo's response
/// - `Err(Error::NoOfferFound)`: If there is no tweet or it is not an offer command
/// - `Err(Error::InvalidOfferFormat)`: If required parameters are missing
/// - `Err(Error::AuthenticationFailed)`: If Instamojo rejects the credentials
/// - `Err(Error::UploadUrlUnavailable)`: If an upload URL cannot be obtained
/// - `Err(Error::RemoteService)`: If any remote call fails
pub async fn run_offer<T, P>(
    username: &str,
    credentials: &InstamojoCredentials,
    timeline: &T,
    payments: &mut P,
) -> Result<OfferReport>
where
    T: TimelineReader + ?Sized,
    P: PaymentService + ?Sized,
{
    info!("Starting offer run for @{}", username);

    let tweets = timeline.fetch_recent_posts(username, 1).await?;
    let latest_tweet = tweets
        .into_iter()
        .next()
        .ok_or_else(|| Error::NoOfferFound(format!("@{} has no tweets", username)))?;
    debug!("Latest tweet: {}", sanitize_for_logging(&latest_tweet, 280));

    if !is_offer_command(&latest_tweet) {
        info!("Latest tweet of @{} is not an offer command", username);
        return Err(Error::NoOfferFound(
            "the tweet is not about an Instamojo offer".to_string(),
        ));
    }

    let params = parse_offer_command(&latest_tweet);
    let missing = missing_fields(&params);
    if !missing.is_empty() {
        error!("Offer tweet is missing: {}", missing.join(", "));
        return Err(Error::InvalidOfferFormat {
            missing: missing.into_iter().map(String::from).collect(),
        });
    }

    let auth = payments
        .authenticate(&credentials.username, &credentials.password)
        .await?;
    if !auth.success || auth.token.is_none() {
        return Err(Error::AuthenticationFailed(
            auth.message
                .unwrap_or_else(|| "no session token issued".to_string()),
        ));
    }

    let file_url = params
        .get("file")
        .map(|file| unquote(file).to_string())
        .ok_or_else(|| Error::InvalidOfferFormat {
            missing: vec!["file".to_string()],
        })?;
    let cover_url = params
        .get(COVER_FIELD)
        .map(|cover| unquote(cover).to_string());

    let file_upload_url = resolve_upload_url(&*payments, "main file").await?;
    let cover_upload_url = match &cover_url {
        Some(_) => Some(resolve_upload_url(&*payments, "cover image").await?),
        None => None,
    };

    let file_upload_json = payments
        .upload_remote_file(&file_upload_url, &file_url)
        .await?;
    let cover_image_json = match (&cover_upload_url, &cover_url) {
        (Some(upload_url), Some(cover_url)) => {
            Some(payments.upload_remote_file(upload_url, cover_url).await?)
        }
        _ => None,
    };

    let payload = build_offer_payload(&params, file_upload_json, cover_image_json)?;
    let response = payments.create_offer(&payload).await?;

    info!("Offer '{}' submitted for @{}", payload.title, username);
    Ok(OfferReport { payload, response })
}
