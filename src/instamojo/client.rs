//! Instamojo REST API client.
//!
//! This module contains the session-holding client used to log in, obtain upload URLs,
//! re-host remote files and create offers.

use async_trait::async_trait;
use log::{debug, error, info, warn};
use reqwest::{multipart, Body, Client, Method, RequestBuilder};
use url::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::offer::OfferPayload;
use crate::twitter::sanitize_for_logging;

/// Multipart field name Instamojo expects uploaded files under.
pub const FILE_UPLOAD_FIELD: &str = "fileUpload";

/// Decoded response of `POST auth/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    pub token: Option<String>,
    pub message: Option<String>,
}

/// Decoded response of `GET offer/get_file_upload_url/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UploadUrlResponse {
    #[serde(default)]
    pub success: bool,
    pub upload_url: Option<String>,
    pub message: Option<String>,
}

/// The payment-service operations an offer run needs.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Exchanges a username/password pair for a session token and keeps it on success.
    async fn authenticate(&mut self, username: &str, password: &str) -> Result<AuthResponse>;

    /// Requests a one-time file upload URL.
    async fn request_upload_url(&self) -> Result<UploadUrlResponse>;

    /// Streams the file at `remote_file_url` to `upload_url`, returning the raw response.
    async fn upload_remote_file(&self, upload_url: &str, remote_file_url: &str)
        -> Result<String>;

    /// Creates an offer. Requires a session token.
    async fn create_offer(&self, payload: &OfferPayload) -> Result<Value>;
}

#[derive(Serialize)]
struct AuthForm<'a> {
    username: &'a str,
    password: &'a str,
}

/// Client for the Instamojo v1 REST API.
///
/// The session token starts unset, is written once by a successful
/// [`authenticate`](PaymentService::authenticate) and is read by every later call.
#[derive(Debug, Clone)]
pub struct InstamojoClient {
    client: Client,
    app_id: String,
    api_base: String,
    token: Option<String>,
}

/// Returns the last path segment of `url`, falling back to `upload` for bare hosts.
pub(crate) fn filename_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .unwrap_or("upload")
        .to_string()
}

impl InstamojoClient {
    /// Creates an unauthenticated client for the API rooted at `api_base` (must end with `/`).
    pub fn new(app_id: impl Into<String>, api_base: impl Into<String>) -> Self {
        InstamojoClient {
            client: Client::new(),
            app_id: app_id.into(),
            api_base: api_base.into(),
            token: None,
        }
    }

    /// Whether a session token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Builds a request to `path` with `X-App-Id` and, once logged in, `X-Auth-Token`.
    fn api_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_base, path);
        debug!("Request: {} {}", method, url);

        let mut request_builder = self
            .client
            .request(method, &url)
            .header("X-App-Id", &self.app_id);
        if let Some(token) = &self.token {
            debug!("Request headers: X-App-Id, X-Auth-Token: [REDACTED]");
            request_builder = request_builder.header("X-Auth-Token", token);
        }
        request_builder
    }

    /// Sends an API request and decodes its JSON body, whatever the status.
    ///
    /// Instamojo reports failures as `{"success": false, ...}` bodies, so the status code
    /// alone decides nothing here.
    async fn send_api_request(
        &self,
        request_builder: RequestBuilder,
        operation_name: &str,
    ) -> Result<Value> {
        info!("Calling Instamojo for operation: {}", operation_name);

        let response = request_builder.send().await?;
        let status = response.status();
        info!(
            "Received response with status: {} for operation: {}",
            status, operation_name
        );

        let response_text = response.text().await?;
        serde_json::from_str(&response_text).map_err(|e| {
            error!("Unable to decode response for '{}': {}", operation_name, e);
            debug!(
                "Undecodable response for '{}': {}",
                operation_name,
                sanitize_for_logging(&response_text, 200)
            );
            Error::RemoteService(format!(
                "Unable to decode Instamojo response for operation '{}' ({})",
                operation_name, status
            ))
        })
    }
}

#[async_trait]
impl PaymentService for InstamojoClient {
    async fn authenticate(&mut self, username: &str, password: &str) -> Result<AuthResponse> {
        info!("Authenticating Instamojo user: {}", username);

        let request_builder = self
            .api_request(Method::POST, "auth/")
            .form(&AuthForm { username, password });
        let value = self.send_api_request(request_builder, "auth").await?;
        let response: AuthResponse = serde_json::from_value(value)?;

        match (response.success, &response.token) {
            (true, Some(token)) => {
                info!("Instamojo authentication succeeded");
                self.token = Some(token.clone());
            }
            (true, None) => warn!("Instamojo reported success but sent no token"),
            (false, _) => warn!(
                "Instamojo authentication failed: {}",
                response.message.as_deref().unwrap_or("no message")
            ),
        }

        Ok(response)
    }

    async fn request_upload_url(&self) -> Result<UploadUrlResponse> {
        let request_builder = self.api_request(Method::GET, "offer/get_file_upload_url/");
        let value = self
            .send_api_request(request_builder, "get_file_upload_url")
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Re-hosts a remote file on Instamojo.
    ///
    /// The source is fetched following redirects and its bytes are streamed straight into
    /// the multipart body, never buffered whole. The filename is taken from the final URL.
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The upload endpoint's raw response body
    /// - `Err(Error::RemoteService)`: If either side fails or returns an error status
    async fn upload_remote_file(
        &self,
        upload_url: &str,
        remote_file_url: &str,
    ) -> Result<String> {
        info!("Fetching remote file: {}", remote_file_url);

        let source = self.client.get(remote_file_url).send().await?;
        let source_status = source.status();
        if !source_status.is_success() {
            error!(
                "Remote file {} returned status {}",
                remote_file_url, source_status
            );
            return Err(Error::RemoteService(format!(
                "Unable to fetch remote file {} ({})",
                remote_file_url, source_status
            )));
        }

        let filename = filename_from_url(source.url());
        info!("Streaming '{}' to the upload URL", filename);

        let part = multipart::Part::stream(Body::wrap_stream(source.bytes_stream()))
            .file_name(filename);
        let form = multipart::Form::new().part(FILE_UPLOAD_FIELD, part);

        let response = self.client.post(upload_url).multipart(form).send().await?;
        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!("File upload failed - Status: {}", status);
            debug!(
                "Upload error response: {}",
                sanitize_for_logging(&response_text, 200)
            );
            return Err(Error::RemoteService(format!(
                "File upload rejected ({})",
                status
            )));
        }

        debug!("Upload response: {}", sanitize_for_logging(&response_text, 200));
        Ok(response_text)
    }

    async fn create_offer(&self, payload: &OfferPayload) -> Result<Value> {
        if !self.is_authenticated() {
            error!("Refusing to create offer without a session token");
            return Err(Error::UnauthenticatedOfferCreation);
        }

        info!("Creating Instamojo offer: {}", payload.title);
        let request_builder = self.api_request(Method::POST, "offer/").form(payload);
        self.send_api_request(request_builder, "create_offer").await
    }
}
