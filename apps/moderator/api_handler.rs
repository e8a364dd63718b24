use anyhow::{anyhow, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, error};

/// Applied to every outbound request, connect through body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the client shared by the forum and moderation APIs.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .default_headers(default_headers())
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static("comment-moderator/0.1 reqwest/0.12"),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Returns the body of a successful response. Anything outside 2xx is an
/// error carrying the status and body; nothing is retried.
pub async fn read_success_body(response: Response) -> Result<String> {
    let status = response.status();
    let url = response.url().to_string();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        error!(url = %url, status = %status, body = body, "Request failed");
        return Err(anyhow!("Request failed with status {}: {}", status, body));
    }

    debug!(url = %url, status = %status, "Request successful");
    response
        .text()
        .await
        .map_err(|e| anyhow!("Failed to get response text: {}", e))
}
