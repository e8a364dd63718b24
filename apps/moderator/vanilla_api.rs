use crate::api_handler::{build_client, read_success_body};
use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use utils::errors::{FETCH_COMMENTS_FAILED, PARSE_COMMENTS_FAILED};

pub const DEFAULT_VANILLA_BASE_URL: &str = "https://forum.example.com";
pub const COMMENTS_ENDPOINT: &str = "/api/v2/comments";

/// Client for a Vanilla Forums `/api/v2` installation.
pub struct VanillaApi {
    client: Client,
    base_url: String,
    api_token: String,
}

impl VanillaApi {
    pub fn new(base_url: &str, api_token: &str) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self, query), fields(endpoint = %endpoint))]
    pub async fn get<T>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(url = %url, ?query, "Fetching data from endpoint");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .query(query)
            .send()
            .await
            .with_context(|| format!("{FETCH_COMMENTS_FAILED}: {url}"))?;

        let body = read_success_body(response)
            .await
            .with_context(|| format!("{FETCH_COMMENTS_FAILED}: {url}"))?;

        serde_json::from_str(&body)
            .with_context(|| format!("{PARSE_COMMENTS_FAILED}: {url}"))
    }
}
