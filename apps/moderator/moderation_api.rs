use crate::api_handler::{build_client, read_success_body};
use crate::models::moderation::{ModerationRequest, ModerationResponse, ModerationResult};
use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use tracing::{debug, instrument};
use utils::errors::{EMPTY_MODERATION_RESULTS, MODERATION_REQUEST_FAILED, PARSE_MODERATION_FAILED};

pub const OPENAI_API_BASE: &str = "https://api.openai.com";
pub const MODERATIONS_ENDPOINT: &str = "/v1/moderations";

/// Client for the OpenAI moderation endpoint.
pub struct ModerationApi {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ModerationApi {
    pub fn new(api_key: &str) -> Result<Self> {
        Self::new_with_endpoint(api_key, OPENAI_API_BASE)
    }

    pub fn new_with_endpoint(api_key: &str, api_base: &str) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            endpoint: format!("{}{}", api_base.trim_end_matches('/'), MODERATIONS_ENDPOINT),
            api_key: api_key.to_string(),
        })
    }

    /// Classifies one piece of text and returns the first result.
    #[instrument(skip(self, input), fields(input_chars = input.chars().count()))]
    pub async fn moderate(&self, input: &str) -> Result<ModerationResult> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&ModerationRequest { input })
            .send()
            .await
            .context(MODERATION_REQUEST_FAILED)?;

        let body = read_success_body(response)
            .await
            .context(MODERATION_REQUEST_FAILED)?;

        let parsed: ModerationResponse =
            serde_json::from_str(&body).context(PARSE_MODERATION_FAILED)?;

        let result = parsed
            .results
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!(EMPTY_MODERATION_RESULTS))?;

        debug!(
            flagged = result.flagged,
            categories = result.category_scores.len(),
            "Moderation result received"
        );

        Ok(result)
    }
}
