pub mod api_handler;
pub mod config;
pub mod evaluator;
pub mod fetchers;
pub mod models;
pub mod moderation_api;
pub mod report;
pub mod vanilla_api;

use anyhow::Result;
use config::ModeratorConfig;
use evaluator::ModerationEvaluator;
use fetchers::comments::CommentFetcher;
use moderation_api::ModerationApi;
use tracing::{info, instrument};
use vanilla_api::VanillaApi;

/// Fetch, classify and render. Any upstream failure ends the run without a report.
#[instrument(skip_all)]
pub async fn run(config: &ModeratorConfig) -> Result<String> {
    let vanilla_api = VanillaApi::new(&config.vanilla_base_url, &config.vanilla_api_token)?;
    let moderation_api =
        ModerationApi::new_with_endpoint(&config.openai_api_key, &config.openai_base_url)?;

    let comments = CommentFetcher::new(vanilla_api, config.lookback_hours, config.page_size)
        .fetch_recent_comments()
        .await?;
    info!(fetched = comments.len(), "Fetched {} comment(s) for review", comments.len());

    let evaluator = ModerationEvaluator::new(
        moderation_api,
        &config.vanilla_base_url,
        config.moderation_threshold,
    )
    .with_pacing(config.pacing);
    let flagged = evaluator.analyse_comments(&comments).await?;
    info!(flagged = flagged.len(), "Flagged {} comment(s)", flagged.len());

    Ok(report::render_markdown(&flagged))
}
