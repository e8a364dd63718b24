use crate::models::comments::{Comment, CommentId};
use crate::models::moderation::ModerationResult;
use crate::moderation_api::ModerationApi;
use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

pub const DEFAULT_MODERATION_THRESHOLD: f64 = 0.01;

/// Pause after every classification call to stay under the service's rate limit.
pub const DEFAULT_PACING: Duration = Duration::from_millis(400);

/// Only this many comments from the head of a batch are classified.
pub const EVALUATION_LIMIT: usize = 3;

const FALLBACK_REASON: &str = "OpenAI flagged";

#[derive(Debug, Clone, PartialEq)]
pub struct FlaggedPost {
    pub link: String,
    pub username: String,
    pub reason: String,
}

pub struct ModerationEvaluator {
    api: ModerationApi,
    base_url: String,
    threshold: f64,
    pacing: Duration,
}

impl ModerationEvaluator {
    pub fn new(api: ModerationApi, base_url: &str, threshold: f64) -> Self {
        Self {
            api,
            base_url: base_url.trim_end_matches('/').to_string(),
            threshold,
            pacing: DEFAULT_PACING,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Classifies the head of `comments` and returns one entry per classified
    /// comment. The `triggered` decision is logged but not used as a filter.
    #[instrument(skip(self, comments), fields(comments = comments.len(), threshold = self.threshold))]
    pub async fn analyse_comments(&self, comments: &[Comment]) -> Result<Vec<FlaggedPost>> {
        let mut flagged = Vec::new();

        for comment in comments.iter().take(EVALUATION_LIMIT) {
            let result = self.api.moderate(comment.moderation_input()).await?;

            debug!(
                comment_id = %comment.comment_id,
                date_inserted = ?comment.date_inserted,
                flagged = result.flagged,
                triggered = triggered(&result, self.threshold),
                "Comment classified"
            );

            flagged.push(FlaggedPost {
                link: comment_link(&self.base_url, &comment.comment_id),
                username: comment.username(),
                reason: reason(&result, self.threshold),
            });

            sleep(self.pacing).await;
        }

        if comments.len() > EVALUATION_LIMIT {
            info!(
                skipped = comments.len() - EVALUATION_LIMIT,
                "Comments beyond the evaluation limit were not classified"
            );
        }

        Ok(flagged)
    }
}

/// A comment is a concern when the service flags it or any score reaches the threshold.
pub fn triggered(result: &ModerationResult, threshold: f64) -> bool {
    result.flagged || result.category_scores.iter().any(|s| s.score >= threshold)
}

pub fn reason(result: &ModerationResult, threshold: f64) -> String {
    let reasons: Vec<String> = result
        .category_scores
        .iter()
        .filter(|s| s.score >= threshold)
        .map(|s| format!("{} ({:.2})", s.category.replace('_', " "), s.score))
        .collect();

    if reasons.is_empty() {
        FALLBACK_REASON.to_string()
    } else {
        reasons.join(", ")
    }
}

pub fn comment_link(base_url: &str, comment_id: &CommentId) -> String {
    format!("{base_url}/discussion/comment/{comment_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::moderation::CategoryScore;

    fn result(flagged: bool, scores: &[(&str, f64)]) -> ModerationResult {
        ModerationResult {
            flagged,
            category_scores: scores
                .iter()
                .map(|(category, score)| CategoryScore {
                    category: category.to_string(),
                    score: *score,
                })
                .collect(),
        }
    }

    #[test]
    fn test_reason_lists_categories_over_threshold() {
        let res = result(false, &[("hate", 0.5), ("violence", 0.001)]);
        assert_eq!(reason(&res, 0.01), "hate (0.50)");
    }

    #[test]
    fn test_reason_keeps_order_and_replaces_underscores() {
        let res = result(true, &[("self_harm", 0.1234), ("hate", 0.01), ("sexual", 0.0)]);
        assert_eq!(reason(&res, 0.01), "self harm (0.12), hate (0.01)");
    }

    #[test]
    fn test_reason_fallback() {
        let res = result(false, &[("hate", 0.0), ("violence", 0.009)]);
        assert_eq!(reason(&res, 0.01), "OpenAI flagged");
    }

    #[test]
    fn test_triggered() {
        assert!(triggered(&result(true, &[("hate", 0.0)]), 0.01));
        assert!(triggered(&result(false, &[("hate", 0.01)]), 0.01));
        assert!(!triggered(&result(false, &[("hate", 0.009)]), 0.01));
        assert!(!triggered(&result(false, &[]), 0.01));
    }

    #[test]
    fn test_comment_link() {
        assert_eq!(
            comment_link("https://forum.example.com", &CommentId::Numeric(7)),
            "https://forum.example.com/discussion/comment/7"
        );
    }
}
