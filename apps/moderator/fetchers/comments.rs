use crate::models::comments::{Comment, CommentsPage};
use crate::vanilla_api::{COMMENTS_ENDPOINT, VanillaApi};
use anyhow::Result;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use tracing::{info, instrument};

pub struct CommentFetcher {
    api: VanillaApi,
    lookback_hours: u32,
    page_size: u32,
}

impl CommentFetcher {
    pub fn new(api: VanillaApi, lookback_hours: u32, page_size: u32) -> Self {
        Self {
            api,
            lookback_hours,
            page_size,
        }
    }

    /// Earliest insertion time accepted, or `None` when the lookback is 0.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        (self.lookback_hours > 0).then(|| now - Duration::hours(i64::from(self.lookback_hours)))
    }

    pub fn page_query(&self, page: u32, cutoff: Option<DateTime<Utc>>) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("limit", self.page_size.to_string()),
            ("page", page.to_string()),
        ];
        if let Some(cutoff) = cutoff {
            query.push((
                "dateInserted",
                format!(">{}", cutoff.to_rfc3339_opts(SecondsFormat::Micros, false)),
            ));
        }
        query
    }

    /// Walks the comments endpoint until a bare list or an empty page.
    ///
    /// There is no page cap: with a large lookback this scans everything the
    /// forum is willing to return.
    #[instrument(skip(self), fields(lookback_hours = self.lookback_hours, page_size = self.page_size))]
    pub async fn fetch_recent_comments(&self) -> Result<Vec<Comment>> {
        let cutoff = self.cutoff(Utc::now());
        let mut page = 1;
        let mut comments = Vec::new();

        loop {
            let query = self.page_query(page, cutoff);
            let response: CommentsPage = self.api.get(COMMENTS_ENDPOINT, &query).await?;

            match response {
                CommentsPage::Bare(items) => {
                    info!(
                        page,
                        count = items.len(),
                        "Received unpaginated comment list. Stopping."
                    );
                    comments.extend(items);
                    break;
                }
                CommentsPage::Paginated { items } => {
                    if items.is_empty() {
                        info!(page, "No more comments to fetch. Stopping.");
                        break;
                    }
                    comments.extend(items);
                    info!(
                        page,
                        total = comments.len(),
                        "Fetched page of comments"
                    );
                    page += 1;
                }
            }
        }

        Ok(comments)
    }
}
