use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// Upper bound on the body text sent for classification, in characters.
pub const MAX_MODERATION_INPUT_CHARS: usize = 7000;

/// Vanilla ids are integers, but some installations hand them back as strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CommentId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentId::Numeric(id) => write!(f, "{id}"),
            CommentId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    #[serde(rename = "commentID")]
    pub comment_id: CommentId,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(rename = "dateInserted", default)]
    pub date_inserted: Option<DateTime<Utc>>,
    #[serde(rename = "insertUserID", default)]
    pub insert_user_id: Option<i64>,
    #[serde(rename = "insertUser", default)]
    pub insert_user: Option<InsertUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertUser {
    #[serde(default)]
    pub name: Option<String>,
}

impl Comment {
    /// Display name of the author, falling back to `user_<id>` and then `user_?`.
    pub fn username(&self) -> String {
        if let Some(name) = self
            .insert_user
            .as_ref()
            .and_then(|user| user.name.as_deref())
            .filter(|name| !name.is_empty())
        {
            return name.to_string();
        }

        match self.insert_user_id {
            Some(id) => format!("user_{id}"),
            None => "user_?".to_string(),
        }
    }

    /// The body cut to the first [`MAX_MODERATION_INPUT_CHARS`] characters.
    pub fn moderation_input(&self) -> &str {
        let body = self.body.as_deref().unwrap_or_default();
        match body.char_indices().nth(MAX_MODERATION_INPUT_CHARS) {
            Some((end, _)) => &body[..end],
            None => body,
        }
    }
}

/// `/api/v2/comments` answers with a bare array on some installations and a
/// paginated envelope on others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CommentsPage {
    Bare(Vec<Comment>),
    Paginated {
        #[serde(default)]
        items: Vec<Comment>,
    },
}
