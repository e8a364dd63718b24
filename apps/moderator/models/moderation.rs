use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ModerationRequest<'a> {
    pub input: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ModerationResponse {
    pub results: Vec<ModerationResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModerationResult {
    #[serde(default)]
    pub flagged: bool,
    /// Kept in the order the service sent them.
    #[serde(deserialize_with = "category_scores::deserialize")]
    pub category_scores: Vec<CategoryScore>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScore {
    pub category: String,
    pub score: f64,
}

mod category_scores {
    use super::CategoryScore;
    use serde::de::{Deserializer, MapAccess, Visitor};
    use std::fmt;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<CategoryScore>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScoresVisitor;

        impl<'de> Visitor<'de> for ScoresVisitor {
            type Value = Vec<CategoryScore>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of category names to scores")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut scores = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((category, score)) = map.next_entry::<String, f64>()? {
                    scores.push(CategoryScore { category, score });
                }
                Ok(scores)
            }
        }

        deserializer.deserialize_map(ScoresVisitor)
    }
}
