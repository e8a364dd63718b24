use crate::evaluator::FlaggedPost;

pub const NO_CONCERNS: &str = "_No policy concerns detected in the selected window._";

const HEADER: &str = "| User | Comment | Reason |\n|------|---------|--------|";

pub fn render_markdown(rows: &[FlaggedPost]) -> String {
    if rows.is_empty() {
        return NO_CONCERNS.to_string();
    }

    let body = rows
        .iter()
        .map(|row| format!("| {} | [link]({}) | {} |", row.username, row.link, row.reason))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{HEADER}\n{body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        assert_eq!(
            render_markdown(&[]),
            "_No policy concerns detected in the selected window._"
        );
    }

    #[test]
    fn test_single_row() {
        let rows = vec![FlaggedPost {
            link: "https://x/1".to_string(),
            username: "Bob".to_string(),
            reason: "r".to_string(),
        }];
        assert_eq!(
            render_markdown(&rows),
            "| User | Comment | Reason |\n|------|---------|--------|\n| Bob | [link](https://x/1) | r |"
        );
    }
}
