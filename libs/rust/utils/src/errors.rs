//env
pub const OPENAI_API_KEY_NOT_SET: &str = "OPENAI_API_KEY not set!";
pub const VANILLA_API_TOKEN_NOT_SET: &str = "VANILLA_API_TOKEN not set!";
pub const MODERATION_THRESHOLD_INVALID: &str = "MODERATION_THRESHOLD must be a number between 0 and 1";
pub const LOOKBACK_HOURS_INVALID: &str = "LOOKBACK_HOURS must be a non-negative integer";
pub const PAGE_SIZE_INVALID: &str = "PAGE_SIZE must be a positive integer";

//upstream
pub const FETCH_COMMENTS_FAILED: &str = "Failed to fetch comments";
pub const PARSE_COMMENTS_FAILED: &str = "Failed to parse comments response";
pub const MODERATION_REQUEST_FAILED: &str = "Failed to call moderation endpoint";
pub const PARSE_MODERATION_FAILED: &str = "Failed to parse moderation response";
pub const EMPTY_MODERATION_RESULTS: &str = "Moderation response contained no results";
