use crate::evaluator::{DEFAULT_MODERATION_THRESHOLD, DEFAULT_PACING};
use crate::moderation_api::OPENAI_API_BASE;
use crate::vanilla_api::DEFAULT_VANILLA_BASE_URL;
use anyhow::{Result, anyhow};
use std::{env, time::Duration};
use tracing::info;
use utils::errors::{
    LOOKBACK_HOURS_INVALID, MODERATION_THRESHOLD_INVALID, OPENAI_API_KEY_NOT_SET,
    PAGE_SIZE_INVALID, VANILLA_API_TOKEN_NOT_SET,
};

pub const DEFAULT_LOOKBACK_HOURS: u32 = 24;
pub const DEFAULT_PAGE_SIZE: u32 = 100;

#[derive(Clone)]
pub struct ModeratorConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub vanilla_api_token: String,
    pub vanilla_base_url: String,
    pub moderation_threshold: f64,
    /// 0 disables the cutoff.
    pub lookback_hours: u32,
    pub page_size: u32,
    pub pacing: Duration,
}

impl std::fmt::Debug for ModeratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeratorConfig")
            .field("openai_base_url", &self.openai_base_url)
            .field("vanilla_base_url", &self.vanilla_base_url)
            .field("moderation_threshold", &self.moderation_threshold)
            .field("lookback_hours", &self.lookback_hours)
            .field("page_size", &self.page_size)
            .field("pacing", &self.pacing)
            .finish_non_exhaustive()
    }
}

impl ModeratorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let openai_api_key =
            non_empty("OPENAI_API_KEY").ok_or_else(|| anyhow!(OPENAI_API_KEY_NOT_SET))?;
        let vanilla_api_token =
            non_empty("VANILLA_API_TOKEN").ok_or_else(|| anyhow!(VANILLA_API_TOKEN_NOT_SET))?;

        let vanilla_base_url = non_empty("VANILLA_BASE_URL")
            .unwrap_or_else(|| DEFAULT_VANILLA_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let openai_base_url = non_empty("OPENAI_BASE_URL")
            .unwrap_or_else(|| OPENAI_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let moderation_threshold = match non_empty("MODERATION_THRESHOLD") {
            Some(value) => value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|threshold| (0.0..=1.0).contains(threshold))
                .ok_or_else(|| anyhow!("{MODERATION_THRESHOLD_INVALID}: {value}"))?,
            None => DEFAULT_MODERATION_THRESHOLD,
        };

        let lookback_hours = match non_empty("LOOKBACK_HOURS") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .map_err(|_| anyhow!("{LOOKBACK_HOURS_INVALID}: {value}"))?,
            None => DEFAULT_LOOKBACK_HOURS,
        };

        let page_size = match non_empty("PAGE_SIZE") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|size| *size > 0)
                .ok_or_else(|| anyhow!("{PAGE_SIZE_INVALID}: {value}"))?,
            None => DEFAULT_PAGE_SIZE,
        };

        let config = Self {
            openai_api_key,
            openai_base_url,
            vanilla_api_token,
            vanilla_base_url,
            moderation_threshold,
            lookback_hours,
            page_size,
            pacing: DEFAULT_PACING,
        };

        info!(
            vanilla_base_url = %config.vanilla_base_url,
            threshold = config.moderation_threshold,
            lookback_hours = config.lookback_hours,
            page_size = config.page_size,
            "Moderator config loaded"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const CREDENTIALS: [(&str, &str); 2] = [
        ("OPENAI_API_KEY", "sk-test"),
        ("VANILLA_API_TOKEN", "va-test"),
    ];

    #[test]
    fn test_defaults() {
        let config = ModeratorConfig::from_lookup(lookup(&CREDENTIALS)).unwrap();
        assert_eq!(config.vanilla_base_url, "https://forum.example.com");
        assert_eq!(config.openai_base_url, "https://api.openai.com");
        assert_eq!(config.moderation_threshold, 0.01);
        assert_eq!(config.lookback_hours, 24);
        assert_eq!(config.page_size, 100);
        assert_eq!(config.pacing, Duration::from_millis(400));
    }

    #[test]
    fn test_missing_credentials() {
        let err = ModeratorConfig::from_lookup(lookup(&[("VANILLA_API_TOKEN", "va")])).unwrap_err();
        assert_eq!(err.to_string(), "OPENAI_API_KEY not set!");

        let err = ModeratorConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk"), ("VANILLA_API_TOKEN", "")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "VANILLA_API_TOKEN not set!");
    }

    #[test]
    fn test_overrides() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.extend([
            ("VANILLA_BASE_URL", "https://community.example.org/"),
            ("MODERATION_THRESHOLD", "0.5"),
            ("LOOKBACK_HOURS", "0"),
            ("PAGE_SIZE", "25"),
        ]);
        let config = ModeratorConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.vanilla_base_url, "https://community.example.org");
        assert_eq!(config.moderation_threshold, 0.5);
        assert_eq!(config.lookback_hours, 0);
        assert_eq!(config.page_size, 25);
    }

    #[test]
    fn test_invalid_numbers() {
        for (key, value) in [
            ("MODERATION_THRESHOLD", "1.5"),
            ("MODERATION_THRESHOLD", "abc"),
            ("LOOKBACK_HOURS", "-1"),
            ("PAGE_SIZE", "0"),
        ] {
            let mut pairs = CREDENTIALS.to_vec();
            pairs.push((key, value));
            assert!(
                ModeratorConfig::from_lookup(lookup(&pairs)).is_err(),
                "{key}={value} should be rejected"
            );
        }
    }

    #[test]
    fn test_debug_hides_credentials() {
        let config = ModeratorConfig::from_lookup(lookup(&CREDENTIALS)).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-test"));
        assert!(!rendered.contains("va-test"));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        unsafe {
            env::set_var("OPENAI_API_KEY", "sk-env");
            env::set_var("VANILLA_API_TOKEN", "va-env");
            env::set_var("PAGE_SIZE", "50");
        }

        let config = ModeratorConfig::from_env();

        unsafe {
            env::remove_var("OPENAI_API_KEY");
            env::remove_var("VANILLA_API_TOKEN");
            env::remove_var("PAGE_SIZE");
        }

        let config = config.unwrap();
        assert_eq!(config.openai_api_key, "sk-env");
        assert_eq!(config.vanilla_api_token, "va-env");
        assert_eq!(config.page_size, 50);
    }
}
