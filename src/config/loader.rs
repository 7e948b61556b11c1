//! Load config from environment variables (optionally seeded from `.env`).

use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::str::FromStr;
use std::time::Duration;

/// Read config from the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
pub fn from_env() -> Result<AppConfig, ConfigError> {
    from_lookup(|key| std::env::var(key).ok())
}

/// Build config from any key lookup. Empty values are treated as unset.
pub fn from_lookup<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let defaults = AppConfig::default();

    let inference = InferenceConfig {
        api_token: get("HUGGINGFACE_API_TOKEN"),
        base_url: get("HF_INFERENCE_BASE_URL").unwrap_or(defaults.inference.base_url),
        vision_model: get("HF_VISION_MODEL").unwrap_or(defaults.inference.vision_model),
        text_model: get("HF_TEXT_MODEL").unwrap_or(defaults.inference.text_model),
        vision_timeout: parse_or("HF_VISION_TIMEOUT_SECS", get("HF_VISION_TIMEOUT_SECS"), 20u64)
            .map(Duration::from_secs)?,
        text_timeout: parse_or("HF_TEXT_TIMEOUT_SECS", get("HF_TEXT_TIMEOUT_SECS"), 30u64)
            .map(Duration::from_secs)?,
    };

    let config = AppConfig {
        host: get("HOST").unwrap_or(defaults.host),
        port: parse_or("PORT", get("PORT"), defaults.port)?,
        database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
        max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", get("MAX_UPLOAD_BYTES"), defaults.max_upload_bytes)?,
        inference,
    };
    validate(&config)?;
    Ok(config)
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_env_is_empty() {
        let cfg = from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.bind_addr(), "127.0.0.1:5000");
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert!(!cfg.inference.is_configured());
        assert_eq!(cfg.inference.vision_timeout, Duration::from_secs(20));
        assert_eq!(cfg.inference.text_timeout, Duration::from_secs(30));
    }

    #[test]
    fn reads_overrides() {
        let cfg = from_lookup(lookup(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "8080"),
            ("HUGGINGFACE_API_TOKEN", "hf_abc"),
            ("HF_INFERENCE_BASE_URL", "http://localhost:9000/models/"),
        ]))
        .unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");
        assert_eq!(cfg.inference.api_token.as_deref(), Some("hf_abc"));
        assert_eq!(cfg.inference.vision_url(), "http://localhost:9000/models/microsoft/resnet-50");
    }

    #[test]
    fn blank_token_counts_as_unset() {
        let cfg = from_lookup(lookup(&[("HUGGINGFACE_API_TOKEN", "   ")])).unwrap();
        assert!(cfg.inference.api_token.is_none());
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "PORT", .. }));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = from_lookup(lookup(&[("HF_TEXT_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
