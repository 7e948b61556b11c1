//! Config validation: values that parse but cannot work at runtime.

use crate::config::AppConfig;
use crate::error::ConfigError;

pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.host.is_empty() {
        return Err(ConfigError::Load("HOST must not be empty".into()));
    }
    if !config.database_url.starts_with("sqlite:") {
        return Err(ConfigError::Load(format!(
            "DATABASE_URL must be a sqlite URL, got '{}'",
            config.database_url
        )));
    }
    if config.max_upload_bytes == 0 {
        return Err(ConfigError::Load("MAX_UPLOAD_BYTES must be positive".into()));
    }
    let inference = &config.inference;
    if inference.vision_timeout.is_zero() || inference.text_timeout.is_zero() {
        return Err(ConfigError::Load("inference timeouts must be at least one second".into()));
    }
    if !(inference.base_url.starts_with("http://") || inference.base_url.starts_with("https://")) {
        return Err(ConfigError::Load(format!(
            "HF_INFERENCE_BASE_URL must be an http(s) URL, got '{}'",
            inference.base_url
        )));
    }
    Ok(())
}
