//! Runtime configuration types, populated from the process environment.

use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://farmers.db";
pub const DEFAULT_INFERENCE_BASE_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_VISION_MODEL: &str = "microsoft/resnet-50";
pub const DEFAULT_TEXT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_upload_bytes: usize,
    pub inference: InferenceConfig,
}

/// Remote inference settings. With no token every AI feature falls back to its local default.
#[derive(Clone, Debug)]
pub struct InferenceConfig {
    pub api_token: Option<String>,
    pub base_url: String,
    pub vision_model: String,
    pub text_model: String,
    pub vision_timeout: Duration,
    pub text_timeout: Duration,
}

impl InferenceConfig {
    pub fn is_configured(&self) -> bool {
        self.api_token.is_some()
    }

    pub fn vision_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.vision_model)
    }

    pub fn text_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.text_model)
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        InferenceConfig {
            api_token: None,
            base_url: DEFAULT_INFERENCE_BASE_URL.into(),
            vision_model: DEFAULT_VISION_MODEL.into(),
            text_model: DEFAULT_TEXT_MODEL.into(),
            vision_timeout: Duration::from_secs(20),
            text_timeout: Duration::from_secs(30),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            inference: InferenceConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
