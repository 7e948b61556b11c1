//! Remote inference gateway used by the crop doctor, chatbot and price forecast.
//!
//! Every call returns a typed `Result`. Callers turn failures into `None` with [`ok_or_log`],
//! which records the cause and lets them substitute a local fallback.

mod huggingface;

pub use huggingface::HuggingFaceGateway;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("inference gateway not configured")]
    NotConfigured,
    #[error("operation not supported by the inference gateway")]
    Unsupported,
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    MalformedBody(String),
}

impl GatewayError {
    /// Absence of the gateway is expected; everything else is worth a warning.
    fn is_expected(&self) -> bool {
        matches!(self, GatewayError::NotConfigured | GatewayError::Unsupported)
    }
}

#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Whether calls can reach a remote model at all.
    fn is_configured(&self) -> bool {
        true
    }

    /// Top-ranked label for an image.
    async fn classify_image(&self, image: &[u8]) -> Result<String, GatewayError>;

    /// Generated answer for a prompt, with any echoed prompt removed.
    async fn generate_text(&self, prompt: &str) -> Result<String, GatewayError>;

    /// Price forecast for the next `days` days.
    async fn forecast_prices(&self, commodity: &str, days: usize) -> Result<Vec<f64>, GatewayError>;
}

/// Collapse a gateway result to an option, logging why there is no value.
pub fn ok_or_log<T>(operation: &'static str, result: Result<T, GatewayError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) if e.is_expected() => {
            tracing::debug!(operation, reason = %e, "inference unavailable, using fallback");
            None
        }
        Err(e) => {
            tracing::warn!(operation, error = %e, "inference call failed, using fallback");
            None
        }
    }
}
