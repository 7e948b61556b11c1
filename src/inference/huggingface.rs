//! Hugging Face Inference API client.

use super::{GatewayError, InferenceGateway};
use crate::config::InferenceConfig;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

const ANSWER_MARKER: &str = "A:";

#[derive(Serialize)]
struct TextGenerationRequest {
    inputs: String,
    parameters: TextGenerationParameters,
}

#[derive(Serialize)]
struct TextGenerationParameters {
    max_new_tokens: u32,
    temperature: f32,
}

/// Gateway backed by hosted models. Without an API token every call is `NotConfigured`.
#[derive(Clone)]
pub struct HuggingFaceGateway {
    client: reqwest::Client,
    config: InferenceConfig,
}

impl HuggingFaceGateway {
    pub fn new(config: InferenceConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, config })
    }

    fn token(&self) -> Result<&str, GatewayError> {
        self.config.api_token.as_deref().ok_or(GatewayError::NotConfigured)
    }

    async fn post(
        &self,
        request: reqwest::RequestBuilder,
        timeout: Duration,
    ) -> Result<Value, GatewayError> {
        let token = self.token()?;
        let response = request
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .timeout(timeout)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| GatewayError::MalformedBody(e.to_string()))
    }
}

#[async_trait]
impl InferenceGateway for HuggingFaceGateway {
    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    #[tracing::instrument(skip(self, image), fields(bytes = image.len()))]
    async fn classify_image(&self, image: &[u8]) -> Result<String, GatewayError> {
        self.token()?;
        let request = self.client.post(self.config.vision_url()).body(image.to_vec());
        let body = self.post(request, self.config.vision_timeout).await?;
        top_label(&body)
    }

    #[tracing::instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn generate_text(&self, prompt: &str) -> Result<String, GatewayError> {
        self.token()?;
        let payload = TextGenerationRequest {
            inputs: build_prompt(prompt),
            parameters: TextGenerationParameters {
                max_new_tokens: 128,
                temperature: 0.7,
            },
        };
        let request = self
            .client
            .post(self.config.text_url())
            .header(CONTENT_TYPE, "application/json")
            .json(&payload);
        let body = self.post(request, self.config.text_timeout).await?;
        generated_text(&body)
    }

    async fn forecast_prices(&self, _commodity: &str, _days: usize) -> Result<Vec<f64>, GatewayError> {
        // TODO: call a hosted time-series model once one is chosen for mandi prices.
        Err(GatewayError::Unsupported)
    }
}

fn build_prompt(question: &str) -> String {
    format!("You are a helpful agriculture assistant. Q: {}\n{}", question, ANSWER_MARKER)
}

/// First label of a `[{"label": .., "score": ..}, ..]` classification result.
fn top_label(body: &Value) -> Result<String, GatewayError> {
    body.as_array()
        .and_then(|items| items.first())
        .and_then(|first| first.get("label"))
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| GatewayError::MalformedBody("expected a non-empty list of labels".into()))
}

/// Text from either a list or an object response. List outputs echo the prompt, so only the
/// part after the last answer marker is kept.
fn generated_text(body: &Value) -> Result<String, GatewayError> {
    let text_of = |v: &Value| {
        ["generated_text", "summary_text"]
            .iter()
            .find_map(|k| v.get(*k).and_then(Value::as_str).filter(|s| !s.is_empty()))
            .map(String::from)
    };
    let text = match body {
        Value::Array(items) => items.first().and_then(text_of).map(|t| {
            t.rsplit(ANSWER_MARKER).next().unwrap_or_default().trim().to_string()
        }),
        Value::Object(_) => text_of(body).map(|t| t.trim().to_string()),
        _ => None,
    };
    text.filter(|t| !t.is_empty())
        .ok_or_else(|| GatewayError::MalformedBody("no generated text in response".into()))
}
