//! Crop doctor, price forecast, chatbot and the static market/weather stubs.
//!
//! AI-backed answers come from the [`InferenceGateway`]; when it yields nothing a deterministic
//! local value is used instead.

use crate::inference::{ok_or_log, InferenceGateway};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const FALLBACK_DISEASE: &str = "blight";
pub const FALLBACK_ANSWER: &str = "Use organic fertilizer for better yield.";
pub const DEFAULT_FORECAST_DAYS: usize = 7;
pub const MAX_FORECAST_DAYS: usize = 365;
const BASE_PRICE: f64 = 2000.0;
const DAILY_STEP: f64 = 10.0;

/// Remedy for a disease label; unknown labels get a generic recommendation.
pub fn remedy_for(disease: &str) -> &'static str {
    match disease {
        "healthy" => "Crop is healthy!",
        "blight" => "Apply fungicide.",
        "rust" => "Use sulfur dust.",
        _ => "Consult expert.",
    }
}

/// Linear ramp from the base price, one step per day.
pub fn fallback_forecast(days: usize) -> Vec<f64> {
    (0..days).map(|i| BASE_PRICE + i as f64 * DAILY_STEP).collect()
}

/// `days_ahead` query value; anything that is not a non-negative integer means the default.
pub fn parse_days_ahead(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_FORECAST_DAYS)
        .min(MAX_FORECAST_DAYS)
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Diagnosis {
    pub disease: String,
    pub remedy: &'static str,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Forecast {
    pub commodity: String,
    pub forecast: Vec<f64>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MandiPrice {
    pub commodity: String,
    pub price: u32,
    pub state: &'static str,
    pub date: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MandiPrices {
    pub prices: Vec<MandiPrice>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct WeatherAdvisory {
    pub city: String,
    pub temp: i32,
    pub weather: &'static str,
    pub advice: &'static str,
}

/// Body of `POST /api/chatbot`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChatRequest {
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ChatReply {
    pub question: String,
    pub answer: String,
}

pub struct AdvisoryService;

impl AdvisoryService {
    pub async fn diagnose(gateway: &dyn InferenceGateway, image: &[u8]) -> Diagnosis {
        let disease = ok_or_log("classify_image", gateway.classify_image(image).await)
            .unwrap_or_else(|| FALLBACK_DISEASE.to_string());
        let remedy = remedy_for(&disease);
        tracing::info!(disease = %disease, "crop_diagnosed");
        Diagnosis { disease, remedy }
    }

    /// The gateway forecast is used only when it covers exactly `days` days.
    pub async fn forecast(gateway: &dyn InferenceGateway, commodity: &str, days: usize) -> Forecast {
        let forecast = ok_or_log("forecast_prices", gateway.forecast_prices(commodity, days).await)
            .filter(|f| f.len() == days)
            .unwrap_or_else(|| fallback_forecast(days));
        Forecast {
            commodity: commodity.to_string(),
            forecast,
        }
    }

    pub async fn chat(gateway: &dyn InferenceGateway, req: ChatRequest) -> ChatReply {
        let question = req.question.unwrap_or_default();
        let answer = ok_or_log("generate_text", gateway.generate_text(&question).await)
            .unwrap_or_else(|| FALLBACK_ANSWER.to_string());
        ChatReply { question, answer }
    }

    /// Placeholder quote until a market data feed is wired in.
    pub fn mandi_prices(commodity: &str, today: NaiveDate) -> MandiPrices {
        MandiPrices {
            prices: vec![MandiPrice {
                commodity: commodity.to_string(),
                price: 2000,
                state: "Punjab",
                date: today.format("%Y-%m-%d").to_string(),
            }],
        }
    }

    /// Placeholder conditions until a weather provider is wired in.
    pub fn weather(city: &str) -> WeatherAdvisory {
        WeatherAdvisory {
            city: city.to_string(),
            temp: 25,
            weather: "Sunny",
            advice: "Good for planting",
        }
    }
}
