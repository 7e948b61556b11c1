//! Crop doctor, market, forecast, weather and chatbot handlers.

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::response::ok;
use crate::service::advisory::{parse_days_ahead, ChatRequest};
use crate::service::{AdvisoryService, RequestValidator};
use crate::state::AppState;
use axum::extract::{multipart::MultipartRejection, Multipart, Path, Query, State};
use serde::Deserialize;

const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub days_ahead: Option<String>,
}

/// POST /api/crop-doctor (multipart, field `file`)
pub async fn crop_doctor(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(reason = %rejection.body_text(), "crop doctor request is not multipart");
        AppError::BadRequest("No file part".into())
    })?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        // A part without a filename is a plain form value, not an upload.
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let bytes = field.bytes().await.map_err(|e| AppError::BadRequest(e.body_text()))?;
        upload = Some((filename, bytes));
        break;
    }

    let (filename, image) = upload.ok_or_else(|| AppError::BadRequest("No file part".into()))?;
    if filename.is_empty() {
        return Err(AppError::BadRequest("No selected file".into()));
    }
    if !RequestValidator::allowed_image_name(&filename) {
        return Err(AppError::BadRequest("File type not allowed".into()));
    }
    tracing::debug!(filename = %filename, bytes = image.len(), "crop image received");
    let diagnosis = AdvisoryService::diagnose(state.gateway.as_ref(), &image).await;
    Ok(ok(diagnosis))
}

/// GET /api/mandi-prices/:commodity
pub async fn mandi_prices(Path(commodity): Path<String>) -> impl axum::response::IntoResponse {
    let today = chrono::Local::now().date_naive();
    ok(AdvisoryService::mandi_prices(&commodity, today))
}

/// GET /api/price-forecast/:commodity?days_ahead=N
pub async fn price_forecast(
    State(state): State<AppState>,
    Path(commodity): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> impl axum::response::IntoResponse {
    let days = parse_days_ahead(query.days_ahead.as_deref());
    ok(AdvisoryService::forecast(state.gateway.as_ref(), &commodity, days).await)
}

/// GET /api/weather-advisory/:city
pub async fn weather_advisory(Path(city): Path<String>) -> impl axum::response::IntoResponse {
    ok(AdvisoryService::weather(&city))
}

/// POST /api/chatbot
pub async fn chatbot(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<ChatRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    Ok(ok(AdvisoryService::chat(state.gateway.as_ref(), body).await))
}
