//! Farmer-facing API routes under `/api`.

use crate::handlers::{
    chatbot, create_listing, crop_doctor, list_listings, list_listings_by_crop, login, mandi_prices, price_forecast,
    register, weather_advisory,
};
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::{routing::get, routing::post, Router};
use tower_http::limit::RequestBodyLimitLayer;

/// All `/api/*` routes. Request bodies (image uploads included) are capped at `max_body_bytes`.
pub fn api_routes(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/crop-doctor", post(crop_doctor))
        .route("/api/mandi-prices/:commodity", get(mandi_prices))
        .route("/api/price-forecast/:commodity", get(price_forecast))
        .route("/api/listings", get(list_listings).post(create_listing))
        .route("/api/listings/:crop", get(list_listings_by_crop))
        .route("/api/weather-advisory/:city", get(weather_advisory))
        .route("/api/chatbot", post(chatbot))
        .route("/api/auth", post(register))
        .route("/api/auth/:username", get(login))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}
