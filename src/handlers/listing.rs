//! Produce listing handlers: create, list all, list by crop.

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::response::{created, ok, Created};
use crate::service::listing::CreateListingRequest;
use crate::service::ListingService;
use crate::state::AppState;
use axum::extract::{Path, State};

/// POST /api/listings
pub async fn create_listing(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateListingRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let id = ListingService::create(&state.pool, &body).await?;
    Ok(created(Created {
        id,
        message: "Listing created",
    }))
}

/// GET /api/listings
pub async fn list_listings(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows = ListingService::list(&state.pool, None).await?;
    Ok(ok(rows))
}

/// GET /api/listings/:crop
pub async fn list_listings_by_crop(
    State(state): State<AppState>,
    Path(crop): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let rows = ListingService::list(&state.pool, Some(&crop)).await?;
    Ok(ok(rows))
}
