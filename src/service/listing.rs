//! Produce listings: create and list, optionally filtered by crop.

use crate::error::AppError;
use crate::model::Produce;
use crate::service::RequestValidator;
use crate::store;
use serde::Deserialize;
use sqlx::SqlitePool;

/// Body of `POST /api/listings`. Fields are optional here so a missing one reports which field it was.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateListingRequest {
    pub farmer_id: Option<i64>,
    pub crop: Option<String>,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
    pub location: Option<String>,
}

pub struct ListingService;

impl ListingService {
    /// Validate and persist one listing. Returns the assigned id once the write has completed.
    pub async fn create(pool: &SqlitePool, req: &CreateListingRequest) -> Result<i64, AppError> {
        let produce = RequestValidator::validate_listing(req)?;
        let id = store::insert_produce(pool, &produce).await?;
        tracing::info!(id, farmer_id = produce.farmer_id, crop = %produce.crop, "listing_created");
        Ok(id)
    }

    /// Listings in insertion order; with `crop`, only exact (case-sensitive) matches.
    pub async fn list(pool: &SqlitePool, crop: Option<&str>) -> Result<Vec<Produce>, AppError> {
        store::list_produce(pool, crop).await
    }
}
