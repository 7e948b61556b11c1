//! Request validation at the service boundary.

use crate::error::AppError;
use crate::model::{NewProduce, NewUser};
use crate::service::auth::RegisterRequest;
use crate::service::listing::CreateListingRequest;
use regex::Regex;
use std::sync::OnceLock;

pub struct RequestValidator;

impl RequestValidator {
    /// All listing fields are required; quantity and price must be finite and non-negative.
    pub fn validate_listing(req: &CreateListingRequest) -> Result<NewProduce, AppError> {
        let farmer_id = required("farmer_id", req.farmer_id)?;
        let crop = required_text("crop", req.crop.as_deref())?;
        let quantity = non_negative("quantity", required("quantity", req.quantity)?)?;
        let price = non_negative("price", required("price", req.price)?)?;
        let location = required_text("location", req.location.as_deref())?;
        Ok(NewProduce {
            farmer_id,
            crop,
            quantity,
            price,
            location,
        })
    }

    /// Username and password must be non-empty. Location is optional; blank counts as absent.
    pub fn validate_registration(req: &RegisterRequest) -> Result<NewUser, AppError> {
        let username = required_text("username", req.username.as_deref())?;
        let password = required("password", req.password.clone())?;
        if password.is_empty() {
            return Err(AppError::Validation("password is required".into()));
        }
        let location = req
            .location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);
        Ok(NewUser {
            username,
            password,
            location,
        })
    }

    /// Upload names must end in `.png`, `.jpg` or `.jpeg` (any case). A bare `.png` counts.
    pub fn allowed_image_name(filename: &str) -> bool {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        PATTERN
            .get_or_init(|| Regex::new(r"(?i)\.(png|jpe?g)$").expect("valid image name pattern"))
            .is_match(filename)
    }
}

fn required<T>(field: &str, value: Option<T>) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

/// Keeps the exact string; only the emptiness check ignores surrounding whitespace.
fn required_text(field: &str, value: Option<&str>) -> Result<String, AppError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        _ => Err(AppError::Validation(format!("{} is required", field))),
    }
}

fn non_negative(field: &str, n: f64) -> Result<f64, AppError> {
    if !n.is_finite() || n < 0.0 {
        return Err(AppError::Validation(format!("{} must be a non-negative number", field)));
    }
    Ok(n)
}
