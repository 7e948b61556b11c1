//! Listing, auth and advisory services over the store and the inference gateway.

pub mod advisory;
pub mod auth;
pub mod listing;
mod validation;
pub use advisory::AdvisoryService;
pub use auth::{AuthService, CredentialVerifier, PlaintextVerifier};
pub use listing::ListingService;
pub use validation::RequestValidator;
