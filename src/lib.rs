//! Krishi API: farmer-facing REST backend for produce listings, auth, and crop/market advisories.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod inference;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{from_env, AppConfig, InferenceConfig};
pub use error::{AppError, ConfigError};
pub use inference::{GatewayError, HuggingFaceGateway, InferenceGateway};
pub use model::{Produce, User};
pub use routes::{api_routes, app_router, common_routes};
pub use service::{AdvisoryService, AuthService, CredentialVerifier, ListingService, PlaintextVerifier};
pub use state::AppState;
pub use store::{connect, connect_in_memory, ensure_database_exists, ensure_tables};
