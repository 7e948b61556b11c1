//! HTTP handlers for listings, auth, and advisories.

pub mod advisory;
pub mod auth;
pub mod listing;
pub use advisory::*;
pub use auth::*;
pub use listing::*;
