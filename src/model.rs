//! Persisted records and their insert shapes.

use serde::Serialize;

/// Registered user. The password is stored as supplied; see `service::auth::CredentialVerifier`.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct User {
    #[sqlx(rename = "user_id")]
    pub id: i64,
    pub username: String,
    pub password: String,
    pub location: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub location: Option<String>,
}

/// A produce listing as returned by the listings API.
#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow)]
pub struct Produce {
    #[sqlx(rename = "produce_id")]
    pub id: i64,
    pub farmer_id: i64,
    pub crop: String,
    pub quantity: f64,
    pub price: f64,
    pub location: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewProduce {
    pub farmer_id: i64,
    pub crop: String,
    pub quantity: f64,
    pub price: f64,
    pub location: String,
}
