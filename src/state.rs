//! Shared application state for all routes. Built once at startup and cloned into handlers.

use crate::inference::InferenceGateway;
use crate::service::{CredentialVerifier, PlaintextVerifier};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub gateway: Arc<dyn InferenceGateway>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    /// State with the default plaintext credential check.
    pub fn new(pool: SqlitePool, gateway: Arc<dyn InferenceGateway>) -> Self {
        AppState {
            pool,
            gateway,
            verifier: Arc::new(PlaintextVerifier),
        }
    }

    pub fn with_verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
        self.verifier = verifier;
        self
    }
}
