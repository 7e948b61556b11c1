//! Register and login handlers.

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::response::{created, ok};
use crate::service::auth::RegisterRequest;
use crate::service::AuthService;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub password: Option<String>,
}

/// POST /api/auth
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let reply = AuthService::register(&state.pool, state.verifier.as_ref(), &body).await?;
    Ok(created(reply))
}

/// GET /api/auth/:username?password=...
pub async fn login(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<LoginQuery>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let reply = AuthService::login(
        &state.pool,
        state.verifier.as_ref(),
        &username,
        query.password.as_deref(),
    )
    .await?;
    Ok(ok(reply))
}
