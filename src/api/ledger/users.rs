//! User endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::types::{ApiError, AuthenticateRequest, BalanceResponse, Json, RegisterRequest};
use crate::domain::user::{User, UserId};
use crate::infrastructure::observability::record_auth_attempt;

/// POST /api/usuarios/autenticar
pub async fn authenticate(
    State(state): State<AppState>,
    Json(request): Json<AuthenticateRequest>,
) -> Result<Json<User>, ApiError> {
    debug!(email = %request.email, "Authenticating user");

    let result = state
        .user_service
        .authenticate(&request.email, &request.password)
        .await;

    record_auth_attempt(result.is_ok());

    let user = result.map_err(ApiError::from)?;

    info!(user_id = %user.id(), "User authenticated");

    Ok(Json(user))
}

/// POST /api/usuarios
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    debug!(email = %request.email, "Registering user");

    let user = state
        .user_service
        .register(request.into())
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/usuarios/{id}/saldo
pub async fn balance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let user_id = UserId::new(id);

    debug!(user_id = %user_id, "Computing balance");

    state
        .user_service
        .get(user_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", user_id)))?;

    let balance = state
        .entry_service
        .balance_for_user(user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(BalanceResponse {
        user: user_id,
        balance,
    }))
}
