//! Entry endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, EntryRequest, EntrySearchParams, Json, StatusUpdateRequest};
use crate::domain::entry::{Entry, EntryDraft, EntryId, EntryStatus};
use crate::infrastructure::entry::USER_NOT_FOUND_FOR_ID;
use crate::infrastructure::observability::record_entry_operation;

const ENTRY_NOT_FOUND: &str = "Entry not found for the given id";
const SEARCH_USER_NOT_FOUND: &str = "Unable to search entries: no user found for the given id";

/// GET /api/lancamentos/{id}
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Entry>, ApiError> {
    debug!(entry_id = id, "Getting entry");

    let entry = find_entry(&state, EntryId::new(id)).await?;

    Ok(Json(entry))
}

/// POST /api/lancamentos
pub async fn create_entry(
    State(state): State<AppState>,
    Json(request): Json<EntryRequest>,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    debug!(user = ?request.user, "Creating entry");

    let draft = request.into_draft(None);
    ensure_user_exists(&state, &draft).await?;

    let entry = state
        .entry_service
        .create(draft)
        .await
        .map_err(ApiError::from)?;

    record_entry_operation("create");

    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/lancamentos/{id}
///
/// A body without a status keeps the stored one.
pub async fn update_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<EntryRequest>,
) -> Result<Json<Entry>, ApiError> {
    debug!(entry_id = id, "Updating entry");

    let existing = find_entry(&state, EntryId::new(id)).await?;

    let mut draft = request.into_draft(Some(existing.id()));
    draft.status = draft.status.or(Some(existing.status()));
    ensure_user_exists(&state, &draft).await?;

    let entry = state
        .entry_service
        .update(draft)
        .await
        .map_err(ApiError::from)?;

    record_entry_operation("update");

    Ok(Json(entry))
}

/// DELETE /api/lancamentos/{id}
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    debug!(entry_id = id, "Deleting entry");

    let existing = find_entry(&state, EntryId::new(id)).await?;

    state
        .entry_service
        .delete(&EntryDraft::from(&existing))
        .await
        .map_err(ApiError::from)?;

    record_entry_operation("delete");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/lancamentos/{id}/atualiza-status
pub async fn update_entry_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<Entry>, ApiError> {
    debug!(entry_id = id, status = %request.status, "Updating entry status");

    let existing = find_entry(&state, EntryId::new(id)).await?;

    let status: EntryStatus = request.status.parse().map_err(|_| {
        ApiError::bad_request("Unable to update the entry status, send a valid status")
            .with_param("status")
    })?;

    let entry = state
        .entry_service
        .set_status(&existing, status)
        .await
        .map_err(ApiError::from)?;

    record_entry_operation("set_status");

    Ok(Json(entry))
}

/// GET /api/lancamentos?descricao&mes&ano&tipo&status&usuario
pub async fn search_entries(
    State(state): State<AppState>,
    Query(params): Query<EntrySearchParams>,
) -> Result<Json<Vec<Entry>>, ApiError> {
    let user_id = params.user_id()?;

    debug!(user_id = %user_id, "Searching entries");

    state
        .user_service
        .get(user_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::bad_request(SEARCH_USER_NOT_FOUND).with_param("usuario"))?;

    let filter = params.into_filter(user_id)?;

    let entries = state
        .entry_service
        .search(&filter)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(entries))
}

async fn find_entry(state: &AppState, id: EntryId) -> Result<Entry, ApiError> {
    state
        .entry_service
        .get(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(ENTRY_NOT_FOUND))
}

/// Reject drafts naming a user that does not exist
///
/// A draft without a user is left to entry validation.
async fn ensure_user_exists(state: &AppState, draft: &EntryDraft) -> Result<(), ApiError> {
    let Some(user_id) = draft.user_id else {
        return Ok(());
    };

    let user = state.user_service.get(user_id).await.map_err(ApiError::from)?;

    match user {
        Some(_) => Ok(()),
        None => Err(ApiError::bad_request(USER_NOT_FOUND_FOR_ID).with_param("user")),
    }
}
