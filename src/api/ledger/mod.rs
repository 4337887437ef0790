//! Bookkeeping API endpoints for entries and users

pub mod entries;
pub mod users;

use axum::{
    routing::{get, post, put},
    Router,
};

use super::state::AppState;

/// Create the ledger router, nested under `/api`
pub fn create_ledger_router() -> Router<AppState> {
    Router::new()
        // Entries
        .route(
            "/lancamentos",
            get(entries::search_entries).post(entries::create_entry),
        )
        .route(
            "/lancamentos/{id}",
            get(entries::get_entry)
                .put(entries::update_entry)
                .delete(entries::delete_entry),
        )
        .route(
            "/lancamentos/{id}/atualiza-status",
            put(entries::update_entry_status),
        )
        // Users
        .route("/usuarios", post(users::register))
        .route("/usuarios/autenticar", post(users::authenticate))
        .route("/usuarios/{id}/saldo", get(users::balance))
}
