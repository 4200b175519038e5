//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, ApiError, middleware::auth_middleware};

pub mod contacts;
pub mod docs;
pub mod files;
pub mod health;
pub mod upload;

/// Creates the API router. Everything except `/health` requires a verified caller.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(contacts::routes())
        .merge(docs::routes())
        .merge(files::routes())
        .merge(upload::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(protected_routes)
}

/// Parse a path or query id. Malformed ids read as absent records.
pub(crate) fn parse_id<T: std::str::FromStr>(raw: &str, kind: &str) -> Result<T, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::not_found(format!("{kind} not found: {raw}")))
}

#[cfg(test)]
mod tests;
