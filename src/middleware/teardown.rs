//! Request teardown: release the storage session after every request.
//!
//! Applied once, outside every other layer, so it also runs when the
//! timeout drops the handler or the body limit rejects the request.
//! Panics are caught further in. With `APP_ENV=development` the panic hook
//! aborts the process first, so a panicking request never reaches it there.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

pub async fn close_storage(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    if let Err(e) = state.storage.close().await {
        tracing::warn!(
            error = %e,
            backend = state.storage.backend_name(),
            "failed to close storage"
        );
    }

    response
}
