use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::state::AppState;
use crate::account::AccountError;
use crate::session::CONTEXT_TOKEN_HEADER;

/// Resolve the context token header into a [`crate::session::CustomerContext`]
/// request extension.
///
/// Never rejects a request for a bad token; the caller is simply anonymous.
/// Operations that need a customer fail later with `Unauthenticated`.
pub async fn customer_context_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AccountError> {
    let token = request
        .headers()
        .get(CONTEXT_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok());

    let context = state.sessions.resolve(token).await?;
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}
