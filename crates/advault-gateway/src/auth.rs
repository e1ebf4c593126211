//! Admin authentication.
//!
//! Privileged routes require an `x-api-key` header matching the configured
//! shared secret. The check happens in the handler before any input
//! normalization or subprocess call, so a rejected caller never triggers a
//! tool invocation.

use crate::error::ApiResult;
use crate::state::AppState;
use axum::http::HeaderMap;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Verify the shared secret for a privileged operation.
pub fn require_admin(state: &AppState, headers: &HeaderMap) -> ApiResult<()> {
    let provided = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    state.gateway.guard_admin(provided)?;
    Ok(())
}
