//! Router assembly and shared handler helpers.
//!
//! Bodies are accepted as loose JSON objects and picked apart with the
//! helpers below; a missing or unreadable body is treated as `{}` so that
//! per-field validation produces the actual 400 message.

pub mod advault;
pub mod campaigns;
pub mod events;
pub mod registry;
pub mod token;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use advault_ledger::{ReadResult, TxOutcome};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .nest("/v1/campaigns", campaigns::router())
        .nest("/v1/advault", advault::router())
        .nest("/v1/registry", registry::router())
        .nest("/v1/token", token::router())
        .nest("/v1/events", events::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .with_state(state)
}

async fn healthz() -> Json<Value> {
    Json(serde_json::json!({ "ok": true }))
}

/// Collapse an optional request body into a JSON object.
pub(crate) fn body(payload: Option<Json<Value>>) -> Value {
    payload
        .map(|Json(v)| v)
        .unwrap_or_else(|| Value::Object(Default::default()))
}

/// Non-empty string field, if present.
pub(crate) fn str_field(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// First present non-empty string among alternate spellings of a field.
///
/// Signer-selection fields are accepted under their role-specific name
/// (`advertiserSourceAlias`, `fromSourceAlias`, `verifierSourceAlias`) as
/// well as the uniform `source_alias`; the role-specific spelling wins.
pub(crate) fn str_field_any(body: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| str_field(body, key))
}

pub(crate) fn require_str(body: &Value, key: &str) -> ApiResult<String> {
    str_field(body, key).ok_or_else(|| ApiError::validation(format!("{key} is required")))
}

/// Unsigned integer field, accepted as a JSON number or a numeric string.
pub(crate) fn u64_field(body: &Value, key: &str) -> ApiResult<Option<u64>> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| ApiError::validation(format!("{key} must be a non-negative integer"))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ApiError::validation(format!("{key} must be a non-negative integer"))),
        Some(_) => Err(ApiError::validation(format!(
            "{key} must be a non-negative integer"
        ))),
    }
}

pub(crate) fn require_u64(body: &Value, key: &str) -> ApiResult<u64> {
    u64_field(body, key)?.ok_or_else(|| ApiError::validation(format!("{key} is required")))
}

pub(crate) fn bool_field(body: &Value, key: &str) -> bool {
    body.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Standard body for a committed transaction.
///
/// `tx` is the recovered hash, falling back to stdout when the tool printed
/// no recognizable hash; the raw streams ride along as diagnostics.
pub(crate) fn tx_response(outcome: TxOutcome) -> Json<Value> {
    let tx = outcome
        .tx_hash
        .clone()
        .or_else(|| (!outcome.stdout.is_empty()).then(|| outcome.stdout.clone()));
    Json(serde_json::json!({
        "ok": true,
        "tx": tx,
        "tx_hash": outcome.tx_hash,
        "stdout": outcome.stdout,
        "stderr": outcome.stderr,
        "result": outcome.result_json,
    }))
}

/// Standard body for a read-only query.
pub(crate) fn read_response(result: ReadResult) -> Json<Value> {
    Json(serde_json::json!({ "ok": true, "result": result.into_value() }))
}
