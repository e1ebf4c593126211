//! Attestation submission.
//!
//! Builds the signed attestation payload from the caller's loose input:
//! identifiers are normalized to `0x`-prefixed 32-byte hex, participant
//! addresses are validated, the event kind becomes a lowercase symbol, and
//! the timestamp defaults to the current unix time.

use super::{body, str_field_any};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use advault_ledger::{codec, InvokeSpec};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

pub fn router() -> Router<AppState> {
    Router::new().route("/submit", post(submit))
}

async fn submit(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> ApiResult<Json<Value>> {
    let body = body(payload);
    let config = state.config();
    let source = str_field_any(&body, &["verifierSourceAlias", "source_alias"])
        .unwrap_or_else(|| config.aliases.verifier.clone());
    let att = body
        .get("att")
        .filter(|v| v.is_object())
        .ok_or_else(|| ApiError::validation("att is required"))?;

    let publisher = att_addr(att, "publisher")?;
    let viewer = att_addr(att, "viewer")?;
    let timestamp = match super::u64_field(att, "timestamp")? {
        Some(ts) => ts,
        None => chrono::Utc::now().timestamp() as u64,
    };

    let attestation = serde_json::json!({
        "event_id": prefixed_hex(att, "event_id"),
        "campaign_id": prefixed_hex(att, "campaign_id"),
        "publisher": publisher,
        "viewer": viewer,
        "event_kind": codec::event_symbol(att.get("event_kind").and_then(Value::as_str)),
        "timestamp": timestamp,
        "nonce": prefixed_hex(att, "nonce"),
    });
    let att_json = serde_json::to_string(&attestation)
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let verifier = state.gateway.resolver().resolve(&source).await?;
    let outcome = state
        .gateway
        .invoke_tx(
            InvokeSpec::new(&source, &config.contracts.advault, "submit_event")
                .arg("att", &att_json)
                .arg("verifier", &verifier),
        )
        .await?;

    let Json(mut response) = super::tx_response(outcome);
    if let Value::Object(map) = &mut response {
        map.insert("attestation".into(), attestation);
    }
    Ok(Json(response))
}

fn att_addr(att: &Value, key: &str) -> ApiResult<String> {
    let raw = att
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::validation(format!("att.{key} is required")))?;
    Ok(codec::validate_address(raw)?.to_string())
}

/// Normalize an optional identifier field to contract wire form.
fn prefixed_hex(att: &Value, key: &str) -> String {
    format!(
        "0x{}",
        codec::campaign_id_hex(att.get(key).and_then(Value::as_str))
    )
}
