//! Funding token passthrough routes.

use super::{body, require_str, require_u64, str_field, str_field_any, tx_response};
use crate::error::ApiResult;
use crate::state::AppState;
use advault_ledger::{codec, InvokeSpec};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/balance/:addr", get(balance))
        .route("/transfer", post(transfer))
}

async fn balance(
    State(state): State<AppState>,
    Path(addr): Path<String>,
) -> ApiResult<Json<Value>> {
    let config = state.config();
    codec::validate_address(&addr)?;
    let result = state
        .gateway
        .invoke_read(
            InvokeSpec::new(&config.aliases.admin, &config.contracts.token, "balance")
                .arg("id", &addr),
        )
        .await?;
    Ok(Json(serde_json::json!({
        "ok": true,
        "address": addr,
        "balance": result.into_value(),
    })))
}

async fn transfer(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> ApiResult<Json<Value>> {
    let body = body(payload);
    let config = state.config();
    let source = str_field_any(&body, &["fromSourceAlias", "source_alias"])
        .unwrap_or_else(|| config.aliases.advertiser.clone());
    let from_input = str_field(&body, "from").unwrap_or_else(|| source.clone());
    let to = require_str(&body, "to")?;
    let amount = require_u64(&body, "amount")?;

    let from = state.gateway.resolver().resolve(&from_input).await?;

    let outcome = state
        .gateway
        .invoke_tx(
            InvokeSpec::new(&source, &config.contracts.token, "transfer")
                .arg("from", &from)
                .arg("to_muxed", &to)
                .arg("amount", amount),
        )
        .await?;
    Ok(tx_response(outcome))
}
