//! Vault protocol routes: public reads plus admin-only parameter changes.

use super::{body, read_response, require_u64, str_field, tx_response};
use crate::auth::require_admin;
use crate::error::ApiResult;
use crate::state::AppState;
use advault_ledger::InvokeSpec;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/config", get(get_config))
        .route("/paused", get(paused))
        .route("/init", post(init))
        .route("/pause", post(pause))
        .route("/unpause", post(unpause))
        .route("/price", post(set_price))
        .route("/splits", post(set_splits))
        .route("/fee", post(set_fee))
}

async fn get_config(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let config = state.config();
    let result = state
        .gateway
        .invoke_read(InvokeSpec::new(
            &config.aliases.admin,
            &config.contracts.advault,
            "get_config",
        ))
        .await?;
    Ok(read_response(result))
}

async fn paused(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let config = state.config();
    let result = state
        .gateway
        .invoke_read(InvokeSpec::new(
            &config.aliases.admin,
            &config.contracts.advault,
            "is_protocol_paused",
        ))
        .await?;
    Ok(read_response(result))
}

async fn init(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Option<Json<Value>>,
) -> ApiResult<Json<Value>> {
    require_admin(&state, &headers)?;
    let body = body(payload);
    let config = state.config();
    let admin = str_field(&body, "admin").unwrap_or_else(|| config.aliases.admin.clone());
    let token = str_field(&body, "token").unwrap_or_else(|| config.contracts.token.clone());
    let registry = str_field(&body, "verifier_registry")
        .unwrap_or_else(|| config.contracts.registry.clone());

    let outcome = state
        .gateway
        .invoke_tx(
            InvokeSpec::new(&config.aliases.admin, &config.contracts.advault, "init")
                .arg("admin", &admin)
                .arg("token", &token)
                .arg("verifier_registry", &registry)
                .arg("price_per_event", require_u64(&body, "price_per_event")?)
                .arg(
                    "split_publisher_bps",
                    require_u64(&body, "split_publisher_bps")?,
                )
                .arg("split_viewer_bps", require_u64(&body, "split_viewer_bps")?)
                .arg("fee_bps", require_u64(&body, "fee_bps")?),
        )
        .await?;
    Ok(tx_response(outcome))
}

async fn pause(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Json<Value>> {
    require_admin(&state, &headers)?;
    let config = state.config();
    let outcome = state
        .gateway
        .invoke_tx(InvokeSpec::new(
            &config.aliases.admin,
            &config.contracts.advault,
            "pause_protocol",
        ))
        .await?;
    Ok(tx_response(outcome))
}

async fn unpause(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Json<Value>> {
    require_admin(&state, &headers)?;
    let config = state.config();
    let outcome = state
        .gateway
        .invoke_tx(InvokeSpec::new(
            &config.aliases.admin,
            &config.contracts.advault,
            "unpause_protocol",
        ))
        .await?;
    Ok(tx_response(outcome))
}

async fn set_price(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Option<Json<Value>>,
) -> ApiResult<Json<Value>> {
    require_admin(&state, &headers)?;
    let body = body(payload);
    let config = state.config();
    let outcome = state
        .gateway
        .invoke_tx(
            InvokeSpec::new(
                &config.aliases.admin,
                &config.contracts.advault,
                "set_price_per_event",
            )
            .arg("new_price", require_u64(&body, "new_price")?),
        )
        .await?;
    Ok(tx_response(outcome))
}

async fn set_splits(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Option<Json<Value>>,
) -> ApiResult<Json<Value>> {
    require_admin(&state, &headers)?;
    let body = body(payload);
    let config = state.config();
    let outcome = state
        .gateway
        .invoke_tx(
            InvokeSpec::new(
                &config.aliases.admin,
                &config.contracts.advault,
                "set_splits",
            )
            .arg("pub_bps", require_u64(&body, "pub_bps")?)
            .arg("view_bps", require_u64(&body, "view_bps")?),
        )
        .await?;
    Ok(tx_response(outcome))
}

async fn set_fee(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Option<Json<Value>>,
) -> ApiResult<Json<Value>> {
    require_admin(&state, &headers)?;
    let body = body(payload);
    let config = state.config();
    let outcome = state
        .gateway
        .invoke_tx(
            InvokeSpec::new(
                &config.aliases.admin,
                &config.contracts.advault,
                "set_fee_bps",
            )
            .arg("new_fee", require_u64(&body, "new_fee")?),
        )
        .await?;
    Ok(tx_response(outcome))
}
