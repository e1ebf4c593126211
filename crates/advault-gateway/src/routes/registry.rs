//! Verifier registry routes: verifier and publisher allow-lists.
//!
//! Mutations are admin-guarded; reads are open. Publisher addresses are
//! validated at this boundary, verifier inputs may be aliases and pass
//! through to the tool's own key store.

use super::{body, bool_field, read_response, str_field, tx_response};
use crate::auth::require_admin;
use crate::error::ApiResult;
use crate::state::AppState;
use advault_ledger::{codec, InvokeSpec};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/init", post(init))
        .route("/pause", post(pause))
        .route("/unpause", post(unpause))
        .route("/paused", get(paused))
        .route("/owner", get(owner))
        .route("/verifiers", post(add_verifier))
        .route("/verifiers/:addr", get(is_verifier).delete(remove_verifier))
        .route("/publishers", post(set_publisher_status))
        .route("/publishers/:addr", get(is_publisher_allowed))
}

async fn init(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Option<Json<Value>>,
) -> ApiResult<Json<Value>> {
    require_admin(&state, &headers)?;
    let body = body(payload);
    let config = state.config();
    let owner = str_field(&body, "owner").unwrap_or_else(|| config.aliases.admin.clone());

    let outcome = state
        .gateway
        .invoke_tx(
            InvokeSpec::new(&config.aliases.admin, &config.contracts.registry, "init")
                .arg("owner", &owner),
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
            &config.contracts.registry,
            "pause",
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
            &config.contracts.registry,
            "unpause",
        ))
        .await?;
    Ok(tx_response(outcome))
}

async fn paused(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let config = state.config();
    let result = state
        .gateway
        .invoke_read(InvokeSpec::new(
            &config.aliases.admin,
            &config.contracts.registry,
            "is_paused",
        ))
        .await?;
    Ok(read_response(result))
}

async fn owner(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let config = state.config();
    let result = state
        .gateway
        .invoke_read(InvokeSpec::new(
            &config.aliases.admin,
            &config.contracts.registry,
            "owner",
        ))
        .await?;
    Ok(read_response(result))
}

async fn add_verifier(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Option<Json<Value>>,
) -> ApiResult<Json<Value>> {
    require_admin(&state, &headers)?;
    let body = body(payload);
    let config = state.config();
    let addr = str_field(&body, "addr").unwrap_or_else(|| config.aliases.verifier.clone());

    let outcome = state
        .gateway
        .invoke_tx(
            InvokeSpec::new(
                &config.aliases.admin,
                &config.contracts.registry,
                "add_verifier",
            )
            .arg("v", &addr),
        )
        .await?;
    Ok(tx_response(outcome))
}

async fn remove_verifier(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(addr): Path<String>,
) -> ApiResult<Json<Value>> {
    require_admin(&state, &headers)?;
    let config = state.config();
    let outcome = state
        .gateway
        .invoke_tx(
            InvokeSpec::new(
                &config.aliases.admin,
                &config.contracts.registry,
                "remove_verifier",
            )
            .arg("v", &addr),
        )
        .await?;
    Ok(tx_response(outcome))
}

async fn is_verifier(
    State(state): State<AppState>,
    Path(addr): Path<String>,
) -> ApiResult<Json<Value>> {
    let config = state.config();
    let result = state
        .gateway
        .invoke_read(
            InvokeSpec::new(
                &config.aliases.admin,
                &config.contracts.registry,
                "is_verifier",
            )
            .arg("v", &addr),
        )
        .await?;
    Ok(read_response(result))
}

async fn set_publisher_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Option<Json<Value>>,
) -> ApiResult<Json<Value>> {
    require_admin(&state, &headers)?;
    let body = body(payload);
    let config = state.config();
    let addr = super::require_str(&body, "addr")?;
    codec::validate_address(&addr)?;
    let allowed = bool_field(&body, "allowed");

    let outcome = state
        .gateway
        .invoke_tx(
            InvokeSpec::new(
                &config.aliases.admin,
                &config.contracts.registry,
                "set_publisher_status",
            )
            .arg("p", &addr)
            .arg("allowed", allowed),
        )
        .await?;
    Ok(tx_response(outcome))
}

async fn is_publisher_allowed(
    State(state): State<AppState>,
    Path(addr): Path<String>,
) -> ApiResult<Json<Value>> {
    let config = state.config();
    codec::validate_address(&addr)?;
    let result = state
        .gateway
        .invoke_read(
            InvokeSpec::new(
                &config.aliases.admin,
                &config.contracts.registry,
                "is_publisher_allowed",
            )
            .arg("p", &addr),
        )
        .await?;
    Ok(read_response(result))
}
