//! Campaign lifecycle routes.
//!
//! Creation goes through [`CampaignFlow`] and surfaces its partial-failure
//! outcome as HTTP 409 with the committed creation hash and remediation
//! hints; the remaining routes are single-invocation passthroughs.

use super::{body, require_u64, str_field, str_field_any, tx_response};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use advault_ledger::{
    codec, CampaignOutcome, CreateCampaignRequest, InvokeSpec, DEPOSIT_REMEDIATION,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/:id", get(get_campaign))
        .route("/:id/deposit", post(deposit))
        .route("/:id/close", post(close))
        .route("/:id/refund", post(refund))
}

async fn create(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> ApiResult<Response> {
    let body = body(payload);
    let request = CreateCampaignRequest {
        source_alias: str_field_any(&body, &["advertiserSourceAlias", "source_alias"]),
        advertiser: str_field(&body, "advertiser"),
        campaign_id: str_field(&body, "campaign_id"),
        initial_deposit: super::u64_field(&body, "initial_deposit")?.unwrap_or(0),
    };

    let creation = state.flow.create(request).await?;
    let partial = creation.outcome.is_partial();
    let without_deposit = matches!(creation.outcome, CampaignOutcome::CreatedWithoutDeposit);

    let mut value = serde_json::to_value(&creation)
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    if let Value::Object(map) = &mut value {
        map.insert("ok".into(), Value::Bool(!partial));
        if without_deposit {
            map.insert(
                "note".into(),
                Value::String("campaign created without initial deposit".into()),
            );
        }
        if partial {
            map.insert("remediation".into(), serde_json::json!(DEPOSIT_REMEDIATION));
        }
    }

    let status = if partial {
        StatusCode::CONFLICT
    } else {
        StatusCode::OK
    };
    Ok((status, Json(value)).into_response())
}

async fn get_campaign(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let config = state.config();
    let campaign_id = codec::campaign_id_hex(Some(&id));
    let result = state
        .gateway
        .invoke_read(
            InvokeSpec::new(
                &config.aliases.admin,
                &config.contracts.advault,
                "get_campaign",
            )
            .arg("campaign_id", &campaign_id),
        )
        .await?;
    Ok(Json(serde_json::json!({
        "ok": true,
        "campaign_id": campaign_id,
        "result": result.into_value(),
    })))
}

async fn deposit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<Value>>,
) -> ApiResult<Json<Value>> {
    let body = body(payload);
    let config = state.config();
    let source = str_field_any(&body, &["fromSourceAlias", "source_alias"])
        .unwrap_or_else(|| config.aliases.advertiser.clone());
    let from_input = str_field(&body, "from").unwrap_or_else(|| source.clone());
    let amount = require_u64(&body, "amount")?;

    let campaign_id = codec::campaign_id_hex(Some(&id));
    let from = state.gateway.resolver().resolve(&from_input).await?;

    let outcome = state
        .gateway
        .invoke_tx(
            InvokeSpec::new(&source, &config.contracts.advault, "deposit")
                .arg("campaign_id", &campaign_id)
                .arg("from", &from)
                .arg("amount", amount),
        )
        .await?;
    Ok(tx_response(outcome))
}

async fn close(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<Value>>,
) -> ApiResult<Json<Value>> {
    let body = body(payload);
    let config = state.config();
    let reason = str_field(&body, "reason").unwrap_or_else(|| "test_completed".to_string());
    let campaign_id = codec::campaign_id_hex(Some(&id));

    let outcome = state
        .gateway
        .invoke_tx(
            InvokeSpec::new(
                &config.aliases.admin,
                &config.contracts.advault,
                "close_campaign",
            )
            .arg("campaign_id", &campaign_id)
            .arg("reason", &reason),
        )
        .await?;
    Ok(tx_response(outcome))
}

async fn refund(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<Value>>,
) -> ApiResult<Json<Value>> {
    let body = body(payload);
    let config = state.config();
    let to_input =
        str_field(&body, "to").unwrap_or_else(|| config.aliases.advertiser.clone());
    let campaign_id = codec::campaign_id_hex(Some(&id));
    let to = state.gateway.resolver().resolve(&to_input).await?;

    let outcome = state
        .gateway
        .invoke_tx(
            InvokeSpec::new(
                &config.aliases.admin,
                &config.contracts.advault,
                "refund_unspent",
            )
            .arg("campaign_id", &campaign_id)
            .arg("to", &to),
        )
        .await?;
    Ok(tx_response(outcome))
}
