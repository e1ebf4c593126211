//! AdVault HTTP API.
//!
//! REST surface over [`advault_ledger`]: campaign lifecycle, vault and
//! registry administration, token passthrough, and attestation submission.
//! Handlers stay thin - identifier normalization, alias resolution, and the
//! actual tool invocations all live in the ledger crate; this crate maps
//! HTTP bodies in and ledger errors out.
//!
//! # Routes
//!
//! ```text
//! GET  /healthz
//! POST /v1/campaigns                 create (+ optional funding, 409 on partial)
//! GET  /v1/campaigns/:id             get_campaign
//! POST /v1/campaigns/:id/deposit     deposit
//! POST /v1/campaigns/:id/close       close_campaign
//! POST /v1/campaigns/:id/refund      refund_unspent
//! GET  /v1/advault/config|paused     reads
//! POST /v1/advault/...               admin ops (x-api-key)
//! ...  /v1/registry/...              verifier/publisher allow-lists
//! GET  /v1/token/balance/:addr       balance
//! POST /v1/token/transfer            transfer
//! POST /v1/events/submit             attestation submission
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod auth;
pub mod error;
pub mod routes;
pub mod service;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use service::{serve, ServerConfig};
pub use state::AppState;
