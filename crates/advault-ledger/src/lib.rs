//! AdVault ledger orchestrator.
//!
//! This crate is the single point of contact between the AdVault HTTP API and
//! the Stellar network. All ledger reads and writes go through the external
//! `stellar` command-line tool, which owns the local key store and performs
//! signing; this crate normalizes caller-supplied identifiers, resolves
//! signing aliases to addresses, spawns the tool with a bounded timeout, and
//! recovers a transaction hash from its human-oriented output.
//!
//! # Architecture
//!
//! ```text
//! HTTP handler
//!     │
//!     ▼
//! LedgerGateway ──── invoke_read / invoke_tx
//!     │                    │
//!     │              InvokeSpec (typed argv builder)
//!     │                    │
//! AliasResolver ──────► ToolRunner (port) ◄──── StellarCli (adapter)
//!                            │
//!                       parse::extract_tx_hash / parse_json_opt
//! ```
//!
//! Every invocation is independent and final once the tool exits zero; there
//! is no retry and no rollback at this layer. Multi-step workflows
//! ([`workflow::CampaignFlow`]) therefore report partial completion as a
//! first-class outcome instead of an error.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod codec;
pub mod domain;
pub mod gateway;
pub mod parse;
pub mod ports;
pub mod resolver;
pub mod workflow;

pub use adapters::cli::StellarCli;
pub use domain::config::{ConfigError, ContractIds, InvokeTimeouts, LedgerConfig, SigningAliases};
pub use domain::error::LedgerError;
pub use domain::invocation::InvokeSpec;
pub use gateway::{LedgerGateway, ReadResult, TxOutcome};
pub use ports::{ToolOutput, ToolRunner};
pub use resolver::AliasResolver;
pub use workflow::{
    CampaignCreation, CampaignFlow, CampaignOutcome, CreateCampaignRequest, DEPOSIT_REMEDIATION,
};

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
