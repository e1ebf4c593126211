//! Operation gateway: the contract route handlers program against.
//!
//! Two entry points: [`LedgerGateway::invoke_read`] for synchronous queries
//! with no signature and no side effect, and [`LedgerGateway::invoke_tx`] for
//! signed, state-changing invocations. Both render an [`InvokeSpec`] into the
//! tool's argv and hand it to the [`ToolRunner`] port.

use crate::domain::config::LedgerConfig;
use crate::domain::error::LedgerError;
use crate::domain::invocation::InvokeSpec;
use crate::parse;
use crate::ports::ToolRunner;
use crate::resolver::AliasResolver;
use serde::Serialize;
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::info;

/// Result of a read-only invocation: structured when stdout parsed as JSON,
/// raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadResult {
    Json(serde_json::Value),
    Text(String),
}

impl ReadResult {
    /// Collapse into a JSON value, wrapping raw text as a string.
    pub fn into_value(self) -> serde_json::Value {
        match self {
            ReadResult::Json(value) => value,
            ReadResult::Text(text) => serde_json::Value::String(text),
        }
    }
}

/// Result of a signed, submitted invocation.
///
/// `tx_hash` is `None` when the tool reported success without printing a
/// recognizable hash; callers must treat that as "committed, identifier
/// unrecovered", not as failure.
#[derive(Debug, Clone, Serialize)]
pub struct TxOutcome {
    pub tx_hash: Option<String>,
    pub stdout: String,
    pub stderr: String,
    pub result_json: Option<serde_json::Value>,
}

/// Gateway over the external ledger tool.
pub struct LedgerGateway {
    config: Arc<LedgerConfig>,
    runner: Arc<dyn ToolRunner>,
    resolver: AliasResolver,
}

impl LedgerGateway {
    pub fn new(config: Arc<LedgerConfig>, runner: Arc<dyn ToolRunner>) -> Self {
        let resolver = AliasResolver::new(Arc::clone(&runner), config.timeouts.resolve);
        Self {
            config,
            runner,
            resolver,
        }
    }

    /// Static configuration (aliases, contract ids, network).
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Alias-to-address resolver sharing this gateway's runner.
    pub fn resolver(&self) -> &AliasResolver {
        &self.resolver
    }

    /// Invoke a contract function as a query: no submission, no transaction
    /// hash. Returns stdout, parsed as JSON when possible.
    pub async fn invoke_read(&self, spec: InvokeSpec) -> Result<ReadResult, LedgerError> {
        let argv = spec.to_argv(&self.config.network);
        let output = self
            .runner
            .run(spec.function(), &argv, self.config.timeouts.invoke)
            .await?;
        Ok(match parse::parse_json_opt(&output.stdout) {
            Some(value) => ReadResult::Json(value),
            None => ReadResult::Text(output.stdout),
        })
    }

    /// Invoke a contract function as a signed, submitted transaction and
    /// recover its hash from the tool's output.
    pub async fn invoke_tx(&self, spec: InvokeSpec) -> Result<TxOutcome, LedgerError> {
        let spec = spec.submit();
        let function = spec.function().to_string();
        let argv = spec.to_argv(&self.config.network);
        let output = self
            .runner
            .run(&function, &argv, self.config.timeouts.invoke)
            .await?;

        // The hash can land on either stream depending on tool version.
        let combined = format!("{}\n{}", output.stdout, output.stderr);
        let tx_hash = parse::extract_tx_hash(&combined);
        info!(function = %function, tx_hash = ?tx_hash, "ledger invocation committed");

        Ok(TxOutcome {
            tx_hash,
            result_json: parse::parse_json_opt(&output.stdout),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    /// Check the caller-supplied shared secret for a privileged operation.
    ///
    /// Runs before any normalization or external call. With no secret
    /// configured, privileged operations are always rejected.
    pub fn guard_admin(&self, provided: Option<&str>) -> Result<(), LedgerError> {
        let expected = self
            .config
            .admin_api_key
            .as_deref()
            .ok_or(LedgerError::Unauthorized)?;
        let provided = provided.ok_or(LedgerError::Unauthorized)?;
        if constant_time_eq(provided, expected) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized)
        }
    }
}

/// Constant-time string comparison for the shared secret.
fn constant_time_eq(a: &str, b: &str) -> bool {
    a.len() == b.len() && bool::from(a.as_bytes().ct_eq(b.as_bytes()))
}
