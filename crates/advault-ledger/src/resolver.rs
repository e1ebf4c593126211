//! Alias resolution.
//!
//! Handlers accept either a configured signing alias ("advertiser") or a full
//! public address. The contracts only take addresses, so aliases go through
//! the tool's key store. An input that already has the address shape is
//! returned untouched - that path must not spawn a subprocess.

use crate::codec;
use crate::domain::error::LedgerError;
use crate::ports::ToolRunner;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Resolves signing aliases to public addresses via `keys public-key`.
pub struct AliasResolver {
    runner: Arc<dyn ToolRunner>,
    timeout: Duration,
}

impl AliasResolver {
    pub fn new(runner: Arc<dyn ToolRunner>, timeout: Duration) -> Self {
        Self { runner, timeout }
    }

    /// Resolve `alias_or_addr` to a public address.
    ///
    /// Address-shaped input is a no-op. Anything else is looked up in the
    /// tool's local key store; lookup failures surface as
    /// [`LedgerError::Resolution`] with the subprocess diagnostics.
    pub async fn resolve(&self, alias_or_addr: &str) -> Result<String, LedgerError> {
        if alias_or_addr.is_empty() {
            return Err(LedgerError::Validation("empty address".into()));
        }
        if codec::is_address(alias_or_addr) {
            return Ok(alias_or_addr.to_string());
        }

        debug!(alias = alias_or_addr, "resolving alias via key store");
        let args = vec![
            "keys".to_string(),
            "public-key".to_string(),
            alias_or_addr.to_string(),
        ];
        let output = self
            .runner
            .run("keys public-key", &args, self.timeout)
            .await
            .map_err(|e| LedgerError::Resolution {
                alias: alias_or_addr.to_string(),
                detail: match e {
                    LedgerError::ToolFailed { stderr, .. } => stderr,
                    other => other.to_string(),
                },
            })?;
        Ok(output.stdout)
    }
}
