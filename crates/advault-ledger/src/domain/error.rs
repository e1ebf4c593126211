//! Error taxonomy for ledger orchestration.
//!
//! The split matters to callers: validation and authorization errors are
//! raised before any subprocess is spawned, resolution and tool errors carry
//! the subprocess diagnostics (which are usually actionable, e.g. an
//! insufficient-balance message), and nothing here is retried automatically -
//! an invocation has unknown idempotency, so retry is the caller's call.

use std::time::Duration;

/// Errors produced by the ledger orchestration layer.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Malformed identifier, address, or amount. Raised before any external
    /// call is made.
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid admin shared secret.
    #[error("unauthorized")]
    Unauthorized,

    /// Alias lookup through the key store failed.
    #[error("[stellar:keys public-key] {alias}: {detail}")]
    Resolution {
        /// The alias that failed to resolve.
        alias: String,
        /// Subprocess stderr, or the spawn error.
        detail: String,
    },

    /// The external tool exited non-zero or could not be spawned.
    #[error("[stellar:{context}] {stderr}")]
    ToolFailed {
        /// The function or subcommand being invoked.
        context: String,
        /// Subprocess stderr, or the spawn error when there is none.
        stderr: String,
    },

    /// The external tool exceeded its deadline and was killed.
    #[error("[stellar:{context}] timed out after {timeout:?}")]
    ToolTimedOut {
        /// The function or subcommand being invoked.
        context: String,
        /// The deadline that was exceeded.
        timeout: Duration,
    },

    /// Anything that indicates a bug rather than a caller mistake.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Suggested HTTP status for this error.
    ///
    /// Tool failures map to 400 rather than 500: the diagnostic text almost
    /// always describes a caller-fixable condition (bad argument, unfunded
    /// signer), and the invocation itself never started on a 4xx path.
    pub fn status(&self) -> u16 {
        match self {
            LedgerError::Validation(_) => 400,
            LedgerError::Unauthorized => 401,
            LedgerError::Resolution { .. } => 400,
            LedgerError::ToolFailed { .. } => 400,
            LedgerError::ToolTimedOut { .. } => 400,
            LedgerError::Internal(_) => 500,
        }
    }
}
