//! Outbound port to the external ledger tool.
//!
//! Every component that needs the tool goes through [`ToolRunner`]; nothing
//! else in the crate spawns a process. Tests substitute a recording mock to
//! assert how many invocations an operation performs.

use crate::domain::error::LedgerError;
use std::time::Duration;

/// Captured output of a completed tool invocation.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// Trimmed UTF-8 standard output.
    pub stdout: String,
    /// Trimmed UTF-8 standard error. The tool writes progress lines here
    /// even on success.
    pub stderr: String,
}

/// Runs the external ledger tool with an exact argument vector and a
/// deadline.
///
/// Contract: exit code zero resolves to [`ToolOutput`]; a non-zero exit maps
/// to [`LedgerError::ToolFailed`] carrying stderr; exceeding the deadline
/// kills the process and maps to [`LedgerError::ToolTimedOut`]. `context`
/// names the operation for diagnostics. Implementations never retry.
#[async_trait::async_trait]
pub trait ToolRunner: Send + Sync {
    async fn run(
        &self,
        context: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<ToolOutput, LedgerError>;
}
