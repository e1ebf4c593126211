//! `stellar` CLI adapter for the [`ToolRunner`] port.
//!
//! Spawns the tool with an exact argv (no shell in between), pipes stdio,
//! and enforces the deadline by killing the process. `kill_on_drop` also
//! takes the subprocess down if the invocation future is dropped, e.g. when
//! the HTTP client disconnects mid-call.

use crate::domain::error::LedgerError;
use crate::ports::{ToolOutput, ToolRunner};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Invokes the external ledger CLI as a subprocess.
#[derive(Debug, Clone)]
pub struct StellarCli {
    bin: String,
}

impl StellarCli {
    /// Create an invoker for the given binary name or path.
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

impl Default for StellarCli {
    fn default() -> Self {
        Self::new("stellar")
    }
}

#[async_trait::async_trait]
impl ToolRunner for StellarCli {
    async fn run(
        &self,
        context: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<ToolOutput, LedgerError> {
        debug!(context, args = ?args, "spawning ledger tool");

        let mut command = Command::new(&self.bin);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = command.spawn().map_err(|e| LedgerError::ToolFailed {
            context: context.to_string(),
            stderr: format!("failed to spawn {}: {e}", self.bin),
        })?;

        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| LedgerError::ToolFailed {
                context: context.to_string(),
                stderr: e.to_string(),
            })?,
            Err(_) => {
                warn!(context, ?timeout, "ledger tool timed out, killing");
                return Err(LedgerError::ToolTimedOut {
                    context: context.to_string(),
                    timeout,
                });
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            // The tool's stderr is the actionable part; fall back to the
            // exit status when it printed nothing.
            let detail = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(LedgerError::ToolFailed {
                context: context.to_string(),
                stderr: detail,
            });
        }

        debug!(context, stdout_len = stdout.len(), "ledger tool succeeded");
        Ok(ToolOutput { stdout, stderr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_success_captures_trimmed_stdout() {
        let runner = StellarCli::new("echo");
        let out = runner
            .run("echo", &args(&["hello"]), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(out.stdout, "hello");
        assert_eq!(out.stderr, "");
    }

    #[tokio::test]
    async fn test_missing_binary_is_tool_failure() {
        let runner = StellarCli::new("definitely-not-a-real-binary");
        let err = runner
            .run("get_campaign", &args(&[]), Duration::from_secs(5))
            .await
            .unwrap_err();
        match err {
            LedgerError::ToolFailed { context, stderr } => {
                assert_eq!(context, "get_campaign");
                assert!(stderr.contains("failed to spawn"));
            }
            other => panic!("expected ToolFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_nonzero_exit_carries_stderr() {
        // sh -c writes to stderr and exits 3
        let runner = StellarCli::new("sh");
        let err = runner
            .run(
                "deposit",
                &args(&["-c", "echo broken >&2; exit 3"]),
                Duration::from_secs(5),
            )
            .await
            .unwrap_err();
        match err {
            LedgerError::ToolFailed { context, stderr } => {
                assert_eq!(context, "deposit");
                assert!(stderr.contains("broken"));
            }
            other => panic!("expected ToolFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_deadline_kills_and_names_function() {
        let runner = StellarCli::new("sleep");
        let err = runner
            .run("create_campaign", &args(&["5"]), Duration::from_millis(50))
            .await
            .unwrap_err();
        match err {
            LedgerError::ToolTimedOut { context, .. } => {
                assert_eq!(context, "create_campaign");
            }
            other => panic!("expected ToolTimedOut, got {other:?}"),
        }
    }
}
