//! Campaign creation workflow.
//!
//! Two ledger steps in strict program order: create the campaign, then
//! optionally fund it. Each step is an independent, already-final commit on
//! the ledger - there is no rollback once a step succeeds. The workflow
//! therefore never erases which steps committed: a deposit failure after a
//! successful creation is reported as [`CampaignOutcome::DepositFailed`],
//! a value carrying the committed creation hash, not an `Err`.

use crate::codec;
use crate::domain::error::LedgerError;
use crate::domain::invocation::InvokeSpec;
use crate::gateway::LedgerGateway;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// What callers should check when the funding step fails after creation.
pub const DEPOSIT_REMEDIATION: &[&str] = &[
    "confirm the configured token contract matches the vault's funding token",
    "confirm the signer holds enough of the funding token",
    "try the deposit directly via POST /v1/campaigns/:id/deposit",
];

/// Caller-supplied parameters for campaign creation.
#[derive(Debug, Clone, Default)]
pub struct CreateCampaignRequest {
    /// Signing alias for both steps. Defaults to the configured advertiser.
    pub source_alias: Option<String>,
    /// Campaign owner, alias or address. Defaults to the source alias.
    pub advertiser: Option<String>,
    /// Free-form label, raw 64-hex id, or absent for a random id.
    pub campaign_id: Option<String>,
    /// Requested initial funding. Zero means create only.
    pub initial_deposit: u64,
}

/// Result of a campaign creation run. `created_tx` is committed in every
/// variant of `outcome`.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignCreation {
    pub campaign_id: String,
    pub created_tx: Option<String>,
    #[serde(flatten)]
    pub outcome: CampaignOutcome,
}

/// Terminal state of the two-step workflow.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CampaignOutcome {
    /// Both steps committed.
    Completed { deposit_tx: Option<String> },
    /// No deposit was requested; single-step success.
    CreatedWithoutDeposit,
    /// The campaign exists on the ledger but the deposit step failed.
    DepositFailed { deposit_error: String },
}

impl CampaignOutcome {
    /// True when the workflow stopped after an irreversible partial commit.
    pub fn is_partial(&self) -> bool {
        matches!(self, CampaignOutcome::DepositFailed { .. })
    }
}

/// Sequences campaign creation against the operation gateway.
pub struct CampaignFlow {
    gateway: Arc<LedgerGateway>,
}

impl CampaignFlow {
    pub fn new(gateway: Arc<LedgerGateway>) -> Self {
        Self { gateway }
    }

    /// Create a campaign and optionally fund it.
    ///
    /// The creation step always carries a zero deposit so the two ledger
    /// operations stay independent; requested funds move only in the second
    /// step. A failure in step one fails the whole call with nothing
    /// committed. A failure in step two returns `Ok` with
    /// [`CampaignOutcome::DepositFailed`].
    pub async fn create(
        &self,
        request: CreateCampaignRequest,
    ) -> Result<CampaignCreation, LedgerError> {
        let config = self.gateway.config();
        let source = request
            .source_alias
            .unwrap_or_else(|| config.aliases.advertiser.clone());
        let advertiser_input = request.advertiser.unwrap_or_else(|| source.clone());

        let campaign_id = codec::campaign_id_hex(request.campaign_id.as_deref());
        let advertiser = self.gateway.resolver().resolve(&advertiser_input).await?;

        let created = self
            .gateway
            .invoke_tx(
                InvokeSpec::new(&source, &config.contracts.advault, "create_campaign")
                    .arg("campaign_id", &campaign_id)
                    .arg("advertiser", &advertiser)
                    .arg("initial_deposit", 0),
            )
            .await?;
        info!(campaign_id = %campaign_id, tx = ?created.tx_hash, "campaign created");

        if request.initial_deposit == 0 {
            return Ok(CampaignCreation {
                campaign_id,
                created_tx: created.tx_hash,
                outcome: CampaignOutcome::CreatedWithoutDeposit,
            });
        }

        let deposit = self
            .gateway
            .invoke_tx(
                InvokeSpec::new(&source, &config.contracts.advault, "deposit")
                    .arg("campaign_id", &campaign_id)
                    .arg("from", &advertiser)
                    .arg("amount", request.initial_deposit),
            )
            .await;

        match deposit {
            Ok(outcome) => Ok(CampaignCreation {
                campaign_id,
                created_tx: created.tx_hash,
                outcome: CampaignOutcome::Completed {
                    deposit_tx: outcome.tx_hash,
                },
            }),
            Err(e) => {
                warn!(
                    campaign_id = %campaign_id,
                    error = %e,
                    "deposit failed after campaign creation committed"
                );
                Ok(CampaignCreation {
                    campaign_id,
                    created_tx: created.tx_hash,
                    outcome: CampaignOutcome::DepositFailed {
                        deposit_error: e.to_string(),
                    },
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::{
        ContractIds, InvokeTimeouts, LedgerConfig, SigningAliases,
    };
    use crate::ports::{ToolOutput, ToolRunner};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    const ADDR: &str = "GA7QYNF7SOWQ3GLR2BGMW6LWBA7SAFKBX5WBKGOMGLBS3RVOS4ZF5HEX";

    fn config() -> Arc<LedgerConfig> {
        Arc::new(LedgerConfig {
            network: "testnet".into(),
            bin: "stellar".into(),
            contracts: ContractIds {
                advault: "CADV".into(),
                token: "CTOK".into(),
                registry: "CREG".into(),
            },
            aliases: SigningAliases::default(),
            admin_api_key: None,
            timeouts: InvokeTimeouts::default(),
        })
    }

    struct SequenceRunner {
        calls: Mutex<Vec<(String, Vec<String>)>>,
        script: Mutex<VecDeque<Result<ToolOutput, LedgerError>>>,
    }

    impl SequenceRunner {
        fn new(script: Vec<Result<ToolOutput, LedgerError>>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                script: Mutex::new(script.into()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn contexts(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(c, _)| c.clone())
                .collect()
        }
    }

    #[async_trait::async_trait]
    impl ToolRunner for SequenceRunner {
        async fn run(
            &self,
            context: &str,
            args: &[String],
            _timeout: Duration,
        ) -> Result<ToolOutput, LedgerError> {
            self.calls
                .lock()
                .unwrap()
                .push((context.to_string(), args.to_vec()));
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected extra invocation")
        }
    }

    fn tx_output(hash: &str) -> Result<ToolOutput, LedgerError> {
        Ok(ToolOutput {
            stdout: String::new(),
            stderr: format!("Signing transaction: {hash}"),
        })
    }

    fn flow(runner: Arc<SequenceRunner>) -> CampaignFlow {
        CampaignFlow::new(Arc::new(LedgerGateway::new(config(), runner)))
    }

    #[tokio::test]
    async fn test_zero_deposit_invokes_create_only() {
        let create_hash = "1".repeat(64);
        let runner = SequenceRunner::new(vec![tx_output(&create_hash)]);
        let result = flow(runner.clone())
            .create(CreateCampaignRequest {
                advertiser: Some(ADDR.into()),
                campaign_id: Some("promo-fall-2024".into()),
                initial_deposit: 0,
                ..Default::default()
            })
            .await
            .unwrap();

        // Address passthrough means exactly one subprocess call total.
        assert_eq!(runner.call_count(), 1);
        assert_eq!(runner.contexts(), vec!["create_campaign"]);
        assert_eq!(result.created_tx.as_deref(), Some(create_hash.as_str()));
        assert!(matches!(
            result.outcome,
            CampaignOutcome::CreatedWithoutDeposit
        ));
        // Deterministic id from the label.
        assert_eq!(
            result.campaign_id,
            codec::campaign_id_hex(Some("promo-fall-2024"))
        );
    }

    #[tokio::test]
    async fn test_creation_always_carries_zero_deposit() {
        let runner = SequenceRunner::new(vec![
            tx_output(&"1".repeat(64)),
            tx_output(&"2".repeat(64)),
        ]);
        flow(runner.clone())
            .create(CreateCampaignRequest {
                advertiser: Some(ADDR.into()),
                initial_deposit: 100,
                ..Default::default()
            })
            .await
            .unwrap();

        let calls = runner.calls.lock().unwrap();
        let create_argv = &calls[0].1;
        let deposit_pos = create_argv
            .iter()
            .position(|a| a == "--initial_deposit")
            .unwrap();
        assert_eq!(create_argv[deposit_pos + 1], "0");
        // Requested funds only move in the deposit step.
        let deposit_argv = &calls[1].1;
        let amount_pos = deposit_argv.iter().position(|a| a == "--amount").unwrap();
        assert_eq!(deposit_argv[amount_pos + 1], "100");
    }

    #[tokio::test]
    async fn test_full_success_returns_both_hashes() {
        let create_hash = "1".repeat(64);
        let deposit_hash = "2".repeat(64);
        let runner = SequenceRunner::new(vec![tx_output(&create_hash), tx_output(&deposit_hash)]);
        let result = flow(runner.clone())
            .create(CreateCampaignRequest {
                advertiser: Some(ADDR.into()),
                initial_deposit: 100,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(runner.contexts(), vec!["create_campaign", "deposit"]);
        assert_eq!(result.created_tx.as_deref(), Some(create_hash.as_str()));
        match result.outcome {
            CampaignOutcome::Completed { deposit_tx } => {
                assert_eq!(deposit_tx.as_deref(), Some(deposit_hash.as_str()));
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_deposit_failure_is_partial_outcome_not_error() {
        let create_hash = "1".repeat(64);
        let runner = SequenceRunner::new(vec![
            tx_output(&create_hash),
            Err(LedgerError::ToolFailed {
                context: "deposit".into(),
                stderr: "insufficient balance".into(),
            }),
        ]);
        let result = flow(runner.clone())
            .create(CreateCampaignRequest {
                advertiser: Some(ADDR.into()),
                initial_deposit: 100,
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(result.outcome.is_partial());
        // The committed creation hash survives the deposit failure.
        assert_eq!(result.created_tx.as_deref(), Some(create_hash.as_str()));
        match result.outcome {
            CampaignOutcome::DepositFailed { deposit_error } => {
                assert!(deposit_error.contains("insufficient balance"));
            }
            other => panic!("expected DepositFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_creation_failure_fails_whole_workflow() {
        let runner = SequenceRunner::new(vec![Err(LedgerError::ToolFailed {
            context: "create_campaign".into(),
            stderr: "protocol paused".into(),
        })]);
        let err = flow(runner.clone())
            .create(CreateCampaignRequest {
                advertiser: Some(ADDR.into()),
                initial_deposit: 100,
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, LedgerError::ToolFailed { .. }));
        // The deposit step is never attempted.
        assert_eq!(runner.call_count(), 1);
    }

    #[tokio::test]
    async fn test_alias_resolution_precedes_creation() {
        let runner = SequenceRunner::new(vec![
            Ok(ToolOutput {
                stdout: ADDR.to_string(),
                stderr: String::new(),
            }),
            tx_output(&"1".repeat(64)),
        ]);
        let result = flow(runner.clone())
            .create(CreateCampaignRequest {
                initial_deposit: 0,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(runner.contexts(), vec!["keys public-key", "create_campaign"]);
        assert!(matches!(
            result.outcome,
            CampaignOutcome::CreatedWithoutDeposit
        ));
        // The resolved address, not the alias, lands in the argv.
        let calls = runner.calls.lock().unwrap();
        let create_argv = &calls[1].1;
        let adv_pos = create_argv.iter().position(|a| a == "--advertiser").unwrap();
        assert_eq!(create_argv[adv_pos + 1], ADDR);
    }
}
