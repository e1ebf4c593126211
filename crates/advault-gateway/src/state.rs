//! Application state shared across handlers.

use advault_ledger::{CampaignFlow, LedgerConfig, LedgerGateway, ToolRunner};
use std::sync::Arc;

/// Immutable per-process state: the operation gateway and the campaign
/// workflow built on top of it. Cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<LedgerGateway>,
    pub flow: Arc<CampaignFlow>,
}

impl AppState {
    /// Wire the state from configuration and a tool runner implementation.
    pub fn new(config: Arc<LedgerConfig>, runner: Arc<dyn ToolRunner>) -> Self {
        let gateway = Arc::new(LedgerGateway::new(config, runner));
        let flow = Arc::new(CampaignFlow::new(Arc::clone(&gateway)));
        Self { gateway, flow }
    }

    /// Static ledger configuration.
    pub fn config(&self) -> &LedgerConfig {
        self.gateway.config()
    }
}
