//! Ledger configuration with validation.
//!
//! Loaded from the environment once at process start and treated as immutable
//! for the process lifetime; components receive it by `Arc`.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Configuration for the ledger orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Network passphrase alias passed to `--network` (e.g. "testnet").
    pub network: String,
    /// Name or path of the external tool binary.
    pub bin: String,
    /// Deployed contract identifiers.
    pub contracts: ContractIds,
    /// Signing identities known to the tool's local key store.
    pub aliases: SigningAliases,
    /// Shared secret for privileged routes (None = privileged routes
    /// unusable, never open).
    #[serde(skip_serializing)]
    pub admin_api_key: Option<String>,
    /// Subprocess deadlines.
    pub timeouts: InvokeTimeouts,
}

/// The three deployed contracts the orchestrator talks to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractIds {
    /// Main campaign vault contract.
    pub advault: String,
    /// Fungible token (SAC) contract used for deposits and payouts.
    pub token: String,
    /// Verifier registry contract.
    pub registry: String,
}

/// Per-role signing aliases, resolvable via the tool's key store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SigningAliases {
    pub admin: String,
    pub advertiser: String,
    pub publisher: String,
    pub viewer: String,
    pub verifier: String,
}

impl Default for SigningAliases {
    fn default() -> Self {
        Self {
            admin: "admin".to_string(),
            advertiser: "advertiser".to_string(),
            publisher: "publisher".to_string(),
            viewer: "viewer".to_string(),
            verifier: "verifier".to_string(),
        }
    }
}

/// Subprocess deadlines. Transactional invocations wait for network
/// submission, so they get a much longer leash than local key lookups.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct InvokeTimeouts {
    /// Deadline for `contract invoke` calls.
    #[serde(with = "secs")]
    pub invoke: Duration,
    /// Deadline for `keys public-key` lookups.
    #[serde(with = "secs")]
    pub resolve: Duration,
}

impl Default for InvokeTimeouts {
    fn default() -> Self {
        Self {
            invoke: Duration::from_secs(120),
            resolve: Duration::from_secs(10),
        }
    }
}

impl LedgerConfig {
    /// Load configuration from the environment.
    ///
    /// Required: `STELLAR_NETWORK`, `ADVAULT_CONTRACT`, `TOKEN_CONTRACT`,
    /// `VERIFIER_REGISTRY_CONTRACT`. Optional: `STELLAR_BIN`, the five
    /// `*_ALIAS` overrides, and `API_KEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            network: require("STELLAR_NETWORK")?,
            bin: env::var("STELLAR_BIN").unwrap_or_else(|_| "stellar".to_string()),
            contracts: ContractIds {
                advault: require("ADVAULT_CONTRACT")?,
                token: require("TOKEN_CONTRACT")?,
                registry: require("VERIFIER_REGISTRY_CONTRACT")?,
            },
            aliases: SigningAliases {
                admin: var_or("ADMIN_ALIAS", "admin"),
                advertiser: var_or("ADVERTISER_ALIAS", "advertiser"),
                publisher: var_or("PUBLISHER_ALIAS", "publisher"),
                viewer: var_or("VIEWER_ALIAS", "viewer"),
                verifier: var_or("VERIFIER_ALIAS", "verifier"),
            },
            admin_api_key: env::var("API_KEY").ok().filter(|k| !k.is_empty()),
            timeouts: InvokeTimeouts::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.network.trim().is_empty() {
            return Err(ConfigError::Invalid("network cannot be empty".into()));
        }
        if self.bin.trim().is_empty() {
            return Err(ConfigError::Invalid("tool binary cannot be empty".into()));
        }
        for (name, id) in [
            ("advault", &self.contracts.advault),
            ("token", &self.contracts.token),
            ("registry", &self.contracts.registry),
        ] {
            if id.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "{name} contract id cannot be empty"
                )));
            }
        }
        if self.timeouts.invoke.is_zero() || self.timeouts.resolve.is_zero() {
            return Err(ConfigError::Invalid("timeouts cannot be zero".into()));
        }
        Ok(())
    }
}

fn require(key: &str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::Missing(key.to_string()))
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    #[error("missing configuration: {0}")]
    Missing(String),
    /// A value is present but invalid.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

mod secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LedgerConfig {
        LedgerConfig {
            network: "testnet".into(),
            bin: "stellar".into(),
            contracts: ContractIds {
                advault: "CADV".into(),
                token: "CTOK".into(),
                registry: "CREG".into(),
            },
            aliases: SigningAliases::default(),
            admin_api_key: Some("secret".into()),
            timeouts: InvokeTimeouts::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_empty_network_rejected() {
        let mut config = sample();
        config.network = " ".into();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_empty_contract_rejected() {
        let mut config = sample();
        config.contracts.token = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = sample();
        config.timeouts.invoke = Duration::ZERO;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_default_aliases() {
        let aliases = SigningAliases::default();
        assert_eq!(aliases.admin, "admin");
        assert_eq!(aliases.verifier, "verifier");
    }
}
