//! Configuration types for pumpcap

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::MAX_TOKEN_DECIMALS;
use crate::{Error, Network};

/// Env var overriding the RPC URL
pub const RPC_URL_ENV: &str = "PUMPCAP_RPC_URL";

/// Env var overriding the oracle base URL
pub const ORACLE_URL_ENV: &str = "PUMPCAP_ORACLE_URL";

/// Solana RPC connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// RPC URL (e.g., "http://127.0.0.1:8899"). Falls back to the
    /// network's public endpoint when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Commitment level used for account reads
    #[serde(default = "default_commitment")]
    pub commitment: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_commitment() -> String {
    "confirmed".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: None,
            commitment: default_commitment(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RpcConfig {
    /// Effective RPC URL for a network
    pub fn url_for(&self, network: Network) -> &str {
        self.url
            .as_deref()
            .unwrap_or_else(|| network.default_rpc_url())
    }
}

/// Price oracle configuration (DIA asset quotation API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    #[serde(default = "default_oracle_base_url")]
    pub base_url: String,

    /// Blockchain segment of the SOL/USD feed
    #[serde(default = "default_feed_blockchain")]
    pub blockchain: String,

    /// Asset segment of the SOL/USD feed (native asset address)
    #[serde(default = "default_feed_asset")]
    pub asset: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_oracle_base_url() -> String {
    "https://api.diadata.org/v1/assetQuotation".to_string()
}

fn default_feed_blockchain() -> String {
    "Solana".to_string()
}

fn default_feed_asset() -> String {
    "0x0000000000000000000000000000000000000000".to_string()
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            base_url: default_oracle_base_url(),
            blockchain: default_feed_blockchain(),
            asset: default_feed_asset(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Market-cap computation defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Total supply in whole tokens
    #[serde(default = "default_total_supply")]
    pub total_supply: u64,

    #[serde(default = "default_token_decimals")]
    pub token_decimals: u8,
}

fn default_total_supply() -> u64 {
    1_000_000_000
}

fn default_token_decimals() -> u8 {
    6
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            total_supply: default_total_supply(),
            token_decimals: default_token_decimals(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub rpc: RpcConfig,

    #[serde(default)]
    pub oracle: OracleConfig,

    #[serde(default)]
    pub market: MarketConfig,

    #[serde(default = "default_network")]
    pub network: Network,
}

fn default_network() -> Network {
    Network::Mainnet
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc: RpcConfig::default(),
            oracle: OracleConfig::default(),
            market: MarketConfig::default(),
            network: default_network(),
        }
    }
}

impl AppConfig {
    /// Parse a JSON config document
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges serde cannot express
    pub fn validate(&self) -> Result<(), Error> {
        if self.market.token_decimals > MAX_TOKEN_DECIMALS {
            return Err(Error::Config(format!(
                "market.token_decimals must be 0-{}, got {}",
                MAX_TOKEN_DECIMALS, self.market.token_decimals
            )));
        }
        Ok(())
    }

    /// Load a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&contents)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(RPC_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.rpc.url = Some(url);
        }
        if let Some(url) = lookup(ORACLE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.oracle.base_url = url;
        }
        self
    }
}
