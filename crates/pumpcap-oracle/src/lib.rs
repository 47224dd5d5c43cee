//! Price oracle client
//!
//! Fetches real-world exchange rates (SOL/USD) for pricing bonding-curve tokens.
//! The default backend is the DIA asset-quotation API; anything implementing
//! [`PriceSource`] can stand in for it.

pub mod dia;

use std::fmt;
use std::future::Future;

use pumpcap_core::{OracleConfig, OracleError};
use serde::{Deserialize, Serialize};

pub use dia::{DiaOracleClient, DiaQuotation};

/// Result type for oracle operations
pub type Result<T> = std::result::Result<T, OracleError>;

/// Identifies a price feed: the asset's home chain and its address there
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeedId {
    pub blockchain: String,
    pub asset: String,
}

impl FeedId {
    pub fn new(blockchain: impl Into<String>, asset: impl Into<String>) -> Self {
        Self {
            blockchain: blockchain.into(),
            asset: asset.into(),
        }
    }

    /// Native SOL quoted in USD
    pub fn sol_usd() -> Self {
        Self::new("Solana", "0x0000000000000000000000000000000000000000")
    }

    pub fn from_config(config: &OracleConfig) -> Self {
        Self::new(&config.blockchain, &config.asset)
    }
}

impl fmt::Display for FeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.blockchain, self.asset)
    }
}

/// Anything that can quote the current USD price of a feed
pub trait PriceSource {
    fn get_price(&self, feed: &FeedId) -> impl Future<Output = Result<f64>> + Send;
}

/// Reject prices that cannot be used as a multiplier
pub fn validate_price(price: f64) -> Result<f64> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(OracleError::InvalidPrice { price })
    }
}
