//! pump.fun Bonding Curve Reader
//!
//! Reads a token's pump.fun bonding-curve account and prices the token in SOL
//! and USD.
//!
//! # Protocol Overview
//!
//! Every token launched on pump.fun trades against a bonding-curve account, a
//! PDA of the pump.fun program seeded with the token mint. Its virtual SOL and
//! token reserves fix the current spot price:
//!
//! - price (SOL) = virtual SOL reserves / virtual token reserves, both in whole units
//! - price (USD) = price (SOL) * SOL/USD oracle rate
//! - market cap (USD) = price (USD) * total supply
//!
//! # Features
//!
//! - PDA derivation for the bonding curve and its token account
//! - Fixed-layout account decoding
//! - Price and market-cap calculation
//!
//! # Example
//!
//! ```ignore
//! use pumpfun::{BondingCurveReader, MarketCapOptions};
//!
//! let reader = BondingCurveReader::from_config(&config)?;
//! let mint = "<mint address>".parse()?;
//! let result = reader.get_market_cap(&mint, &MarketCapOptions::default()).await?;
//! println!("Market cap: ${:.2}", result.market_cap_usd);
//! ```

pub mod calculator;
pub mod constants;
pub mod fetch;
pub mod state;

pub use calculator::*;
pub use constants::*;
pub use fetch::{
    derive_associated_bonding_curve, derive_bonding_curve_address, BondingCurveReader,
};
pub use pumpcap_core::TokenMint;
pub use state::*;
