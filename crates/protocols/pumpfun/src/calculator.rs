//! pump.fun Price Calculator
//!
//! Pure math functions for pricing a bonding-curve token.
//! No I/O, no async - just deterministic calculations.
//!
//! # Units
//!
//! - SOL amounts: lamports (u64), 1 SOL = 1_000_000_000 lamports
//! - Token amounts: raw units with the token's decimals (6 for pump.fun)
//! - Results are f64 in whole units

use pumpcap_core::constants::SOL_DECIMALS;
use pumpcap_core::{MarketConfig, ProtocolError};
use serde::{Deserialize, Serialize};

use crate::constants::params;
use crate::state::BondingCurveAccount;

/// Caller-tunable inputs to the market-cap computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketCapOptions {
    /// Total supply in whole tokens; `None` uses the pump.fun constant
    pub total_supply: Option<u64>,
    pub token_decimals: u8,
}

impl Default for MarketCapOptions {
    fn default() -> Self {
        Self {
            total_supply: None,
            token_decimals: params::DEFAULT_TOKEN_DECIMALS,
        }
    }
}

impl MarketCapOptions {
    pub fn from_config(config: &MarketConfig) -> Self {
        Self {
            total_supply: Some(config.total_supply),
            token_decimals: config.token_decimals,
        }
    }

    pub fn with_total_supply(mut self, total_supply: u64) -> Self {
        self.total_supply = Some(total_supply);
        self
    }

    pub fn with_token_decimals(mut self, token_decimals: u8) -> Self {
        self.token_decimals = token_decimals;
        self
    }

    pub fn resolved_total_supply(&self) -> u64 {
        self.total_supply.unwrap_or(params::DEFAULT_TOTAL_SUPPLY)
    }
}

/// Derived token price and market cap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResult {
    /// Price of one whole token in SOL
    pub price_sol: f64,
    /// Price of one whole token in USD
    pub price_usd: f64,
    pub market_cap_usd: f64,
    /// SOL/USD rate the USD figures were computed with
    pub sol_usd_rate: f64,
    /// Total supply (whole tokens) the market cap was computed with
    pub total_supply: u64,
}

/// Convert a raw integer amount into whole units
pub fn normalize(raw: u64, decimals: u8) -> f64 {
    raw as f64 / 10f64.powi(decimals as i32)
}

/// Token price in SOL from raw virtual reserves
pub fn price_in_sol(
    virtual_sol_reserves: u64,
    virtual_token_reserves: u64,
    token_decimals: u8,
) -> Result<f64, ProtocolError> {
    let sol_reserve = normalize(virtual_sol_reserves, SOL_DECIMALS);
    let token_reserve = normalize(virtual_token_reserves, token_decimals);

    if token_reserve == 0.0 {
        return Err(ProtocolError::DivisionByZero {
            field: "virtual_token_reserves",
        });
    }

    Ok(sol_reserve / token_reserve)
}

/// Compute SOL price, USD price and USD market cap for a curve
pub fn compute_price(
    account: &BondingCurveAccount,
    sol_usd_rate: f64,
    options: &MarketCapOptions,
) -> Result<PriceResult, ProtocolError> {
    let price_sol = price_in_sol(
        account.virtual_sol_reserves,
        account.virtual_token_reserves,
        options.token_decimals,
    )?;
    let price_usd = price_sol * sol_usd_rate;
    let total_supply = options.resolved_total_supply();
    let market_cap_usd = price_usd * total_supply as f64;

    Ok(PriceResult {
        price_sol,
        price_usd,
        market_cap_usd,
        sol_usd_rate,
        total_supply,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::pubkey::Pubkey;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = expected.abs() * 1e-12;
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn account_with_reserves(sol_lamports: u64, token_raw: u64) -> BondingCurveAccount {
        BondingCurveAccount {
            virtual_token_reserves: token_raw,
            virtual_sol_reserves: sol_lamports,
            real_token_reserves: 0,
            real_sol_reserves: 0,
            token_total_supply: params::TOKEN_TOTAL_SUPPLY_RAW,
            complete: false,
            creator: Pubkey::default(),
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(30_000_000_000, 9), 30.0);
        assert_eq!(normalize(1_000_000_000_000, 6), 1_000_000.0);
        assert_eq!(normalize(42, 0), 42.0);
    }

    #[test]
    fn test_reference_market_cap() {
        // 30 SOL against 1,000,000 tokens at $150/SOL
        let account = account_with_reserves(30_000_000_000, 1_000_000_000_000);
        let options = MarketCapOptions::default().with_total_supply(1_000_000_000);

        let result = compute_price(&account, 150.0, &options).unwrap();

        assert_close(result.price_sol, 0.00003);
        assert_close(result.price_usd, 0.0045);
        assert_close(result.market_cap_usd, 4_500_000.0);
        assert_eq!(result.sol_usd_rate, 150.0);
        assert_eq!(result.total_supply, 1_000_000_000);
    }

    #[test]
    fn test_fresh_curve_price() {
        let account = account_with_reserves(
            params::INITIAL_VIRTUAL_SOL_RESERVES,
            params::INITIAL_VIRTUAL_TOKEN_RESERVES,
        );
        let result = compute_price(&account, 200.0, &MarketCapOptions::default()).unwrap();

        // 30 / 1_073_000_000 SOL per token
        assert_close(result.price_sol, 30.0 / 1_073_000_000.0);
        assert_close(result.market_cap_usd, 30.0 / 1.073 * 200.0);
        assert_eq!(result.total_supply, params::DEFAULT_TOTAL_SUPPLY);
    }

    #[test]
    fn test_zero_token_reserves() {
        let account = account_with_reserves(30_000_000_000, 0);
        match compute_price(&account, 150.0, &MarketCapOptions::default()) {
            Err(ProtocolError::DivisionByZero { field }) => {
                assert_eq!(field, "virtual_token_reserves")
            }
            other => panic!("Expected DivisionByZero, got: {:?}", other),
        }
    }

    #[test]
    fn test_token_decimals_override() {
        // Same raw reserves read as a 9-decimal token: 1000x fewer whole tokens
        let account = account_with_reserves(30_000_000_000, 1_000_000_000_000);
        let six = compute_price(&account, 1.0, &MarketCapOptions::default()).unwrap();
        let nine = compute_price(
            &account,
            1.0,
            &MarketCapOptions::default().with_token_decimals(9),
        )
        .unwrap();
        assert_close(nine.price_sol, six.price_sol * 1000.0);
    }

    #[test]
    fn test_zero_sol_reserves_prices_at_zero() {
        let account = account_with_reserves(0, 1_000_000_000_000);
        let result = compute_price(&account, 150.0, &MarketCapOptions::default()).unwrap();
        assert_eq!(result.price_sol, 0.0);
        assert_eq!(result.market_cap_usd, 0.0);
    }

    #[test]
    fn test_options_from_config() {
        let config = MarketConfig {
            total_supply: 500_000_000,
            token_decimals: 9,
        };
        let options = MarketCapOptions::from_config(&config);
        assert_eq!(options.resolved_total_supply(), 500_000_000);
        assert_eq!(options.token_decimals, 9);
        assert_eq!(
            MarketCapOptions::default().resolved_total_supply(),
            params::DEFAULT_TOTAL_SUPPLY
        );
    }
}
