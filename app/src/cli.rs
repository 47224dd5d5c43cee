//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use pumpcap_core::constants::MAX_TOKEN_DECIMALS;

/// Prints the bonding-curve price and market cap of a pump.fun token
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "pumpcap", author, version, about, long_about = None)]
#[command(after_help = "\
Environment:
  PUMPCAP_RPC_URL     Solana RPC endpoint
  PUMPCAP_ORACLE_URL  Oracle base URL
  RUST_LOG            Log filter (logs go to stderr)")]
pub struct CliArgs {
    /// Token mint address (base58)
    pub mint: String,

    /// Total supply in whole tokens [default: 1000000000]
    #[arg(long = "supply", value_name = "N", value_parser = parse_supply)]
    pub total_supply: Option<u64>,

    /// Token decimals [default: 6]
    #[arg(
        long = "decimals",
        value_name = "D",
        value_parser = clap::value_parser!(u8).range(0..=i64::from(MAX_TOKEN_DECIMALS))
    )]
    pub token_decimals: Option<u8>,

    /// JSON config file
    #[arg(long = "config", value_name = "PATH")]
    pub config_path: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Whole number, `_` separators allowed (`1_000_000_000`)
fn parse_supply(value: &str) -> Result<u64, String> {
    value
        .replace('_', "")
        .parse::<u64>()
        .map_err(|_| format!("expected a whole number, got '{}'", value))
}
