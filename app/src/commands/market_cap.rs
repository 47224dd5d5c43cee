use pumpcap_core::{AppConfig, Error, TokenMint};
use pumpfun::{BondingCurveReader, MarketCapOptions, PriceResult};
use serde::Serialize;

use crate::cli::CliArgs;

/// Result printed by the CLI
#[derive(Debug, Clone, Serialize)]
pub struct MarketCapReport {
    pub mint: TokenMint,
    #[serde(flatten)]
    pub result: PriceResult,
}

/// Resolve market-cap options: config first, then command-line overrides
pub fn resolve_options(config: &AppConfig, args: &CliArgs) -> MarketCapOptions {
    let mut options = MarketCapOptions::from_config(&config.market);
    if let Some(total_supply) = args.total_supply {
        options = options.with_total_supply(total_supply);
    }
    if let Some(decimals) = args.token_decimals {
        options = options.with_token_decimals(decimals);
    }
    options
}

/// Look up the token's bonding curve and price it
pub async fn get_market_cap(config: &AppConfig, args: &CliArgs) -> anyhow::Result<MarketCapReport> {
    let mint = args.mint.parse::<TokenMint>().map_err(Error::from)?;
    let options = resolve_options(config, args);
    let reader = BondingCurveReader::from_config(config)?;

    let result = reader.get_market_cap(&mint, &options).await?;

    Ok(MarketCapReport { mint, result })
}

/// Human-readable report
pub fn format_report(report: &MarketCapReport) -> String {
    format!(
        "Mint:              {}\n\
         Token price (SOL): {:.9} SOL\n\
         Token price (USD): ${:.9}\n\
         Market cap (USD):  ${}",
        report.mint,
        report.result.price_sol,
        report.result.price_usd,
        group_thousands(report.result.market_cap_usd),
    )
}

/// Format with two decimals and comma thousands separators
fn group_thousands(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}
