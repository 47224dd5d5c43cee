//! pump.fun State Fetching
//!
//! Derives the bonding-curve address for a mint, reads the account over RPC,
//! quotes SOL/USD from the oracle and prices the token. The pipeline is
//! strictly linear and does not retry; the first failing stage is returned.

use pumpcap_core::{AppConfig, Error, OracleError, ProtocolError, RpcError, TokenMint};
use pumpcap_oracle::{DiaOracleClient, FeedId, PriceSource};
use pumpcap_rpc::{AccountSource, RpcAccountClient};
use solana_sdk::pubkey::Pubkey;

use crate::calculator::{compute_price, MarketCapOptions, PriceResult};
use crate::constants::{programs, seeds, ProgramIds};
use crate::state::{decode_bonding_curve, BondingCurveAccount, BondingCurveData};

/// Bonding-curve PDA for a mint under the pump.fun program
pub fn derive_bonding_curve_address(mint: &TokenMint) -> Result<Pubkey, ProtocolError> {
    derive_bonding_curve_address_with(&programs::PUMP_FUN_PROGRAM_ID, mint)
}

/// Bonding-curve PDA for a mint under an arbitrary program
pub fn derive_bonding_curve_address_with(
    program_id: &Pubkey,
    mint: &TokenMint,
) -> Result<Pubkey, ProtocolError> {
    Pubkey::try_find_program_address(&[seeds::BONDING_CURVE, mint.pubkey().as_ref()], program_id)
        .map(|(address, _bump)| address)
        .ok_or_else(|| ProtocolError::InvalidMint {
            value: format!("no bonding curve address derivable for {}", mint),
        })
}

/// Associated token account holding the curve's token reserves
pub fn derive_associated_bonding_curve(
    bonding_curve: &Pubkey,
    mint: &TokenMint,
) -> Result<Pubkey, ProtocolError> {
    derive_associated_bonding_curve_with(&ProgramIds::default(), bonding_curve, mint)
}

pub fn derive_associated_bonding_curve_with(
    ids: &ProgramIds,
    bonding_curve: &Pubkey,
    mint: &TokenMint,
) -> Result<Pubkey, ProtocolError> {
    Pubkey::try_find_program_address(
        &[
            bonding_curve.as_ref(),
            ids.token.as_ref(),
            mint.pubkey().as_ref(),
        ],
        &ids.associated_token,
    )
    .map(|(address, _bump)| address)
    .ok_or_else(|| ProtocolError::InvalidMint {
        value: format!("no associated token address derivable for {}", mint),
    })
}

/// Reads pump.fun bonding curves and prices their tokens
#[derive(Debug, Clone)]
pub struct BondingCurveReader<A, P> {
    accounts: A,
    oracle: P,
    program_ids: ProgramIds,
    feed: FeedId,
    defaults: MarketCapOptions,
}

impl BondingCurveReader<RpcAccountClient, DiaOracleClient> {
    /// Reader backed by the Solana RPC and DIA clients described by `config`
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let accounts = RpcAccountClient::new(&config.rpc, config.network)?;
        let oracle = DiaOracleClient::new(&config.oracle)?;

        Ok(Self::new(accounts, oracle)
            .with_feed(FeedId::from_config(&config.oracle))
            .with_defaults(MarketCapOptions::from_config(&config.market)))
    }
}

impl<A, P> BondingCurveReader<A, P>
where
    A: AccountSource + Sync,
    P: PriceSource + Sync,
{
    pub fn new(accounts: A, oracle: P) -> Self {
        Self {
            accounts,
            oracle,
            program_ids: ProgramIds::default(),
            feed: FeedId::sol_usd(),
            defaults: MarketCapOptions::default(),
        }
    }

    pub fn with_program_ids(mut self, program_ids: ProgramIds) -> Self {
        self.program_ids = program_ids;
        self
    }

    pub fn with_feed(mut self, feed: FeedId) -> Self {
        self.feed = feed;
        self
    }

    pub fn with_defaults(mut self, defaults: MarketCapOptions) -> Self {
        self.defaults = defaults;
        self
    }

    /// Market-cap options used when the caller supplies none
    pub fn defaults(&self) -> &MarketCapOptions {
        &self.defaults
    }

    pub fn feed(&self) -> &FeedId {
        &self.feed
    }

    pub fn derive_bonding_curve_address(&self, mint: &TokenMint) -> Result<Pubkey, ProtocolError> {
        derive_bonding_curve_address_with(&self.program_ids.pump_fun, mint)
    }

    pub fn derive_associated_bonding_curve(
        &self,
        bonding_curve: &Pubkey,
        mint: &TokenMint,
    ) -> Result<Pubkey, ProtocolError> {
        derive_associated_bonding_curve_with(&self.program_ids, bonding_curve, mint)
    }

    /// Raw account data; a missing account is `AccountNotFound`
    pub async fn fetch_account(&self, address: &Pubkey) -> Result<Vec<u8>, RpcError> {
        self.accounts.get_account_data(address).await
    }

    pub fn decode(&self, data: &[u8]) -> Result<BondingCurveAccount, ProtocolError> {
        decode_bonding_curve(data)
    }

    pub async fn fetch_sol_usd_rate(&self) -> Result<f64, OracleError> {
        let rate = self.oracle.get_price(&self.feed).await?;
        pumpcap_oracle::validate_price(rate)
    }

    pub fn compute_price(
        &self,
        account: &BondingCurveAccount,
        sol_usd_rate: f64,
        options: &MarketCapOptions,
    ) -> Result<PriceResult, ProtocolError> {
        compute_price(account, sol_usd_rate, options)
    }

    /// Derive, fetch and decode the bonding curve of `mint`
    pub async fn get_bonding_curve_data(&self, mint: &TokenMint) -> Result<BondingCurveData, Error> {
        let bonding_curve = self.derive_bonding_curve_address(mint)?;
        let associated_bonding_curve = self.derive_associated_bonding_curve(&bonding_curve, mint)?;

        tracing::debug!(
            mint = %mint,
            bonding_curve = %bonding_curve,
            "Fetching bonding curve"
        );

        let data = self.fetch_account(&bonding_curve).await?;
        let account = self.decode(&data)?;

        Ok(BondingCurveData {
            mint: *mint,
            bonding_curve,
            associated_bonding_curve,
            account,
        })
    }

    /// Full pipeline: curve state, oracle rate, derived prices
    pub async fn get_market_cap(
        &self,
        mint: &TokenMint,
        options: &MarketCapOptions,
    ) -> Result<PriceResult, Error> {
        let curve = self.get_bonding_curve_data(mint).await?;

        if curve.account.complete {
            tracing::warn!(
                mint = %mint,
                "Bonding curve is complete; token has migrated and curve reserves are final"
            );
        }

        let sol_usd_rate = self.fetch_sol_usd_rate().await?;
        let result = self.compute_price(&curve.account, sol_usd_rate, options)?;

        tracing::info!(
            mint = %mint,
            price_sol = result.price_sol,
            price_usd = result.price_usd,
            market_cap_usd = result.market_cap_usd,
            "Computed market cap"
        );

        Ok(result)
    }

    /// [`get_market_cap`](Self::get_market_cap) with the reader's default options
    pub async fn get_market_cap_with_defaults(&self, mint: &TokenMint) -> Result<PriceResult, Error> {
        self.get_market_cap(mint, &self.defaults).await
    }
}
