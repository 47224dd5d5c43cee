//! pumpcap-rpc: Wrapper around the Solana nonblocking RPC client
//!
//! Exposes the one read the rest of the workspace needs (raw account data by
//! address) behind the [`AccountSource`] trait, with per-request timeouts and
//! a not-found outcome kept distinct from transport failures.

pub mod queries;

use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use pumpcap_core::{Network, RpcConfig, RpcError};
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;

/// Result type for RPC client operations
pub type Result<T> = std::result::Result<T, RpcError>;

/// Anything that can hand back the raw data of an on-chain account.
///
/// A missing account must surface as [`RpcError::AccountNotFound`], never as
/// an empty buffer.
pub trait AccountSource {
    fn get_account_data(&self, address: &Pubkey) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Solana RPC client with a configured commitment and request timeout
#[derive(Clone)]
pub struct RpcAccountClient {
    inner: Arc<RpcClient>,
    commitment: CommitmentConfig,
    timeout: Duration,
    url: String,
}

impl RpcAccountClient {
    /// Create a client. No request is made until the first read.
    pub fn new(config: &RpcConfig, network: Network) -> Result<Self> {
        let url = config.url_for(network).trim().to_string();
        if url.is_empty() {
            return Err(RpcError::InvalidConfig {
                message: "RPC URL is empty".to_string(),
            });
        }

        let commitment =
            CommitmentConfig::from_str(&config.commitment).map_err(|_| RpcError::InvalidConfig {
                message: format!("unknown commitment level '{}'", config.commitment),
            })?;
        let timeout = Duration::from_secs(config.timeout_secs.max(1));

        let inner = RpcClient::new_with_timeout_and_commitment(url.clone(), timeout, commitment);
        tracing::debug!(url = %url, commitment = ?commitment.commitment, "Created RPC client");

        Ok(Self {
            inner: Arc::new(inner),
            commitment,
            timeout,
            url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn commitment(&self) -> CommitmentConfig {
        self.commitment
    }
}

impl AccountSource for RpcAccountClient {
    async fn get_account_data(&self, address: &Pubkey) -> Result<Vec<u8>> {
        queries::get_account_data(&self.inner, address, self.commitment, self.timeout).await
    }
}

/// Wrap an RPC call with a timeout. Converts both timeout and RPC errors to RpcError.
///
/// Connection failures become `Unreachable` so a dead endpoint is told apart
/// from a request the node rejected.
pub(crate) async fn timed_request<T>(
    url: &str,
    timeout: Duration,
    fut: impl Future<Output = std::result::Result<T, ClientError>>,
) -> Result<T> {
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| RpcError::Timeout {
            secs: timeout.as_secs(),
        })?
        .map_err(|e| map_client_error(url, timeout, e))
}

fn map_client_error(url: &str, timeout: Duration, err: ClientError) -> RpcError {
    match err.kind() {
        ClientErrorKind::Reqwest(e) if e.is_connect() => RpcError::Unreachable {
            url: url.to_string(),
        },
        // The HTTP client carries the same deadline and may fire first
        ClientErrorKind::Reqwest(e) if e.is_timeout() => RpcError::Timeout {
            secs: timeout.as_secs(),
        },
        _ => RpcError::Request {
            message: err.to_string(),
        },
    }
}
