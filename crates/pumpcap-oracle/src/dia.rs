//! DIA asset-quotation backend
//!
//! `GET {base_url}/{blockchain}/{asset}` returns a JSON quotation whose
//! `Price` field is the USD price of the asset.

use std::time::Duration;

use pumpcap_core::{OracleConfig, OracleError};
use serde::{Deserialize, Serialize};

use crate::{validate_price, FeedId, PriceSource, Result};

/// Quotation returned by the DIA API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaQuotation {
    #[serde(rename = "Symbol", default)]
    pub symbol: String,
    #[serde(rename = "Blockchain", default)]
    pub blockchain: String,
    #[serde(rename = "Price")]
    pub price: Option<f64>,
    #[serde(rename = "Time", default)]
    pub time: Option<String>,
    #[serde(rename = "Source", default)]
    pub source: Option<String>,
}

/// Parse a DIA response body and pull out a usable price
pub fn parse_quotation(body: &str, feed: &FeedId) -> Result<DiaQuotation> {
    let quotation: DiaQuotation =
        serde_json::from_str(body).map_err(|e| OracleError::InvalidResponse {
            message: format!("failed to parse quotation for {}: {}", feed, e),
        })?;

    let price = quotation.price.ok_or_else(|| OracleError::FeedNotFound {
        feed: feed.to_string(),
    })?;
    validate_price(price)?;

    Ok(quotation)
}

/// HTTP client for the DIA quotation API
#[derive(Debug, Clone)]
pub struct DiaOracleClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl DiaOracleClient {
    pub fn new(config: &OracleConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs.max(1));
        let http = reqwest::Client::builder()
            .user_agent("pumpcap")
            .timeout(timeout)
            .build()
            .map_err(|e| OracleError::Request {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn quotation_url(&self, feed: &FeedId) -> String {
        format!("{}/{}/{}", self.base_url, feed.blockchain, feed.asset)
    }

    /// Fetch the full quotation for a feed
    pub async fn get_quotation(&self, feed: &FeedId) -> Result<DiaQuotation> {
        let url = self.quotation_url(feed);
        tracing::debug!(url = %url, "Fetching oracle quotation");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(OracleError::FeedNotFound {
                feed: feed.to_string(),
            });
        }
        if !status.is_success() {
            return Err(OracleError::Request {
                message: format!("{} returned HTTP {}", url, status),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        let quotation = parse_quotation(&body, feed)?;

        tracing::info!(
            feed = %feed,
            price = ?quotation.price,
            time = ?quotation.time,
            "Oracle quotation"
        );

        Ok(quotation)
    }

    fn map_transport_error(&self, err: reqwest::Error) -> OracleError {
        if err.is_timeout() {
            OracleError::Timeout {
                secs: self.timeout.as_secs(),
            }
        } else {
            OracleError::Request {
                message: err.to_string(),
            }
        }
    }
}

impl PriceSource for DiaOracleClient {
    async fn get_price(&self, feed: &FeedId) -> Result<f64> {
        let quotation = self.get_quotation(feed).await?;
        quotation.price.ok_or_else(|| OracleError::FeedNotFound {
            feed: feed.to_string(),
        })
    }
}
