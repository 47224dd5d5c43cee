//! Core type definitions for pumpcap

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::fmt;
use std::str::FromStr;

use crate::ProtocolError;

/// Token mint (32 bytes, base58-encoded on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenMint(Pubkey);

impl TokenMint {
    pub fn new(pubkey: Pubkey) -> Self {
        Self(pubkey)
    }

    /// Build a mint from raw bytes. Anything other than 32 bytes is rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        Pubkey::try_from(bytes)
            .map(Self)
            .map_err(|_| ProtocolError::InvalidMint {
                value: format!("expected 32 bytes, got {}", bytes.len()),
            })
    }

    pub fn pubkey(&self) -> &Pubkey {
        &self.0
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }
}

impl FromStr for TokenMint {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ProtocolError::InvalidMint {
                value: "empty mint".to_string(),
            });
        }
        Pubkey::from_str(trimmed)
            .map(Self)
            .map_err(|e| ProtocolError::InvalidMint {
                value: format!("{}: {}", trimmed, e),
            })
    }
}

impl TryFrom<String> for TokenMint {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TokenMint> for String {
    fn from(mint: TokenMint) -> Self {
        mint.0.to_string()
    }
}

impl From<Pubkey> for TokenMint {
    fn from(pubkey: Pubkey) -> Self {
        Self(pubkey)
    }
}

impl fmt::Display for TokenMint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Solana cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Devnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Devnet => "devnet",
        }
    }

    /// Public RPC endpoint for the cluster
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://api.mainnet-beta.solana.com",
            Self::Devnet => "https://api.devnet.solana.com",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Constants
pub mod constants {
    /// SOL has 9 decimal places
    pub const SOL_DECIMALS: u8 = 9;

    /// Largest token decimals for which `10^decimals` fits in a u64
    pub const MAX_TOKEN_DECIMALS: u8 = 19;
}

#[cfg(test)]
mod tests {
    use super::*;

    const WSOL: &str = "So11111111111111111111111111111111111111112";

    #[test]
    fn test_mint_from_str() {
        let mint: TokenMint = WSOL.parse().unwrap();
        assert_eq!(mint.to_string(), WSOL);
        assert_eq!(mint.to_bytes().len(), 32);
    }

    #[test]
    fn test_mint_rejects_garbage() {
        for bad in ["", "   ", "not-a-key", "0OIl", "abc"] {
            match bad.parse::<TokenMint>() {
                Err(ProtocolError::InvalidMint { .. }) => {}
                other => panic!("expected InvalidMint for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_mint_from_bytes() {
        let mint = TokenMint::from_bytes(&[7u8; 32]).unwrap();
        assert_eq!(mint.to_bytes(), [7u8; 32]);

        let err = TokenMint::from_bytes(&[7u8; 31]).unwrap_err();
        assert_eq!(err.error_code(), "invalid_mint");
    }

    #[test]
    fn test_mint_serde_is_base58() {
        let mint: TokenMint = WSOL.parse().unwrap();
        let json = serde_json::to_string(&mint).unwrap();
        assert_eq!(json, format!("\"{}\"", WSOL));

        let back: TokenMint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mint);

        assert!(serde_json::from_str::<TokenMint>("\"nope\"").is_err());
    }

    #[test]
    fn test_network_display() {
        assert_eq!(Network::Mainnet.as_str(), "mainnet");
        assert_eq!(Network::Devnet.as_str(), "devnet");
        assert!(Network::Mainnet.default_rpc_url().contains("mainnet-beta"));
    }
}
