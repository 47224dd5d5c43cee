//! Error types for pumpcap

use thiserror::Error;

/// Core errors that can occur in pumpcap
#[derive(Debug, Error)]
pub enum Error {
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Solana RPC connection and query errors
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("RPC unreachable at {url}")]
    Unreachable { url: String },

    #[error("Account not found: {address}")]
    AccountNotFound { address: String },

    #[error("RPC request failed: {message}")]
    Request { message: String },

    #[error("RPC request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Invalid RPC configuration: {message}")]
    InvalidConfig { message: String },
}

/// Price oracle errors
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Oracle request failed: {message}")]
    Request { message: String },

    #[error("Price feed not found: {feed}")]
    FeedNotFound { feed: String },

    #[error("Invalid oracle response: {message}")]
    InvalidResponse { message: String },

    #[error("Oracle returned unusable price: {price}")]
    InvalidPrice { price: f64 },

    #[error("Oracle request timed out after {secs}s")]
    Timeout { secs: u64 },
}

/// Bonding-curve decoding and pricing errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Invalid mint: {value}")]
    InvalidMint { value: String },

    #[error("Failed to decode bonding curve: {message}")]
    Decode { message: String },

    #[error("Division by zero: {field} is zero")]
    DivisionByZero { field: &'static str },
}

/// The pipeline stage a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidMint,
    AccountNotFound,
    RpcError,
    DecodeError,
    OracleError,
    DivisionByZero,
    Config,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidMint => "invalid_mint",
            Self::AccountNotFound => "account_not_found",
            Self::RpcError => "rpc_error",
            Self::DecodeError => "decode_error",
            Self::OracleError => "oracle_error",
            Self::DivisionByZero => "division_by_zero",
            Self::Config => "config_error",
        }
    }
}

/// Result type alias for pumpcap operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Rpc(e) => e.kind(),
            Self::Oracle(_) => ErrorKind::OracleError,
            Self::Protocol(e) => e.kind(),
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        self.kind().as_str()
    }
}

impl RpcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AccountNotFound { .. } => ErrorKind::AccountNotFound,
            Self::Unreachable { .. }
            | Self::Request { .. }
            | Self::Timeout { .. }
            | Self::InvalidConfig { .. } => ErrorKind::RpcError,
        }
    }
}

impl ProtocolError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidMint { .. } => ErrorKind::InvalidMint,
            Self::Decode { .. } => ErrorKind::DecodeError,
            Self::DivisionByZero { .. } => ErrorKind::DivisionByZero,
        }
    }

    pub fn error_code(&self) -> &'static str {
        self.kind().as_str()
    }
}
