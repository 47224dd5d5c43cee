//! pump.fun Protocol Constants
//!
//! Program IDs, PDA seeds and curve parameters.

use solana_sdk::pubkey::Pubkey;

/// Program IDs the reader derives addresses against
pub mod programs {
    use solana_sdk::pubkey::Pubkey;

    /// pump.fun bonding-curve program (same ID on mainnet and devnet)
    pub const PUMP_FUN_PROGRAM_ID: Pubkey =
        solana_sdk::pubkey!("6EF8rrecthR5Dkzon8Nwu78hRvfCKubJ14M5uBEwF6P");

    /// SPL Token program
    pub const TOKEN_PROGRAM_ID: Pubkey =
        solana_sdk::pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

    /// SPL Associated Token Account program
    pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
        solana_sdk::pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");
}

/// PDA seeds
pub mod seeds {
    /// Bonding curve PDA: `[BONDING_CURVE, mint]`
    pub const BONDING_CURVE: &[u8] = b"bonding-curve";
}

/// Protocol parameters
pub mod params {
    /// Anchor discriminator of the `BondingCurve` account
    pub const BONDING_CURVE_DISCRIMINATOR: [u8; 8] = [23, 183, 248, 55, 96, 216, 172, 96];

    /// pump.fun tokens mint with 6 decimals
    pub const DEFAULT_TOKEN_DECIMALS: u8 = 6;

    /// Total supply of every pump.fun token, in whole tokens
    pub const DEFAULT_TOTAL_SUPPLY: u64 = 1_000_000_000;

    /// Virtual SOL reserves of a fresh curve (lamports)
    pub const INITIAL_VIRTUAL_SOL_RESERVES: u64 = 30_000_000_000;

    /// Virtual token reserves of a fresh curve (raw units, 6 decimals)
    pub const INITIAL_VIRTUAL_TOKEN_RESERVES: u64 = 1_073_000_000_000_000;

    /// Real token reserves of a fresh curve (raw units, 6 decimals)
    pub const INITIAL_REAL_TOKEN_RESERVES: u64 = 793_100_000_000_000;

    /// Total supply in raw units (6 decimals)
    pub const TOKEN_TOTAL_SUPPLY_RAW: u64 = 1_000_000_000_000_000;
}

/// Program IDs used for address derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramIds {
    pub pump_fun: Pubkey,
    pub token: Pubkey,
    pub associated_token: Pubkey,
}

impl Default for ProgramIds {
    fn default() -> Self {
        Self {
            pump_fun: programs::PUMP_FUN_PROGRAM_ID,
            token: programs::TOKEN_PROGRAM_ID,
            associated_token: programs::ASSOCIATED_TOKEN_PROGRAM_ID,
        }
    }
}
