//! pump.fun Bonding Curve Account Layout
//!
//! The account is an Anchor account: an 8-byte discriminator followed by
//! fixed-width little-endian fields. Offsets are declared once in
//! [`BONDING_CURVE_LAYOUT`] and both [`decode_bonding_curve`] and
//! [`encode_bonding_curve`] read them from there.

use pumpcap_core::{ProtocolError, TokenMint};
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use crate::constants::params::BONDING_CURVE_DISCRIMINATOR;

/// On-chain field encodings used by the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Discriminator,
    U64,
    Bool,
    Pubkey,
}

impl FieldType {
    pub const fn width(self) -> usize {
        match self {
            Self::Discriminator => 8,
            Self::U64 => 8,
            Self::Bool => 1,
            Self::Pubkey => 32,
        }
    }
}

/// One field of a fixed binary layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub offset: usize,
    pub ty: FieldType,
}

impl FieldSpec {
    const fn new(name: &'static str, offset: usize, ty: FieldType) -> Self {
        Self { name, offset, ty }
    }

    pub const fn end(&self) -> usize {
        self.offset + self.ty.width()
    }
}

pub const DISCRIMINATOR: FieldSpec = FieldSpec::new("discriminator", 0, FieldType::Discriminator);
pub const VIRTUAL_TOKEN_RESERVES: FieldSpec =
    FieldSpec::new("virtual_token_reserves", 8, FieldType::U64);
pub const VIRTUAL_SOL_RESERVES: FieldSpec =
    FieldSpec::new("virtual_sol_reserves", 16, FieldType::U64);
pub const REAL_TOKEN_RESERVES: FieldSpec =
    FieldSpec::new("real_token_reserves", 24, FieldType::U64);
pub const REAL_SOL_RESERVES: FieldSpec = FieldSpec::new("real_sol_reserves", 32, FieldType::U64);
pub const TOKEN_TOTAL_SUPPLY: FieldSpec =
    FieldSpec::new("token_total_supply", 40, FieldType::U64);
pub const COMPLETE: FieldSpec = FieldSpec::new("complete", 48, FieldType::Bool);
pub const CREATOR: FieldSpec = FieldSpec::new("creator", 49, FieldType::Pubkey);

/// Full bonding-curve layout, in on-chain order
pub const BONDING_CURVE_LAYOUT: [FieldSpec; 8] = [
    DISCRIMINATOR,
    VIRTUAL_TOKEN_RESERVES,
    VIRTUAL_SOL_RESERVES,
    REAL_TOKEN_RESERVES,
    REAL_SOL_RESERVES,
    TOKEN_TOTAL_SUPPLY,
    COMPLETE,
    CREATOR,
];

/// Minimum account size the decoder accepts (81 bytes)
pub const BONDING_CURVE_LEN: usize = CREATOR.end();

/// Decoded bonding-curve account
///
/// Token amounts are raw units (token decimals), SOL amounts are lamports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BondingCurveAccount {
    pub virtual_token_reserves: u64,
    pub virtual_sol_reserves: u64,
    pub real_token_reserves: u64,
    pub real_sol_reserves: u64,
    pub token_total_supply: u64,
    /// Curve has filled and the token migrated
    pub complete: bool,
    #[serde(serialize_with = "serialize_pubkey")]
    pub creator: Pubkey,
}

/// Bonding-curve account together with where it lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BondingCurveData {
    pub mint: TokenMint,
    #[serde(serialize_with = "serialize_pubkey")]
    pub bonding_curve: Pubkey,
    #[serde(serialize_with = "serialize_pubkey")]
    pub associated_bonding_curve: Pubkey,
    pub account: BondingCurveAccount,
}

fn serialize_pubkey<S: serde::Serializer>(
    pubkey: &Pubkey,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(pubkey)
}

fn field_bytes<'a>(data: &'a [u8], field: &FieldSpec) -> Result<&'a [u8], ProtocolError> {
    data.get(field.offset..field.end())
        .ok_or_else(|| ProtocolError::Decode {
            message: format!(
                "{} at offset {} needs {} bytes, account has {}",
                field.name,
                field.offset,
                field.ty.width(),
                data.len()
            ),
        })
}

fn read_u64(data: &[u8], field: &FieldSpec) -> Result<u64, ProtocolError> {
    let bytes: [u8; 8] = field_bytes(data, field)?
        .try_into()
        .map_err(|_| ProtocolError::Decode {
            message: format!("{} is not a u64 field", field.name),
        })?;
    Ok(u64::from_le_bytes(bytes))
}

/// Any nonzero byte reads as true
fn read_bool(data: &[u8], field: &FieldSpec) -> Result<bool, ProtocolError> {
    Ok(field_bytes(data, field)?.iter().any(|b| *b != 0))
}

fn read_pubkey(data: &[u8], field: &FieldSpec) -> Result<Pubkey, ProtocolError> {
    Pubkey::try_from(field_bytes(data, field)?).map_err(|_| ProtocolError::Decode {
        message: format!("{} is not a 32-byte key", field.name),
    })
}

/// Decode raw account data into a [`BondingCurveAccount`].
///
/// Bytes past [`BONDING_CURVE_LEN`] are ignored; the program over-allocates
/// newer curves.
pub fn decode_bonding_curve(data: &[u8]) -> Result<BondingCurveAccount, ProtocolError> {
    if data.len() < BONDING_CURVE_LEN {
        return Err(ProtocolError::Decode {
            message: format!(
                "expected at least {} bytes, got {}",
                BONDING_CURVE_LEN,
                data.len()
            ),
        });
    }

    let discriminator = field_bytes(data, &DISCRIMINATOR)?;
    if discriminator != BONDING_CURVE_DISCRIMINATOR {
        return Err(ProtocolError::Decode {
            message: format!(
                "account discriminator {} is not a bonding curve",
                hex::encode(discriminator)
            ),
        });
    }

    Ok(BondingCurveAccount {
        virtual_token_reserves: read_u64(data, &VIRTUAL_TOKEN_RESERVES)?,
        virtual_sol_reserves: read_u64(data, &VIRTUAL_SOL_RESERVES)?,
        real_token_reserves: read_u64(data, &REAL_TOKEN_RESERVES)?,
        real_sol_reserves: read_u64(data, &REAL_SOL_RESERVES)?,
        token_total_supply: read_u64(data, &TOKEN_TOTAL_SUPPLY)?,
        complete: read_bool(data, &COMPLETE)?,
        creator: read_pubkey(data, &CREATOR)?,
    })
}

/// Encode an account into its on-chain byte layout (discriminator included)
pub fn encode_bonding_curve(account: &BondingCurveAccount) -> Vec<u8> {
    let mut data = vec![0u8; BONDING_CURVE_LEN];

    let mut put = |field: &FieldSpec, bytes: &[u8]| {
        data[field.offset..field.end()].copy_from_slice(bytes);
    };

    put(&DISCRIMINATOR, &BONDING_CURVE_DISCRIMINATOR);
    put(
        &VIRTUAL_TOKEN_RESERVES,
        &account.virtual_token_reserves.to_le_bytes(),
    );
    put(
        &VIRTUAL_SOL_RESERVES,
        &account.virtual_sol_reserves.to_le_bytes(),
    );
    put(
        &REAL_TOKEN_RESERVES,
        &account.real_token_reserves.to_le_bytes(),
    );
    put(&REAL_SOL_RESERVES, &account.real_sol_reserves.to_le_bytes());
    put(&TOKEN_TOTAL_SUPPLY, &account.token_total_supply.to_le_bytes());
    put(&COMPLETE, &[account.complete as u8]);
    put(&CREATOR, account.creator.as_ref());

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::params;

    fn sample_account() -> BondingCurveAccount {
        BondingCurveAccount {
            virtual_token_reserves: params::INITIAL_VIRTUAL_TOKEN_RESERVES,
            virtual_sol_reserves: params::INITIAL_VIRTUAL_SOL_RESERVES,
            real_token_reserves: params::INITIAL_REAL_TOKEN_RESERVES,
            real_sol_reserves: 0,
            token_total_supply: params::TOKEN_TOTAL_SUPPLY_RAW,
            complete: false,
            creator: Pubkey::new_from_array([9u8; 32]),
        }
    }

    #[test]
    fn layout_is_contiguous() {
        let mut expected_offset = 0;
        for field in BONDING_CURVE_LAYOUT.iter() {
            assert_eq!(field.offset, expected_offset, "gap before {}", field.name);
            expected_offset = field.end();
        }
        assert_eq!(expected_offset, BONDING_CURVE_LEN);
        assert_eq!(BONDING_CURVE_LEN, 81);
    }

    #[test]
    fn decode_known_bytes() {
        let mut data = vec![0u8; BONDING_CURVE_LEN];
        data[..8].copy_from_slice(&params::BONDING_CURVE_DISCRIMINATOR);
        // virtual_token_reserves = 0x0102 little-endian
        data[8] = 0x02;
        data[9] = 0x01;
        // virtual_sol_reserves = 30 SOL
        data[16..24].copy_from_slice(&30_000_000_000u64.to_le_bytes());
        data[48] = 1;
        data[49..81].copy_from_slice(&[5u8; 32]);

        let account = decode_bonding_curve(&data).unwrap();
        assert_eq!(account.virtual_token_reserves, 0x0102);
        assert_eq!(account.virtual_sol_reserves, 30_000_000_000);
        assert_eq!(account.real_token_reserves, 0);
        assert!(account.complete);
        assert_eq!(account.creator, Pubkey::new_from_array([5u8; 32]));
    }

    #[test]
    fn encode_then_decode_preserves_reserves() {
        let account = sample_account();
        let data = encode_bonding_curve(&account);
        assert_eq!(data.len(), BONDING_CURVE_LEN);
        assert_eq!(decode_bonding_curve(&data).unwrap(), account);
    }

    #[test]
    fn decode_ignores_trailing_bytes() {
        let account = sample_account();
        let mut data = encode_bonding_curve(&account);
        data.extend_from_slice(&[0xAA; 69]);
        assert_eq!(decode_bonding_curve(&data).unwrap(), account);
    }

    #[test]
    fn decode_short_buffer() {
        let data = encode_bonding_curve(&sample_account());
        for len in [0, 8, 48, BONDING_CURVE_LEN - 1] {
            match decode_bonding_curve(&data[..len]) {
                Err(ProtocolError::Decode { message }) => {
                    assert!(message.contains("expected at least 81 bytes"), "{}", message)
                }
                other => panic!("Expected Decode error for len {}, got: {:?}", len, other),
            }
        }
    }

    #[test]
    fn decode_wrong_discriminator() {
        let mut data = encode_bonding_curve(&sample_account());
        data[0] ^= 0xFF;
        match decode_bonding_curve(&data) {
            Err(ProtocolError::Decode { message }) => {
                assert!(message.contains("discriminator"), "{}", message)
            }
            other => panic!("Expected Decode error, got: {:?}", other),
        }
    }

    #[test]
    fn decode_nonzero_flag_is_complete() {
        let mut data = encode_bonding_curve(&sample_account());
        assert!(!decode_bonding_curve(&data).unwrap().complete);

        for flag in [1u8, 2, 0xFF] {
            data[COMPLETE.offset] = flag;
            assert!(decode_bonding_curve(&data).unwrap().complete, "flag {}", flag);
        }
    }

    #[test]
    fn bonding_curve_data_serializes_keys_as_base58() {
        let data = BondingCurveData {
            mint: TokenMint::new(Pubkey::new_from_array([1u8; 32])),
            bonding_curve: Pubkey::new_from_array([2u8; 32]),
            associated_bonding_curve: Pubkey::new_from_array([3u8; 32]),
            account: sample_account(),
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(
            json["bonding_curve"],
            Pubkey::new_from_array([2u8; 32]).to_string()
        );
        assert_eq!(
            json["account"]["creator"],
            Pubkey::new_from_array([9u8; 32]).to_string()
        );
        assert_eq!(json["account"]["complete"], false);
    }
}
