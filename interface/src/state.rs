//! Account layouts owned by the Solace program.
//!
//! Accounts are allocated with a fixed size larger than their contents, so
//! decoding reads the borsh fields after the discriminator and ignores the
//! zero padding that follows.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::error::InterfaceError;
use crate::{discriminator, DISCRIMINATOR_LEN};

/// Space the program allocates for wallet and recovery accounts.
pub const ACCOUNT_SPACE: usize = 1000;

/// Wallet account
///
/// PDA Seeds: ["SOLACE", name]
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Wallet {
    pub owner: Pubkey,
    pub bump: u8,
    pub name: String,
    pub approved_guardians: Vec<Pubkey>,
    pub pending_guardians: Vec<Pubkey>,
    /// Unix timestamp from which each pending guardian may be approved,
    /// index-aligned with `pending_guardians`
    pub pending_guardians_approval_from: Vec<i64>,
    pub recovery_mode: bool,
    pub recovery_threshold: u8,
    pub wallet_recovery_sequence: u64,
    pub current_recovery: Option<Pubkey>,
    pub created_at: i64,
}

/// Recovery attempt account
///
/// PDA Seeds: [wallet, wallet_recovery_sequence (u64 LE)]
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct RecoveryAttempt {
    pub wallet: Pubkey,
    pub new_owner: Pubkey,
    pub proposer: Pubkey,
    pub bump: u8,
    /// One flag per approved guardian at initiation time
    pub approvals: Vec<bool>,
    pub is_executed: bool,
}

/// Anchor-style account whose data starts with `discriminator("account", NAME)`.
pub trait AnchorAccount: BorshSerialize + BorshDeserialize + Sized {
    const NAME: &'static str;

    fn account_discriminator() -> [u8; DISCRIMINATOR_LEN] {
        discriminator("account", Self::NAME)
    }

    /// Decode account data, ignoring trailing padding.
    fn try_from_account_data(data: &[u8]) -> Result<Self, InterfaceError> {
        if data.len() < DISCRIMINATOR_LEN {
            return Err(InterfaceError::AccountDataTooSmall {
                expected: DISCRIMINATOR_LEN,
                actual: data.len(),
            });
        }
        if data[..DISCRIMINATOR_LEN] != Self::account_discriminator() {
            return Err(InterfaceError::InvalidDiscriminator(Self::NAME));
        }
        let mut body = &data[DISCRIMINATOR_LEN..];
        Ok(Self::deserialize(&mut body)?)
    }

    /// Encode as the program would store it, padded to `space` bytes.
    fn to_account_data(&self, space: usize) -> Result<Vec<u8>, InterfaceError> {
        let mut data = Self::account_discriminator().to_vec();
        self.serialize(&mut data)?;
        if data.len() < space {
            data.resize(space, 0);
        }
        Ok(data)
    }
}

impl AnchorAccount for Wallet {
    const NAME: &'static str = "Wallet";
}

impl AnchorAccount for RecoveryAttempt {
    const NAME: &'static str = "RecoveryAttempt";
}
