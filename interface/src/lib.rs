//! Solace Program Interface
//!
//! Wire contract of the deployed Solace guardian wallet program: the
//! instruction schema, the account layouts it owns and the seeds it uses
//! to derive program addresses. Both the instruction data and the account
//! data follow the Anchor convention of an 8-byte sha256 prefix.

pub mod error;
pub mod instruction;
pub mod state;

use sha2::{Digest, Sha256};
use solana_program::pubkey;
use solana_program::pubkey::Pubkey;

pub use error::InterfaceError;
pub use instruction::SolaceInstruction;
pub use state::{RecoveryAttempt, Wallet};

/// Program id of the deployed Solace program.
pub const ID: Pubkey = pubkey!("8FRYfiEcSPFuJd27jkKaPBwFCiXDFYrnfwqgH9JFjS2U");

pub fn id() -> Pubkey {
    ID
}

/// Seed prefix of the wallet PDA: ["SOLACE", username]
pub const WALLET_SEED: &[u8] = b"SOLACE";

/// Seed prefix of a wallet token account PDA: ["wallet", wallet, mint]
pub const TOKEN_ACCOUNT_SEED: &[u8] = b"wallet";

/// Length of every Anchor discriminator.
pub const DISCRIMINATOR_LEN: usize = 8;

/// Anchor discriminator: the first 8 bytes of `sha256("<namespace>:<name>")`.
pub fn discriminator(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(b":");
    hasher.update(name.as_bytes());
    let hash = hasher.finalize();

    let mut out = [0u8; DISCRIMINATOR_LEN];
    out.copy_from_slice(&hash[..DISCRIMINATOR_LEN]);
    out
}

/// Seed for the recovery attempt PDA: the sequence as 8 little-endian bytes.
pub fn recovery_sequence_seed(sequence: u64) -> [u8; 8] {
    sequence.to_le_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminator_is_stable() {
        let a = discriminator("global", "create_wallet");
        let b = discriminator("global", "create_wallet");
        assert_eq!(a, b);
        assert_ne!(a, discriminator("global", "send_sol"));
        assert_ne!(a, discriminator("account", "create_wallet"));
    }

    #[test]
    fn test_recovery_seed_is_little_endian() {
        assert_eq!(recovery_sequence_seed(3), [3, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(recovery_sequence_seed(0x0102), [2, 1, 0, 0, 0, 0, 0, 0]);
    }
}
