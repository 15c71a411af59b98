//! Solace Instruction Definitions
//!
//! Every instruction is encoded as `discriminator("global", name) ++ borsh(args)`
//! where `name` is the snake_case handler name in the deployed program.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::error::InterfaceError;
use crate::{discriminator, DISCRIMINATOR_LEN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolaceInstruction {
    /// Create a wallet for an owner
    ///
    /// Accounts:
    /// 0. `[writable, signer]` Owner
    /// 1. `[writable, signer]` Rent payer
    /// 2. `[writable]` Wallet (PDA: ["SOLACE", name])
    /// 3. `[]` System program
    CreateWallet {
        owner: Pubkey,
        guardian_keys: Vec<Pubkey>,
        recovery_threshold: u8,
        name: String,
    },

    /// Move lamports out of the wallet
    ///
    /// Accounts:
    /// 0. `[writable]` Destination
    /// 1. `[writable]` Wallet
    /// 2. `[writable, signer]` Owner
    SendSol { amount: u64 },

    /// Add a pending guardian and set the new recovery threshold
    ///
    /// Accounts:
    /// 0. `[writable]` Wallet
    /// 1. `[writable, signer]` Owner
    AddGuardians {
        guardian: Pubkey,
        recovery_threshold: u8,
    },

    /// Accept a pending guardianship, signed by the guardian
    ///
    /// Accounts:
    /// 0. `[writable]` Wallet
    /// 1. `[writable, signer]` Guardian
    ApproveGuardianship,

    /// Remove an approved guardian. The threshold is left untouched.
    ///
    /// Accounts:
    /// 0. `[writable]` Wallet
    /// 1. `[]` Guardian
    /// 2. `[writable, signer]` Owner
    RemoveGuardians,

    /// Open a recovery attempt at the wallet's current recovery sequence
    ///
    /// Accounts:
    /// 0. `[writable]` Wallet
    /// 1. `[writable]` Recovery attempt (PDA: [wallet, sequence_le_u64])
    /// 2. `[writable, signer]` Proposer
    /// 3. `[]` System program
    InitiateWalletRecovery { new_owner: Pubkey },

    /// Approve the current recovery attempt as a keypair guardian
    ///
    /// Accounts:
    /// 0. `[writable]` Wallet to recover
    /// 1. `[writable, signer]` Guardian
    /// 2. `[writable]` Recovery attempt
    ApproveRecoveryByKeypair,

    /// Check that the wallet token account for a mint exists
    ///
    /// Accounts:
    /// 0. `[writable, signer]` Rent payer
    /// 1. `[writable]` Wallet
    /// 2. `[writable]` Token account (PDA: ["wallet", wallet, mint])
    /// 3. `[]` Token mint
    /// 4. `[]` Token program
    /// 5. `[]` System program
    /// 6. `[writable, signer]` Owner
    CheckAta,

    /// Create the wallet token account for a mint
    ///
    /// Accounts:
    /// 0. `[writable, signer]` Rent payer
    /// 1. `[writable, signer]` Owner
    /// 2. `[writable]` Wallet
    /// 3. `[]` Token mint
    /// 4. `[writable]` Token account
    /// 5. `[]` Token program
    /// 6. `[]` Rent sysvar
    /// 7. `[]` System program
    CreateAta,

    /// Transfer SPL tokens out of the wallet token account
    ///
    /// Accounts:
    /// 0. `[writable, signer]` Owner
    /// 1. `[writable]` Wallet
    /// 2. `[writable]` Receiver token account
    /// 3. `[]` Token mint
    /// 4. `[writable]` Wallet token account
    /// 5. `[]` Token program
    /// 6. `[]` System program
    SendSpl { amount: u64 },
}

impl SolaceInstruction {
    /// Handler name in the deployed program
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateWallet { .. } => "create_wallet",
            Self::SendSol { .. } => "send_sol",
            Self::AddGuardians { .. } => "add_guardians",
            Self::ApproveGuardianship => "approve_guardianship",
            Self::RemoveGuardians => "remove_guardians",
            Self::InitiateWalletRecovery { .. } => "initiate_wallet_recovery",
            Self::ApproveRecoveryByKeypair => "approve_recovery_by_keypair",
            Self::CheckAta => "check_ata",
            Self::CreateAta => "create_ata",
            Self::SendSpl { .. } => "send_spl",
        }
    }

    pub fn discriminator(&self) -> [u8; DISCRIMINATOR_LEN] {
        discriminator("global", self.name())
    }

    pub fn pack(&self) -> Result<Vec<u8>, InterfaceError> {
        let mut data = self.discriminator().to_vec();
        match self {
            Self::CreateWallet {
                owner,
                guardian_keys,
                recovery_threshold,
                name,
            } => {
                owner.serialize(&mut data)?;
                guardian_keys.serialize(&mut data)?;
                recovery_threshold.serialize(&mut data)?;
                name.serialize(&mut data)?;
            },
            Self::SendSol { amount } | Self::SendSpl { amount } => {
                amount.serialize(&mut data)?;
            },
            Self::AddGuardians {
                guardian,
                recovery_threshold,
            } => {
                guardian.serialize(&mut data)?;
                recovery_threshold.serialize(&mut data)?;
            },
            Self::InitiateWalletRecovery { new_owner } => {
                new_owner.serialize(&mut data)?;
            },
            Self::ApproveGuardianship
            | Self::RemoveGuardians
            | Self::ApproveRecoveryByKeypair
            | Self::CheckAta
            | Self::CreateAta => {},
        }
        Ok(data)
    }

    pub fn unpack(input: &[u8]) -> Result<Self, InterfaceError> {
        if input.len() < DISCRIMINATOR_LEN {
            return Err(InterfaceError::AccountDataTooSmall {
                expected: DISCRIMINATOR_LEN,
                actual: input.len(),
            });
        }
        let (tag, mut args) = input.split_at(DISCRIMINATOR_LEN);
        let is = |name: &str| tag == discriminator("global", name);

        let ix = if is("create_wallet") {
            Self::CreateWallet {
                owner: Pubkey::deserialize(&mut args)?,
                guardian_keys: Vec::<Pubkey>::deserialize(&mut args)?,
                recovery_threshold: u8::deserialize(&mut args)?,
                name: String::deserialize(&mut args)?,
            }
        } else if is("send_sol") {
            Self::SendSol {
                amount: u64::deserialize(&mut args)?,
            }
        } else if is("add_guardians") {
            Self::AddGuardians {
                guardian: Pubkey::deserialize(&mut args)?,
                recovery_threshold: u8::deserialize(&mut args)?,
            }
        } else if is("approve_guardianship") {
            Self::ApproveGuardianship
        } else if is("remove_guardians") {
            Self::RemoveGuardians
        } else if is("initiate_wallet_recovery") {
            Self::InitiateWalletRecovery {
                new_owner: Pubkey::deserialize(&mut args)?,
            }
        } else if is("approve_recovery_by_keypair") {
            Self::ApproveRecoveryByKeypair
        } else if is("check_ata") {
            Self::CheckAta
        } else if is("create_ata") {
            Self::CreateAta
        } else if is("send_spl") {
            Self::SendSpl {
                amount: u64::deserialize(&mut args)?,
            }
        } else {
            return Err(InterfaceError::InvalidDiscriminator("instruction"));
        };
        Ok(ix)
    }
}
