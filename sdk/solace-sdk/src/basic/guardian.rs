use crate::advanced::instructions;
use crate::core::connection::SolConnection;
use crate::error::Result;
use crate::types::{ApproveRecoveryTx, GuardianInfo, RecoveryAttemptInfo, RecoveryState, WalletInfo};
use crate::utils;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;

/// Read-only access to any Solace wallet, for callers that are not the
/// owner (typically a guardian). Holds no key material.
pub struct GuardianQuery<'a, C: SolConnection> {
    connection: &'a C,
    program_id: Pubkey,
}

impl<'a, C: SolConnection> GuardianQuery<'a, C> {
    pub fn new(connection: &'a C, program_id: Pubkey) -> Self {
        Self {
            connection,
            program_id,
        }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    /// Fetch the state of any wallet
    pub async fn fetch_data_for_wallet(&self, wallet: &Pubkey) -> Result<WalletInfo> {
        utils::fetch_wallet_info(self.connection, wallet).await
    }

    pub async fn get_wallet_guardian_info(&self, wallet: &Pubkey) -> Result<GuardianInfo> {
        Ok(self.fetch_data_for_wallet(wallet).await?.guardian_info())
    }

    /// Answered with exactly one account read.
    pub async fn is_in_recovery(&self, wallet: &Pubkey) -> Result<bool> {
        Ok(self.fetch_data_for_wallet(wallet).await?.recovery_mode)
    }

    pub async fn recovery_state(&self, wallet: &Pubkey) -> Result<RecoveryState> {
        let info = self.fetch_data_for_wallet(wallet).await?;
        let sequence = info.wallet_recovery_sequence;
        if !info.recovery_mode {
            return Ok(RecoveryState::Normal { sequence });
        }

        let attempt = match info.current_recovery {
            Some(attempt) => attempt,
            None => utils::derive_recovery_pda(&self.program_id, wallet, sequence)?.0,
        };
        Ok(RecoveryState::PendingRecovery { sequence, attempt })
    }

    pub async fn fetch_recovery_attempt(
        &self,
        attempt: &Pubkey,
    ) -> Result<Option<RecoveryAttemptInfo>> {
        utils::fetch_recovery_attempt(self.connection, attempt).await
    }

    /// Instruction for a pending guardian to accept guardianship. The
    /// guardian signs it, so nothing is read or signed here.
    pub fn approve_guardianship_tx(&self, wallet: &Pubkey, guardian: &Pubkey) -> Result<Instruction> {
        instructions::approve_guardianship(&self.program_id, wallet, guardian)
    }

    /// Instruction for a guardian to approve the current recovery attempt of
    /// the wallet registered under `username`.
    pub async fn approve_recovery_by_keypair_tx(
        &self,
        username: &str,
        guardian: &Pubkey,
    ) -> Result<ApproveRecoveryTx> {
        let (wallet, _) = utils::derive_wallet_pda(&self.program_id, username)?;
        let info = self.fetch_data_for_wallet(&wallet).await?;

        let (instruction, recovery_address) = instructions::approve_recovery_by_keypair(
            &self.program_id,
            &wallet,
            guardian,
            info.wallet_recovery_sequence,
        )?;

        Ok(ApproveRecoveryTx {
            instruction,
            recovery_address,
        })
    }
}
