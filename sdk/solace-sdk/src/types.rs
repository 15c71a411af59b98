use serde::Serialize;
use solace_interface::Wallet;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;

/// Client-side view of a wallet account. Never authoritative: re-fetch
/// before any decision that depends on counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletInfo {
    /// Wallet PDA
    pub address: Pubkey,

    pub owner: Pubkey,

    /// Username the wallet PDA was derived from
    pub name: String,

    pub approved_guardians: Vec<Pubkey>,

    pub pending_guardians: Vec<Pubkey>,

    /// Unix timestamps from which each pending guardian may approve
    pub pending_guardians_approval_from: Vec<i64>,

    /// Number of guardian approvals needed to recover
    pub guardian_approval_threshold: u8,

    pub recovery_mode: bool,

    /// Sequence of the next (or current) recovery attempt
    pub wallet_recovery_sequence: u64,

    pub current_recovery: Option<Pubkey>,

    pub created_at: i64,
}

impl WalletInfo {
    pub fn from_account(address: Pubkey, wallet: Wallet) -> Self {
        Self {
            address,
            owner: wallet.owner,
            name: wallet.name,
            approved_guardians: wallet.approved_guardians,
            pending_guardians: wallet.pending_guardians,
            pending_guardians_approval_from: wallet.pending_guardians_approval_from,
            guardian_approval_threshold: wallet.recovery_threshold,
            recovery_mode: wallet.recovery_mode,
            wallet_recovery_sequence: wallet.wallet_recovery_sequence,
            current_recovery: wallet.current_recovery,
            created_at: wallet.created_at,
        }
    }

    pub fn guardian_info(&self) -> GuardianInfo {
        GuardianInfo {
            pending_guardians: self.pending_guardians.clone(),
            approved_guardians: self.approved_guardians.clone(),
        }
    }

    pub fn is_guardian(&self, key: &Pubkey) -> bool {
        self.approved_guardians.contains(key)
    }
}

/// Guardian membership of a wallet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardianInfo {
    pub pending_guardians: Vec<Pubkey>,
    pub approved_guardians: Vec<Pubkey>,
}

/// Recovery lifecycle as observed from the client.
/// Completion is only visible as a return to `Normal` at a higher sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryState {
    Normal { sequence: u64 },
    PendingRecovery { sequence: u64, attempt: Pubkey },
}

/// Decoded recovery attempt account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryAttemptInfo {
    pub address: Pubkey,
    pub wallet: Pubkey,
    pub proposer: Pubkey,
    pub new_owner: Pubkey,
    pub approvals: Vec<bool>,
    pub is_executed: bool,
}

impl RecoveryAttemptInfo {
    pub fn approval_count(&self) -> usize {
        self.approvals.iter().filter(|a| **a).count()
    }
}

/// Blockhash a relayable transaction was built against
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockhashContext {
    pub blockhash: String,
    pub last_valid_block_height: u64,
}

/// Owner-signed transaction waiting for a fee payer.
/// The fee payer signature slot is always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayableTransaction {
    /// Owner signature, base58
    pub signature: String,
    /// Owner public key, base58
    pub public_key: String,
    /// Serialized message, base64
    pub message: String,
    pub block_hash: BlockhashContext,
}

/// Guardian-side recovery approval plus the attempt it targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproveRecoveryTx {
    pub instruction: Instruction,
    pub recovery_address: Pubkey,
}

/// Cached mint to token account mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAccountBinding {
    pub mint: Pubkey,
    pub token_account: Pubkey,
}

/// SPL token account state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenAccountState {
    Uninitialized,
    Initialized,
    Frozen,
}

/// Decoded SPL token account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAccountInfo {
    pub mint: Pubkey,
    pub owner: Pubkey,
    /// Raw amount in the mint's base unit
    pub amount: u64,
    pub delegate: Option<Pubkey>,
    pub state: TokenAccountState,
    /// Rent-exempt reserve for native (wrapped SOL) accounts
    pub is_native: Option<u64>,
    pub delegated_amount: u64,
    pub close_authority: Option<Pubkey>,
}
