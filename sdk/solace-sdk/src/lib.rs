//! Client SDK for the Solace guardian-recovery wallet.
//!
//! Derives the program's addresses, builds its instructions and signs them
//! as the wallet owner for a relayer to pay for and broadcast.

pub mod advanced;
pub mod basic;
pub mod core;
pub mod error;
pub mod types;
pub mod utils;

pub use crate::basic::guardian::GuardianQuery;
pub use crate::basic::relay::RelaySigner;
pub use crate::basic::token_cache::TokenAccountCache;
pub use crate::basic::wallet::SolaceWallet;
pub use crate::core::connection::SolConnection;
pub use crate::core::network::{ClientConfig, Network};
pub use crate::core::signer::SolaceSigner;
pub use crate::error::{Result, SolaceSdkError};
pub use crate::types::{
    ApproveRecoveryTx, BlockhashContext, GuardianInfo, RecoveryAttemptInfo, RecoveryState,
    RelayableTransaction, TokenAccountBinding, TokenAccountInfo, TokenAccountState, WalletInfo,
};
pub use crate::utils::{
    derive_address, derive_recovery_pda, derive_token_account_pda, derive_wallet_pda,
    fetch_wallet_account, fetch_wallet_info, parse_token_account, parse_wallet,
};

pub mod state {
    pub use solace_interface::state::{AnchorAccount, ACCOUNT_SPACE};
    pub use solace_interface::{RecoveryAttempt, SolaceInstruction, Wallet};
}
