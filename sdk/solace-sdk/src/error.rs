use solace_interface::InterfaceError;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// SDK-specific error types for Solace operations
#[derive(Debug, Error)]
pub enum SolaceSdkError {
    /// No bump seed produced an off-curve address
    #[error("Address derivation exhausted every bump seed")]
    DerivationExhausted,

    /// Wallet account not found on-chain
    #[error("Wallet not found: {0}")]
    WalletNotFound(Pubkey),

    /// Client has not been bound to a wallet address yet
    #[error("Wallet not initialized. Create the wallet or retrieve it by name first")]
    WalletUninitialized,

    /// Owner key material could not sign
    #[error("Signing unavailable: {0}")]
    SigningUnavailable(String),

    /// RPC call failed before reaching the program
    #[error("Network unreachable: {0}")]
    NetworkUnreachable(String),

    /// Transaction rejected by the ledger, forwarded verbatim
    #[error("Ledger rejected transaction: {0}")]
    LedgerRejection(String),

    /// Invalid account data or deserialization error
    #[error("Invalid account data: {0}")]
    InvalidAccountData(String),

    /// Caller-supplied value cannot be encoded
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Borsh/bincode serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] std::io::Error),
}

impl From<InterfaceError> for SolaceSdkError {
    fn from(e: InterfaceError) -> Self {
        match e {
            InterfaceError::Serialization(io) => SolaceSdkError::Serialization(io),
            other => SolaceSdkError::InvalidAccountData(other.to_string()),
        }
    }
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, SolaceSdkError>;
