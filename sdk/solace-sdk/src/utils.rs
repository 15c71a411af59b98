use crate::core::connection::SolConnection;
use crate::core::constants::{TOKEN_ACCOUNT_SEED, WALLET_SEED};
use crate::error::{Result, SolaceSdkError};
use crate::types::{RecoveryAttemptInfo, TokenAccountInfo, TokenAccountState, WalletInfo};
use solace_interface::state::AnchorAccount;
use solace_interface::{recovery_sequence_seed, RecoveryAttempt, Wallet};
use solana_sdk::pubkey::{Pubkey, MAX_SEEDS, MAX_SEED_LEN};
use spl_token::solana_program::program_pack::Pack;
use spl_token::state::AccountState;
use tracing::debug;

//=============================================================================
// PDA Derivation Helpers
//=============================================================================

/// Derive a program address the same way the program validates it: walk the
/// bump seed down from 255 until the hash lands off the ed25519 curve.
pub fn derive_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<(Pubkey, u8)> {
    if seeds.len() >= MAX_SEEDS {
        return Err(SolaceSdkError::InvalidArgument(format!(
            "Too many seeds: {} (max {})",
            seeds.len(),
            MAX_SEEDS - 1
        )));
    }
    if let Some(seed) = seeds.iter().find(|s| s.len() > MAX_SEED_LEN) {
        return Err(SolaceSdkError::InvalidArgument(format!(
            "Seed of {} bytes exceeds the {} byte limit",
            seed.len(),
            MAX_SEED_LEN
        )));
    }

    Pubkey::try_find_program_address(seeds, program_id).ok_or(SolaceSdkError::DerivationExhausted)
}

/// Derive the wallet PDA from the username: ["SOLACE", name]
pub fn derive_wallet_pda(program_id: &Pubkey, name: &str) -> Result<(Pubkey, u8)> {
    derive_address(&[WALLET_SEED, name.as_bytes()], program_id)
}

/// Derive the wallet's token account for a mint: ["wallet", wallet, mint]
pub fn derive_token_account_pda(
    program_id: &Pubkey,
    wallet: &Pubkey,
    mint: &Pubkey,
) -> Result<(Pubkey, u8)> {
    derive_address(
        &[TOKEN_ACCOUNT_SEED, wallet.as_ref(), mint.as_ref()],
        program_id,
    )
}

/// Derive the recovery attempt PDA: [wallet, sequence as u64 LE]
pub fn derive_recovery_pda(
    program_id: &Pubkey,
    wallet: &Pubkey,
    sequence: u64,
) -> Result<(Pubkey, u8)> {
    let (address, bump) = derive_address(
        &[wallet.as_ref(), &recovery_sequence_seed(sequence)],
        program_id,
    )?;
    debug!(%wallet, sequence, recovery = %address, "derived recovery attempt address");
    Ok((address, bump))
}

//=============================================================================
// Account Fetching & Parsing
//=============================================================================

/// Fetch raw account data, `None` when the account does not exist
pub async fn fetch_account_data(
    connection: &impl SolConnection,
    address: &Pubkey,
) -> Result<Option<Vec<u8>>> {
    let account = connection
        .get_account(address)
        .await
        .map_err(|e| SolaceSdkError::NetworkUnreachable(e.to_string()))?;

    Ok(account.map(|a| a.data))
}

/// Fetch wallet account data from the blockchain
pub async fn fetch_wallet_account(
    connection: &impl SolConnection,
    wallet: &Pubkey,
) -> Result<Vec<u8>> {
    fetch_account_data(connection, wallet)
        .await?
        .ok_or(SolaceSdkError::WalletNotFound(*wallet))
}

/// Parse wallet account data
pub fn parse_wallet(data: &[u8]) -> Result<Wallet> {
    Ok(Wallet::try_from_account_data(data)?)
}

/// Fetch and parse a wallet view with a single read
pub async fn fetch_wallet_info(
    connection: &impl SolConnection,
    wallet: &Pubkey,
) -> Result<WalletInfo> {
    let data = fetch_wallet_account(connection, wallet).await?;
    let account = parse_wallet(&data)?;
    Ok(WalletInfo::from_account(*wallet, account))
}

/// Fetch and parse a recovery attempt, `None` when it was never created
pub async fn fetch_recovery_attempt(
    connection: &impl SolConnection,
    address: &Pubkey,
) -> Result<Option<RecoveryAttemptInfo>> {
    let Some(data) = fetch_account_data(connection, address).await? else {
        return Ok(None);
    };
    let attempt = RecoveryAttempt::try_from_account_data(&data)?;

    Ok(Some(RecoveryAttemptInfo {
        address: *address,
        wallet: attempt.wallet,
        proposer: attempt.proposer,
        new_owner: attempt.new_owner,
        approvals: attempt.approvals,
        is_executed: attempt.is_executed,
    }))
}

/// Parse an SPL token account
pub fn parse_token_account(data: &[u8]) -> Result<TokenAccountInfo> {
    let account = spl_token::state::Account::unpack(data)
        .map_err(|e| SolaceSdkError::InvalidAccountData(format!("Invalid token account: {}", e)))?;

    let state = match account.state {
        AccountState::Uninitialized => TokenAccountState::Uninitialized,
        AccountState::Initialized => TokenAccountState::Initialized,
        AccountState::Frozen => TokenAccountState::Frozen,
    };

    Ok(TokenAccountInfo {
        mint: account.mint,
        owner: account.owner,
        amount: account.amount,
        delegate: account.delegate.into(),
        state,
        is_native: account.is_native.into(),
        delegated_amount: account.delegated_amount,
        close_authority: account.close_authority.into(),
    })
}
