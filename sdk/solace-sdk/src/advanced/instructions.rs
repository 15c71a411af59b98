use crate::error::{Result, SolaceSdkError};
use crate::utils;
use solace_interface::SolaceInstruction;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::sysvar;
use solana_system_interface::program as system_program;

fn build(
    program_id: &Pubkey,
    instruction: SolaceInstruction,
    accounts: Vec<AccountMeta>,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: *program_id,
        accounts,
        data: instruction.pack()?,
    })
}

/// Threshold sent with `add_guardians`: every approved guardian plus the new
/// one must approve a recovery.
pub fn next_guardian_threshold(approved_count: usize) -> Result<u8> {
    approved_count
        .checked_add(1)
        .and_then(|t| u8::try_from(t).ok())
        .ok_or_else(|| {
            SolaceSdkError::InvalidArgument(format!(
                "Cannot add a guardian to a wallet with {} approved guardians",
                approved_count
            ))
        })
}

/// Returns the instruction and the wallet PDA it initializes.
pub fn create_wallet(
    program_id: &Pubkey,
    owner: &Pubkey,
    fee_payer: &Pubkey,
    name: &str,
) -> Result<(Instruction, Pubkey)> {
    let (wallet, _) = utils::derive_wallet_pda(program_id, name)?;

    let instruction = SolaceInstruction::CreateWallet {
        owner: *owner,
        guardian_keys: vec![],
        recovery_threshold: 0,
        name: name.to_string(),
    };

    let accounts = vec![
        AccountMeta::new(*owner, true),
        AccountMeta::new(*fee_payer, true),
        AccountMeta::new(wallet, false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    Ok((build(program_id, instruction, accounts)?, wallet))
}

pub fn send_sol(
    program_id: &Pubkey,
    wallet: &Pubkey,
    owner: &Pubkey,
    destination: &Pubkey,
    lamports: u64,
) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new(*destination, false),
        AccountMeta::new(*wallet, false),
        AccountMeta::new(*owner, true),
    ];

    build(
        program_id,
        SolaceInstruction::SendSol { amount: lamports },
        accounts,
    )
}

pub fn add_guardian(
    program_id: &Pubkey,
    wallet: &Pubkey,
    owner: &Pubkey,
    guardian: &Pubkey,
    recovery_threshold: u8,
) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new(*wallet, false),
        AccountMeta::new(*owner, true),
    ];

    build(
        program_id,
        SolaceInstruction::AddGuardians {
            guardian: *guardian,
            recovery_threshold,
        },
        accounts,
    )
}

/// The threshold is not recomputed on removal.
pub fn remove_guardian(
    program_id: &Pubkey,
    wallet: &Pubkey,
    owner: &Pubkey,
    guardian: &Pubkey,
) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new(*wallet, false),
        AccountMeta::new_readonly(*guardian, false),
        AccountMeta::new(*owner, true),
    ];

    build(program_id, SolaceInstruction::RemoveGuardians, accounts)
}

/// Signed by the guardian, not the owner.
pub fn approve_guardianship(
    program_id: &Pubkey,
    wallet: &Pubkey,
    guardian: &Pubkey,
) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new(*wallet, false),
        AccountMeta::new(*guardian, true),
    ];

    build(program_id, SolaceInstruction::ApproveGuardianship, accounts)
}

/// `sequence` must be the wallet's current `wallet_recovery_sequence`.
/// Returns the instruction and the recovery attempt PDA.
pub fn initiate_recovery(
    program_id: &Pubkey,
    wallet: &Pubkey,
    proposer: &Pubkey,
    sequence: u64,
) -> Result<(Instruction, Pubkey)> {
    let (recovery, _) = utils::derive_recovery_pda(program_id, wallet, sequence)?;

    let accounts = vec![
        AccountMeta::new(*wallet, false),
        AccountMeta::new(recovery, false),
        AccountMeta::new(*proposer, true),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    let ix = build(
        program_id,
        SolaceInstruction::InitiateWalletRecovery {
            new_owner: *proposer,
        },
        accounts,
    )?;
    Ok((ix, recovery))
}

/// Returns the instruction and the recovery attempt PDA it approves.
pub fn approve_recovery_by_keypair(
    program_id: &Pubkey,
    wallet: &Pubkey,
    guardian: &Pubkey,
    sequence: u64,
) -> Result<(Instruction, Pubkey)> {
    let (recovery, _) = utils::derive_recovery_pda(program_id, wallet, sequence)?;

    let accounts = vec![
        AccountMeta::new(*wallet, false),
        AccountMeta::new(*guardian, true),
        AccountMeta::new(recovery, false),
    ];

    let ix = build(
        program_id,
        SolaceInstruction::ApproveRecoveryByKeypair,
        accounts,
    )?;
    Ok((ix, recovery))
}

pub fn check_token_account(
    program_id: &Pubkey,
    wallet: &Pubkey,
    owner: &Pubkey,
    fee_payer: &Pubkey,
    mint: &Pubkey,
    token_account: &Pubkey,
) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new(*fee_payer, true),
        AccountMeta::new(*wallet, false),
        AccountMeta::new(*token_account, false),
        AccountMeta::new_readonly(*mint, false),
        AccountMeta::new_readonly(spl_token::id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new(*owner, true),
    ];

    build(program_id, SolaceInstruction::CheckAta, accounts)
}

/// The program reports an already existing account; callers treat that as success.
pub fn create_token_account(
    program_id: &Pubkey,
    wallet: &Pubkey,
    owner: &Pubkey,
    fee_payer: &Pubkey,
    mint: &Pubkey,
    token_account: &Pubkey,
) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new(*fee_payer, true),
        AccountMeta::new(*owner, true),
        AccountMeta::new(*wallet, false),
        AccountMeta::new_readonly(*mint, false),
        AccountMeta::new(*token_account, false),
        AccountMeta::new_readonly(spl_token::id(), false),
        AccountMeta::new_readonly(sysvar::rent::id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    build(program_id, SolaceInstruction::CreateAta, accounts)
}

/// `amount` is in the mint's base unit.
pub fn send_spl_token(
    program_id: &Pubkey,
    wallet: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
    token_account: &Pubkey,
    receiver_token_account: &Pubkey,
    amount: u64,
) -> Result<Instruction> {
    let accounts = vec![
        AccountMeta::new(*owner, true),
        AccountMeta::new(*wallet, false),
        AccountMeta::new(*receiver_token_account, false),
        AccountMeta::new_readonly(*mint, false),
        AccountMeta::new(*token_account, false),
        AccountMeta::new_readonly(spl_token::id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    build(program_id, SolaceInstruction::SendSpl { amount }, accounts)
}
