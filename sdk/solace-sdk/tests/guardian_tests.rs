use solace_sdk::core::signer::SolaceSigner;
use solace_sdk::state::{RecoveryAttempt, SolaceInstruction, Wallet};
use solace_sdk::{
    derive_recovery_pda, derive_wallet_pda, GuardianQuery, RecoveryState, SolaceSdkError,
    SolaceWallet,
};
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

mod common;
use common::{empty_wallet, setup_test_context, TestContext};

/// Stores a wallet for `name` and returns its address
fn seed_wallet(context: &TestContext, name: &str, f: impl FnOnce(&mut Wallet)) -> Pubkey {
    let (address, _) = derive_wallet_pda(&context.program_id(), name).unwrap();
    let mut wallet = empty_wallet(Pubkey::new_unique(), name);
    f(&mut wallet);
    context.ledger.put_wallet(address, &wallet);
    address
}

#[tokio::test]
async fn test_is_in_recovery_uses_one_read() {
    let context = setup_test_context();
    let address = seed_wallet(&context, "alice", |_| {});
    let query = GuardianQuery::new(context.ledger.as_ref(), context.program_id());

    let before = context.ledger.reads();
    assert!(!query.is_in_recovery(&address).await.unwrap());
    assert_eq!(context.ledger.reads() - before, 1);
}

#[tokio::test]
async fn test_is_in_recovery_through_wallet_client() {
    let context = setup_test_context();
    let address = seed_wallet(&context, "alice", |w| w.recovery_mode = true);
    let owner: Arc<dyn SolaceSigner> = context.owner.clone();
    let client = SolaceWallet::new(owner, context.program_id(), context.ledger.clone());

    assert!(client.is_in_recovery(&address).await.unwrap());
}

#[tokio::test]
async fn test_is_in_recovery_unknown_wallet() {
    let context = setup_test_context();
    let query = GuardianQuery::new(context.ledger.as_ref(), context.program_id());
    let missing = Pubkey::new_unique();

    assert!(matches!(
        query.is_in_recovery(&missing).await,
        Err(SolaceSdkError::WalletNotFound(a)) if a == missing
    ));
}

#[tokio::test]
async fn test_network_failure_on_read() {
    let context = setup_test_context();
    let address = seed_wallet(&context, "alice", |_| {});
    context.ledger.set_offline(true);
    let query = GuardianQuery::new(context.ledger.as_ref(), context.program_id());

    assert!(matches!(
        query.get_wallet_guardian_info(&address).await,
        Err(SolaceSdkError::NetworkUnreachable(_))
    ));
}

#[tokio::test]
async fn test_guardian_info_projects_membership() {
    let context = setup_test_context();
    let approved = Pubkey::new_unique();
    let pending = Pubkey::new_unique();
    let address = seed_wallet(&context, "alice", |w| {
        w.approved_guardians = vec![approved];
        w.pending_guardians = vec![pending];
        w.pending_guardians_approval_from = vec![1_700_100_000];
        w.recovery_threshold = 1;
    });
    let query = GuardianQuery::new(context.ledger.as_ref(), context.program_id());

    let info = query.get_wallet_guardian_info(&address).await.unwrap();
    assert_eq!(info.approved_guardians, vec![approved]);
    assert_eq!(info.pending_guardians, vec![pending]);
}

#[test]
fn test_approve_guardianship_tx() {
    let context = setup_test_context();
    let query = GuardianQuery::new(context.ledger.as_ref(), context.program_id());
    let wallet = Pubkey::new_unique();
    let guardian = Pubkey::new_unique();

    let ix = query.approve_guardianship_tx(&wallet, &guardian).unwrap();
    assert_eq!(ix.program_id, context.program_id());
    assert_eq!(ix.accounts[0].pubkey, wallet);
    assert_eq!(ix.accounts[1].pubkey, guardian);
    assert!(ix.accounts[1].is_signer);
    assert_eq!(
        SolaceInstruction::unpack(&ix.data).unwrap(),
        SolaceInstruction::ApproveGuardianship
    );
    assert_eq!(context.ledger.reads(), 0);
}

#[test_log::test(tokio::test)]
async fn test_guardian_approves_attempt_opened_by_recoverer() {
    let context = setup_test_context();
    let guardian = Pubkey::new_unique();
    let address = seed_wallet(&context, "alice", |w| {
        w.approved_guardians = vec![guardian];
        w.recovery_threshold = 1;
        w.wallet_recovery_sequence = 3;
    });

    let owner: Arc<dyn SolaceSigner> = context.owner.clone();
    let mut recoverer = SolaceWallet::new(owner, context.program_id(), context.ledger.clone());
    let initiated = recoverer
        .recover_wallet("alice", &context.fee_payer_pubkey())
        .await
        .unwrap()
        .to_transaction()
        .unwrap();
    let attempt =
        initiated.message.account_keys[initiated.message.instructions[0].accounts[1] as usize];

    let query = GuardianQuery::new(context.ledger.as_ref(), context.program_id());
    let approval = query
        .approve_recovery_by_keypair_tx("alice", &guardian)
        .await
        .unwrap();

    assert_eq!(approval.recovery_address, attempt);
    assert_eq!(
        approval.recovery_address,
        derive_recovery_pda(&context.program_id(), &address, 3)
            .unwrap()
            .0
    );
    let accounts: Vec<Pubkey> = approval
        .instruction
        .accounts
        .iter()
        .map(|a| a.pubkey)
        .collect();
    assert_eq!(accounts, vec![address, guardian, attempt]);
    assert_eq!(
        SolaceInstruction::unpack(&approval.instruction.data).unwrap(),
        SolaceInstruction::ApproveRecoveryByKeypair
    );
}

#[tokio::test]
async fn test_stale_attempt_is_not_targeted_after_sequence_moves() {
    let context = setup_test_context();
    let guardian = Pubkey::new_unique();
    let address = seed_wallet(&context, "alice", |w| {
        w.approved_guardians = vec![guardian];
        w.wallet_recovery_sequence = 3;
    });
    let query = GuardianQuery::new(context.ledger.as_ref(), context.program_id());

    let before = query
        .approve_recovery_by_keypair_tx("alice", &guardian)
        .await
        .unwrap();
    context
        .ledger
        .update_wallet(address, |w| w.wallet_recovery_sequence = 4);
    let after = query
        .approve_recovery_by_keypair_tx("alice", &guardian)
        .await
        .unwrap();

    assert_ne!(before.recovery_address, after.recovery_address);
}

#[tokio::test]
async fn test_recovery_state_and_attempt() {
    let context = setup_test_context();
    let guardians = [Pubkey::new_unique(), Pubkey::new_unique()];
    let address = seed_wallet(&context, "alice", |w| {
        w.approved_guardians = guardians.to_vec();
        w.recovery_threshold = 2;
        w.wallet_recovery_sequence = 1;
    });
    let query = GuardianQuery::new(context.ledger.as_ref(), context.program_id());

    assert_eq!(
        query.recovery_state(&address).await.unwrap(),
        RecoveryState::Normal { sequence: 1 }
    );

    let (attempt, bump) = derive_recovery_pda(&context.program_id(), &address, 1).unwrap();
    let proposer = Pubkey::new_unique();
    context.ledger.put_recovery(
        attempt,
        &RecoveryAttempt {
            wallet: address,
            bump,
            proposer,
            new_owner: proposer,
            approvals: vec![true, false],
            is_executed: false,
        },
    );
    context.ledger.update_wallet(address, |w| {
        w.recovery_mode = true;
        w.current_recovery = Some(attempt);
    });

    assert_eq!(
        query.recovery_state(&address).await.unwrap(),
        RecoveryState::PendingRecovery {
            sequence: 1,
            attempt
        }
    );

    let info = query.fetch_recovery_attempt(&attempt).await.unwrap().unwrap();
    assert_eq!(info.wallet, address);
    assert_eq!(info.new_owner, proposer);
    assert_eq!(info.approval_count(), 1);
    assert!(!info.is_executed);

    assert_eq!(
        query
            .fetch_recovery_attempt(&Pubkey::new_unique())
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn test_approve_recovery_for_unknown_user() {
    let context = setup_test_context();
    let query = GuardianQuery::new(context.ledger.as_ref(), context.program_id());

    assert!(matches!(
        query
            .approve_recovery_by_keypair_tx("nobody", &Pubkey::new_unique())
            .await,
        Err(SolaceSdkError::WalletNotFound(_))
    ));
}
