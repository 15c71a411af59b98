#![allow(dead_code)]

use async_trait::async_trait;
use solace_sdk::core::connection::SolConnection;
use solace_sdk::core::signer::SolaceSigner;
use solace_sdk::state::{AnchorAccount, RecoveryAttempt, Wallet, ACCOUNT_SPACE};
use solana_sdk::{
    account::Account,
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory ledger. It stores whatever account state a test puts in and
/// never executes instructions; tests play the program's part.
pub struct MockLedger {
    pub program_id: Pubkey,
    accounts: Mutex<HashMap<Pubkey, Account>>,
    sent: Mutex<Vec<Transaction>>,
    reads: AtomicUsize,
    offline: AtomicBool,
    reject_with: Mutex<Option<String>>,
    blockhash: Hash,
}

impl MockLedger {
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            accounts: Mutex::new(HashMap::new()),
            sent: Mutex::new(Vec::new()),
            reads: AtomicUsize::new(0),
            offline: AtomicBool::new(false),
            reject_with: Mutex::new(None),
            blockhash: Hash::new_unique(),
        }
    }

    pub fn blockhash(&self) -> Hash {
        self.blockhash
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn reject_next(&self, reason: &str) {
        *self.reject_with.lock().unwrap() = Some(reason.to_string());
    }

    pub fn sent(&self) -> Vec<Transaction> {
        self.sent.lock().unwrap().clone()
    }

    pub fn put_account(&self, address: Pubkey, data: Vec<u8>, owner: Pubkey) {
        self.accounts.lock().unwrap().insert(
            address,
            Account {
                lamports: 1_000_000,
                data,
                owner,
                executable: false,
                rent_epoch: 0,
            },
        );
    }

    pub fn put_wallet(&self, address: Pubkey, wallet: &Wallet) {
        let data = wallet.to_account_data(ACCOUNT_SPACE).unwrap();
        self.put_account(address, data, self.program_id);
    }

    pub fn put_recovery(&self, address: Pubkey, attempt: &RecoveryAttempt) {
        let data = attempt.to_account_data(ACCOUNT_SPACE).unwrap();
        self.put_account(address, data, self.program_id);
    }

    /// Apply a change to a stored wallet, as the program would after
    /// accepting a transaction.
    pub fn update_wallet(&self, address: Pubkey, f: impl FnOnce(&mut Wallet)) {
        let data = self
            .accounts
            .lock()
            .unwrap()
            .get(&address)
            .expect("wallet not stored")
            .data
            .clone();
        let mut wallet = Wallet::try_from_account_data(&data).unwrap();
        f(&mut wallet);
        self.put_wallet(address, &wallet);
    }
}

#[async_trait]
impl SolConnection for MockLedger {
    async fn send_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, Box<dyn std::error::Error + Send + Sync>> {
        if let Some(reason) = self.reject_with.lock().unwrap().take() {
            return Err(reason.into());
        }
        self.sent.lock().unwrap().push(tx.clone());
        Ok(*tx.signatures.first().ok_or("No signature")?)
    }

    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn std::error::Error + Send + Sync>> {
        if self.offline.load(Ordering::SeqCst) {
            return Err("connection refused".into());
        }
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.accounts.lock().unwrap().get(pubkey).cloned())
    }

    async fn get_latest_blockhash(
        &self,
    ) -> Result<(Hash, u64), Box<dyn std::error::Error + Send + Sync>> {
        if self.offline.load(Ordering::SeqCst) {
            return Err("connection refused".into());
        }
        Ok((self.blockhash, 1_000))
    }
}

/// Key material that is locked and cannot sign
pub struct LockedSigner(pub Pubkey);

#[async_trait]
impl SolaceSigner for LockedSigner {
    fn pubkey(&self) -> Pubkey {
        self.0
    }

    async fn sign_message(&self, _message: &[u8]) -> Result<Signature, String> {
        Err("key store locked".to_string())
    }
}

pub fn empty_wallet(owner: Pubkey, name: &str) -> Wallet {
    Wallet {
        owner,
        bump: 255,
        name: name.to_string(),
        approved_guardians: vec![],
        pending_guardians: vec![],
        pending_guardians_approval_from: vec![],
        recovery_mode: false,
        recovery_threshold: 0,
        wallet_recovery_sequence: 0,
        current_recovery: None,
        created_at: 1_700_000_000,
    }
}

pub struct TestContext {
    pub ledger: Arc<MockLedger>,
    pub owner: Arc<Keypair>,
    pub fee_payer: Keypair,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            ledger: Arc::new(MockLedger::new(Pubkey::new_unique())),
            owner: Arc::new(Keypair::new()),
            fee_payer: Keypair::new(),
        }
    }

    pub fn program_id(&self) -> Pubkey {
        self.ledger.program_id
    }

    pub fn owner_pubkey(&self) -> Pubkey {
        Signer::pubkey(self.owner.as_ref())
    }

    pub fn fee_payer_pubkey(&self) -> Pubkey {
        Signer::pubkey(&self.fee_payer)
    }
}

pub fn setup_test_context() -> TestContext {
    TestContext::new()
}
