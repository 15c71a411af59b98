use crate::error::Result;
use crate::types::TokenAccountBinding;
use crate::utils;
use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Memo of `mint -> token account` for one wallet of one program.
///
/// Entries are a pure function of (program, wallet, mint) and are never
/// evicted. Two callers missing on the same mint may both derive it; the
/// results are identical so the second insert is harmless.
#[derive(Debug)]
pub struct TokenAccountCache {
    program_id: Pubkey,
    wallet: Pubkey,
    entries: Mutex<HashMap<Pubkey, Pubkey>>,
}

impl TokenAccountCache {
    pub fn new(program_id: Pubkey, wallet: Pubkey) -> Self {
        Self {
            program_id,
            wallet,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn wallet(&self) -> &Pubkey {
        &self.wallet
    }

    pub fn get(&self, mint: &Pubkey) -> Result<Pubkey> {
        if let Some(token_account) = self.lock().get(mint) {
            return Ok(*token_account);
        }

        // derive outside the lock
        let (token_account, _) =
            utils::derive_token_account_pda(&self.program_id, &self.wallet, mint)?;
        debug!(wallet = %self.wallet, %mint, %token_account, "cached token account");
        self.lock().insert(*mint, token_account);
        Ok(token_account)
    }

    pub fn bindings(&self) -> Vec<TokenAccountBinding> {
        self.lock()
            .iter()
            .map(|(mint, token_account)| TokenAccountBinding {
                mint: *mint,
                token_account: *token_account,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Pubkey, Pubkey>> {
        // the map is always left consistent, so a poisoned lock is still usable
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
