use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::account::Account;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use std::error::Error;

/// The ledger as seen by the SDK: account reads, the recent blockhash and
/// broadcast. Every call is a suspension point; the SDK never retries.
#[async_trait]
pub trait SolConnection: Send + Sync {
    async fn send_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, Box<dyn Error + Send + Sync>>;
    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn Error + Send + Sync>>;
    /// Returns the blockhash and the last block height at which it is valid.
    async fn get_latest_blockhash(&self) -> Result<(Hash, u64), Box<dyn Error + Send + Sync>>;
}

#[async_trait]
impl SolConnection for RpcClient {
    async fn send_transaction(
        &self,
        tx: &Transaction,
    ) -> Result<Signature, Box<dyn Error + Send + Sync>> {
        Ok(RpcClient::send_transaction(self, tx).await?)
    }

    async fn get_account(
        &self,
        pubkey: &Pubkey,
    ) -> Result<Option<Account>, Box<dyn Error + Send + Sync>> {
        let response = self
            .get_account_with_commitment(pubkey, self.commitment())
            .await?;
        Ok(response.value)
    }

    async fn get_latest_blockhash(&self) -> Result<(Hash, u64), Box<dyn Error + Send + Sync>> {
        Ok(self
            .get_latest_blockhash_with_commitment(self.commitment())
            .await?)
    }
}
