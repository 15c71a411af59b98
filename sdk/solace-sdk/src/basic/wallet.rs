use crate::advanced::instructions;
use crate::basic::guardian::GuardianQuery;
use crate::basic::relay::RelaySigner;
use crate::basic::token_cache::TokenAccountCache;
use crate::core::connection::SolConnection;
use crate::core::network::ClientConfig;
use crate::core::signer::SolaceSigner;
use crate::error::{Result, SolaceSdkError};
use crate::types::{RelayableTransaction, TokenAccountBinding, TokenAccountInfo, WalletInfo};
use crate::utils;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use std::sync::Arc;
use tracing::info;

/// A Solace wallet client bound to one owner key.
///
/// Every mutating method returns an owner-signed [`RelayableTransaction`]
/// and submits nothing; a relayer adds the fee payer signature and
/// broadcasts it.
pub struct SolaceWallet<C: SolConnection> {
    connection: Arc<C>,
    owner: Arc<dyn SolaceSigner>,
    program_id: Pubkey,
    /// Wallet PDA, set by creation, retrieval or recovery
    wallet: Option<Pubkey>,
    /// Rebuilt whenever the client is bound to another wallet
    token_accounts: Option<TokenAccountCache>,
}

impl SolaceWallet<RpcClient> {
    /// Client talking to the network named in `config`
    pub fn from_config(owner: Arc<dyn SolaceSigner>, config: &ClientConfig) -> Self {
        Self::new(owner, config.program_id, Arc::new(config.rpc_client()))
    }

    /// Generate a new owner key pair
    pub fn new_keypair() -> Keypair {
        Keypair::new()
    }

    /// Wallet PDA registered under `name`
    pub fn wallet_from_name(program_id: &Pubkey, name: &str) -> Result<Pubkey> {
        Ok(utils::derive_wallet_pda(program_id, name)?.0)
    }
}

impl<C: SolConnection> SolaceWallet<C> {
    pub fn new(owner: Arc<dyn SolaceSigner>, program_id: Pubkey, connection: Arc<C>) -> Self {
        Self {
            connection,
            owner,
            program_id,
            wallet: None,
            token_accounts: None,
        }
    }

    /// Bind a client to an existing wallet by username.
    /// Nothing is read; later calls fail if the wallet was never created.
    pub fn retrieve_from_name(
        name: &str,
        owner: Arc<dyn SolaceSigner>,
        program_id: Pubkey,
        connection: Arc<C>,
    ) -> Result<Self> {
        let (wallet, _) = utils::derive_wallet_pda(&program_id, name)?;
        let mut client = Self::new(owner, program_id, connection);
        client.bind(wallet);
        Ok(client)
    }

    pub fn owner(&self) -> Pubkey {
        self.owner.pubkey()
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Bound wallet PDA, if any
    pub fn address(&self) -> Option<Pubkey> {
        self.wallet
    }

    fn wallet_address(&self) -> Result<Pubkey> {
        self.wallet.ok_or(SolaceSdkError::WalletUninitialized)
    }

    fn bind(&mut self, wallet: Pubkey) {
        if self.wallet != Some(wallet) {
            self.token_accounts = Some(TokenAccountCache::new(self.program_id, wallet));
        }
        self.wallet = Some(wallet);
    }

    fn token_cache(&self) -> Result<&TokenAccountCache> {
        self.token_accounts
            .as_ref()
            .ok_or(SolaceSdkError::WalletUninitialized)
    }

    /// Owner-less queries on the same connection
    pub fn guardian_query(&self) -> GuardianQuery<'_, C> {
        GuardianQuery::new(self.connection.as_ref(), self.program_id)
    }

    async fn sign(&self, instruction: Instruction, fee_payer: &Pubkey) -> Result<RelayableTransaction> {
        RelaySigner::new(self.connection.as_ref(), self.owner.as_ref())
            .sign(instruction, fee_payer)
            .await
    }

    /// Fetch the state of the bound wallet
    pub async fn fetch_wallet_data(&self) -> Result<WalletInfo> {
        let wallet = self.wallet_address()?;
        utils::fetch_wallet_info(self.connection.as_ref(), &wallet).await
    }

    /// Create a wallet for the first time and bind the client to it.
    /// The client stays unbound if building or signing fails.
    pub async fn create_from_name(
        &mut self,
        name: &str,
        fee_payer: &Pubkey,
    ) -> Result<RelayableTransaction> {
        let (ix, wallet) =
            instructions::create_wallet(&self.program_id, &self.owner(), fee_payer, name)?;
        let tx = self.sign(ix, fee_payer).await?;

        info!(%wallet, name, "create wallet");
        self.bind(wallet);
        Ok(tx)
    }

    /// Send lamports from the wallet to `destination`
    pub async fn send_sol(
        &self,
        destination: &Pubkey,
        lamports: u64,
        fee_payer: &Pubkey,
    ) -> Result<RelayableTransaction> {
        let wallet = self.wallet_address()?;
        let ix = instructions::send_sol(
            &self.program_id,
            &wallet,
            &self.owner(),
            destination,
            lamports,
        )?;
        self.sign(ix, fee_payer).await
    }

    /// Add a guardian, signed by the owner.
    ///
    /// The threshold is recomputed from a fresh read as
    /// `approved_guardians + 1`, so every guardian must approve a recovery.
    pub async fn add_guardian(
        &self,
        guardian: &Pubkey,
        fee_payer: &Pubkey,
    ) -> Result<RelayableTransaction> {
        let wallet = self.wallet_address()?;
        let data = self.fetch_wallet_data().await?;
        let threshold = instructions::next_guardian_threshold(data.approved_guardians.len())?;

        info!(%wallet, %guardian, threshold, "add guardian");
        let ix = instructions::add_guardian(
            &self.program_id,
            &wallet,
            &self.owner(),
            guardian,
            threshold,
        )?;
        self.sign(ix, fee_payer).await
    }

    /// Remove an approved guardian. The threshold is not lowered.
    pub async fn remove_guardian(
        &self,
        guardian: &Pubkey,
        fee_payer: &Pubkey,
    ) -> Result<RelayableTransaction> {
        let wallet = self.wallet_address()?;
        let ix = instructions::remove_guardian(&self.program_id, &wallet, &self.owner(), guardian)?;
        self.sign(ix, fee_payer).await
    }

    /// Open a recovery attempt for the wallet registered under `username`,
    /// proposing this client's key as the new owner. On success the client
    /// is bound to the wallet being recovered.
    pub async fn recover_wallet(
        &mut self,
        username: &str,
        fee_payer: &Pubkey,
    ) -> Result<RelayableTransaction> {
        let (wallet, _) = utils::derive_wallet_pda(&self.program_id, username)?;
        let data = utils::fetch_wallet_info(self.connection.as_ref(), &wallet).await?;

        let (ix, recovery) = instructions::initiate_recovery(
            &self.program_id,
            &wallet,
            &self.owner(),
            data.wallet_recovery_sequence,
        )?;
        let tx = self.sign(ix, fee_payer).await?;

        info!(
            %wallet,
            %recovery,
            sequence = data.wallet_recovery_sequence,
            "initiate recovery"
        );
        self.bind(wallet);
        Ok(tx)
    }

    /// Whether `wallet` is in recovery mode
    pub async fn is_in_recovery(&self, wallet: &Pubkey) -> Result<bool> {
        self.guardian_query().is_in_recovery(wallet).await
    }

    /// Token account of the bound wallet for `mint`, memoized per client
    pub fn get_token_account(&self, mint: &Pubkey) -> Result<Pubkey> {
        self.token_cache()?.get(mint)
    }

    pub fn token_account_bindings(&self) -> Vec<TokenAccountBinding> {
        self.token_accounts
            .as_ref()
            .map(TokenAccountCache::bindings)
            .unwrap_or_default()
    }

    /// Token account state, `None` if it has not been created yet
    pub async fn get_token_account_info(&self, mint: &Pubkey) -> Result<Option<TokenAccountInfo>> {
        let token_account = self.get_token_account(mint)?;
        match utils::fetch_account_data(self.connection.as_ref(), &token_account).await? {
            Some(data) => Ok(Some(utils::parse_token_account(&data)?)),
            None => Ok(None),
        }
    }

    /// Transaction that fails on-chain if the token account for `mint` is missing
    pub async fn check_token_account(
        &self,
        mint: &Pubkey,
        fee_payer: &Pubkey,
    ) -> Result<RelayableTransaction> {
        let wallet = self.wallet_address()?;
        let token_account = self.get_token_account(mint)?;
        let ix = instructions::check_token_account(
            &self.program_id,
            &wallet,
            &self.owner(),
            fee_payer,
            mint,
            &token_account,
        )?;
        self.sign(ix, fee_payer).await
    }

    /// Create the token account for `mint`. An "already exists" rejection
    /// from the ledger means the account is there.
    pub async fn create_token_account(
        &self,
        mint: &Pubkey,
        fee_payer: &Pubkey,
    ) -> Result<RelayableTransaction> {
        let wallet = self.wallet_address()?;
        let token_account = self.get_token_account(mint)?;
        let ix = instructions::create_token_account(
            &self.program_id,
            &wallet,
            &self.owner(),
            fee_payer,
            mint,
            &token_account,
        )?;
        self.sign(ix, fee_payer).await
    }

    /// Send `amount` base units of `mint` to `receiver_token_account`
    pub async fn send_spl_token(
        &self,
        mint: &Pubkey,
        receiver_token_account: &Pubkey,
        amount: u64,
        fee_payer: &Pubkey,
    ) -> Result<RelayableTransaction> {
        let wallet = self.wallet_address()?;
        let token_account = self.get_token_account(mint)?;
        let ix = instructions::send_spl_token(
            &self.program_id,
            &wallet,
            &self.owner(),
            mint,
            &token_account,
            receiver_token_account,
            amount,
        )?;
        self.sign(ix, fee_payer).await
    }
}
