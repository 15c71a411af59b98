use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;

/// Abstraction for the owner key material.
/// The SDK only ever asks for a signature over a serialized message; the
/// private component never leaves the implementor.
#[async_trait]
pub trait SolaceSigner: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    /// Sign a message.
    /// Returns Err if the key material is unavailable (locked, revoked, ...).
    async fn sign_message(&self, message: &[u8]) -> Result<Signature, String>;
}

#[async_trait]
impl SolaceSigner for Keypair {
    fn pubkey(&self) -> Pubkey {
        Signer::pubkey(self)
    }

    async fn sign_message(&self, message: &[u8]) -> Result<Signature, String> {
        self.try_sign_message(message).map_err(|e| e.to_string())
    }
}
