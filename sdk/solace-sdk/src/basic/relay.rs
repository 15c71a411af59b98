use crate::core::connection::SolConnection;
use crate::core::signer::SolaceSigner;
use crate::error::{Result, SolaceSdkError};
use crate::types::{BlockhashContext, RelayableTransaction};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::Transaction;
use std::str::FromStr;
use tracing::{info, warn};

/// Signs instructions as the wallet owner while leaving the fee payer slot
/// for a relayer. The owner authorizes, the relayer pays.
pub struct RelaySigner<'a, C: SolConnection> {
    connection: &'a C,
    owner: &'a dyn SolaceSigner,
}

impl<'a, C: SolConnection> RelaySigner<'a, C> {
    pub fn new(connection: &'a C, owner: &'a dyn SolaceSigner) -> Self {
        Self { connection, owner }
    }

    pub async fn sign(
        &self,
        instruction: Instruction,
        fee_payer: &Pubkey,
    ) -> Result<RelayableTransaction> {
        let owner = self.owner.pubkey();
        if owner == *fee_payer {
            return Err(SolaceSdkError::InvalidArgument(
                "Fee payer must differ from the wallet owner".to_string(),
            ));
        }

        let (blockhash, last_valid_block_height) = self
            .connection
            .get_latest_blockhash()
            .await
            .map_err(|e| SolaceSdkError::NetworkUnreachable(e.to_string()))?;

        let message = Message::new_with_blockhash(&[instruction], Some(fee_payer), &blockhash);
        signer_index(&message, &owner)?;

        let message_data = message.serialize();
        let signature = self
            .owner
            .sign_message(&message_data)
            .await
            .map_err(SolaceSdkError::SigningUnavailable)?;
        if !signature.verify(owner.as_ref(), &message_data) {
            return Err(SolaceSdkError::SigningUnavailable(format!(
                "Signature does not verify against owner {}",
                owner
            )));
        }

        info!(%owner, %fee_payer, %blockhash, "built relayable transaction");

        Ok(RelayableTransaction {
            signature: signature.to_string(),
            public_key: owner.to_string(),
            message: STANDARD.encode(&message_data),
            block_hash: BlockhashContext {
                blockhash: blockhash.to_string(),
                last_valid_block_height,
            },
        })
    }
}

impl RelayableTransaction {
    /// Decode the message and place the owner signature. Every other
    /// signature slot, including the fee payer's, is left default.
    pub fn to_transaction(&self) -> Result<Transaction> {
        let bytes = STANDARD
            .decode(&self.message)
            .map_err(|e| SolaceSdkError::InvalidArgument(format!("Invalid message: {}", e)))?;
        let message: Message = bincode::deserialize(&bytes)
            .map_err(|e| SolaceSdkError::InvalidArgument(format!("Invalid message: {}", e)))?;
        let owner = Pubkey::from_str(&self.public_key)
            .map_err(|e| SolaceSdkError::InvalidArgument(format!("Invalid public key: {}", e)))?;
        let signature = Signature::from_str(&self.signature)
            .map_err(|e| SolaceSdkError::InvalidArgument(format!("Invalid signature: {}", e)))?;

        let index = signer_index(&message, &owner)?;
        let mut tx = Transaction::new_unsigned(message);
        tx.signatures[index] = signature;
        Ok(tx)
    }
}

/// Broadcast a fully signed transaction. Program errors are forwarded as-is.
pub async fn submit(connection: &impl SolConnection, tx: &Transaction) -> Result<Signature> {
    connection.send_transaction(tx).await.map_err(|e| {
        warn!(error = %e, "transaction rejected");
        SolaceSdkError::LedgerRejection(e.to_string())
    })
}

fn signer_index(message: &Message, key: &Pubkey) -> Result<usize> {
    let required = message.header.num_required_signatures as usize;
    message
        .account_keys
        .iter()
        .take(required)
        .position(|k| k == key)
        .ok_or_else(|| {
            SolaceSdkError::InvalidArgument(format!("{} is not a required signer", key))
        })
}
