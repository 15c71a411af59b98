// Example: Creating a Solace wallet for a relayer to pay for
//
// This example shows how to:
// 1. Generate an owner keypair
// 2. Derive the wallet PDA for a username
// 3. Build the owner-signed relayable transaction

use solace_sdk::core::signer::SolaceSigner;
use solace_sdk::{ClientConfig, Network, SolaceWallet};
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig {
        network: Network::Devnet,
        ..ClientConfig::default()
    };

    // 1. Owner key; the relayer's fee payer must be a different key
    let owner: Arc<dyn SolaceSigner> = Arc::new(SolaceWallet::new_keypair());
    let fee_payer = Pubkey::new_unique(); // Replace with the relayer's key

    // 2. Wallet PDA
    let name = "alice";
    let wallet = SolaceWallet::wallet_from_name(&config.program_id, name)?;

    println!("Creating Solace wallet:");
    println!("  Name: {}", name);
    println!("  Wallet PDA: {}", wallet);
    println!("  Owner: {}", owner.pubkey());

    // 3. Needs a reachable RPC node for the blockhash
    let mut client = SolaceWallet::from_config(owner, &config);
    let tx = client.create_from_name(name, &fee_payer).await?;
    println!("{}", serde_json::to_string_pretty(&tx)?);

    // The relayer then signs as fee payer and broadcasts:
    // let mut tx = tx.to_transaction()?;
    // tx.partial_sign(&[&fee_payer_keypair], tx.message.recent_blockhash);
    // solace_sdk::basic::relay::submit(client.connection(), &tx).await?;

    Ok(())
}
