use solana_sdk::pubkey::Pubkey;

pub use solace_interface::{TOKEN_ACCOUNT_SEED, WALLET_SEED};

// Program ID of the deployed Solace program
pub const DEFAULT_PROGRAM_ID: Pubkey = solace_interface::ID;
