use serde::{Deserialize, Deserializer};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

use crate::core::constants::DEFAULT_PROGRAM_ID;

/// Cluster the client talks to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Local,
    Devnet,
    Testnet,
    Mainnet,
    Custom(String),
}

impl Network {
    pub fn rpc_url(&self) -> &str {
        match self {
            Network::Local => "http://127.0.0.1:8899",
            Network::Devnet => "https://api.devnet.solana.com",
            Network::Testnet => "https://api.testnet.solana.com",
            Network::Mainnet => "https://api.mainnet-beta.solana.com",
            Network::Custom(url) => url,
        }
    }
}

/// Process-wide client settings, resolved once and handed to each client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    #[serde(
        default = "default_program_id",
        deserialize_with = "deserialize_pubkey"
    )]
    pub program_id: Pubkey,
    #[serde(default)]
    pub network: Network,
    #[serde(default = "default_commitment")]
    pub commitment: CommitmentLevel,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            program_id: DEFAULT_PROGRAM_ID,
            network: Network::default(),
            commitment: default_commitment(),
        }
    }
}

impl ClientConfig {
    pub fn new(program_id: Pubkey, network: Network) -> Self {
        Self {
            program_id,
            network,
            ..Self::default()
        }
    }

    /// Build a nonblocking RPC client for the configured network.
    pub fn rpc_client(&self) -> RpcClient {
        RpcClient::new_with_commitment(
            self.network.rpc_url().to_string(),
            CommitmentConfig {
                commitment: self.commitment,
            },
        )
    }
}

fn default_program_id() -> Pubkey {
    DEFAULT_PROGRAM_ID
}

fn default_commitment() -> CommitmentLevel {
    CommitmentLevel::Confirmed
}

fn deserialize_pubkey<'de, D>(deserializer: D) -> Result<Pubkey, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Pubkey::from_str(&s).map_err(serde::de::Error::custom)
}
