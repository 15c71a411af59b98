pub mod connection;
pub mod constants;
pub mod network;
pub mod signer;
