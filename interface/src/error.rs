use thiserror::Error;

#[derive(Debug, Error)]
pub enum InterfaceError {
    #[error("Account data too small: expected at least {expected} bytes, got {actual}")]
    AccountDataTooSmall { expected: usize, actual: usize },

    #[error("Invalid discriminator for {0} account")]
    InvalidDiscriminator(&'static str),

    #[error("Serialization error: {0}")]
    Serialization(#[from] std::io::Error),
}
