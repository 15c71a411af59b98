pub mod guardian;
pub mod relay;
pub mod token_cache;
pub mod wallet;
