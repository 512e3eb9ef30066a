// In crates/app-config/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load configuration")]
    LoadError(#[from] config::ConfigError),

    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse key store: {0}")]
    KeyStoreError(#[from] serde_json::Error),

    #[error("Missing credential `{0}`: set it in the key store or the environment")]
    MissingCredential(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
