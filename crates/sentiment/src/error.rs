// In crates/sentiment/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The model could not be reached. Unparseable replies never end up here.
    #[error("Failed to classify headline {headline:?}: {source}")]
    Generation {
        headline: String,
        #[source]
        source: api_client::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
