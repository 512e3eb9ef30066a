// In crates/engine/src/error.rs

use std::fmt;

use thiserror::Error;

/// The pipeline step a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    News,
    Classification,
    Price,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::News => "news",
            Stage::Classification => "classification",
            Stage::Price => "price",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("news stage failed: {0}")]
    News(#[source] api_client::Error),

    #[error("classification stage failed: {0}")]
    Classification(#[from] sentiment::Error),

    #[error("price stage failed: {0}")]
    Price(#[source] api_client::Error),
}

impl Error {
    pub fn stage(&self) -> Stage {
        match self {
            Error::News(_) => Stage::News,
            Error::Classification(_) => Stage::Classification,
            Error::Price(_) => Stage::Price,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
