// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Price series has {available} point(s); at least {required} are needed")]
    InsufficientHistory { required: usize, available: usize },

    #[error("Close price on {date} is not positive: {close}")]
    NonPositivePrice { date: chrono::NaiveDate, close: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
