// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Invalid signal value: {0} (expected -1, 0 or 1)")]
    InvalidSignal(i64),

    #[error("Invalid bar on {date}: {reason}")]
    InvalidBar { date: chrono::NaiveDate, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
