//! Error types for the pos-watch CLI

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PosWatchError>;

#[derive(Error, Debug)]
pub enum PosWatchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("invalid email address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("could not build email message: {0}")]
    Email(#[from] lettre::error::Error),

    #[error("malformed linescore: {detail}")]
    Linescore { detail: String },

    #[error("no score recorded for inning {inning}")]
    MissingInning { inning: u8 },

    #[error("failed to parse id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("stats API returned no data")]
    NoData,
}
