//! Errors during parsing/handling/conversion of identifiers.

use thiserror::Error;

/// Parsing errors for identifiers and amounts read from text.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    #[error("account id must be 40 hex digits, got {0}")]
    InvalidAccountIdLength(usize),

    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("invalid token amount '{0}'")]
    InvalidAmount(String),
}
