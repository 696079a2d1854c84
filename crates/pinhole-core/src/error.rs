use crate::link_id::LinkId;
use thiserror::Error;

/// Caller-contract violations when encoding an identifier.
///
/// These never come from user input in the normal flow: they mean the caller
/// handed the codec something that is not a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("cannot encode negative identifier {0}")]
    Negative(String),
    #[error("cannot encode non-integer value '{0}'")]
    NotAnInteger(String),
    #[error("identifier {0} does not fit in 64 bits")]
    OutOfRange(String),
}

/// Failures when decoding a token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("cannot decode an empty token")]
    Empty,
    #[error("Invalid character for encoding: {character}")]
    InvalidCharacter { character: char, position: usize },
    #[error("token value exceeds {}", u64::MAX)]
    Overflow,
}

/// Errors raised by record stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("identifier already exists: {0}")]
    Conflict(LinkId),
    #[error("identifier {0} is outside the storable range")]
    OutOfRange(LinkId),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short code '{code}': {source}")]
    InvalidShortCode {
        code: String,
        #[source]
        source: DecodeError,
    },
}
