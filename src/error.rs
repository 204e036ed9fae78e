//! Error types shared by the codecs and the contract catalog.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A compressed stream that no encoder could have produced.
    #[error("Malformed stream at position {position}: {fault}")]
    MalformedStream { position: usize, fault: StreamFault },

    #[error("Precondition violated: {0}")]
    PreconditionViolation(#[from] Precondition),

    #[error("Invalid codeword: {0}")]
    InvalidCodeword(#[from] CodewordFault),

    #[error("Unknown contract: {0}")]
    UnknownContract(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The reason a token stream was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamFault {
    #[error("expected a digit in {min}..={max}, found {found:?}")]
    InvalidDigit { found: char, min: u8, max: u8 },

    #[error("the segment is truncated")]
    Truncated,

    #[error("offset {offset} reaches before the start of {available} decoded characters")]
    OffsetOutOfRange { offset: usize, available: usize },
}

/// Inputs that an encoder refuses to accept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    #[error("the input to compress is empty")]
    EmptyInput,

    #[error("expected a non-negative integer, got {0}")]
    NegativeInteger(String),

    #[error("expected an integer, got {0:?}")]
    NotAnInteger(String),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodewordFault {
    #[error("the codeword is empty")]
    Empty,

    #[error("expected '0' or '1' at index {index}, found {found:?}")]
    InvalidBit { index: usize, found: char },

    #[error("a codeword of {0} bits carries no data bits")]
    NoDataBits(usize),

    #[error("syndrome {syndrome} points past the end of a {len} bit codeword")]
    SyndromeOutOfRange { syndrome: usize, len: usize },

    #[error("the data bits do not fit in 64 bits")]
    Overflow,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn malformed(position: usize, fault: StreamFault) -> Self {
        Error::MalformedStream { position, fault }
    }
}
