pub mod catalog;
pub mod error;
pub mod hamming;
pub mod lz;
pub mod rle;
pub mod utils;

pub use error::{Error, Result};
pub use lz::TieBreak;

/// Stores information about the environment.
#[derive(Copy, Clone, Debug, Default)]
pub struct Context {
    /// Decides between encodings of equal length.
    tie_break: TieBreak,
}

impl Context {
    pub fn new(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }
}

/// A trait that defines the interface for encoding text.
pub trait Encoder<'a> {
    /// Creates a new Encoder that reads from 'input' and writes into 'output',
    /// with the encoder context 'ctx'.
    fn new(input: &'a str, output: &'a mut String, ctx: Context) -> Self;

    /// Encode the whole input and return the number of characters that were
    /// written into the output stream.
    fn encode(&mut self) -> Result<usize>;
}

/// A trait that defines the interface for decoding text.
pub trait Decoder<'a> {
    /// Creates a new Decoder that reads from 'input' and writes into 'output'.
    fn new(input: &'a str, output: &'a mut String) -> Self;

    /// Try to decode the stream 'input', and return the number of input
    /// characters that were consumed followed by the number of characters
    /// written. Nothing is written if the stream is rejected.
    fn decode(&mut self) -> Result<(usize, usize)>;
}
