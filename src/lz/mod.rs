//! A constrained Lempel–Ziv codec. Back-references reach at most nine
//! characters back and copy at most nine characters, and literal runs are
//! split into tokens of at most nine characters. The encoder searches for the
//! shortest stream and the decoder rejects anything an encoder could not have
//! written.

pub mod parser;
mod stream;
pub mod tie_break;

pub use stream::{compress, compress_with, decompress, LzDecoder, LzEncoder};
pub use tie_break::{TieBreak, TieBreaker};
