//! The constrained LZ stream. A stream is a sequence of segments, and each
//! segment is a literal followed by an optional back-reference:
//!
//! ```text
//! segment := literal_len literal_chars [backref_len [backref_offset]]
//! ```
//!
//! Every length is a single digit in 0..=9 and every offset is a single digit
//! in 1..=9. A back-reference length of zero has no offset. There are no
//! separators, so the digits alone decide where each token ends.

use crate::error::{Error, Result, StreamFault};
use crate::lz::parser::{OptimalParser, Token};
use crate::lz::tie_break::TieBreaker;
use crate::utils::digits::{self, MAX_DIGIT};
use crate::{Context, Decoder, Encoder};

/// Write 'tokens' into 'output' and return the number of characters written.
fn render(input: &[char], tokens: &[Token], output: &mut String) -> usize {
    let mut written = 0;
    for token in tokens {
        match *token {
            Token::Literal { end, len } => {
                digits::push(len, output);
                output.extend(&input[end - len..end]);
            }
            Token::Reference { len, offset } => {
                digits::push(len, output);
                digits::push(offset, output);
            }
            Token::Skip => digits::push(0, output),
        }
        written += token.cost();
    }
    written
}

/// Encode 'input' into 'output' with the shortest possible stream, resolving
/// ties with 'breaker'.
fn encode_with(
    input: &str,
    output: &mut String,
    breaker: &mut dyn TieBreaker,
) -> Result<usize> {
    let chars: Vec<char> = input.chars().collect();
    let tokens = OptimalParser::new(&chars, breaker).parse()?;
    Ok(render(&chars, &tokens, output))
}

/// An optimal encoder for the constrained LZ stream.
pub struct LzEncoder<'a> {
    /// The uncompressed input.
    input: &'a str,
    /// The output stream.
    output: &'a mut String,
    /// Encoder context.
    ctx: Context,
}

impl<'a> Encoder<'a> for LzEncoder<'a> {
    fn new(input: &'a str, output: &'a mut String, ctx: Context) -> Self {
        LzEncoder { input, output, ctx }
    }

    fn encode(&mut self) -> Result<usize> {
        let mut breaker = self.ctx.tie_break().breaker();
        encode_with(self.input, self.output, breaker.as_mut())
    }
}

/// A strict decoder for the constrained LZ stream.
pub struct LzDecoder<'a> {
    /// The compressed input.
    input: &'a str,
    /// The output stream.
    output: &'a mut String,
}

impl<'a> LzDecoder<'a> {
    /// Read the digit at 'pos', which must be in the range 'min'..=9.
    fn read_digit(stream: &[char], pos: usize, min: u8) -> Result<usize> {
        let found = *stream
            .get(pos)
            .ok_or_else(|| Error::malformed(pos, StreamFault::Truncated))?;
        let max = MAX_DIGIT as u8;
        let val = digits::parse(found, min, max).ok_or_else(|| {
            Error::malformed(pos, StreamFault::InvalidDigit { found, min, max })
        })?;
        Ok(val as usize)
    }

    /// Decode the whole stream into a fresh buffer. Returns the decoded
    /// characters, or an error that points at the offending position.
    fn decode_impl(stream: &[char]) -> Result<Vec<char>> {
        let mut plain: Vec<char> = Vec::new();
        let mut cursor = 0;

        while cursor < stream.len() {
            // The literal part of the segment.
            let lit_len = Self::read_digit(stream, cursor, 0)?;
            let end = cursor + 1 + lit_len;
            if end > stream.len() {
                return Err(Error::malformed(cursor, StreamFault::Truncated));
            }
            plain.extend_from_slice(&stream[cursor + 1..end]);
            cursor = end;

            // A stream may end right after a literal.
            if cursor == stream.len() {
                break;
            }

            // The back-reference part of the segment.
            let ref_len = Self::read_digit(stream, cursor, 0)?;
            if ref_len == 0 {
                cursor += 1;
                continue;
            }
            let offset = Self::read_digit(stream, cursor + 1, 1)?;
            if offset > plain.len() {
                return Err(Error::malformed(
                    cursor + 1,
                    StreamFault::OffsetOutOfRange {
                        offset,
                        available: plain.len(),
                    },
                ));
            }

            // Copy one character at a time, so that the reference can
            // overlap the characters it produces.
            for _ in 0..ref_len {
                plain.push(plain[plain.len() - offset]);
            }
            cursor += 2;
        }

        Ok(plain)
    }
}

impl<'a> Decoder<'a> for LzDecoder<'a> {
    fn new(input: &'a str, output: &'a mut String) -> Self {
        LzDecoder { input, output }
    }

    fn decode(&mut self) -> Result<(usize, usize)> {
        let stream: Vec<char> = self.input.chars().collect();
        let plain = Self::decode_impl(&stream)?;
        self.output.extend(plain.iter());
        Ok((stream.len(), plain.len()))
    }
}

/// Compress 'plain' with the tie-break policy of 'ctx'.
pub fn compress(plain: &str, ctx: Context) -> Result<String> {
    let mut output = String::new();
    LzEncoder::new(plain, &mut output, ctx).encode()?;
    Ok(output)
}

/// Compress 'plain', resolving ties with a caller-provided policy.
pub fn compress_with(
    plain: &str,
    breaker: &mut dyn TieBreaker,
) -> Result<String> {
    let mut output = String::new();
    encode_with(plain, &mut output, breaker)?;
    Ok(output)
}

/// Decompress an LZ stream, rejecting any stream that is malformed.
pub fn decompress(stream: &str) -> Result<String> {
    let mut output = String::new();
    LzDecoder::new(stream, &mut output).decode()?;
    Ok(output)
}
