//! Implements run length encoding of text. Each run is written as a count
//! digit followed by the repeated character, so "aaaaabccc" becomes "5a1b3c".
//! Runs longer than nine characters are split into several pairs.

use crate::error::{Error, Result, StreamFault};
use crate::utils::digits::{self, MAX_DIGIT};
use crate::{Context, Decoder, Encoder};

/// Iterates over the maximal runs of identical characters in a string.
pub struct Runs<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Runs<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }
}

impl<'a> Iterator for Runs<'a> {
    type Item = (char, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let c = self.chars.next()?;
        let mut len = 1;
        while self.chars.next_if_eq(&c).is_some() {
            len += 1;
        }
        Some((c, len))
    }
}

// A helper function for writing one run into a stream.
fn write_run(mut len: usize, c: char, stream: &mut String) -> usize {
    let mut wrote = 0;
    while len > MAX_DIGIT {
        digits::push(MAX_DIGIT, stream);
        stream.push(c);
        len -= MAX_DIGIT;
        wrote += 2;
    }
    if len > 0 {
        digits::push(len, stream);
        stream.push(c);
        wrote += 2;
    }
    wrote
}

// Write every run of 'input' and return the number of characters written.
fn write_runs(input: &str, stream: &mut String) -> usize {
    Runs::new(input)
        .map(|(c, len)| write_run(len, c, stream))
        .sum()
}

pub struct RleEncoder<'a> {
    /// The uncompressed input.
    input: &'a str,
    /// The output stream.
    output: &'a mut String,
}

impl<'a> Encoder<'a> for RleEncoder<'a> {
    fn new(input: &'a str, output: &'a mut String, _ctx: Context) -> Self {
        RleEncoder { input, output }
    }

    fn encode(&mut self) -> Result<usize> {
        Ok(write_runs(self.input, self.output))
    }
}

pub struct RleDecoder<'a> {
    /// The encoded input.
    input: &'a str,
    /// The output stream.
    output: &'a mut String,
}

impl<'a> Decoder<'a> for RleDecoder<'a> {
    fn new(input: &'a str, output: &'a mut String) -> Self {
        RleDecoder { input, output }
    }

    fn decode(&mut self) -> Result<(usize, usize)> {
        let mut decoded = String::new();
        let mut read = 0;
        let mut chars = self.input.chars();

        while let Some(d) = chars.next() {
            let count =
                digits::parse(d, 1, MAX_DIGIT as u8).ok_or_else(|| {
                    Error::malformed(
                        read,
                        StreamFault::InvalidDigit {
                            found: d,
                            min: 1,
                            max: MAX_DIGIT as u8,
                        },
                    )
                })?;
            let c = chars
                .next()
                .ok_or_else(|| Error::malformed(read, StreamFault::Truncated))?;
            decoded.extend(std::iter::repeat(c).take(count as usize));
            read += 2;
        }

        let written = decoded.chars().count();
        self.output.push_str(&decoded);
        Ok((read, written))
    }
}

/// Run length encode 'plain'.
pub fn encode(plain: &str) -> String {
    let mut output = String::new();
    write_runs(plain, &mut output);
    output
}

/// Expand a run length encoded stream.
pub fn decode(stream: &str) -> Result<String> {
    let mut output = String::new();
    RleDecoder::new(stream, &mut output).decode()?;
    Ok(output)
}
