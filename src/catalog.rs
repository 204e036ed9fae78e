//! The catalog of coding contracts that are backed by the codecs. Each contract
//! turns the raw task text into the primitive its codec expects, runs the
//! codec and renders the answer as text.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::{Error, Precondition, Result};
use crate::hamming::{self, Codeword};
use crate::lz::tie_break::CoinFlip;
use crate::utils::digits::MAX_DIGIT;
use crate::{lz, rle, Context};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Contract {
    RleCompression,
    LzDecompression,
    LzCompression,
    HammingEncode,
    HammingDecode,
}

impl Contract {
    pub const ALL: [Contract; 5] = [
        Contract::RleCompression,
        Contract::LzDecompression,
        Contract::LzCompression,
        Contract::HammingEncode,
        Contract::HammingDecode,
    ];

    /// The short name used on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            Contract::RleCompression => "rle",
            Contract::LzDecompression => "lz-decompress",
            Contract::LzCompression => "lz-compress",
            Contract::HammingEncode => "hamming-encode",
            Contract::HammingDecode => "hamming-decode",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Contract::RleCompression => "Compression I: RLE Compression",
            Contract::LzDecompression => "Compression II: LZ Decompression",
            Contract::LzCompression => "Compression III: LZ Compression",
            Contract::HammingEncode => {
                "HammingCodes: Integer to Encoded Binary"
            }
            Contract::HammingDecode => {
                "HammingCodes: Encoded Binary to Integer"
            }
        }
    }

    /// A sample task.
    pub fn example(&self) -> &'static str {
        match self {
            Contract::RleCompression => "aaaaabccc",
            Contract::LzDecompression => "5aaabb450723abb",
            Contract::LzCompression => "abracadabra",
            Contract::HammingEncode => "21",
            Contract::HammingDecode => "1001101011",
        }
    }

    /// Solve the task 'input' and return the answer.
    pub fn solve(&self, input: &str, ctx: Context) -> Result<String> {
        log::debug!(
            "Solving {:?} with {} input chars",
            self,
            input.chars().count()
        );
        let text = task_text(input);
        match self {
            Contract::RleCompression => Ok(rle::encode(text)),
            Contract::LzDecompression => lz::decompress(text),
            Contract::LzCompression => lz::compress(text, ctx),
            Contract::HammingEncode => {
                Ok(hamming::encode(parse_integer(text)?))
            }
            Contract::HammingDecode => {
                Ok(hamming::decode(text.trim())?.to_string())
            }
        }
    }

    /// Check 'answer' against the task 'input' by running the inverse codec.
    /// Compressed answers must be as short as the optimal encoding, and a
    /// decompressed text is accepted if no valid stream encodes it in fewer
    /// characters than the stream it came from.
    pub fn verify(
        &self,
        input: &str,
        answer: &str,
        ctx: Context,
    ) -> Result<bool> {
        let text = task_text(input);
        let ok = match self {
            // Every text has exactly one run length encoding.
            Contract::RleCompression => answer == rle::encode(text),
            Contract::LzCompression => {
                if lz::decompress(answer)? != text {
                    return Ok(false);
                }
                text.is_empty()
                    || answer.chars().count()
                        <= lz::compress(text, ctx)?.chars().count()
            }
            Contract::LzDecompression => {
                let plain = lz::decompress(text)?;
                if plain != answer {
                    return Ok(false);
                }
                // An empty text has no encoding but the empty stream.
                plain.is_empty()
                    || lz::compress(&plain, ctx)?.chars().count()
                        <= text.chars().count()
            }
            Contract::HammingEncode => {
                hamming::decode(answer)? == parse_integer(text)?
            }
            Contract::HammingDecode => {
                let mut word: Codeword = text.trim().parse()?;
                word.correct()?;
                // Words may carry leading zero data bits, so compare values.
                word.value()? == parse_integer(answer)?
            }
        };
        Ok(ok)
    }

    /// Generate a random task for this contract.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<String> {
        match self {
            Contract::RleCompression => Ok(sample_runs(rng)),
            Contract::LzCompression => Ok(sample_text(rng)),
            Contract::LzDecompression => {
                // Random tie-breaking varies the streams for the same text.
                let plain = sample_text(rng);
                lz::compress_with(&plain, &mut CoinFlip::new(&mut *rng))
            }
            Contract::HammingEncode => {
                Ok(Uniform::new(0u64, 1 << 20).sample(rng).to_string())
            }
            Contract::HammingDecode => {
                let val = Uniform::new(0u64, 1 << 20).sample(rng);
                let mut word = Codeword::from_value(val);
                if rng.gen_bool(0.5) {
                    word.flip(rng.gen_range(0..word.len()));
                }
                Ok(word.to_string())
            }
        }
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Contract {
    type Err = Error;

    /// Look up a contract by its key or its full name.
    fn from_str(s: &str) -> Result<Self> {
        Contract::ALL
            .into_iter()
            .find(|c| c.key() == s || c.name() == s)
            .ok_or_else(|| Error::UnknownContract(s.to_string()))
    }
}

/// Strip the line ending and one pair of surrounding quotes from a task.
fn task_text(input: &str) -> &str {
    let text = input.trim_end_matches(&['\r', '\n'][..]);
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|t| t.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

fn parse_integer(text: &str) -> Result<u64> {
    let text = text.trim();
    if let Ok(val) = text.parse::<u64>() {
        return Ok(val);
    }
    let precondition = match text.strip_prefix('-') {
        Some(digits)
            if !digits.is_empty()
                && digits.bytes().all(|b| b.is_ascii_digit()) =>
        {
            Precondition::NegativeInteger(text.to_string())
        }
        _ => Precondition::NotAnInteger(text.to_string()),
    };
    Err(precondition.into())
}

/// Runs of random letters, some of them longer than a single RLE pair.
fn sample_runs<R: Rng>(rng: &mut R) -> String {
    let letters = Uniform::new_inclusive(b'a', b'z');
    let run_len = Uniform::new_inclusive(1, 12);
    let runs = Uniform::new_inclusive(3, 10).sample(rng);
    let mut text = String::new();
    for _ in 0..runs {
        let c = char::from(letters.sample(rng));
        let len = run_len.sample(rng);
        text.extend(std::iter::repeat(c).take(len));
    }
    text
}

/// Random text that mixes fresh letters with short repeats of recent text,
/// so that both literals and back-references pay off.
fn sample_text<R: Rng>(rng: &mut R) -> String {
    let letters = Uniform::new_inclusive(b'a', b'j');
    let chunk = Uniform::new_inclusive(1, MAX_DIGIT);
    let target = Uniform::new_inclusive(10, 50).sample(rng);
    let mut text: Vec<char> = Vec::new();

    while text.len() < target {
        let len = chunk.sample(rng);
        if text.is_empty() || rng.gen_bool(0.5) {
            for _ in 0..len {
                text.push(char::from(letters.sample(rng)));
            }
        } else {
            let offset = rng.gen_range(1..=text.len().min(MAX_DIGIT));
            for _ in 0..len {
                text.push(text[text.len() - offset]);
            }
        }
    }

    text.truncate(target);
    text.into_iter().collect()
}
