//! A Hamming code that corrects a single flipped bit.
//!
//! A codeword is a string of bits indexed from zero. Index zero holds the
//! overall parity of the word, every power-of-two index holds a row parity
//! bit, and all the other indices hold data. The row parity bit at 2^k covers
//! every index that has bit k set, which makes the XOR of the indices of all
//! set bits zero for a valid word. A single flipped bit at index i turns that
//! XOR (the syndrome) into i, so the error can be located and undone.
//!
//! The data bits are laid out most significant bit first, starting at index
//! 3, and the word ends at the last data bit. Words are written index zero
//! first. Two flipped bits are not detected and decode to a wrong value.

use std::fmt;
use std::str::FromStr;

use crate::error::{CodewordFault, Error, Result};
use crate::utils::bits::{is_parity_index, to_binary};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Codeword {
    bits: Vec<bool>,
}

impl Codeword {
    /// Build the codeword that carries 'val'.
    pub fn from_value(val: u64) -> Self {
        let mut bits = vec![false];
        let mut data = to_binary(val).into_iter();
        let mut next = data.next();

        // Interleave the data bits with zeroed parity bits.
        while let Some(bit) = next {
            if is_parity_index(bits.len()) {
                bits.push(false);
            } else {
                bits.push(bit);
                next = data.next();
            }
        }

        let mut word = Self { bits };

        // With all parity bits clear, the syndrome is the XOR of the data
        // indices. Setting the matching row parity bits cancels it.
        let syndrome = word.syndrome();
        let mut row = 1;
        while row <= syndrome {
            word.bits[row] = syndrome & row != 0;
            row <<= 1;
        }

        word.bits[0] = word.ones() % 2 == 1;
        word
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bit(&self, idx: usize) -> Option<bool> {
        self.bits.get(idx).copied()
    }

    /// Return the number of set bits.
    pub fn ones(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Return the XOR of the indices of all set bits.
    pub fn syndrome(&self) -> usize {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, bit)| **bit)
            .fold(0, |acc, (idx, _)| acc ^ idx)
    }

    /// Flip the bit at 'idx'. Returns False if the index is out of bounds.
    pub fn flip(&mut self, idx: usize) -> bool {
        match self.bits.get_mut(idx) {
            Some(bit) => {
                *bit = !*bit;
                true
            }
            None => false,
        }
    }

    /// Undo a single bit error. Returns the index of the bit that was
    /// flipped back, or None if the syndrome was clean.
    pub fn correct(&mut self) -> Result<Option<usize>> {
        let syndrome = self.syndrome();
        if syndrome == 0 {
            return Ok(None);
        }
        if !self.flip(syndrome) {
            return Err(CodewordFault::SyndromeOutOfRange {
                syndrome,
                len: self.len(),
            }
            .into());
        }
        Ok(Some(syndrome))
    }

    /// Read the data bits as an integer, most significant bit first. The
    /// word is read as is, without correction.
    pub fn value(&self) -> Result<u64> {
        let mut val: u64 = 0;
        let mut data_bits = 0;

        for (idx, bit) in self.bits.iter().enumerate() {
            if is_parity_index(idx) {
                continue;
            }
            if val >> 63 != 0 {
                return Err(CodewordFault::Overflow.into());
            }
            val = (val << 1) | *bit as u64;
            data_bits += 1;
        }

        if data_bits == 0 {
            return Err(CodewordFault::NoDataBits(self.len()).into());
        }
        Ok(val)
    }
}

impl FromStr for Codeword {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(CodewordFault::Empty.into());
        }
        let bits = s
            .chars()
            .enumerate()
            .map(|(index, c)| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                found => {
                    Err(Error::from(CodewordFault::InvalidBit { index, found }))
                }
            })
            .collect::<Result<Vec<bool>>>()?;
        Ok(Self { bits })
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Encode 'val' as a bit string.
pub fn encode(val: u64) -> String {
    Codeword::from_value(val).to_string()
}

/// Decode a bit string, correcting up to one flipped bit.
pub fn decode(bits: &str) -> Result<u64> {
    let mut word: Codeword = bits.parse()?;
    word.correct()?;
    word.value()
}
