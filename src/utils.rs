//! A collection of utilities for handling digits and bit positions.

/// Single-digit fields of the token streams.
pub mod digits {
    /// The largest value that fits in a length or offset field.
    pub const MAX_DIGIT: usize = 9;

    /// Parse 'c' as a decimal digit in the inclusive range 'min'..='max'.
    pub fn parse(c: char, min: u8, max: u8) -> Option<u8> {
        let val = c.to_digit(10)? as u8;
        if val < min || val > max {
            return None;
        }
        Some(val)
    }

    /// Write the single digit 'val' into 'stream'.
    pub fn push(val: usize, stream: &mut String) {
        debug_assert!(val <= MAX_DIGIT, "Value does not fit in one digit");
        stream.push(char::from(b'0' + val as u8));
    }
}

/// Helpers for Hamming bit positions.
pub mod bits {
    /// Return True if the index 'idx' holds a parity bit, which is the case for
    /// index zero and all powers of two.
    pub fn is_parity_index(idx: usize) -> bool {
        idx & idx.wrapping_sub(1) == 0
    }

    /// Return the binary digits of 'val', most significant first. Zero is a
    /// single digit.
    pub fn to_binary(val: u64) -> Vec<bool> {
        let width = (64 - val.leading_zeros() as usize).max(1);
        (0..width).rev().map(|i| (val >> i) & 1 == 1).collect()
    }
}
