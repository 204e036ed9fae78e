//! Policies for choosing between two encodings of the same length.
//!
//! The optimal parser frequently finds several encodings of equal length for
//! the same state. Any of them is a correct answer, so the choice is left to a
//! policy. The deterministic policies make the encoder output reproducible,
//! and the random policy produces varied but valid streams, which is useful
//! when generating inputs for the decompression contract.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Decides whether a newly found candidate replaces the retained one when
/// both have the same length.
pub trait TieBreaker {
    fn prefer_new(&mut self) -> bool;
}

/// Keep the candidate that was found first.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeepFirst;

/// Keep the candidate that was found last.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeepLast;

/// Flip a fair coin for every tie.
#[derive(Debug, Clone)]
pub struct CoinFlip<R: Rng> {
    rng: R,
}

impl<R: Rng> CoinFlip<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl TieBreaker for KeepFirst {
    fn prefer_new(&mut self) -> bool {
        false
    }
}

impl TieBreaker for KeepLast {
    fn prefer_new(&mut self) -> bool {
        true
    }
}

impl<R: Rng> TieBreaker for CoinFlip<R> {
    fn prefer_new(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

/// A copyable description of a tie-break policy, stored in the encoder
/// context.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    #[default]
    KeepFirst,
    KeepLast,
    /// Random choice. Without a seed the generator is seeded from the OS and
    /// the output is not reproducible.
    Random { seed: Option<u64> },
}

impl TieBreak {
    /// Instantiate the policy.
    pub fn breaker(&self) -> Box<dyn TieBreaker> {
        match *self {
            TieBreak::KeepFirst => Box::new(KeepFirst),
            TieBreak::KeepLast => Box::new(KeepLast),
            TieBreak::Random { seed: Some(seed) } => {
                Box::new(CoinFlip::new(StdRng::seed_from_u64(seed)))
            }
            TieBreak::Random { seed: None } => {
                Box::new(CoinFlip::new(StdRng::from_entropy()))
            }
        }
    }
}
