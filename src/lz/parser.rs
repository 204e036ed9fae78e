//! This module implements the optimal parser for the constrained LZ format.
//!
//! The parser walks the input one character at a time and keeps a 10x10 table
//! of states. State (0, len) means that the encoding currently ends with an
//! open literal of 'len' characters, and state (offset, len) means that it
//! ends with an open back-reference. Every state remembers the cheapest
//! encoding of the prefix that reaches it. Encodings are not stored as
//! strings; each state points into an arena of emitted tokens that link back
//! to their predecessors, and the winning encoding is rebuilt once at the end.

use crate::error::{Precondition, Result};
use crate::lz::tie_break::TieBreaker;
use crate::utils::digits::MAX_DIGIT;

/// One emitted piece of the output stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// The 'len' input characters that end right before 'end'.
    Literal { end: usize, len: usize },
    /// Copy 'len' characters from 'offset' characters back.
    Reference { len: usize, offset: usize },
    /// An empty literal or back-reference, written as a single zero.
    Skip,
}

impl Token {
    /// Return the number of characters this token occupies in the stream.
    pub fn cost(&self) -> usize {
        match self {
            Token::Literal { len, .. } => 1 + len,
            Token::Reference { .. } => 2,
            Token::Skip => 1,
        }
    }
}

/// A token in the arena, linked to the token that was emitted before it.
#[derive(Clone, Copy, Debug)]
struct Node {
    parent: Option<usize>,
    token: Token,
}

/// The best known encoding of the prefix for one state.
#[derive(Clone, Copy, Debug)]
struct Cell {
    /// The last emitted token, or None if nothing was emitted yet.
    node: Option<usize>,
    /// The length of the emitted stream.
    cost: usize,
}

const STATES: usize = MAX_DIGIT + 1;

type Table = [[Option<Cell>; STATES]; STATES];

pub struct OptimalParser<'a, 'b> {
    /// The input to tokenize.
    input: &'a [char],
    /// All of the tokens that were ever selected by some state.
    arena: Vec<Node>,
    /// Resolves ties between encodings of equal length.
    breaker: &'b mut dyn TieBreaker,
}

impl<'a, 'b> OptimalParser<'a, 'b> {
    pub fn new(input: &'a [char], breaker: &'b mut dyn TieBreaker) -> Self {
        Self {
            input,
            arena: Vec::new(),
            breaker,
        }
    }

    /// Return True if a candidate of length 'cost' should replace 'current'.
    fn accept(&mut self, current: Option<Cell>, cost: usize) -> bool {
        match current {
            None => true,
            Some(cell) if cost < cell.cost => true,
            Some(cell) if cost == cell.cost => self.breaker.prefer_new(),
            Some(_) => false,
        }
    }

    /// Append 'tokens' to the encoding in 'from', and record the result in
    /// state 'offset', 'len' of 'table', unless it is longer than the
    /// encoding that the state already holds.
    fn offer(
        &mut self,
        table: &mut Table,
        offset: usize,
        len: usize,
        from: Cell,
        tokens: &[Token],
    ) {
        let cost = from.cost + tokens.iter().map(Token::cost).sum::<usize>();
        if !self.accept(table[offset][len], cost) {
            return;
        }
        table[offset][len] = Some(Cell {
            node: self.push(from.node, tokens),
            cost,
        });
    }

    fn push(
        &mut self,
        mut node: Option<usize>,
        tokens: &[Token],
    ) -> Option<usize> {
        for token in tokens {
            self.arena.push(Node {
                parent: node,
                token: *token,
            });
            node = Some(self.arena.len() - 1);
        }
        node
    }

    /// Return True if the character at 'idx' repeats the one 'offset' back.
    fn matches(&self, idx: usize, offset: usize) -> bool {
        self.input[idx - offset] == self.input[idx]
    }

    /// Compute the state table after consuming the character at 'idx'.
    fn step(&mut self, cur: &Table, idx: usize) -> Table {
        let mut next: Table = [[None; STATES]; STATES];
        let max_offset = MAX_DIGIT.min(idx);

        // Open literals.
        for len in 1..=MAX_DIGIT {
            let Some(cell) = cur[0][len] else { continue };

            if len < MAX_DIGIT {
                self.offer(&mut next, 0, len + 1, cell, &[]);
            } else {
                // The literal is full. Close it, skip the back-reference and
                // start a new literal.
                let lit = Token::Literal { end: idx, len };
                self.offer(&mut next, 0, 1, cell, &[lit, Token::Skip]);
            }

            for offset in 1..=max_offset {
                if self.matches(idx, offset) {
                    let lit = Token::Literal { end: idx, len };
                    self.offer(&mut next, offset, 1, cell, &[lit]);
                }
            }
        }

        // Open back-references.
        for offset in 1..=MAX_DIGIT {
            for len in 1..=MAX_DIGIT {
                let Some(cell) = cur[offset][len] else { continue };
                let reference = Token::Reference { len, offset };

                if self.matches(idx, offset) {
                    if len < MAX_DIGIT {
                        self.offer(&mut next, offset, len + 1, cell, &[]);
                    } else {
                        // Close the full reference and continue with the same
                        // offset after an empty literal.
                        self.offer(
                            &mut next,
                            offset,
                            1,
                            cell,
                            &[reference, Token::Skip],
                        );
                    }
                }

                // Close the reference and start a literal.
                self.offer(&mut next, 0, 1, cell, &[reference]);

                // Close the reference and start another one.
                for new_offset in 1..=max_offset {
                    if self.matches(idx, new_offset) {
                        self.offer(
                            &mut next,
                            new_offset,
                            1,
                            cell,
                            &[reference, Token::Skip],
                        );
                    }
                }
            }
        }

        next
    }

    /// Walk the arena backwards from 'node' and return the tokens in stream
    /// order.
    fn collect(&self, mut node: Option<usize>) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(idx) = node {
            tokens.push(self.arena[idx].token);
            node = self.arena[idx].parent;
        }
        tokens.reverse();
        tokens
    }

    /// Return the shortest token sequence that encodes the input.
    pub fn parse(mut self) -> Result<Vec<Token>> {
        let input_len = self.input.len();

        // The first character always starts a literal.
        let mut table: Table = [[None; STATES]; STATES];
        if input_len > 0 {
            table[0][1] = Some(Cell { node: None, cost: 0 });
        }

        for idx in 1..input_len {
            table = self.step(&table, idx);
        }

        // Close every live state and keep the shortest result.
        let mut best: Option<(Cell, Token)> = None;
        for offset in 0..STATES {
            for len in 1..=MAX_DIGIT {
                let Some(cell) = table[offset][len] else { continue };
                let last = if offset == 0 {
                    Token::Literal {
                        end: input_len,
                        len,
                    }
                } else {
                    Token::Reference { len, offset }
                };
                let cost = cell.cost + last.cost();
                if self.accept(best.map(|(c, _)| c), cost) {
                    best = Some((Cell { cost, ..cell }, last));
                }
            }
        }

        // Every step keeps a literal state alive, so only an empty input
        // ends without a live state.
        let (cell, last) = best.ok_or(Precondition::EmptyInput)?;
        let mut tokens = self.collect(cell.node);
        tokens.push(last);
        log::trace!(
            "Parsed {} characters into {} tokens ({} arena nodes)",
            input_len,
            tokens.len(),
            self.arena.len()
        );
        Ok(tokens)
    }
}
