//! Fixed-width 16-bit machine word.

use std::fmt;

/// Number of bits in a [`Word`].
pub const WORD_BITS: usize = 16;

/// A 16-bit unsigned machine word addressed bit by bit, bit 0 least significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Word(u16);

impl Word {
    /// All bits clear.
    pub const ZERO: Self = Self(0);
    /// The value one.
    pub const ONE: Self = Self(1);
    /// All bits set.
    pub const MAX: Self = Self(u16::MAX);

    /// Wraps a raw 16-bit value.
    #[must_use]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the unsigned integer value.
    #[must_use]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Reads bit `index`. Indices at or beyond [`WORD_BITS`] read as clear.
    #[must_use]
    pub const fn bit(self, index: usize) -> bool {
        index < WORD_BITS && (self.0 >> index) & 1 != 0
    }

    /// Returns a copy with bit `index` forced to `set`. Out-of-range indices
    /// leave the word unchanged.
    #[must_use]
    pub const fn with_bit(self, index: usize, set: bool) -> Self {
        if index >= WORD_BITS {
            return self;
        }
        let mask = 1_u16 << index;
        if set {
            Self(self.0 | mask)
        } else {
            Self(self.0 & !mask)
        }
    }

    /// Iterates the bits from least to most significant.
    pub fn bits(self) -> impl Iterator<Item = bool> {
        (0..WORD_BITS).map(move |index| self.bit(index))
    }

    /// Builds a word from bits ordered least significant first. Bits past
    /// the sixteenth are ignored.
    #[must_use]
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        bits.into_iter()
            .take(WORD_BITS)
            .enumerate()
            .fold(Self::ZERO, |word, (index, bit)| word.with_bit(index, bit))
    }
}

impl From<u16> for Word {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Word> for u16 {
    fn from(word: Word) -> Self {
        word.0
    }
}

/// Renders all sixteen bits, most significant first.
impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016b}", self.0)
    }
}
