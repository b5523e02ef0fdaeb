//! Half and full adders composed from the bit primitives.

use crate::logic::{and, or, xor};

/// Sum and carry produced by a one-bit adder stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AdderOutput {
    /// Sum bit.
    pub sum: bool,
    /// Carry-out bit.
    pub carry: bool,
}

/// Adds two bits without carry-in.
#[must_use]
pub const fn half_adder(a: bool, b: bool) -> AdderOutput {
    AdderOutput {
        sum: xor(a, b),
        carry: and(a, b),
    }
}

/// Adds two bits and a carry-in using two chained half adders.
#[must_use]
pub const fn full_adder(a: bool, b: bool, carry_in: bool) -> AdderOutput {
    let first = half_adder(a, b);
    let second = half_adder(first.sum, carry_in);
    AdderOutput {
        sum: second.sum,
        carry: or(first.carry, second.carry),
    }
}
