//! 16-bit arithmetic logic unit.
//!
//! Add and subtract run bit-serially through [`full_adder`]: subtraction
//! inverts the second operand and seeds the carry chain with `1`. Multiply
//! and divide work on the unsigned value directly.

use crate::adder::full_adder;
use crate::logic::xor;
use crate::{FaultCode, Word, WORD_BITS};

/// Mode selector lines driving the ALU.
///
/// `multiply` takes precedence over `divide`, and `subtract` is ignored
/// whenever either of them is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct AluMode {
    /// Invert operand B and carry in a one.
    pub subtract: bool,
    /// Unsigned multiply, truncated to 16 bits.
    pub multiply: bool,
    /// Unsigned divide, zero divisor yields zero.
    pub divide: bool,
}

impl AluMode {
    /// Ripple-carry addition.
    pub const ADD: Self = Self {
        subtract: false,
        multiply: false,
        divide: false,
    };
    /// Ripple-carry two's-complement subtraction.
    pub const SUB: Self = Self {
        subtract: true,
        multiply: false,
        divide: false,
    };
    /// Truncating multiply.
    pub const MUL: Self = Self {
        subtract: false,
        multiply: true,
        divide: false,
    };
    /// Guarded divide.
    pub const DIV: Self = Self {
        subtract: false,
        multiply: false,
        divide: true,
    };

    /// Resolves the selector lines to the single operation the ALU performs.
    #[must_use]
    pub const fn op(self) -> AluOp {
        if self.multiply {
            AluOp::Mul
        } else if self.divide {
            AluOp::Div
        } else if self.subtract {
            AluOp::Sub
        } else {
            AluOp::Add
        }
    }
}

/// Operation selected by an [`AluMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// Ripple-carry add.
    Add,
    /// Ripple-carry subtract.
    Sub,
    /// Truncating multiply.
    Mul,
    /// Guarded divide.
    Div,
}

/// Result of a ripple-carry pass including the carry out of bit 15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RippleOutput {
    /// Sixteen-bit sum.
    pub value: Word,
    /// Carry out of the most significant stage.
    pub carry: bool,
}

/// Runs the ripple-carry chain over all sixteen bit positions.
///
/// With `subtract` set each B bit is inverted and the chain starts with a
/// carry of one, giving `a - b` modulo 2^16.
#[must_use]
pub fn ripple_add(a: Word, b: Word, subtract: bool) -> RippleOutput {
    let mut carry = subtract;
    let mut value = Word::ZERO;

    for index in 0..WORD_BITS {
        let stage = full_adder(a.bit(index), xor(b.bit(index), subtract), carry);
        value = value.with_bit(index, stage.sum);
        carry = stage.carry;
    }

    RippleOutput { value, carry }
}

/// Computes `a` combined with `b` under `mode`.
///
/// Never fails: a zero divisor produces `0`. Use [`alu_checked`] to observe
/// that guard.
#[must_use]
pub fn alu(a: Word, b: Word, mode: AluMode) -> Word {
    match mode.op() {
        AluOp::Mul => Word::new(a.value().wrapping_mul(b.value())),
        AluOp::Div => a
            .value()
            .checked_div(b.value())
            .map_or(Word::ZERO, Word::new),
        AluOp::Add => ripple_add(a, b, false).value,
        AluOp::Sub => ripple_add(a, b, true).value,
    }
}

/// Same as [`alu`] but reports a zero divisor instead of masking it.
///
/// # Errors
///
/// Returns [`FaultCode::DivideByZero`] when the resolved operation is a
/// divide and `b` is zero.
pub fn alu_checked(a: Word, b: Word, mode: AluMode) -> Result<Word, FaultCode> {
    if mode.op() == AluOp::Div && b == Word::ZERO {
        return Err(FaultCode::DivideByZero);
    }
    Ok(alu(a, b, mode))
}

/// `a + 1`, wrapping.
#[must_use]
pub fn inc(a: Word) -> Word {
    alu(a, Word::ONE, AluMode::ADD)
}

/// `a - 1`, wrapping.
#[must_use]
pub fn dec(a: Word) -> Word {
    alu(a, Word::ONE, AluMode::SUB)
}

/// Logical shift left by one; bit 15 is dropped.
#[must_use]
pub const fn shl(a: Word) -> Word {
    Word::new(a.value() << 1)
}

/// Logical shift right by one; bit 0 is dropped.
#[must_use]
pub const fn shr(a: Word) -> Word {
    Word::new(a.value() >> 1)
}

#[cfg(test)]
mod tests {
    use super::{alu, alu_checked, dec, inc, ripple_add, shl, shr, AluMode, AluOp};
    use crate::{FaultCode, Word};
    use rstest::rstest;

    const A: Word = Word::new(10);
    const B: Word = Word::new(5);

    #[rstest]
    #[case(AluMode::ADD, 15)]
    #[case(AluMode::SUB, 5)]
    #[case(AluMode::MUL, 50)]
    #[case(AluMode::DIV, 2)]
    fn demo_operands_produce_expected_results(#[case] mode: AluMode, #[case] expected: u16) {
        assert_eq!(alu(A, B, mode).value(), expected);
    }

    #[test]
    fn multiply_wins_over_divide_and_subtract_is_ignored() {
        let all = AluMode {
            subtract: true,
            multiply: true,
            divide: true,
        };
        assert_eq!(all.op(), AluOp::Mul);
        assert_eq!(alu(A, B, all).value(), 50);

        let sub_div = AluMode {
            subtract: true,
            multiply: false,
            divide: true,
        };
        assert_eq!(sub_div.op(), AluOp::Div);
        assert_eq!(alu(A, B, sub_div).value(), 2);
    }

    #[test]
    fn divide_by_zero_yields_zero_and_checked_reports_it() {
        assert_eq!(alu(A, Word::ZERO, AluMode::DIV), Word::ZERO);
        assert_eq!(
            alu_checked(A, Word::ZERO, AluMode::DIV),
            Err(FaultCode::DivideByZero)
        );
        assert_eq!(alu_checked(A, Word::ZERO, AluMode::MUL), Ok(Word::ZERO));
    }

    #[test]
    fn ripple_add_exposes_final_carry() {
        let out = ripple_add(Word::MAX, Word::ONE, false);
        assert_eq!(out.value, Word::ZERO);
        assert!(out.carry);

        // no borrow leaves the carry set in two's-complement subtraction
        let out = ripple_add(A, B, true);
        assert_eq!(out.value.value(), 5);
        assert!(out.carry);

        let out = ripple_add(B, A, true);
        assert_eq!(out.value.value(), 0xFFFB);
        assert!(!out.carry);
    }

    #[test]
    fn inc_and_dec_wrap_at_the_edges() {
        assert_eq!(inc(Word::MAX), Word::ZERO);
        assert_eq!(dec(Word::ZERO), Word::MAX);
        assert_eq!(inc(A).value(), 11);
        assert_eq!(dec(A).value(), 9);
    }

    #[test]
    fn shifts_are_logical() {
        assert_eq!(shl(A).value(), 20);
        assert_eq!(shr(A).value(), 5);
        assert_eq!(shl(Word::new(0x8001)).value(), 0x0002);
        assert_eq!(shr(Word::new(0x8001)).value(), 0x4000);
    }
}
