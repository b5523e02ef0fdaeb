//! Arithmetic properties of the ripple-carry ALU over the full word range.

use core16::{alu, dec, inc, ripple_add, shl, shr, AluMode, Word};
use log as _;
use proptest::prelude::*;
use rstest::rstest;
#[cfg(feature = "serde")]
use serde as _;
use serde_json as _;
use thiserror as _;

fn word() -> impl Strategy<Value = Word> {
    any::<u16>().prop_map(Word::new)
}

proptest! {
    #[test]
    fn add_matches_wrapping_addition(a in word(), b in word()) {
        prop_assert_eq!(alu(a, b, AluMode::ADD).value(), a.value().wrapping_add(b.value()));
    }

    #[test]
    fn sub_matches_wrapping_subtraction(a in word(), b in word()) {
        prop_assert_eq!(alu(a, b, AluMode::SUB).value(), a.value().wrapping_sub(b.value()));
    }

    #[test]
    fn mul_truncates_to_sixteen_bits(a in word(), b in word()) {
        prop_assert_eq!(alu(a, b, AluMode::MUL).value(), a.value().wrapping_mul(b.value()));
    }

    #[test]
    fn div_is_floor_quotient_for_nonzero_divisor(a in word(), b in 1_u16..=u16::MAX) {
        prop_assert_eq!(alu(a, Word::new(b), AluMode::DIV).value(), a.value() / b);
    }

    #[test]
    fn div_by_zero_is_zero(a in word()) {
        prop_assert_eq!(alu(a, Word::ZERO, AluMode::DIV), Word::ZERO);
    }

    #[test]
    fn subtract_flag_is_ignored_by_mul_and_div(a in word(), b in word()) {
        let mul = AluMode { subtract: true, ..AluMode::MUL };
        let div = AluMode { subtract: true, ..AluMode::DIV };
        prop_assert_eq!(alu(a, b, mul), alu(a, b, AluMode::MUL));
        prop_assert_eq!(alu(a, b, div), alu(a, b, AluMode::DIV));
    }

    #[test]
    fn ripple_carry_out_matches_unsigned_overflow(a in word(), b in word()) {
        let (_, overflow) = a.value().overflowing_add(b.value());
        prop_assert_eq!(ripple_add(a, b, false).carry, overflow);
    }

    #[test]
    fn inc_and_dec_are_alu_plus_and_minus_one(a in word()) {
        prop_assert_eq!(inc(a), alu(a, Word::ONE, AluMode::ADD));
        prop_assert_eq!(dec(a), alu(a, Word::ONE, AluMode::SUB));
        prop_assert_eq!(dec(inc(a)), a);
    }

    #[test]
    fn shr_undoes_shl_when_top_bit_is_clear(a in 0_u16..0x8000) {
        let a = Word::new(a);
        prop_assert_eq!(shr(shl(a)), a);
    }

    #[test]
    fn shl_undoes_shr_when_low_bit_is_clear(a in any::<u16>().prop_map(|v| v & !1)) {
        let a = Word::new(a);
        prop_assert_eq!(shl(shr(a)), a);
    }
}

#[rstest]
#[case(0xFFFF, 0x0000)]
#[case(0x0000, 0x0001)]
#[case(0x7FFF, 0x8000)]
fn inc_edges(#[case] input: u16, #[case] expected: u16) {
    assert_eq!(inc(Word::new(input)).value(), expected);
}

#[rstest]
#[case(0x0000, 0xFFFF)]
#[case(0x8000, 0x7FFF)]
#[case(0x0001, 0x0000)]
fn dec_edges(#[case] input: u16, #[case] expected: u16) {
    assert_eq!(dec(Word::new(input)).value(), expected);
}

#[test]
fn shl_after_shr_loses_a_set_low_bit() {
    let a = Word::new(0b1011);
    assert_ne!(shl(shr(a)), a);
    assert_eq!(shl(shr(a)).value(), 0b1010);
}
