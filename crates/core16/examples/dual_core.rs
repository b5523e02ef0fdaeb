//! Prints ALU results for 10 and 5, then runs the reference script on two
//! cores and queries the jump predicates of the first.

use core16::{
    alu, dec, inc, shl, shr, AluMode, Harness, HarnessConfig, HarnessError, Script, Word,
};
use log as _;
use proptest as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use serde_json as _;
use thiserror as _;

fn main() -> Result<(), HarnessError> {
    let a = Word::new(0b0000_0000_0000_1010);
    let b = Word::new(0b0000_0000_0000_0101);

    println!("A + B = {}", alu(a, b, AluMode::ADD));
    println!("A - B = {}", alu(a, b, AluMode::SUB));
    println!("A * B = {}", alu(a, b, AluMode::MUL));
    println!("A / B = {}", alu(a, b, AluMode::DIV));
    println!("INC(A) = {}", inc(a));
    println!("DEC(A) = {}", dec(a));
    println!("SHL(A) = {}", shl(a));
    println!("SHR(A) = {}", shr(a));

    let report = Harness::with_config(&HarnessConfig::default(), &Script::reference()).run()?;
    for entry in &report.transcript {
        println!("{}", entry.notice);
    }

    if let Some(first) = report.core(1) {
        if first.core.jz() {
            println!("Jump to address (Zero flag is set)");
        }
        if first.core.jc() {
            println!("Jump to address (Carry flag is set)");
        }
    }

    Ok(())
}
