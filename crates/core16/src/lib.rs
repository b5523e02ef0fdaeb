//! Bit-level 16-bit core simulator: gates, ALU, core state, and a
//! lock-serialized multi-core harness.

/// Single-bit boolean primitives.
pub mod logic;

/// Half and full adders.
pub mod adder;
pub use adder::{full_adder, half_adder, AdderOutput};

/// Fixed-width machine word.
pub mod word;
pub use word::{Word, WORD_BITS};

/// Fault taxonomy for instruction and ALU guards.
pub mod fault;
pub use fault::{FaultClass, FaultCode};

/// Sixteen-bit arithmetic logic unit.
pub mod alu;
pub use alu::{alu, alu_checked, dec, inc, ripple_add, shl, shr, AluMode, AluOp, RippleOutput};

/// Architectural core state model primitives.
pub mod state;
pub use state::{GeneralRegister, RegisterFile, StackMemory, GENERAL_REGISTER_COUNT};

/// Public host-facing configuration and observation types.
pub mod api;
pub use api::{
    CoreConfig, CoreSnapshot, HarnessConfig, Notice, TranscriptEntry, DEFAULT_CORE_COUNT,
    DEFAULT_MEMORY_WORDS,
};

/// Shared bus lock.
pub mod sync;
pub use sync::{BusGuard, BusLock};

/// Processor core and instruction methods.
pub mod cpu;
pub use cpu::Core;

/// Instruction dispatch and script execution.
pub mod execute;
pub use execute::{
    run_script, ExecuteOutcome, FenceKind, Instruction, Script, ScriptFault, ScriptReport,
};

/// Multi-core execution harness.
pub mod harness;
pub use harness::{CoreReport, Harness, HarnessError, HarnessReport};

#[cfg(test)]
use proptest as _;
#[cfg(all(test, not(feature = "serde")))]
use serde_json as _;
