//! Instruction dispatch and the script execution loop.
//!
//! A script runs under a held [`BusGuard`]: the loop walks an instruction
//! pointer from zero to the end of the script, executing each instruction
//! against one core. Guarded faults (stack overflow/underflow, divide by zero)
//! are logged and counted, then execution continues, matching the core's
//! silent no-op policy. Any other fault stops the script.

mod instruction;

pub use instruction::{FenceKind, Instruction, Script};

use thiserror::Error;

use crate::{BusGuard, Core, FaultCode, Notice};

/// Outcome of executing a single instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecuteOutcome {
    /// Instruction retired with no further result.
    Retired,
    /// `JZ`/`JC` evaluated its predicate.
    Predicate {
        /// Whether the jump would be taken.
        taken: bool,
    },
    /// Stub instruction produced a notice.
    Notice(Notice),
}

/// Fault that stopped a script, with the instruction pointer it occurred at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{} at ip {ip}: {fault}", .instruction.mnemonic())]
pub struct ScriptFault {
    /// Instruction pointer of the faulting instruction.
    pub ip: usize,
    /// The faulting instruction.
    pub instruction: Instruction,
    /// The fault raised.
    pub fault: FaultCode,
}

/// Per-run accounting for one script.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScriptReport {
    /// Instructions executed, including those that hit a guard.
    pub executed: usize,
    /// Guarded faults swallowed along the way, in order.
    pub guarded_faults: Vec<FaultCode>,
    /// `JZ`/`JC` results in program order.
    pub predicates: Vec<bool>,
}

impl Core {
    /// Executes one instruction while the caller holds the bus.
    ///
    /// `LOCK` does not re-acquire the bus here: the held guard already
    /// provides the exclusion it asks for.
    ///
    /// # Errors
    ///
    /// Returns the [`FaultCode`] reported by the instruction. For guarded
    /// faults the core is already in its post-guard state.
    pub fn execute(
        &mut self,
        instruction: Instruction,
        _held: &BusGuard<'_>,
    ) -> Result<ExecuteOutcome, FaultCode> {
        let outcome = match instruction {
            Instruction::Mov { dst, value } => {
                self.mov(dst, value);
                ExecuteOutcome::Retired
            }
            Instruction::Add { dst, src } => {
                self.add(dst, src);
                ExecuteOutcome::Retired
            }
            Instruction::Sub { dst, src } => {
                self.sub(dst, src);
                ExecuteOutcome::Retired
            }
            Instruction::Mul { dst, src } => {
                self.mul(dst, src);
                ExecuteOutcome::Retired
            }
            Instruction::Div { dst, src } => {
                self.div(dst, src)?;
                ExecuteOutcome::Retired
            }
            Instruction::Inc(reg) => {
                self.inc(reg);
                ExecuteOutcome::Retired
            }
            Instruction::Dec(reg) => {
                self.dec(reg);
                ExecuteOutcome::Retired
            }
            Instruction::Shl(reg) => {
                self.shl(reg);
                ExecuteOutcome::Retired
            }
            Instruction::Shr(reg) => {
                self.shr(reg);
                ExecuteOutcome::Retired
            }
            Instruction::Push(reg) => {
                self.push(reg)?;
                ExecuteOutcome::Retired
            }
            Instruction::Pop(reg) => {
                self.pop(reg)?;
                ExecuteOutcome::Retired
            }
            Instruction::Xchg(a, b) => {
                self.xchg(a, b);
                ExecuteOutcome::Retired
            }
            Instruction::Cmpxchg(a, b) => {
                self.cmpxchg(a, b);
                ExecuteOutcome::Retired
            }
            Instruction::Jmp(address) => {
                self.jmp(address)?;
                ExecuteOutcome::Retired
            }
            Instruction::Jz => ExecuteOutcome::Predicate { taken: self.jz() },
            Instruction::Jc => ExecuteOutcome::Predicate { taken: self.jc() },
            Instruction::Lock => ExecuteOutcome::Notice(Notice::BusLocked),
            Instruction::Cli => ExecuteOutcome::Notice(Notice::InterruptFlagCleared),
            Instruction::Sti => ExecuteOutcome::Notice(Notice::InterruptFlagSet),
            Instruction::Fence(FenceKind::Store) => ExecuteOutcome::Notice(Notice::StoreFence),
            Instruction::Fence(FenceKind::Load) => ExecuteOutcome::Notice(Notice::LoadFence),
            Instruction::Fence(FenceKind::Memory) => ExecuteOutcome::Notice(Notice::MemoryFence),
        };
        Ok(outcome)
    }
}

/// Runs `script` to completion on `core` under the held bus.
///
/// Notices are recorded in the bus transcript under `core_id`.
///
/// # Errors
///
/// Returns [`ScriptFault`] for the first non-guarded fault; instructions
/// after it do not run.
pub fn run_script(
    core: &mut Core,
    script: &Script,
    guard: &mut BusGuard<'_>,
    core_id: usize,
) -> Result<ScriptReport, ScriptFault> {
    let mut report = ScriptReport::default();
    let mut ip = 0;

    while let Some(instruction) = script.get(ip) {
        match core.execute(instruction, guard) {
            Ok(ExecuteOutcome::Retired) => {}
            Ok(ExecuteOutcome::Predicate { taken }) => report.predicates.push(taken),
            Ok(ExecuteOutcome::Notice(notice)) => guard.record(core_id, notice),
            Err(fault) if fault.is_guarded() => {
                log::debug!(
                    "[core {core_id}] {} at ip {ip}: {fault}, ignored",
                    instruction.mnemonic()
                );
                report.guarded_faults.push(fault);
            }
            Err(fault) => {
                let fault = ScriptFault {
                    ip,
                    instruction,
                    fault,
                };
                log::warn!("[core {core_id}] script stopped: {fault}");
                return Err(fault);
            }
        }
        report.executed += 1;
        ip += 1;
    }

    Ok(report)
}
