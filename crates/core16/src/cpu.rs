//! A single processor core and its instruction methods.
//!
//! Guarded instructions return `Result` naming the guard that fired. Either
//! way the core ends in the state the silent no-op would leave, so callers
//! are free to discard the error.
//!
//! The zero and carry flags are never written by arithmetic. `jz`/`jc` read
//! whatever was last stored through [`Core::set_zero_flag`] and
//! [`Core::set_carry_flag`], which is `false` for a fresh core.

use crate::alu::{self, AluMode};
use crate::state::registers::{FLAGS_C, FLAGS_Z};
use crate::{
    BusLock, CoreConfig, CoreSnapshot, FaultCode, GeneralRegister, Notice, RegisterFile,
    StackMemory, Word,
};

/// One processor core: registers, flags, and a word memory used as a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Core {
    registers: RegisterFile,
    stack: StackMemory,
}

impl Default for Core {
    fn default() -> Self {
        Self::with_config(&CoreConfig::default())
    }
}

impl Core {
    /// Creates a core with `memory_words` words of zeroed memory.
    ///
    /// A zero-capacity core is legal; its stack is permanently full.
    #[must_use]
    pub fn new(memory_words: usize) -> Self {
        Self {
            registers: RegisterFile::default(),
            stack: StackMemory::new(memory_words),
        }
    }

    /// Creates a core from configuration.
    #[must_use]
    pub fn with_config(config: &CoreConfig) -> Self {
        Self::new(config.memory_words)
    }

    /// Reads a general-purpose register.
    #[must_use]
    pub const fn reg(&self, reg: GeneralRegister) -> Word {
        self.registers.gpr(reg)
    }

    /// Register file, including flags.
    #[must_use]
    pub const fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    /// Word memory and stack pointer.
    #[must_use]
    pub const fn stack(&self) -> &StackMemory {
        &self.stack
    }

    /// Current stack pointer.
    #[must_use]
    pub const fn sp(&self) -> usize {
        self.stack.sp()
    }

    /// Read-only view of memory.
    #[must_use]
    pub fn memory(&self) -> &[Word] {
        self.stack.cells()
    }

    /// Captures a value copy of the architectural state.
    #[must_use]
    pub fn snapshot(&self) -> CoreSnapshot {
        CoreSnapshot {
            registers: self.registers.clone(),
            stack: self.stack.clone(),
        }
    }

    /// Host-side write of the zero flag.
    pub const fn set_zero_flag(&mut self, set: bool) {
        self.registers.set_flag(FLAGS_Z, set);
    }

    /// Host-side write of the carry flag.
    pub const fn set_carry_flag(&mut self, set: bool) {
        self.registers.set_flag(FLAGS_C, set);
    }

    /// `MOV reg, value`.
    pub const fn mov(&mut self, reg: GeneralRegister, value: Word) {
        self.registers.set_gpr(reg, value);
    }

    /// `JMP address`: loads the stack pointer, which doubles as the jump
    /// target. No control transfer happens.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::InvalidJumpTarget`] when `address` is past the end
    /// of memory; the stack pointer is left unchanged.
    pub fn jmp(&mut self, address: usize) -> Result<(), FaultCode> {
        self.stack.set_sp(address)
    }

    /// `JZ`: whether a jump on zero would be taken.
    #[must_use]
    pub const fn jz(&self) -> bool {
        self.registers.flag_is_set(FLAGS_Z)
    }

    /// `JC`: whether a jump on carry would be taken.
    #[must_use]
    pub const fn jc(&self) -> bool {
        self.registers.flag_is_set(FLAGS_C)
    }

    /// `PUSH reg`.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::StackOverflow`] when the stack pointer is at
    /// memory capacity; nothing is written.
    pub fn push(&mut self, reg: GeneralRegister) -> Result<(), FaultCode> {
        self.stack.push(self.registers.gpr(reg))
    }

    /// `POP reg`.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::StackUnderflow`] when the stack pointer is zero;
    /// the register keeps its value.
    pub fn pop(&mut self, reg: GeneralRegister) -> Result<(), FaultCode> {
        let value = self.stack.pop()?;
        self.registers.set_gpr(reg, value);
        Ok(())
    }

    /// `ADD dst, src`: `dst = dst + src`, wrapping.
    pub fn add(&mut self, dst: GeneralRegister, src: GeneralRegister) {
        self.apply(dst, src, AluMode::ADD);
    }

    /// `SUB dst, src`: `dst = dst - src`, wrapping.
    pub fn sub(&mut self, dst: GeneralRegister, src: GeneralRegister) {
        self.apply(dst, src, AluMode::SUB);
    }

    /// `MUL dst, src`: `dst = dst * src`, truncated to 16 bits.
    pub fn mul(&mut self, dst: GeneralRegister, src: GeneralRegister) {
        self.apply(dst, src, AluMode::MUL);
    }

    /// `DIV dst, src`: `dst = dst / src`.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::DivideByZero`] when `src` holds zero. `dst` still
    /// receives the ALU's guarded result of `0`.
    pub fn div(&mut self, dst: GeneralRegister, src: GeneralRegister) -> Result<(), FaultCode> {
        let divisor = self.registers.gpr(src);
        self.apply(dst, src, AluMode::DIV);
        if divisor == Word::ZERO {
            return Err(FaultCode::DivideByZero);
        }
        Ok(())
    }

    /// `INC reg`.
    pub fn inc(&mut self, reg: GeneralRegister) {
        let value = alu::inc(self.registers.gpr(reg));
        self.registers.set_gpr(reg, value);
    }

    /// `DEC reg`.
    pub fn dec(&mut self, reg: GeneralRegister) {
        let value = alu::dec(self.registers.gpr(reg));
        self.registers.set_gpr(reg, value);
    }

    /// `SHL reg`: logical shift left by one.
    pub const fn shl(&mut self, reg: GeneralRegister) {
        self.registers.set_gpr(reg, alu::shl(self.registers.gpr(reg)));
    }

    /// `SHR reg`: logical shift right by one.
    pub const fn shr(&mut self, reg: GeneralRegister) {
        self.registers.set_gpr(reg, alu::shr(self.registers.gpr(reg)));
    }

    /// `XCHG a, b`: swaps two registers. Not atomic with respect to anything;
    /// cores only serialize through the bus lock.
    pub fn xchg(&mut self, a: GeneralRegister, b: GeneralRegister) {
        self.registers.swap(a, b);
    }

    /// `CMPXCHG a, b`: when the registers are equal, copies `b` into `a`.
    ///
    /// This two-operand form has no separate desired value, so it never
    /// changes observable state.
    pub const fn cmpxchg(&mut self, a: GeneralRegister, b: GeneralRegister) {
        let value = self.registers.gpr(b);
        if self.registers.gpr(a).value() == value.value() {
            self.registers.set_gpr(a, value);
        }
    }

    /// `LOCK`: takes the bus and releases it before returning.
    ///
    /// Blocks while another holder has the bus. Must not be called by a
    /// thread that already holds a [`crate::BusGuard`] for `bus`; scripts run
    /// `LOCK` through [`Core::execute`] instead, which reuses the held guard.
    #[allow(clippy::unused_self)]
    pub fn lock(&self, bus: &BusLock) -> Notice {
        drop(bus.acquire());
        log::info!("{}", Notice::BusLocked);
        Notice::BusLocked
    }

    /// `CLI`: interrupt stub, no state change.
    #[allow(clippy::unused_self)]
    pub fn cli(&self) -> Notice {
        notify(Notice::InterruptFlagCleared)
    }

    /// `STI`: interrupt stub, no state change.
    #[allow(clippy::unused_self)]
    pub fn sti(&self) -> Notice {
        notify(Notice::InterruptFlagSet)
    }

    /// `SFENCE`: store-ordering stub, no state change.
    #[allow(clippy::unused_self)]
    pub fn sfence(&self) -> Notice {
        notify(Notice::StoreFence)
    }

    /// `LFENCE`: load-ordering stub, no state change.
    #[allow(clippy::unused_self)]
    pub fn lfence(&self) -> Notice {
        notify(Notice::LoadFence)
    }

    /// `MFENCE`: full-ordering stub, no state change.
    #[allow(clippy::unused_self)]
    pub fn mfence(&self) -> Notice {
        notify(Notice::MemoryFence)
    }

    fn apply(&mut self, dst: GeneralRegister, src: GeneralRegister, mode: AluMode) {
        let result = alu::alu(self.registers.gpr(dst), self.registers.gpr(src), mode);
        self.registers.set_gpr(dst, result);
    }
}

fn notify(notice: Notice) -> Notice {
    log::info!("{notice}");
    notice
}

#[cfg(test)]
mod tests {
    use super::Core;
    use crate::{BusLock, CoreConfig, FaultCode, GeneralRegister, Notice, Word};

    use GeneralRegister::{R0, R1, R2, R3};

    #[test]
    fn fresh_core_has_zeroed_state_and_clear_flags() {
        let core = Core::new(8);
        assert_eq!(core.memory().len(), 8);
        assert_eq!(core.sp(), 0);
        assert!(!core.jz());
        assert!(!core.jc());
        assert!(GeneralRegister::ALL
            .iter()
            .all(|reg| core.reg(*reg) == Word::ZERO));
    }

    #[test]
    fn default_core_uses_default_config() {
        let core = Core::default();
        assert_eq!(core.memory().len(), CoreConfig::default().memory_words);
    }

    #[test]
    fn reference_scenario_runs_end_to_end() {
        let mut core = Core::new(1024);
        core.mov(R0, Word::new(10));
        core.mov(R1, Word::new(5));

        core.add(R0, R1);
        assert_eq!(core.reg(R0).value(), 15);

        core.push(R0).unwrap();
        assert_eq!(core.memory()[0].value(), 15);
        assert_eq!(core.sp(), 1);

        core.pop(R2).unwrap();
        assert_eq!(core.reg(R2).value(), 15);
        assert_eq!(core.sp(), 0);

        core.sub(R2, R1);
        assert_eq!(core.reg(R2).value(), 10);
    }

    #[test]
    fn flags_are_not_written_by_arithmetic() {
        let mut core = Core::new(4);
        core.mov(R0, Word::new(5));
        core.mov(R1, Word::new(5));
        core.sub(R0, R1);
        assert_eq!(core.reg(R0), Word::ZERO);
        assert!(!core.jz());

        core.mov(R0, Word::MAX);
        core.mov(R1, Word::ONE);
        core.add(R0, R1);
        assert!(!core.jc());

        core.set_zero_flag(true);
        core.set_carry_flag(true);
        assert!(core.jz());
        assert!(core.jc());
    }

    #[test]
    fn jmp_loads_stack_pointer_within_bounds() {
        let mut core = Core::new(16);
        assert_eq!(core.jmp(12), Ok(()));
        assert_eq!(core.sp(), 12);
        assert_eq!(core.jmp(16), Ok(()));
        assert_eq!(core.jmp(17), Err(FaultCode::InvalidJumpTarget));
        assert_eq!(core.sp(), 16);
    }

    #[test]
    fn push_at_capacity_and_pop_at_base_are_silent_no_ops() {
        let mut core = Core::new(1);
        core.mov(R0, Word::new(42));
        assert_eq!(core.pop(R0), Err(FaultCode::StackUnderflow));
        assert_eq!(core.reg(R0).value(), 42);

        core.push(R0).unwrap();
        let before = core.snapshot();
        assert_eq!(core.push(R0), Err(FaultCode::StackOverflow));
        assert_eq!(core.snapshot(), before);
    }

    #[test]
    fn div_by_zero_writes_zero_and_reports_the_guard() {
        let mut core = Core::new(1);
        core.mov(R0, Word::new(10));
        assert_eq!(core.div(R0, R1), Err(FaultCode::DivideByZero));
        assert_eq!(core.reg(R0), Word::ZERO);

        core.mov(R0, Word::new(10));
        core.mov(R1, Word::new(3));
        assert_eq!(core.div(R0, R1), Ok(()));
        assert_eq!(core.reg(R0).value(), 3);
    }

    #[test]
    fn register_form_unary_ops() {
        let mut core = Core::new(1);
        core.mov(R3, Word::MAX);
        core.inc(R3);
        assert_eq!(core.reg(R3), Word::ZERO);
        core.dec(R3);
        assert_eq!(core.reg(R3), Word::MAX);
        core.shr(R3);
        assert_eq!(core.reg(R3).value(), 0x7FFF);
        core.shl(R3);
        assert_eq!(core.reg(R3).value(), 0xFFFE);

        core.mov(R2, Word::new(7));
        core.mul(R3, R2);
        assert_eq!(core.reg(R3).value(), 0xFFFE_u16.wrapping_mul(7));
    }

    #[test]
    fn xchg_and_cmpxchg_follow_register_contract() {
        let mut core = Core::new(1);
        core.mov(R0, Word::new(1));
        core.mov(R1, Word::new(2));

        core.xchg(R0, R1);
        assert_eq!(core.reg(R0).value(), 2);
        assert_eq!(core.reg(R1).value(), 1);

        let before = core.snapshot();
        core.cmpxchg(R0, R1);
        assert_eq!(core.snapshot(), before);

        core.mov(R1, Word::new(2));
        core.cmpxchg(R0, R1);
        assert_eq!(core.reg(R0).value(), 2);
        assert_eq!(core.reg(R1).value(), 2);
    }

    #[test]
    fn stubs_report_notices_without_touching_state() {
        let core = Core::new(2);
        let before = core.snapshot();

        assert_eq!(core.cli(), Notice::InterruptFlagCleared);
        assert_eq!(core.sti(), Notice::InterruptFlagSet);
        assert_eq!(core.sfence(), Notice::StoreFence);
        assert_eq!(core.lfence(), Notice::LoadFence);
        assert_eq!(core.mfence(), Notice::MemoryFence);

        let bus = BusLock::new();
        assert_eq!(core.lock(&bus), Notice::BusLocked);
        // released on return
        drop(bus.acquire());

        assert_eq!(core.snapshot(), before);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialized_core_with_out_of_range_pointer_is_rejected() {
        let mut value = serde_json::to_value(Core::new(2)).unwrap();
        value["stack"]["sp"] = serde_json::json!(5);

        assert!(serde_json::from_value::<Core>(value).is_err());
    }
}
