use crate::{GeneralRegister, Word};

use GeneralRegister::{R0, R1, R2};

/// Memory-ordering barrier flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FenceKind {
    /// `SFENCE`.
    Store,
    /// `LFENCE`.
    Load,
    /// `MFENCE`.
    Memory,
}

/// One instruction with its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum Instruction {
    Mov { dst: GeneralRegister, value: Word },
    Add { dst: GeneralRegister, src: GeneralRegister },
    Sub { dst: GeneralRegister, src: GeneralRegister },
    Mul { dst: GeneralRegister, src: GeneralRegister },
    Div { dst: GeneralRegister, src: GeneralRegister },
    Inc(GeneralRegister),
    Dec(GeneralRegister),
    Shl(GeneralRegister),
    Shr(GeneralRegister),
    Push(GeneralRegister),
    Pop(GeneralRegister),
    Xchg(GeneralRegister, GeneralRegister),
    Cmpxchg(GeneralRegister, GeneralRegister),
    Jmp(usize),
    Jz,
    Jc,
    Lock,
    Cli,
    Sti,
    Fence(FenceKind),
}

impl Instruction {
    /// Assembly-style mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Mov { .. } => "MOV",
            Self::Add { .. } => "ADD",
            Self::Sub { .. } => "SUB",
            Self::Mul { .. } => "MUL",
            Self::Div { .. } => "DIV",
            Self::Inc(_) => "INC",
            Self::Dec(_) => "DEC",
            Self::Shl(_) => "SHL",
            Self::Shr(_) => "SHR",
            Self::Push(_) => "PUSH",
            Self::Pop(_) => "POP",
            Self::Xchg(..) => "XCHG",
            Self::Cmpxchg(..) => "CMPXCHG",
            Self::Jmp(_) => "JMP",
            Self::Jz => "JZ",
            Self::Jc => "JC",
            Self::Lock => "LOCK",
            Self::Cli => "CLI",
            Self::Sti => "STI",
            Self::Fence(FenceKind::Store) => "SFENCE",
            Self::Fence(FenceKind::Load) => "LFENCE",
            Self::Fence(FenceKind::Memory) => "MFENCE",
        }
    }
}

/// A fixed instruction sequence executed front to back.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Script {
    instructions: Vec<Instruction>,
}

impl Script {
    /// Wraps an instruction list.
    #[must_use]
    pub const fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// The per-core demonstration scenario: load 10 and 5, add, round-trip
    /// the sum through the stack, subtract, then exchange and
    /// compare-exchange the operands.
    #[must_use]
    pub fn reference() -> Self {
        Self::new(vec![
            Instruction::Mov {
                dst: R0,
                value: Word::new(0b0000_0000_0000_1010),
            },
            Instruction::Mov {
                dst: R1,
                value: Word::new(0b0000_0000_0000_0101),
            },
            Instruction::Add { dst: R0, src: R1 },
            Instruction::Push(R0),
            Instruction::Pop(R2),
            Instruction::Sub { dst: R2, src: R1 },
            Instruction::Xchg(R0, R1),
            Instruction::Cmpxchg(R0, R1),
        ])
    }

    /// Instruction at `ip`, if any.
    #[must_use]
    pub fn get(&self, ip: usize) -> Option<Instruction> {
        self.instructions.get(ip).copied()
    }

    /// Number of instructions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns `true` when the script has no instructions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instructions in program order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

impl FromIterator<Instruction> for Script {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
