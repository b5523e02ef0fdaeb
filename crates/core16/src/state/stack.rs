use crate::{FaultCode, Word};

/// Flat word memory used as an upward-growing stack.
///
/// The stack pointer always satisfies `0 <= sp <= capacity`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawStack"))]
pub struct StackMemory {
    cells: Vec<Word>,
    sp: usize,
}

/// Unchecked wire form; converted through [`StackMemory::try_from`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawStack {
    cells: Vec<Word>,
    sp: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawStack> for StackMemory {
    type Error = FaultCode;

    fn try_from(raw: RawStack) -> Result<Self, Self::Error> {
        let mut stack = Self {
            cells: raw.cells,
            sp: 0,
        };
        stack.set_sp(raw.sp)?;
        Ok(stack)
    }
}

impl StackMemory {
    /// Allocates `capacity` zeroed words with the stack pointer at zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cells: vec![Word::ZERO; capacity],
            sp: 0,
        }
    }

    /// Number of words of backing memory.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Current stack pointer.
    #[must_use]
    pub const fn sp(&self) -> usize {
        self.sp
    }

    /// Moves the stack pointer.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::InvalidJumpTarget`] when `sp > capacity`; the
    /// pointer is left unchanged.
    pub fn set_sp(&mut self, sp: usize) -> Result<(), FaultCode> {
        if sp > self.capacity() {
            return Err(FaultCode::InvalidJumpTarget);
        }
        self.sp = sp;
        Ok(())
    }

    /// Reads the word at `addr`, or `None` past the end of memory.
    #[must_use]
    pub fn read(&self, addr: usize) -> Option<Word> {
        self.cells.get(addr).copied()
    }

    /// Read-only view of the whole memory.
    #[must_use]
    pub fn cells(&self) -> &[Word] {
        &self.cells
    }

    /// Stores `value` at `sp` and advances the pointer.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::StackOverflow`] when `sp == capacity`; memory and
    /// pointer are untouched.
    pub fn push(&mut self, value: Word) -> Result<(), FaultCode> {
        let slot = self
            .cells
            .get_mut(self.sp)
            .ok_or(FaultCode::StackOverflow)?;
        *slot = value;
        self.sp += 1;
        Ok(())
    }

    /// Retreats the pointer and returns the word it now addresses.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::StackUnderflow`] when `sp == 0`; the pointer is
    /// untouched.
    pub fn pop(&mut self) -> Result<Word, FaultCode> {
        let sp = self.sp.checked_sub(1).ok_or(FaultCode::StackUnderflow)?;
        let value = self
            .cells
            .get(sp)
            .copied()
            .ok_or(FaultCode::StackUnderflow)?;
        self.sp = sp;
        Ok(value)
    }
}
