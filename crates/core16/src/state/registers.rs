use crate::{FaultCode, Word};

/// Number of architecturally visible general-purpose registers (`R0..R7`).
pub const GENERAL_REGISTER_COUNT: usize = 8;
/// `FLAGS` bit for zero result.
pub const FLAGS_Z: u16 = 1 << 0;
/// `FLAGS` bit for carry/borrow.
pub const FLAGS_C: u16 = 1 << 1;
/// Mask of architecturally active `FLAGS` bits (`Z/C`).
pub const FLAGS_ACTIVE_MASK: u16 = FLAGS_Z | FLAGS_C;

/// Architecturally visible general-purpose register identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum GeneralRegister {
    R0 = 0,
    R1 = 1,
    R2 = 2,
    R3 = 3,
    R4 = 4,
    R5 = 5,
    R6 = 6,
    R7 = 7,
}

impl GeneralRegister {
    /// Ordered list of all architectural general-purpose registers.
    pub const ALL: [Self; GENERAL_REGISTER_COUNT] = [
        Self::R0,
        Self::R1,
        Self::R2,
        Self::R3,
        Self::R4,
        Self::R5,
        Self::R6,
        Self::R7,
    ];

    /// Returns the array index for this register (`0..=7`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Resolves a raw register index.
    ///
    /// # Errors
    ///
    /// Returns [`FaultCode::InvalidRegisterIndex`] when `index > 7`.
    pub const fn from_index(index: usize) -> Result<Self, FaultCode> {
        match index {
            0 => Ok(Self::R0),
            1 => Ok(Self::R1),
            2 => Ok(Self::R2),
            3 => Ok(Self::R3),
            4 => Ok(Self::R4),
            5 => Ok(Self::R5),
            6 => Ok(Self::R6),
            7 => Ok(Self::R7),
            _ => Err(FaultCode::InvalidRegisterIndex),
        }
    }
}

impl TryFrom<usize> for GeneralRegister {
    type Error = FaultCode;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}

/// General register file plus the `Z/C` flag word.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct RegisterFile {
    gpr: [Word; GENERAL_REGISTER_COUNT],
    flags: u16,
}

impl RegisterFile {
    /// Reads a general-purpose register.
    #[must_use]
    pub const fn gpr(&self, reg: GeneralRegister) -> Word {
        self.gpr[reg.index()]
    }

    /// Writes a general-purpose register.
    pub const fn set_gpr(&mut self, reg: GeneralRegister, value: Word) {
        self.gpr[reg.index()] = value;
    }

    /// Swaps two general-purpose registers.
    pub fn swap(&mut self, a: GeneralRegister, b: GeneralRegister) {
        self.gpr.swap(a.index(), b.index());
    }

    /// Reads the `FLAGS` register.
    #[must_use]
    pub const fn flags(&self) -> u16 {
        self.flags
    }

    /// Returns `true` when a specific `FLAGS` bit is set.
    #[must_use]
    pub const fn flag_is_set(&self, flag: u16) -> bool {
        (self.flags & flag) != 0
    }

    /// Sets or clears a specific active `FLAGS` bit.
    pub const fn set_flag(&mut self, flag: u16, enabled: bool) {
        if enabled {
            self.flags |= flag & FLAGS_ACTIVE_MASK;
        } else {
            self.flags &= !(flag & FLAGS_ACTIVE_MASK);
        }
    }
}
