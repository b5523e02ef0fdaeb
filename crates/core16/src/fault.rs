use thiserror::Error;

/// Fault classes used to group reports by the part of the core that raised them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum FaultClass {
    /// Register operand could not be resolved.
    Register,
    /// Stack guard fired.
    Stack,
    /// Arithmetic guard fired.
    Arithmetic,
    /// Control-flow target rejected.
    Control,
}

/// Stable fault taxonomy for instruction and ALU guards.
///
/// Guarded faults ([`FaultCode::is_guarded`]) describe a condition the core
/// already resolved silently; the reporting call left state exactly as the
/// silent no-op would. The rest reject the request before any state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum FaultCode {
    /// Raw register index outside `0..=7`.
    #[error("register index out of range")]
    InvalidRegisterIndex = 0x01,
    /// `PUSH` with the stack pointer at memory capacity.
    #[error("stack overflow")]
    StackOverflow = 0x02,
    /// `POP` with the stack pointer at zero.
    #[error("stack underflow")]
    StackUnderflow = 0x03,
    /// Divide with a zero divisor.
    #[error("divide by zero")]
    DivideByZero = 0x04,
    /// `JMP` target beyond memory capacity.
    #[error("jump target outside memory")]
    InvalidJumpTarget = 0x05,
}

impl FaultCode {
    /// Converts a fault code to its stable byte value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Converts a stable byte value back into a fault code.
    #[must_use]
    pub const fn from_u8(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::InvalidRegisterIndex),
            0x02 => Some(Self::StackOverflow),
            0x03 => Some(Self::StackUnderflow),
            0x04 => Some(Self::DivideByZero),
            0x05 => Some(Self::InvalidJumpTarget),
            _ => None,
        }
    }

    /// Returns the fault class for this fault code.
    #[must_use]
    pub const fn class(self) -> FaultClass {
        match self {
            Self::InvalidRegisterIndex => FaultClass::Register,
            Self::StackOverflow | Self::StackUnderflow => FaultClass::Stack,
            Self::DivideByZero => FaultClass::Arithmetic,
            Self::InvalidJumpTarget => FaultClass::Control,
        }
    }

    /// Faults that report a silent guard rather than a rejected request.
    #[must_use]
    pub const fn is_guarded(self) -> bool {
        matches!(
            self,
            Self::StackOverflow | Self::StackUnderflow | Self::DivideByZero
        )
    }
}
