//! Public host-facing configuration and observation types.

use std::fmt;

use crate::{RegisterFile, StackMemory};

/// Default memory capacity of a core, in words.
pub const DEFAULT_MEMORY_WORDS: usize = 1024;

/// Default number of cores spawned by a harness built from configuration.
pub const DEFAULT_CORE_COUNT: usize = 2;

/// Immutable configuration for a core instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CoreConfig {
    /// Memory capacity in 16-bit words; also the stack pointer ceiling.
    pub memory_words: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            memory_words: DEFAULT_MEMORY_WORDS,
        }
    }
}

/// Configuration for a multi-core harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct HarnessConfig {
    /// Number of cores to spawn.
    pub cores: usize,
    /// Configuration applied to every spawned core.
    pub core: CoreConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            cores: DEFAULT_CORE_COUNT,
            core: CoreConfig::default(),
        }
    }
}

/// Diagnostic notices emitted by stub instructions and the harness.
///
/// Notices are a side channel: they are logged at `info` and recorded in the
/// harness transcript, but no instruction depends on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Notice {
    /// `CLI` executed.
    InterruptFlagCleared,
    /// `STI` executed.
    InterruptFlagSet,
    /// `SFENCE` executed.
    StoreFence,
    /// `LFENCE` executed.
    LoadFence,
    /// `MFENCE` executed.
    MemoryFence,
    /// `LOCK` executed.
    BusLocked,
    /// A harness worker took the bus and started its script.
    CoreStarted {
        /// One-based core identifier.
        core_id: usize,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InterruptFlagCleared => f.write_str("Interrupt flag cleared."),
            Self::InterruptFlagSet => f.write_str("Interrupt flag set."),
            Self::StoreFence => f.write_str("Store fence applied."),
            Self::LoadFence => f.write_str("Load fence applied."),
            Self::MemoryFence => f.write_str("Memory fence applied."),
            Self::BusLocked => f.write_str("Bus lock asserted."),
            Self::CoreStarted { core_id } => write!(f, "Executing on core {core_id}"),
        }
    }
}

/// One transcript line: a notice attributed to the core that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct TranscriptEntry {
    /// One-based core identifier.
    pub core_id: usize,
    /// Recorded notice.
    pub notice: Notice,
}

/// Value copy of a core's architectural state.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CoreSnapshot {
    /// Register file and flags.
    pub registers: RegisterFile,
    /// Memory and stack pointer.
    pub stack: StackMemory,
}
