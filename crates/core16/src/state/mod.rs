//! Architectural core state model primitives.

/// Register file types and storage model.
pub mod registers;
/// Word memory and stack pointer.
pub mod stack;

pub use registers::{GeneralRegister, RegisterFile, GENERAL_REGISTER_COUNT};
pub use stack::StackMemory;
