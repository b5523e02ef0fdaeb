//! Single-bit boolean primitives used to build the adder network.
//!
//! `xand` and `nxand` are the core's own combinators (`a & !b` and its
//! complement), not the textbook "XAND".

/// `a AND b`.
#[must_use]
pub const fn and(a: bool, b: bool) -> bool {
    a & b
}

/// `a OR b`.
#[must_use]
pub const fn or(a: bool, b: bool) -> bool {
    a | b
}

/// `a XOR b`.
#[must_use]
pub const fn xor(a: bool, b: bool) -> bool {
    a ^ b
}

/// `NOT a`.
#[must_use]
pub const fn not(a: bool) -> bool {
    !a
}

/// `NOT (a AND b)`.
#[must_use]
pub const fn nand(a: bool, b: bool) -> bool {
    !(a & b)
}

/// `NOT (a OR b)`.
#[must_use]
pub const fn nor(a: bool, b: bool) -> bool {
    !(a | b)
}

/// `NOT (a XOR b)`.
#[must_use]
pub const fn xnor(a: bool, b: bool) -> bool {
    !(a ^ b)
}

/// Alias of [`xnor`].
#[must_use]
pub const fn nxor(a: bool, b: bool) -> bool {
    xnor(a, b)
}

/// `a AND NOT b`.
#[must_use]
pub const fn xand(a: bool, b: bool) -> bool {
    a & !b
}

/// `NOT (a AND NOT b)`.
#[must_use]
pub const fn nxand(a: bool, b: bool) -> bool {
    !xand(a, b)
}

/// Alias of [`not`].
#[must_use]
pub const fn xnot(a: bool) -> bool {
    !a
}
