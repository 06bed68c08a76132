//! Sealed marker for `Transport` implementations.

pub(crate) mod private {
    /// Cannot be implemented outside this crate.
    pub trait Sealed {}
}
