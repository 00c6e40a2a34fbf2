//! Interned identifier names.

use std::fmt;

/// An interned string handle.
///
/// Identifiers and integer-literal text are stored once in the
/// [`StringInterner`](crate::StringInterner); the tree carries only this
/// 4-byte index. Two `Name`s from the same interner are equal exactly when
/// their text is equal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Name(pub(crate) u32);

impl Name {
    /// Raw index into the interner's string table.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    pub(crate) const fn from_index(index: u32) -> Self {
        Name(index)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}
