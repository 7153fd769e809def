use std::fmt;

/// Handle to a string stored in a [`StringInterner`](crate::StringInterner).
///
/// Comparing names compares text, as long as both came from the same
/// interner.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// `""`, interned up front by every interner.
    pub const EMPTY: Name = Name(0);

    #[inline]
    pub(crate) const fn new(slot: u32) -> Self {
        Name(slot)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name#{}", self.0)
    }
}
