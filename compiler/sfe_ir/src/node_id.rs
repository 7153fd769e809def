use std::fmt;

/// Handle to a node in an [`Ast`](crate::Ast).
///
/// Only meaningful for the `Ast` that allocated it, and only until that
/// `Ast` is reset.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Marks an absent optional child, such as a parameter with no default.
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline]
    pub(crate) const fn new(slot: u32) -> Self {
        NodeId(slot)
    }

    #[inline]
    pub(crate) const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != Self::INVALID.0
    }

    #[inline]
    pub const fn to_option(self) -> Option<NodeId> {
        if self.is_valid() {
            Some(self)
        } else {
            None
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_option() {
            Some(id) => write!(f, "n{}", id.0),
            None => f.write_str("n-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_is_default_and_absent() {
        assert_eq!(NodeId::default(), NodeId::INVALID);
        assert_eq!(NodeId::INVALID.to_option(), None);
        assert_eq!(format!("{:?}", NodeId::INVALID), "n-");
    }

    #[test]
    fn test_valid_round_trips_through_option() {
        let id = NodeId::new(42);
        assert_eq!(id.to_option(), Some(id));
        assert_eq!(format!("{id:?}"), "n42");
    }
}
