//! Typed slices into the [`Ast`](crate::Ast) side tables.
//!
//! A node never owns a `Vec`. Lists of children, dict entries, chain links
//! and the like are appended to one shared table per kind, and the node
//! keeps a `start`/`len` pair into it. Keeping one range type per table
//! stops a dict range from being used to index the parameter table.

/// Longest list a single range can describe.
pub const MAX_LIST_LEN: usize = u16::MAX as usize;

macro_rules! side_table_ranges {
    ($($(#[$doc:meta])* $name:ident;)*) => { $(
        $(#[$doc])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        pub struct $name {
            pub start: u32,
            pub len: u16,
        }

        impl $name {
            #[inline]
            pub(crate) const fn new(start: u32, len: u16) -> Self {
                $name { start, len }
            }

            #[inline]
            pub const fn len(self) -> usize {
                self.len as usize
            }

            #[inline]
            pub const fn is_empty(self) -> bool {
                self.len == 0
            }

            #[inline]
            pub(crate) fn to_range(self) -> ::std::ops::Range<usize> {
                let start = self.start as usize;
                start..start + self.len()
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let range = self.to_range();
                write!(f, "{}[{}..{}]", stringify!($name), range.start, range.end)
            }
        }
    )* };
}

side_table_ranges! {
    /// Child expressions.
    NodeRange;
    /// `key: value` entries of a dict literal or class body.
    DictRange;
    /// `.key`, `[index]` and `(args)` links after a chain head.
    ChainRange;
    /// Base class names in an `extends` list.
    NameRange;
    /// Class parameters.
    ParamRange;
    /// `name = value` arguments of an instantiation.
    NamedArgRange;
    /// A run of prefix operators, outermost first.
    UnaryOpRange;
}
