//! Arena indices.
//!
//! Scopes, declarations and occurrences live in per-unit arenas owned by the
//! [`SymbolTable`](crate::semantic::SymbolTable). Cross references between them
//! are plain indices, never owning pointers.

use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            /// Create an id from an arena index.
            pub fn new(index: usize) -> Self {
                Self(index as u32)
            }

            /// Get the index into the arena.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

arena_id!(
    /// Identifies a scope in a symbol table.
    ScopeId
);

arena_id!(
    /// Identifies a name declaration in a symbol table.
    DeclId
);

arena_id!(
    /// Identifies one use of a name in source.
    OccurrenceId
);

arena_id!(
    /// Identifies a node of the inbound declaration tree.
    ///
    /// Node types are cached by this id for the lifetime of the unit.
    NodeId
);
