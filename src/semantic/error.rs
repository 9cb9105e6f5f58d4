//! Hard failures of binding a unit.
//!
//! Unresolved names and undeterminable types are not errors; they surface as
//! occurrences without a declaration and the `Unknown` type.

use thiserror::Error;

use crate::types::TypeError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The type table rejected an operation.
    #[error("Type error: {0}")]
    Type(#[from] TypeError),

    /// Two units of one project share a name.
    #[error("Duplicate unit: {0}")]
    DuplicateUnit(String),

    /// Units that (transitively) use each other.
    #[error("Circular uses clause through unit {0}")]
    CircularUses(String),
}
