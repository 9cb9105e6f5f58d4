//! Per-unit arena of scopes, declarations and name occurrences.
mod declaration;
mod lookup;
mod occurrence;
mod scope;
mod system;
mod table;

pub use declaration::{
    Declaration, DeclarationKind, PropertyDeclaration, RoutineDeclaration, VariableKind,
};
pub use lookup::LookupResult;
pub use occurrence::{Occurrence, Resolution};
pub use scope::{Scope, ScopeKind};
pub use table::SymbolTable;

pub(crate) use system::{IINTERFACE, TCLASS_HELPER_BASE, TOBJECT};

#[cfg(test)]
mod tests;
