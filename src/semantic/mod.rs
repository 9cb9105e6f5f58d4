//! # Semantic Analysis
//!
//! Binds a unit's declaration tree against the type model: builds the
//! per-unit [`SymbolTable`], resolves every name occurrence to the
//! declaration it denotes and assigns a type to every typed node.
//!
//! ## Module Structure
//!
//! ```text
//! binder        → Binder, ResolvedUnit: the declare/complete/bodies passes
//!   ↓
//! node_types    → TypeNode, NodeTypes: typed nodes, computed once
//! resolver      → NameResolver, OverloadSet: occurrence to declaration
//!   ↓
//! symbol_table  → scopes, declarations, occurrences, lookup, System scope
//! ```

pub mod binder;
pub mod error;
pub mod node_types;
pub mod resolver;
pub mod symbol_table;

pub use binder::{Binder, ResolvedUnit};
pub use error::ResolveError;
pub use node_types::{NodeTypes, TypeNode};
pub use resolver::{NameResolver, OverloadSet};
pub use symbol_table::{
    Declaration, DeclarationKind, LookupResult, Occurrence, PropertyDeclaration, Resolution,
    RoutineDeclaration, Scope, ScopeKind, SymbolTable, VariableKind,
};
