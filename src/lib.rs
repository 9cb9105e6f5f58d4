//! # delphi-semantic
//!
//! Type model and name resolution core for a Delphi language front end.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → parallel analysis of many units sharing one TypeFactory
//!   ↓
//! semantic  → symbol table, binder, name resolver, node type cache
//!   ↓
//! syntax    → declaration tree supplied by the parser layer
//!   ↓
//! types     → Type model, TypeFactory, generic specialization
//!   ↓
//! base      → ids, case-insensitive names, target configuration
//! ```

// ============================================================================
// MODULES (dependency order: base → types → syntax → semantic → project)
// ============================================================================

/// Foundation types: arena ids, names, TargetConfig
pub mod base;

/// Type model: every Delphi type category and the TypeFactory
pub mod types;

/// Declaration tree: the inbound contract with the parser
pub mod syntax;

/// Symbol table, binder and name resolution
pub mod semantic;

/// Parallel analysis of a batch of units
pub mod project;

// Re-export foundation types
pub use base::{
    Architecture, CompilerVersion, ConfigError, DeclId, Name, NameKey, NodeId, OccurrenceId,
    Platform, ScopeId, TargetConfig, Toolchain,
};
pub use project::{Project, UnitOutcome};
pub use semantic::{Binder, ResolveError, ResolvedUnit, SymbolTable};
pub use types::{Type, TypeCategory, TypeError, TypeFactory, TypeKind};
