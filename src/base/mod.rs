//! Foundation types for the Delphi semantic core.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`ScopeId`], [`DeclId`], [`OccurrenceId`], [`NodeId`] - Arena indices
//! - [`Name`], [`NameKey`] - Case-insensitive identifiers
//! - [`TargetConfig`] - Toolchain / architecture / compiler version triple
//!
//! This module has NO dependencies on other modules of this crate.

mod error;
mod ids;
mod name;
mod target;
mod version;

pub use error::ConfigError;
pub use ids::{DeclId, NodeId, OccurrenceId, ScopeId};
pub use name::{Name, NameKey, names_match};
pub use target::{Architecture, Platform, TargetConfig, Toolchain};
pub use version::CompilerVersion;
