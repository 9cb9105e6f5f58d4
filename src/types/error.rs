//! Internal invariant violations of the type table.
//!
//! None of these are user errors: an unresolved name or an undeterminable
//! type is modelled with the `Unresolved` / `Unknown` sentinels instead.

use smol_str::SmolStr;
use thiserror::Error;

use super::TypeCategory;

/// A defect in the type table itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// An integer literal lies outside every registered integer type.
    #[error("No integer type can hold literal value {0}")]
    NoIntegerForLiteral(i128),

    /// The wrapped type has no capability group an alias can represent.
    #[error("Cannot alias {image} ({category:?})")]
    NotAliasable {
        image: SmolStr,
        category: TypeCategory,
    },

    /// A forward declared type was completed a second time.
    #[error("Forward type {0} was already completed")]
    AlreadyCompleted(SmolStr),

    /// A completion targeted a type of the wrong category.
    #[error("Expected {expected} type, found {image}")]
    UnexpectedType {
        expected: &'static str,
        image: SmolStr,
    },

    /// The name is not one of the intrinsic types.
    #[error("Unknown intrinsic type: {0}")]
    UnknownIntrinsic(String),
}
