//! Identifiers.
//!
//! Delphi identifiers are case-insensitive. A [`Name`] keeps the spelling of
//! the declaration for display while [`NameKey`] is the folded form used for
//! lookups.

use smol_str::SmolStr;

/// An identifier as spelled in source.
pub type Name = SmolStr;

/// Case-folded identifier used as a lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameKey(SmolStr);

impl NameKey {
    pub fn new(name: &str) -> Self {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            Self(SmolStr::new(name.to_ascii_lowercase()))
        } else {
            Self(SmolStr::new(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NameKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&SmolStr> for NameKey {
    fn from(name: &SmolStr) -> Self {
        Self::new(name)
    }
}

/// Compare two identifiers using Delphi's case rules.
pub fn names_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
