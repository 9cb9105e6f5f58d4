//! Scalar types: booleans, integers, reals, chars, strings, enums, subranges
//! and variants.

use smol_str::SmolStr;

use super::Type;
use crate::base::{Name, ScopeId};

/// `Boolean`, `ByteBool`, `WordBool`, `LongBool`.
#[derive(Debug)]
pub struct BooleanType {
    image: SmolStr,
    size: u32,
}

impl BooleanType {
    pub(crate) fn new(image: impl Into<SmolStr>, size: u32) -> Self {
        Self {
            image: image.into(),
            size,
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}

/// A whole-number type with an inclusive value range.
#[derive(Debug)]
pub struct IntegerType {
    image: SmolStr,
    size: u32,
    min: i128,
    max: i128,
}

impl IntegerType {
    pub(crate) fn new(image: impl Into<SmolStr>, size: u32, min: i128, max: i128) -> Self {
        Self {
            image: image.into(),
            size,
            min,
            max,
        }
    }

    /// Range of a signed integer of `size` bytes.
    pub(crate) fn signed(image: impl Into<SmolStr>, size: u32) -> Self {
        let bits = size * 8;
        Self::new(image, size, -(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
    }

    /// Range of an unsigned integer of `size` bytes.
    pub(crate) fn unsigned(image: impl Into<SmolStr>, size: u32) -> Self {
        Self::new(image, size, 0, (1i128 << (size * 8)) - 1)
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn min(&self) -> i128 {
        self.min
    }

    pub fn max(&self) -> i128 {
        self.max
    }

    pub fn is_signed(&self) -> bool {
        self.min < 0
    }

    pub fn contains(&self, value: i128) -> bool {
        self.min <= value && value <= self.max
    }
}

/// A floating point or fixed point type.
#[derive(Debug)]
pub struct RealType {
    image: SmolStr,
    size: u32,
}

impl RealType {
    pub(crate) fn new(image: impl Into<SmolStr>, size: u32) -> Self {
        Self {
            image: image.into(),
            size,
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}

/// `AnsiChar` (one byte) or `WideChar` (two bytes).
#[derive(Debug)]
pub struct CharType {
    image: SmolStr,
    size: u32,
}

impl CharType {
    pub(crate) fn new(image: impl Into<SmolStr>, size: u32) -> Self {
        Self {
            image: image.into(),
            size,
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn is_wide(&self) -> bool {
        self.size > 1
    }

    pub fn max_ordinal(&self) -> i128 {
        (1i128 << (self.size * 8)) - 1
    }
}

/// Flavour of a string type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringKind {
    Ansi,
    Unicode,
    Wide,
    Short,
}

impl StringKind {
    pub fn is_narrow(self) -> bool {
        matches!(self, StringKind::Ansi | StringKind::Short)
    }
}

#[derive(Debug)]
pub struct StringType {
    image: SmolStr,
    size: u32,
    kind: StringKind,
    char_type: Type,
}

impl StringType {
    pub(crate) fn new(image: impl Into<SmolStr>, size: u32, kind: StringKind, char_type: Type) -> Self {
        Self {
            image: image.into(),
            size,
            kind,
            char_type,
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn kind(&self) -> StringKind {
        self.kind
    }

    /// Element type produced by indexing the string.
    pub fn char_type(&self) -> &Type {
        &self.char_type
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    Normal,
    Ole,
}

#[derive(Debug)]
pub struct VariantType {
    image: SmolStr,
    size: u32,
    kind: VariantKind,
}

impl VariantType {
    pub(crate) fn new(image: impl Into<SmolStr>, size: u32, kind: VariantKind) -> Self {
        Self {
            image: image.into(),
            size,
            kind,
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn kind(&self) -> VariantKind {
        self.kind
    }
}

/// An enumerated type. Elements live in the enum's own scope as well as the
/// scope enclosing the declaration.
#[derive(Debug)]
pub struct EnumType {
    image: SmolStr,
    size: u32,
    elements: Vec<(Name, i128)>,
    scope: Option<ScopeId>,
}

impl EnumType {
    pub(crate) fn new(image: impl Into<SmolStr>, elements: Vec<(Name, i128)>, scope: Option<ScopeId>) -> Self {
        let size = Self::size_for(&elements);
        Self {
            image: image.into(),
            size,
            elements,
            scope,
        }
    }

    /// Enums occupy the smallest of 1, 2 or 4 bytes that holds every ordinal.
    fn size_for(elements: &[(Name, i128)]) -> u32 {
        let low = elements.iter().map(|(_, v)| *v).min().unwrap_or(0);
        let high = elements.iter().map(|(_, v)| *v).max().unwrap_or(0);
        if (low >= 0 && high <= 0xFF) || (low >= -0x80 && high <= 0x7F) {
            1
        } else if (low >= 0 && high <= 0xFFFF) || (low >= -0x8000 && high <= 0x7FFF) {
            2
        } else {
            4
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Element names with their ordinal values, in declaration order.
    pub fn elements(&self) -> &[(Name, i128)] {
        &self.elements
    }

    /// Scope declaring the elements, used for `TEnum.Element` lookups.
    pub fn scope(&self) -> Option<ScopeId> {
        self.scope
    }

    pub fn ordinal_range(&self) -> Option<(i128, i128)> {
        let low = self.elements.iter().map(|(_, v)| *v).min()?;
        let high = self.elements.iter().map(|(_, v)| *v).max()?;
        Some((low, high))
    }
}

/// An integer type restricted to `[min, max]`, backed by a host integer type.
#[derive(Debug)]
pub struct SubrangeType {
    image: SmolStr,
    host: Type,
    min: i128,
    max: i128,
}

impl SubrangeType {
    pub(crate) fn new(image: impl Into<SmolStr>, host: Type, min: i128, max: i128) -> Self {
        Self {
            image: image.into(),
            host,
            min,
            max,
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn size(&self) -> u32 {
        self.host.size()
    }

    pub fn host(&self) -> &Type {
        &self.host
    }

    pub fn min(&self) -> i128 {
        self.min
    }

    pub fn max(&self) -> i128 {
        self.max
    }

    pub fn is_signed(&self) -> bool {
        self.min < 0
    }
}
