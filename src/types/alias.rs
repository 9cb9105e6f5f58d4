//! Named aliases of other types.
//!
//! An alias answers every capability query its wrapped type answers: the
//! capability group is fixed at construction from the wrapped type's
//! category, and all `as_*` accessors on [`Type`] look through the alias.
//! Strength only changes nominal matching:
//!
//! - weak (`TFoo = Integer`): `is()` matches the alias and the aliased image
//! - strong (`TFoo = type Integer`): `is()` matches the alias image only

use smol_str::SmolStr;

use super::{Type, TypeCategory, TypeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AliasStrength {
    Weak,
    Strong,
}

#[derive(Debug)]
pub struct AliasType {
    image: SmolStr,
    aliased: Type,
    strength: AliasStrength,
    category: TypeCategory,
}

impl AliasType {
    pub(crate) fn new(image: impl Into<SmolStr>, aliased: Type, strength: AliasStrength) -> Result<Self, TypeError> {
        let category = aliased.category();
        if !category.is_aliasable() {
            return Err(TypeError::NotAliasable {
                image: SmolStr::new(aliased.image()),
                category,
            });
        }
        Ok(Self {
            image: image.into(),
            aliased,
            strength,
            category,
        })
    }

    /// Weak alias between two built-in types, e.g. `LongInt = Integer`.
    pub(crate) fn intrinsic(image: &'static str, aliased: Type) -> Self {
        let category = aliased.category();
        debug_assert!(category.is_aliasable(), "intrinsic alias {image} of {aliased}");
        Self {
            image: SmolStr::new_static(image),
            aliased,
            strength: AliasStrength::Weak,
            category,
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn aliased(&self) -> &Type {
        &self.aliased
    }

    pub fn strength(&self) -> AliasStrength {
        self.strength
    }

    pub fn is_weak(&self) -> bool {
        self.strength == AliasStrength::Weak
    }

    /// Capability group inherited from the wrapped type.
    pub fn category(&self) -> TypeCategory {
        self.category
    }
}
