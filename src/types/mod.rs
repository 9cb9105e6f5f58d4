//! # Type Model
//!
//! Every Delphi type category as one tagged union, [`TypeKind`], behind a
//! shared handle, [`Type`]. Types are produced exclusively by the
//! [`TypeFactory`], which is parameterized by a [`TargetConfig`] and may be
//! shared across threads.
//!
//! ## Module Structure
//!
//! ```text
//! factory     → TypeFactory: intrinsics, literals, subranges, composites
//!   ↓
//! specialize  → SpecializationContext, generic substitution
//!   ↓
//! structs     → StructType: parents, super types, implicit conversions
//! alias       → AliasType: weak/strong, capability tagged
//! ...         → one module per remaining category
//!   ↓
//! ty          → Type handle, TypeKind, TypeCategory, predicates
//! ```
//!
//! [`TargetConfig`]: crate::base::TargetConfig

mod alias;
mod collection;
mod error;
mod factory;
mod intrinsic;
mod ordinal;
mod pointer;
mod procedural;
mod sizes;
mod specialize;
mod structs;
mod ty;

pub use alias::{AliasStrength, AliasType};
pub use collection::{ArrayConstructorType, ArrayKind, ArrayType, SetType};
pub use error::TypeError;
pub use factory::{StructDefinition, TypeFactory};
pub use intrinsic::IntrinsicType;
pub use ordinal::{
    BooleanType, CharType, EnumType, IntegerType, RealType, StringKind, StringType,
    SubrangeType, VariantKind, VariantType,
};
pub use pointer::{ClassReferenceType, FileType, PointerType, TypeParameterType, TypeType};
pub use procedural::{Parameter, ParameterKind, ProceduralKind, ProceduralType};
pub use sizes::TypeSizes;
pub use specialize::SpecializationContext;
pub use structs::{DefaultProperty, ImagePart, ImplicitConversions, StructKind, StructType};
pub use ty::{Type, TypeCategory, TypeKind};

#[cfg(test)]
mod tests;
