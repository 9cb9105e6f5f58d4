//! The [`Type`] handle and the [`TypeKind`] sum type.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use smol_str::SmolStr;

use super::alias::AliasType;
use super::collection::{ArrayConstructorType, ArrayType, SetType};
use super::intrinsic::IntrinsicType;
use super::ordinal::{
    BooleanType, CharType, EnumType, IntegerType, RealType, StringKind, StringType, SubrangeType,
    VariantType,
};
use super::pointer::{ClassReferenceType, FileType, PointerType, TypeParameterType, TypeType};
use super::procedural::{ProceduralKind, ProceduralType};
use super::structs::{StructKind, StructType};
use crate::base::names_match;

/// Image reported by the `Unknown` sentinel.
pub(crate) const UNKNOWN_IMAGE: &str = "<unknown>";

// ============================================================================
// TYPE KIND
// ============================================================================

/// Every Delphi type category.
#[derive(Debug)]
pub enum TypeKind {
    Boolean(BooleanType),
    Integer(IntegerType),
    Real(RealType),
    Char(CharType),
    String(StringType),
    Pointer(PointerType),
    Array(ArrayType),
    Set(SetType),
    ArrayConstructor(ArrayConstructorType),
    Struct(StructType),
    Procedural(ProceduralType),
    File(FileType),
    Enum(EnumType),
    Subrange(SubrangeType),
    ClassReference(ClassReferenceType),
    TypeType(TypeType),
    Alias(AliasType),
    TypeParameter(TypeParameterType),
    Variant(VariantType),
    /// Untyped parameters (`const X`) and the target of untyped pointers.
    Untyped,
    /// A name that did not resolve to a type.
    Unresolved(SmolStr),
    /// The type could not be determined.
    Unknown,
    /// The "return type" of procedures.
    Void,
}

/// One tag per [`TypeKind`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Boolean,
    Integer,
    Real,
    Char,
    String,
    Pointer,
    Array,
    Set,
    ArrayConstructor,
    Struct,
    Procedural,
    File,
    Enum,
    Subrange,
    ClassReference,
    TypeType,
    Alias,
    TypeParameter,
    Variant,
    Untyped,
    Unresolved,
    Unknown,
    Void,
}

impl TypeCategory {
    /// Categories an alias may wrap.
    pub fn is_aliasable(self) -> bool {
        !matches!(
            self,
            TypeCategory::Alias
                | TypeCategory::ArrayConstructor
                | TypeCategory::Untyped
                | TypeCategory::Void
        )
    }
}

// ============================================================================
// TYPE HANDLE
// ============================================================================

/// A shared, cheap-to-clone handle to a type.
///
/// Equality and hashing are by instance identity: two handles are equal when
/// they point at the same type. Structural compatibility is [`Type::is_type`].
#[derive(Clone)]
pub struct Type(Arc<TypeKind>);

impl Type {
    pub(crate) fn new(kind: TypeKind) -> Self {
        Self(Arc::new(kind))
    }

    pub fn kind(&self) -> &TypeKind {
        &self.0
    }

    /// True when both handles refer to the same type instance.
    pub fn ptr_eq(&self, other: &Type) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The category of this type itself (aliases report `Alias`).
    pub fn own_category(&self) -> TypeCategory {
        match self.kind() {
            TypeKind::Boolean(_) => TypeCategory::Boolean,
            TypeKind::Integer(_) => TypeCategory::Integer,
            TypeKind::Real(_) => TypeCategory::Real,
            TypeKind::Char(_) => TypeCategory::Char,
            TypeKind::String(_) => TypeCategory::String,
            TypeKind::Pointer(_) => TypeCategory::Pointer,
            TypeKind::Array(_) => TypeCategory::Array,
            TypeKind::Set(_) => TypeCategory::Set,
            TypeKind::ArrayConstructor(_) => TypeCategory::ArrayConstructor,
            TypeKind::Struct(_) => TypeCategory::Struct,
            TypeKind::Procedural(_) => TypeCategory::Procedural,
            TypeKind::File(_) => TypeCategory::File,
            TypeKind::Enum(_) => TypeCategory::Enum,
            TypeKind::Subrange(_) => TypeCategory::Subrange,
            TypeKind::ClassReference(_) => TypeCategory::ClassReference,
            TypeKind::TypeType(_) => TypeCategory::TypeType,
            TypeKind::Alias(_) => TypeCategory::Alias,
            TypeKind::TypeParameter(_) => TypeCategory::TypeParameter,
            TypeKind::Variant(_) => TypeCategory::Variant,
            TypeKind::Untyped => TypeCategory::Untyped,
            TypeKind::Unresolved(_) => TypeCategory::Unresolved,
            TypeKind::Unknown => TypeCategory::Unknown,
            TypeKind::Void => TypeCategory::Void,
        }
    }

    /// The capability category, seen through aliases of either strength.
    pub fn category(&self) -> TypeCategory {
        match self.kind() {
            TypeKind::Alias(alias) => alias.category(),
            _ => self.own_category(),
        }
    }

    /// This type with every alias layer removed.
    pub fn actual(&self) -> &Type {
        let mut current = self;
        while let TypeKind::Alias(alias) = current.kind() {
            current = alias.aliased();
        }
        current
    }

    /// Display image. Aliases report their own name.
    pub fn image(&self) -> &str {
        match self.kind() {
            TypeKind::Boolean(t) => t.image(),
            TypeKind::Integer(t) => t.image(),
            TypeKind::Real(t) => t.image(),
            TypeKind::Char(t) => t.image(),
            TypeKind::String(t) => t.image(),
            TypeKind::Pointer(t) => t.image(),
            TypeKind::Array(t) => t.image(),
            TypeKind::Set(t) => t.image(),
            TypeKind::ArrayConstructor(t) => t.image(),
            TypeKind::Struct(t) => t.image(),
            TypeKind::Procedural(t) => t.image(),
            TypeKind::File(t) => t.image(),
            TypeKind::Enum(t) => t.image(),
            TypeKind::Subrange(t) => t.image(),
            TypeKind::ClassReference(t) => t.image(),
            TypeKind::TypeType(t) => t.image(),
            TypeKind::Alias(t) => t.image(),
            TypeKind::TypeParameter(t) => t.image(),
            TypeKind::Variant(t) => t.image(),
            TypeKind::Untyped => "<untyped>",
            TypeKind::Unresolved(image) => image.as_str(),
            TypeKind::Unknown => UNKNOWN_IMAGE,
            TypeKind::Void => "<void>",
        }
    }

    /// Size in bytes on the factory's target.
    pub fn size(&self) -> u32 {
        match self.kind() {
            TypeKind::Boolean(t) => t.size(),
            TypeKind::Integer(t) => t.size(),
            TypeKind::Real(t) => t.size(),
            TypeKind::Char(t) => t.size(),
            TypeKind::String(t) => t.size(),
            TypeKind::Pointer(t) => t.size(),
            TypeKind::Array(t) => t.size(),
            TypeKind::Set(t) => t.size(),
            TypeKind::ArrayConstructor(_) => 0,
            TypeKind::Struct(t) => t.size(),
            TypeKind::Procedural(t) => t.size(),
            TypeKind::File(t) => t.size(),
            TypeKind::Enum(t) => t.size(),
            TypeKind::Subrange(t) => t.size(),
            TypeKind::ClassReference(t) => t.size(),
            TypeKind::TypeType(t) => t.size(),
            TypeKind::Alias(t) => t.aliased().size(),
            TypeKind::Variant(t) => t.size(),
            TypeKind::TypeParameter(_)
            | TypeKind::Untyped
            | TypeKind::Unresolved(_)
            | TypeKind::Unknown
            | TypeKind::Void => 0,
        }
    }

    // ========================================================================
    // COMPATIBILITY
    // ========================================================================

    /// Nominal match against a type image.
    ///
    /// Weak aliases also match their aliased type; strong aliases only match
    /// their own image. `Unknown` matches nothing.
    pub fn is(&self, image: &str) -> bool {
        match self.kind() {
            TypeKind::Unknown => false,
            TypeKind::Alias(alias) if alias.is_weak() => {
                names_match(alias.image(), image) || alias.aliased().is(image)
            }
            _ => names_match(self.image(), image),
        }
    }

    /// Nominal match against another type.
    pub fn is_type(&self, other: &Type) -> bool {
        if self.ptr_eq(other) {
            return !self.is_unknown();
        }
        if let TypeKind::Alias(alias) = other.kind() {
            if alias.is_weak() && self.is_type(alias.aliased()) {
                return true;
            }
        }
        self.is(other.image())
    }

    /// Nominal match against an intrinsic type.
    pub fn is_intrinsic(&self, intrinsic: IntrinsicType) -> bool {
        self.is(intrinsic.image())
    }

    /// True if `image` appears in the transitive closure of this struct's parents.
    pub fn is_sub_type_of(&self, image: &str) -> bool {
        self.as_struct()
            .is_some_and(|structure| structure.is_sub_type_of(image))
    }

    /// Explicit or language-mandated ancestor of a struct type.
    pub fn super_type(&self) -> Option<Type> {
        self.as_struct().and_then(StructType::super_type)
    }

    // ========================================================================
    // CAPABILITY ACCESS (through aliases)
    // ========================================================================

    pub fn as_integer(&self) -> Option<&IntegerType> {
        match self.actual().kind() {
            TypeKind::Integer(t) => Some(t),
            TypeKind::Subrange(t) => t.host().as_integer(),
            _ => None,
        }
    }

    pub fn as_subrange(&self) -> Option<&SubrangeType> {
        match self.actual().kind() {
            TypeKind::Subrange(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&StringType> {
        match self.actual().kind() {
            TypeKind::String(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_pointer(&self) -> Option<&PointerType> {
        match self.actual().kind() {
            TypeKind::Pointer(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayType> {
        match self.actual().kind() {
            TypeKind::Array(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&SetType> {
        match self.actual().kind() {
            TypeKind::Set(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_array_constructor(&self) -> Option<&ArrayConstructorType> {
        match self.actual().kind() {
            TypeKind::ArrayConstructor(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructType> {
        match self.actual().kind() {
            TypeKind::Struct(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_procedural(&self) -> Option<&ProceduralType> {
        match self.actual().kind() {
            TypeKind::Procedural(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileType> {
        match self.actual().kind() {
            TypeKind::File(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        match self.actual().kind() {
            TypeKind::Enum(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_class_reference(&self) -> Option<&ClassReferenceType> {
        match self.actual().kind() {
            TypeKind::ClassReference(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_type_type(&self) -> Option<&TypeType> {
        match self.actual().kind() {
            TypeKind::TypeType(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_type_parameter(&self) -> Option<&TypeParameterType> {
        match self.actual().kind() {
            TypeKind::TypeParameter(t) => Some(t),
            _ => None,
        }
    }

    /// The alias layer of this type itself, if any.
    pub fn as_alias(&self) -> Option<&AliasType> {
        match self.kind() {
            TypeKind::Alias(t) => Some(t),
            _ => None,
        }
    }

    /// Element type of arrays, sets and pointers.
    pub fn element_type(&self) -> Option<Type> {
        match self.actual().kind() {
            TypeKind::Array(t) => Some(t.element().clone()),
            TypeKind::Set(t) => Some(t.element().clone()),
            TypeKind::Pointer(t) => t.dereferenced().cloned(),
            TypeKind::File(t) => t.element().cloned(),
            _ => None,
        }
    }

    // ========================================================================
    // PREDICATES
    // ========================================================================

    pub fn is_boolean(&self) -> bool {
        self.category() == TypeCategory::Boolean
    }

    /// Integers and integer subranges.
    pub fn is_integer(&self) -> bool {
        matches!(
            self.category(),
            TypeCategory::Integer | TypeCategory::Subrange
        )
    }

    pub fn is_subrange(&self) -> bool {
        self.category() == TypeCategory::Subrange
    }

    pub fn is_real(&self) -> bool {
        self.category() == TypeCategory::Real
    }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || self.is_real()
    }

    pub fn is_signed(&self) -> bool {
        match self.actual().kind() {
            TypeKind::Integer(t) => t.is_signed(),
            TypeKind::Subrange(t) => t.is_signed(),
            TypeKind::Real(_) => true,
            _ => false,
        }
    }

    pub fn is_char(&self) -> bool {
        self.category() == TypeCategory::Char
    }

    pub fn is_ordinal(&self) -> bool {
        matches!(
            self.category(),
            TypeCategory::Boolean
                | TypeCategory::Integer
                | TypeCategory::Char
                | TypeCategory::Enum
                | TypeCategory::Subrange
        )
    }

    pub fn is_string(&self) -> bool {
        self.category() == TypeCategory::String
    }

    fn has_string_kind(&self, kind: StringKind) -> bool {
        self.as_string().is_some_and(|s| s.kind() == kind)
    }

    pub fn is_ansi_string(&self) -> bool {
        self.has_string_kind(StringKind::Ansi)
    }

    pub fn is_unicode_string(&self) -> bool {
        self.has_string_kind(StringKind::Unicode)
    }

    pub fn is_wide_string(&self) -> bool {
        self.has_string_kind(StringKind::Wide)
    }

    pub fn is_short_string(&self) -> bool {
        self.has_string_kind(StringKind::Short)
    }

    /// Strings made of single-byte characters.
    pub fn is_narrow_string(&self) -> bool {
        self.as_string().is_some_and(|s| s.kind().is_narrow())
    }

    pub fn is_pointer(&self) -> bool {
        self.category() == TypeCategory::Pointer
    }

    pub fn is_nil_pointer(&self) -> bool {
        self.as_pointer().is_some_and(PointerType::is_nil)
    }

    pub fn is_untyped_pointer(&self) -> bool {
        self.as_pointer().is_some_and(PointerType::is_untyped)
    }

    pub fn is_array(&self) -> bool {
        self.category() == TypeCategory::Array
    }

    pub fn is_dynamic_array(&self) -> bool {
        self.as_array().is_some_and(ArrayType::is_dynamic)
    }

    pub fn is_fixed_array(&self) -> bool {
        self.as_array().is_some_and(ArrayType::is_fixed)
    }

    pub fn is_open_array(&self) -> bool {
        self.as_array().is_some_and(ArrayType::is_open)
    }

    pub fn is_array_of_const(&self) -> bool {
        self.as_array().is_some_and(ArrayType::is_array_of_const)
    }

    pub fn is_set(&self) -> bool {
        self.category() == TypeCategory::Set
    }

    pub fn is_array_constructor(&self) -> bool {
        self.category() == TypeCategory::ArrayConstructor
    }

    pub fn is_struct(&self) -> bool {
        self.category() == TypeCategory::Struct
    }

    fn has_struct_kind(&self, kind: StructKind) -> bool {
        self.as_struct().and_then(StructType::kind) == Some(kind)
    }

    pub fn is_class(&self) -> bool {
        self.has_struct_kind(StructKind::Class)
    }

    pub fn is_interface(&self) -> bool {
        self.has_struct_kind(StructKind::Interface)
    }

    pub fn is_record(&self) -> bool {
        self.has_struct_kind(StructKind::Record)
    }

    pub fn is_helper(&self) -> bool {
        self.as_struct()
            .and_then(StructType::kind)
            .is_some_and(StructKind::is_helper)
    }

    pub fn is_procedural(&self) -> bool {
        self.category() == TypeCategory::Procedural
    }

    /// Procedural types declared `of object`.
    pub fn is_method(&self) -> bool {
        self.as_procedural()
            .is_some_and(|p| p.kind() == ProceduralKind::Method)
    }

    pub fn is_file(&self) -> bool {
        self.category() == TypeCategory::File
    }

    pub fn is_text_file(&self) -> bool {
        self.as_file().is_some_and(FileType::is_text)
    }

    pub fn is_enum(&self) -> bool {
        self.category() == TypeCategory::Enum
    }

    pub fn is_class_reference(&self) -> bool {
        self.category() == TypeCategory::ClassReference
    }

    pub fn is_type_type(&self) -> bool {
        self.category() == TypeCategory::TypeType
    }

    pub fn is_type_parameter(&self) -> bool {
        self.category() == TypeCategory::TypeParameter
    }

    pub fn is_variant(&self) -> bool {
        self.category() == TypeCategory::Variant
    }

    pub fn is_alias(&self) -> bool {
        self.own_category() == TypeCategory::Alias
    }

    pub fn is_weak_alias(&self) -> bool {
        self.as_alias().is_some_and(AliasType::is_weak)
    }

    pub fn is_strong_alias(&self) -> bool {
        self.as_alias().is_some_and(|alias| !alias.is_weak())
    }

    pub fn is_untyped(&self) -> bool {
        self.category() == TypeCategory::Untyped
    }

    pub fn is_unresolved(&self) -> bool {
        self.category() == TypeCategory::Unresolved
    }

    pub fn is_unknown(&self) -> bool {
        self.category() == TypeCategory::Unknown
    }

    pub fn is_void(&self) -> bool {
        self.category() == TypeCategory::Void
    }

    // ========================================================================
    // ORDINALS
    // ========================================================================

    /// Lowest and highest ordinal values of an ordinal type.
    pub fn ordinal_range(&self) -> Option<(i128, i128)> {
        match self.actual().kind() {
            TypeKind::Boolean(_) => Some((0, 1)),
            TypeKind::Integer(t) => Some((t.min(), t.max())),
            TypeKind::Subrange(t) => Some((t.min(), t.max())),
            TypeKind::Char(t) => Some((0, t.max_ordinal())),
            TypeKind::Enum(t) => t.ordinal_range(),
            _ => None,
        }
    }

    /// Number of distinct values of an ordinal type.
    pub fn ordinal_count(&self) -> Option<u128> {
        self.ordinal_range()
            .map(|(low, high)| (high - low).unsigned_abs() + 1)
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Type {}

impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self.own_category(), self.image())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.image())
    }
}
