//! The type factory: sole producer of [`Type`] instances.
//!
//! A factory is built for one [`TargetConfig`]. Intrinsic types are created
//! once at construction with every platform and version conditional already
//! applied; composite constructors derive their sizes from the same
//! [`TypeSizes`]. The factory is `Send + Sync` and is shared behind an `Arc`
//! by every unit analysed for the same target.

use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;
use smol_str::{SmolStr, format_smolstr};
use tracing::debug;

use super::alias::{AliasStrength, AliasType};
use super::collection::{ArrayConstructorType, ArrayKind, ArrayType, SetType};
use super::ordinal::{
    BooleanType, CharType, EnumType, IntegerType, RealType, StringKind, StringType,
    SubrangeType, VariantKind, VariantType,
};
use super::pointer::{ClassReferenceType, FileType, PointerType, TypeParameterType, TypeType};
use super::procedural::{Parameter, ProceduralKind, ProceduralType};
use super::sizes::TypeSizes;
use super::specialize::SpecializationContext;
use super::structs::{ImagePart, StructKind, StructType};
use super::{IntrinsicType, Type, TypeError, TypeKind};
use crate::base::{CompilerVersion, Name, Platform, ScopeId, TargetConfig};

/// Everything a forward struct needs to become complete.
#[derive(Debug, Clone)]
pub struct StructDefinition {
    pub kind: StructKind,
    pub scope: ScopeId,
    pub parents: Vec<Type>,
    pub extended_type: Option<Type>,
}

impl StructDefinition {
    pub fn new(kind: StructKind, scope: ScopeId, parents: Vec<Type>) -> Self {
        Self {
            kind,
            scope,
            parents,
            extended_type: None,
        }
    }

    pub fn helper(kind: StructKind, scope: ScopeId, extended_type: Type, parents: Vec<Type>) -> Self {
        Self {
            kind,
            scope,
            parents,
            extended_type: Some(extended_type),
        }
    }
}

pub struct TypeFactory {
    config: TargetConfig,
    sizes: TypeSizes,
    intrinsics: FxHashMap<IntrinsicType, Type>,
    unknown: Type,
    untyped: Type,
    void: Type,
    nil: Type,
    empty_set: Type,
    anonymous_structs: AtomicU64,
}

impl std::fmt::Debug for TypeFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeFactory")
            .field("config", &self.config)
            .field("sizes", &self.sizes)
            .finish_non_exhaustive()
    }
}

impl TypeFactory {
    pub fn new(config: TargetConfig) -> Self {
        let sizes = TypeSizes::new(&config);
        let untyped = Type::new(TypeKind::Untyped);
        let void = Type::new(TypeKind::Void);
        let nil = Type::new(TypeKind::Pointer(PointerType::nil(sizes.pointer, untyped.clone())));
        let empty_set = Type::new(TypeKind::Set(SetType::new(None, void.clone())));
        let intrinsics = IntrinsicBuilder::new(&config, &sizes, &untyped).build();

        debug!(
            toolchain = ?config.toolchain(),
            architecture = ?config.architecture(),
            version = %config.compiler_version(),
            pointer_size = sizes.pointer,
            "created type factory"
        );

        Self {
            config,
            sizes,
            intrinsics,
            unknown: Type::new(TypeKind::Unknown),
            untyped,
            void,
            nil,
            empty_set,
            anonymous_structs: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &TargetConfig {
        &self.config
    }

    pub fn sizes(&self) -> &TypeSizes {
        &self.sizes
    }

    pub fn pointer_size(&self) -> u32 {
        self.sizes.pointer
    }

    // ========================================================================
    // INTRINSICS AND SENTINELS
    // ========================================================================

    pub fn get_intrinsic(&self, intrinsic: IntrinsicType) -> Type {
        match self.intrinsics.get(&intrinsic) {
            Some(ty) => ty.clone(),
            None => {
                debug_assert!(false, "intrinsic {intrinsic} was not registered");
                self.unknown()
            }
        }
    }

    pub fn intrinsic_by_name(&self, name: &str) -> Result<Type, TypeError> {
        IntrinsicType::from_name(name)
            .map(|intrinsic| self.get_intrinsic(intrinsic))
            .ok_or_else(|| TypeError::UnknownIntrinsic(name.to_string()))
    }

    pub fn unknown(&self) -> Type {
        self.unknown.clone()
    }

    pub fn untyped(&self) -> Type {
        self.untyped.clone()
    }

    pub fn void(&self) -> Type {
        self.void.clone()
    }

    /// The type of `nil`.
    pub fn nil_pointer(&self) -> Type {
        self.nil.clone()
    }

    /// The type of `[]`.
    pub fn empty_set(&self) -> Type {
        self.empty_set.clone()
    }

    /// A named type that could not be found.
    pub fn unresolved(&self, image: impl Into<SmolStr>) -> Type {
        Type::new(TypeKind::Unresolved(image.into()))
    }

    // ========================================================================
    // LITERALS AND ORDINALS
    // ========================================================================

    /// The narrowest integer intrinsic whose range contains `value`.
    pub fn integer_from_literal(&self, value: i128) -> Result<Type, TypeError> {
        IntrinsicType::LITERAL_INTEGERS
            .into_iter()
            .map(|intrinsic| self.get_intrinsic(intrinsic))
            .find(|ty| ty.as_integer().is_some_and(|integer| integer.contains(value)))
            .ok_or(TypeError::NoIntegerForLiteral(value))
    }

    /// An integer subrange `min..max`.
    ///
    /// The host is the low bound's literal type unless the high bound needs a
    /// strictly larger one. A negative low bound never gets an unsigned host.
    pub fn subrange(
        &self,
        image: Option<SmolStr>,
        min: i128,
        max: i128,
    ) -> Result<Type, TypeError> {
        let min_type = self.integer_from_literal(min)?;
        let max_type = self.integer_from_literal(max)?;
        let mut host = min_type.clone();
        if max_type.size() > min_type.size() {
            host = max_type.clone();
            if min < 0 && !max_type.is_signed() {
                host = self.integer_from_literal(-(max + 1))?;
            }
        }
        let image = image.unwrap_or_else(|| format_smolstr!("{min}..{max}"));
        Ok(Type::new(TypeKind::Subrange(SubrangeType::new(
            image, host, min, max,
        ))))
    }

    pub fn enumeration(
        &self,
        image: impl Into<SmolStr>,
        elements: Vec<(Name, i128)>,
        scope: Option<ScopeId>,
    ) -> Type {
        Type::new(TypeKind::Enum(EnumType::new(image, elements, scope)))
    }

    // ========================================================================
    // STRUCTS
    // ========================================================================

    /// A struct whose body is supplied later by [`complete_struct`].
    ///
    /// [`complete_struct`]: TypeFactory::complete_struct
    pub fn forward_struct(&self, parts: Vec<ImagePart>) -> Type {
        Type::new(TypeKind::Struct(StructType::forward(parts)))
    }

    pub fn complete_struct(&self, ty: &Type, definition: StructDefinition) -> Result<(), TypeError> {
        let TypeKind::Struct(structure) = ty.kind() else {
            return Err(TypeError::UnexpectedType {
                expected: "struct",
                image: SmolStr::new(ty.image()),
            });
        };
        structure.complete(
            definition.kind,
            definition.scope,
            definition.parents,
            definition.extended_type,
            self.sizes.pointer,
        )
    }

    pub fn struct_type(&self, parts: Vec<ImagePart>, definition: StructDefinition) -> Result<Type, TypeError> {
        let ty = self.forward_struct(parts);
        self.complete_struct(&ty, definition)?;
        Ok(ty)
    }

    /// A struct declared inline, e.g. a `record ... end` variable type.
    pub fn anonymous_struct(&self, definition: StructDefinition) -> Result<Type, TypeError> {
        let id = self.anonymous_structs.fetch_add(1, Ordering::Relaxed);
        let name = format_smolstr!("<anonymous {} #{id}>", definition.kind.keyword());
        self.struct_type(vec![ImagePart::new(name)], definition)
    }

    /// A class helper for a class, a record helper for anything else.
    pub fn helper(
        &self,
        parts: Vec<ImagePart>,
        scope: ScopeId,
        extended_type: Type,
        parents: Vec<Type>,
    ) -> Result<Type, TypeError> {
        let kind = if extended_type.is_class() {
            StructKind::ClassHelper
        } else {
            StructKind::RecordHelper
        };
        self.struct_type(parts, StructDefinition::helper(kind, scope, extended_type, parents))
    }

    /// `Template<Arguments>`: bind the template's own type parameters.
    pub fn specialize_generic(&self, template: &Type, arguments: &[Type]) -> Type {
        let Some(structure) = template.as_struct() else {
            return template.clone();
        };
        let context = SpecializationContext::from_pairs(structure.type_arguments(), arguments);
        template.specialize(&context)
    }

    // ========================================================================
    // COMPOSITES
    // ========================================================================

    pub fn array(&self, image: Option<SmolStr>, kind: ArrayKind, element: Type, indices: Vec<Type>) -> Type {
        Type::new(TypeKind::Array(ArrayType::new(
            image,
            kind,
            element,
            indices,
            self.sizes.pointer,
        )))
    }

    pub fn dynamic_array(&self, image: Option<SmolStr>, element: Type) -> Type {
        self.array(image, ArrayKind::Dynamic, element, Vec::new())
    }

    pub fn fixed_array(&self, image: Option<SmolStr>, element: Type, indices: Vec<Type>) -> Type {
        self.array(image, ArrayKind::Fixed, element, indices)
    }

    pub fn open_array(&self, element: Type) -> Type {
        self.array(None, ArrayKind::Open, element, Vec::new())
    }

    pub fn array_of_const(&self) -> Type {
        let element = self.get_intrinsic(IntrinsicType::Variant);
        self.array(None, ArrayKind::ArrayOfConst, element, Vec::new())
    }

    pub fn set(&self, image: Option<SmolStr>, element: Type) -> Type {
        Type::new(TypeKind::Set(SetType::new(image, element)))
    }

    pub fn array_constructor(&self, elements: Vec<Type>) -> Type {
        if elements.is_empty() {
            return self.empty_set();
        }
        Type::new(TypeKind::ArrayConstructor(ArrayConstructorType::new(elements)))
    }

    pub fn pointer_to(&self, image: Option<SmolStr>, target: Type, allows_pointer_math: bool) -> Type {
        let image = image.unwrap_or_else(|| format_smolstr!("^{}", target.image()));
        Type::new(TypeKind::Pointer(PointerType::new(
            image,
            self.sizes.pointer,
            Some(target),
            allows_pointer_math,
        )))
    }

    /// `PFoo = ^TFoo` where `TFoo` is declared later in the section.
    pub fn forward_pointer(&self, image: impl Into<SmolStr>, allows_pointer_math: bool) -> Type {
        Type::new(TypeKind::Pointer(PointerType::new(
            image,
            self.sizes.pointer,
            None,
            allows_pointer_math,
        )))
    }

    pub fn file_of(&self, image: Option<SmolStr>, element: Type) -> Type {
        let image = image.unwrap_or_else(|| format_smolstr!("file of {}", element.image()));
        Type::new(TypeKind::File(FileType::new(
            image,
            self.sizes.file,
            Some(element),
            false,
        )))
    }

    pub fn untyped_file(&self) -> Type {
        Type::new(TypeKind::File(FileType::new("file", self.sizes.file, None, false)))
    }

    pub fn class_of(&self, image: Option<SmolStr>, class: Type) -> Type {
        let image = image.unwrap_or_else(|| format_smolstr!("class of {}", class.image()));
        Type::new(TypeKind::ClassReference(ClassReferenceType::new(
            image,
            self.sizes.pointer,
            Some(class),
        )))
    }

    /// `TFooClass = class of TFoo` where `TFoo` is declared later.
    pub fn forward_class_reference(&self, image: impl Into<SmolStr>) -> Type {
        Type::new(TypeKind::ClassReference(ClassReferenceType::new(
            image,
            self.sizes.pointer,
            None,
        )))
    }

    pub fn type_type(&self, ty: Type) -> Type {
        let image = format_smolstr!("type of {}", ty.image());
        Type::new(TypeKind::TypeType(TypeType::new(image, ty)))
    }

    /// `TFoo = type Bar`.
    pub fn strong_alias(&self, image: impl Into<SmolStr>, aliased: Type) -> Result<Type, TypeError> {
        AliasType::new(image, aliased, AliasStrength::Strong).map(|alias| Type::new(TypeKind::Alias(alias)))
    }

    /// `TFoo = Bar`.
    pub fn weak_alias(&self, image: impl Into<SmolStr>, aliased: Type) -> Result<Type, TypeError> {
        AliasType::new(image, aliased, AliasStrength::Weak).map(|alias| Type::new(TypeKind::Alias(alias)))
    }

    pub fn procedural(
        &self,
        image: Option<SmolStr>,
        kind: ProceduralKind,
        parameters: Vec<Parameter>,
        return_type: Type,
    ) -> Type {
        Type::new(TypeKind::Procedural(ProceduralType::new(
            image,
            kind,
            parameters,
            return_type,
            self.sizes.pointer,
        )))
    }

    /// A fresh type parameter; its identity is the returned instance.
    pub fn type_parameter(&self, image: impl Into<SmolStr>) -> Type {
        Type::new(TypeKind::TypeParameter(TypeParameterType::new(image)))
    }

    /// `string[length]`.
    pub fn short_string(&self, length: u8) -> Type {
        let char_type = self.get_intrinsic(IntrinsicType::AnsiChar);
        Type::new(TypeKind::String(StringType::new(
            format_smolstr!("string[{length}]"),
            u32::from(length) + 1,
            StringKind::Short,
            char_type,
        )))
    }
}

// ============================================================================
// INTRINSIC CONSTRUCTION
// ============================================================================

/// Applies the target's conditionals while registering the intrinsics.
struct IntrinsicBuilder<'a> {
    config: &'a TargetConfig,
    sizes: &'a TypeSizes,
    untyped: &'a Type,
    types: FxHashMap<IntrinsicType, Type>,
}

impl<'a> IntrinsicBuilder<'a> {
    fn new(config: &'a TargetConfig, sizes: &'a TypeSizes, untyped: &'a Type) -> Self {
        Self {
            config,
            sizes,
            untyped,
            types: FxHashMap::default(),
        }
    }

    fn add(&mut self, intrinsic: IntrinsicType, kind: TypeKind) -> Type {
        let ty = Type::new(kind);
        self.types.insert(intrinsic, ty.clone());
        ty
    }

    fn alias(&mut self, intrinsic: IntrinsicType, aliased: &Type) {
        let alias = AliasType::intrinsic(intrinsic.image(), aliased.clone());
        self.add(intrinsic, TypeKind::Alias(alias));
    }

    fn build(mut self) -> FxHashMap<IntrinsicType, Type> {
        self.booleans();
        self.integers();
        self.reals();
        self.text();
        self.types
    }

    fn booleans(&mut self) {
        use IntrinsicType::*;
        for (intrinsic, size) in [(Boolean, 1), (ByteBool, 1), (WordBool, 2), (LongBool, 4)] {
            self.add(intrinsic, TypeKind::Boolean(BooleanType::new(intrinsic.image(), size)));
        }
    }

    fn integers(&mut self) {
        use IntrinsicType::*;
        let config = self.config;
        let pointer = self.sizes.pointer;

        let mut fixed = FxHashMap::default();
        for (intrinsic, size, signed) in [
            (ShortInt, 1, true),
            (Byte, 1, false),
            (SmallInt, 2, true),
            (Word, 2, false),
            (Integer, 4, true),
            (Cardinal, 4, false),
            (Int64, 8, true),
            (UInt64, 8, false),
        ] {
            let integer = if signed {
                IntegerType::signed(intrinsic.image(), size)
            } else {
                IntegerType::unsigned(intrinsic.image(), size)
            };
            fixed.insert(intrinsic, self.add(intrinsic, TypeKind::Integer(integer)));
        }
        let integer = |intrinsic: IntrinsicType| fixed[&intrinsic].clone();

        if config.is_at_least(CompilerVersion::VER360) {
            let (signed, unsigned) = if config.is_64_bit() {
                (integer(Int64), integer(UInt64))
            } else {
                (integer(Integer), integer(Cardinal))
            };
            self.alias(NativeInt, &signed);
            self.alias(NativeUInt, &unsigned);
        } else {
            self.add(
                NativeInt,
                TypeKind::Integer(IntegerType::signed(NativeInt.image(), pointer)),
            );
            self.add(
                NativeUInt,
                TypeKind::Integer(IntegerType::unsigned(NativeUInt.image(), pointer)),
            );
        }

        let long_is_64_bit = config.is_at_least(CompilerVersion::VER290)
            && config.is_64_bit()
            && config.platform() != Platform::Windows;
        let (long_int, long_word) = if long_is_64_bit {
            (integer(Int64), integer(UInt64))
        } else {
            (integer(Integer), integer(Cardinal))
        };
        self.alias(LongInt, &long_int);
        self.alias(LongWord, &long_word);

        self.alias(FixedInt, &integer(Integer));
        self.alias(FixedUInt, &integer(Cardinal));
    }

    fn reals(&mut self) {
        use IntrinsicType::*;
        for (intrinsic, size) in [
            (Single, 4),
            (Double, 8),
            (Extended, self.sizes.extended),
            (Real48, 6),
            (Comp, 8),
            (Currency, 8),
        ] {
            self.add(intrinsic, TypeKind::Real(RealType::new(intrinsic.image(), size)));
        }
        let real = if self.config.is_at_least(CompilerVersion::VER120) {
            Double
        } else {
            Real48
        };
        let aliased = self.types[&real].clone();
        self.alias(Real, &aliased);
    }

    /// Characters, strings, pointers, variants and text files.
    fn text(&mut self) {
        use IntrinsicType::*;
        let pointer = self.sizes.pointer;
        let unicode = self.config.is_at_least(CompilerVersion::VER200);

        let ansi_char = self.add(AnsiChar, TypeKind::Char(CharType::new(AnsiChar.image(), 1)));
        let wide_char = self.add(WideChar, TypeKind::Char(CharType::new(WideChar.image(), 2)));

        let ansi_string = self.add(
            AnsiString,
            TypeKind::String(StringType::new(AnsiString.image(), pointer, StringKind::Ansi, ansi_char.clone())),
        );
        let unicode_string = self.add(
            UnicodeString,
            TypeKind::String(StringType::new(
                UnicodeString.image(),
                pointer,
                StringKind::Unicode,
                wide_char.clone(),
            )),
        );
        self.add(
            WideString,
            TypeKind::String(StringType::new(WideString.image(), pointer, StringKind::Wide, wide_char.clone())),
        );
        self.add(
            ShortString,
            TypeKind::String(StringType::new(ShortString.image(), 256, StringKind::Short, ansi_char.clone())),
        );

        self.add(
            Pointer,
            TypeKind::Pointer(PointerType::new(Pointer.image(), pointer, Some(self.untyped.clone()), false)),
        );
        let p_ansi_char = self.add(
            PAnsiChar,
            TypeKind::Pointer(PointerType::new(PAnsiChar.image(), pointer, Some(ansi_char.clone()), true)),
        );
        let p_wide_char = self.add(
            PWideChar,
            TypeKind::Pointer(PointerType::new(PWideChar.image(), pointer, Some(wide_char.clone()), true)),
        );

        if unicode {
            self.alias(Char, &wide_char);
            self.alias(String, &unicode_string);
            self.alias(PChar, &p_wide_char);
        } else {
            self.alias(Char, &ansi_char);
            self.alias(String, &ansi_string);
            self.alias(PChar, &p_ansi_char);
        }

        let variant = self.sizes.variant;
        self.add(
            Variant,
            TypeKind::Variant(VariantType::new(Variant.image(), variant, VariantKind::Normal)),
        );
        self.add(
            OleVariant,
            TypeKind::Variant(VariantType::new(OleVariant.image(), variant, VariantKind::Ole)),
        );
        self.add(
            Text,
            TypeKind::File(FileType::new(Text.image(), self.sizes.text, None, true)),
        );
    }
}
