//! Types that refer to another type: pointers, class references, files,
//! type-of-type wrappers and generic type parameters.
//!
//! Pointer and class-reference targets may name a type that is declared
//! later in the same section. Those targets start empty and are completed
//! exactly once by the binder before anything reads them.

use std::sync::OnceLock;

use smol_str::SmolStr;

use super::{Type, TypeError};

fn complete_once(cell: &OnceLock<Type>, value: Type, image: &str) -> Result<(), TypeError> {
    cell.set(value)
        .map_err(|_| TypeError::AlreadyCompleted(SmolStr::new(image)))
}

#[derive(Debug)]
pub struct PointerType {
    image: SmolStr,
    size: u32,
    dereferenced: OnceLock<Type>,
    allows_pointer_math: bool,
    nil: bool,
}

impl PointerType {
    pub(crate) fn new(image: impl Into<SmolStr>, size: u32, dereferenced: Option<Type>, allows_pointer_math: bool) -> Self {
        Self {
            image: image.into(),
            size,
            dereferenced: dereferenced.map_or_else(OnceLock::new, OnceLock::from),
            allows_pointer_math,
            nil: false,
        }
    }

    pub(crate) fn nil(size: u32, untyped: Type) -> Self {
        Self {
            nil: true,
            ..Self::new("nil", size, Some(untyped), false)
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// The pointed-to type; `None` only while a forward target is pending.
    pub fn dereferenced(&self) -> Option<&Type> {
        let target = self.dereferenced.get();
        debug_assert!(
            target.is_some(),
            "pointer {} read before its target was declared",
            self.image
        );
        target
    }

    /// Complete a pointer whose target was declared after it.
    pub fn set_dereferenced_type(&self, target: Type) -> Result<(), TypeError> {
        complete_once(&self.dereferenced, target, &self.image)
    }

    pub fn is_forward(&self) -> bool {
        self.dereferenced.get().is_none()
    }

    /// `{$POINTERMATH ON}` pointers and the character pointers.
    pub fn allows_pointer_math(&self) -> bool {
        self.allows_pointer_math
    }

    pub fn is_nil(&self) -> bool {
        self.nil
    }

    /// `Pointer` and `nil`: no dereferenced type.
    pub fn is_untyped(&self) -> bool {
        self.dereferenced.get().is_some_and(Type::is_untyped)
    }
}

/// `class of TFoo`.
#[derive(Debug)]
pub struct ClassReferenceType {
    image: SmolStr,
    size: u32,
    class_type: OnceLock<Type>,
}

impl ClassReferenceType {
    pub(crate) fn new(image: impl Into<SmolStr>, size: u32, class_type: Option<Type>) -> Self {
        Self {
            image: image.into(),
            size,
            class_type: class_type.map_or_else(OnceLock::new, OnceLock::from),
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn class_type(&self) -> Option<&Type> {
        let class_type = self.class_type.get();
        debug_assert!(
            class_type.is_some(),
            "class reference {} read before its class was declared",
            self.image
        );
        class_type
    }

    /// Complete a class reference to a class declared after it.
    pub fn set_class_type(&self, class_type: Type) -> Result<(), TypeError> {
        complete_once(&self.class_type, class_type, &self.image)
    }

    pub fn is_forward(&self) -> bool {
        self.class_type.get().is_none()
    }
}

/// `file of T`, untyped `file` and `Text`.
#[derive(Debug)]
pub struct FileType {
    image: SmolStr,
    size: u32,
    element: Option<Type>,
    text: bool,
}

impl FileType {
    pub(crate) fn new(image: impl Into<SmolStr>, size: u32, element: Option<Type>, text: bool) -> Self {
        Self {
            image: image.into(),
            size,
            element,
            text,
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Record type of a typed file.
    pub fn element(&self) -> Option<&Type> {
        self.element.as_ref()
    }

    pub fn is_text(&self) -> bool {
        self.text
    }
}

/// The type of an expression that names a type, e.g. `TFoo` in `TFoo.Create`.
#[derive(Debug)]
pub struct TypeType {
    image: SmolStr,
    ty: Type,
}

impl TypeType {
    pub(crate) fn new(image: impl Into<SmolStr>, ty: Type) -> Self {
        Self {
            image: image.into(),
            ty,
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn size(&self) -> u32 {
        self.ty.size()
    }

    /// The named type.
    pub fn ty(&self) -> &Type {
        &self.ty
    }
}

/// A generic type parameter. Identity is the type instance itself.
#[derive(Debug)]
pub struct TypeParameterType {
    image: SmolStr,
    constraints: OnceLock<Vec<Type>>,
}

impl TypeParameterType {
    pub(crate) fn new(image: impl Into<SmolStr>) -> Self {
        Self {
            image: image.into(),
            constraints: OnceLock::new(),
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    /// Constraint types (`T: class, IComparable<T>`); empty until set.
    pub fn constraints(&self) -> &[Type] {
        self.constraints.get().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Constraints may refer to the parameter itself, so they are set after
    /// the parameter is created.
    pub fn set_constraints(&self, constraints: Vec<Type>) -> Result<(), TypeError> {
        self.constraints
            .set(constraints)
            .map_err(|_| TypeError::AlreadyCompleted(self.image.clone()))
    }
}
