//! Arrays, sets and array constructors.

use smol_str::{SmolStr, format_smolstr};

use super::Type;

/// Shape of an array type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayKind {
    /// `array of T`
    Dynamic,
    /// `array[Index] of T`
    Fixed,
    /// `array of T` as a parameter type
    Open,
    /// `array of const` as a parameter type
    ArrayOfConst,
}

#[derive(Debug)]
pub struct ArrayType {
    image: SmolStr,
    size: u32,
    element: Type,
    indices: Vec<Type>,
    kind: ArrayKind,
}

impl ArrayType {
    pub(crate) fn new(
        image: Option<SmolStr>,
        kind: ArrayKind,
        element: Type,
        indices: Vec<Type>,
        pointer_size: u32,
    ) -> Self {
        let image = image.unwrap_or_else(|| Self::structural_image(kind, &element, &indices));
        let size = match kind {
            ArrayKind::Fixed => Self::fixed_size(&element, &indices),
            ArrayKind::Dynamic | ArrayKind::Open | ArrayKind::ArrayOfConst => pointer_size,
        };
        Self {
            image,
            size,
            element,
            indices,
            kind,
        }
    }

    /// Build the same array shape over new element and index types.
    pub(crate) fn rebuild(&self, element: Type, indices: Vec<Type>) -> Self {
        let pointer_size = self.size;
        Self::new(None, self.kind, element, indices, pointer_size)
    }

    fn structural_image(kind: ArrayKind, element: &Type, indices: &[Type]) -> SmolStr {
        match kind {
            ArrayKind::ArrayOfConst => SmolStr::new_static("array of const"),
            ArrayKind::Fixed => {
                let indices: Vec<&str> = indices.iter().map(Type::image).collect();
                format_smolstr!("array[{}] of {}", indices.join(", "), element.image())
            }
            ArrayKind::Dynamic | ArrayKind::Open => format_smolstr!("array of {}", element.image()),
        }
    }

    fn fixed_size(element: &Type, indices: &[Type]) -> u32 {
        let count = indices
            .iter()
            .map(|index| index.ordinal_count().unwrap_or(0))
            .fold(1u128, u128::saturating_mul);
        let size = count.saturating_mul(u128::from(element.size()));
        u32::try_from(size).unwrap_or(u32::MAX)
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn element(&self) -> &Type {
        &self.element
    }

    /// Index types of a fixed array, outermost first.
    pub fn indices(&self) -> &[Type] {
        &self.indices
    }

    pub fn kind(&self) -> ArrayKind {
        self.kind
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind == ArrayKind::Dynamic
    }

    pub fn is_fixed(&self) -> bool {
        self.kind == ArrayKind::Fixed
    }

    pub fn is_open(&self) -> bool {
        matches!(self.kind, ArrayKind::Open | ArrayKind::ArrayOfConst)
    }

    pub fn is_array_of_const(&self) -> bool {
        self.kind == ArrayKind::ArrayOfConst
    }
}

#[derive(Debug)]
pub struct SetType {
    image: SmolStr,
    size: u32,
    element: Type,
}

/// Largest set the language allows, in bytes.
const MAX_SET_SIZE: u32 = 32;

impl SetType {
    pub(crate) fn new(image: Option<SmolStr>, element: Type) -> Self {
        let image = image.unwrap_or_else(|| {
            if element.is_void() {
                SmolStr::new_static("[]")
            } else {
                format_smolstr!("set of {}", element.image())
            }
        });
        let size = Self::size_for(&element);
        Self {
            image,
            size,
            element,
        }
    }

    /// Bytes spanned by the element's ordinal range; 3 bytes round up to 4.
    fn size_for(element: &Type) -> u32 {
        let Some((low, high)) = element.ordinal_range() else {
            return if element.is_void() { 0 } else { MAX_SET_SIZE };
        };
        let bytes = high.div_euclid(8) - low.div_euclid(8) + 1;
        match bytes {
            3 => 4,
            bytes if !(1..=i128::from(MAX_SET_SIZE)).contains(&bytes) => MAX_SET_SIZE,
            bytes => bytes as u32,
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn element(&self) -> &Type {
        &self.element
    }

    pub fn is_empty_set(&self) -> bool {
        self.element.is_void()
    }
}

/// The type of a `[a, b, c]` expression before it is matched against an
/// array or set.
#[derive(Debug)]
pub struct ArrayConstructorType {
    image: SmolStr,
    elements: Vec<Type>,
}

impl ArrayConstructorType {
    pub(crate) fn new(elements: Vec<Type>) -> Self {
        let images: Vec<&str> = elements.iter().map(Type::image).collect();
        Self {
            image: format_smolstr!("[{}]", images.join(", ")),
            elements,
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn elements(&self) -> &[Type] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
