//! Generic specialization: substituting type arguments for type parameters.
//!
//! Specialization is a capability of the composite types themselves rather
//! than a separate service. A type that mentions no bound type parameter
//! specializes to the identical instance.

use rustc_hash::FxHashMap;
use smol_str::format_smolstr;
use tracing::trace;

use super::alias::AliasType;
use super::collection::{ArrayType, SetType};
use super::pointer::{ClassReferenceType, FileType, PointerType, TypeType};
use super::structs::StructType;
use super::{Type, TypeKind};

/// Bindings from type parameters (by identity) to concrete types.
///
/// Built for one specialization and dropped afterwards; never stored on a
/// type.
#[derive(Debug, Default, Clone)]
pub struct SpecializationContext {
    bindings: FxHashMap<Type, Type>,
}

impl SpecializationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair each type parameter with the argument at the same position.
    pub fn from_pairs(parameters: &[Type], arguments: &[Type]) -> Self {
        let mut context = Self::new();
        for (parameter, argument) in parameters.iter().zip(arguments) {
            if parameter.is_type_parameter() {
                context.bind(parameter.clone(), argument.clone());
            }
        }
        context
    }

    pub fn bind(&mut self, parameter: Type, argument: Type) {
        self.bindings.insert(parameter, argument);
    }

    pub fn get(&self, parameter: &Type) -> Option<&Type> {
        self.bindings.get(parameter)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }
}

impl Type {
    /// True if specializing through `context` would produce a new type.
    pub fn can_be_specialized(&self, context: &SpecializationContext) -> bool {
        !context.is_empty() && self.can_be_specialized_inner(context, &mut Vec::new())
    }

    pub(crate) fn can_be_specialized_inner(
        &self,
        context: &SpecializationContext,
        visiting: &mut Vec<*const StructType>,
    ) -> bool {
        match self.kind() {
            TypeKind::TypeParameter(_) => context.get(self).is_some(),
            TypeKind::Pointer(pointer) => {
                !pointer.is_forward()
                    && pointer
                        .dereferenced()
                        .is_some_and(|target| target.can_be_specialized_inner(context, visiting))
            }
            TypeKind::Array(array) => {
                array.element().can_be_specialized_inner(context, visiting)
                    || array
                        .indices()
                        .iter()
                        .any(|index| index.can_be_specialized_inner(context, visiting))
            }
            TypeKind::Set(set) => set.element().can_be_specialized_inner(context, visiting),
            TypeKind::File(file) => file
                .element()
                .is_some_and(|element| element.can_be_specialized_inner(context, visiting)),
            TypeKind::Procedural(procedural) => {
                procedural
                    .return_type()
                    .can_be_specialized_inner(context, visiting)
                    || procedural
                        .parameters()
                        .iter()
                        .any(|parameter| parameter.ty.can_be_specialized_inner(context, visiting))
            }
            TypeKind::TypeType(type_type) => {
                type_type.ty().can_be_specialized_inner(context, visiting)
            }
            TypeKind::ClassReference(reference) => {
                !reference.is_forward()
                    && reference
                        .class_type()
                        .is_some_and(|class| class.can_be_specialized_inner(context, visiting))
            }
            TypeKind::Struct(structure) => structure.can_be_specialized(context, visiting),
            TypeKind::Alias(alias) => alias.aliased().can_be_specialized_inner(context, visiting),
            _ => false,
        }
    }

    /// Substitute bound type parameters. Returns `self` unchanged when
    /// nothing in it is bound by `context`.
    pub fn specialize(&self, context: &SpecializationContext) -> Type {
        if !self.can_be_specialized(context) {
            return self.clone();
        }
        let kind = match self.kind() {
            TypeKind::TypeParameter(_) => {
                return context.get(self).cloned().unwrap_or_else(|| self.clone());
            }
            TypeKind::Pointer(pointer) => {
                let Some(target) = pointer.dereferenced() else {
                    return self.clone();
                };
                let target = target.specialize(context);
                TypeKind::Pointer(PointerType::new(
                    format_smolstr!("^{}", target.image()),
                    pointer.size(),
                    Some(target),
                    pointer.allows_pointer_math(),
                ))
            }
            TypeKind::Array(array) => TypeKind::Array(Self::specialize_array(array, context)),
            TypeKind::Set(set) => {
                TypeKind::Set(SetType::new(None, set.element().specialize(context)))
            }
            TypeKind::File(file) => {
                let element = file.element().map(|element| element.specialize(context));
                let image = match &element {
                    Some(element) => format_smolstr!("file of {}", element.image()),
                    None => file.image().into(),
                };
                TypeKind::File(FileType::new(image, file.size(), element, file.is_text()))
            }
            TypeKind::Procedural(procedural) => {
                let parameters = procedural
                    .parameters()
                    .iter()
                    .map(|parameter| parameter.with_type(parameter.ty.specialize(context)))
                    .collect();
                let return_type = procedural.return_type().specialize(context);
                TypeKind::Procedural(procedural.rebuild(parameters, return_type))
            }
            TypeKind::TypeType(type_type) => {
                let ty = type_type.ty().specialize(context);
                TypeKind::TypeType(TypeType::new(format_smolstr!("type of {}", ty.image()), ty))
            }
            TypeKind::ClassReference(reference) => {
                let Some(class) = reference.class_type() else {
                    return self.clone();
                };
                let class = class.specialize(context);
                TypeKind::ClassReference(ClassReferenceType::new(
                    format_smolstr!("class of {}", class.image()),
                    reference.size(),
                    Some(class),
                ))
            }
            TypeKind::Struct(structure) => {
                TypeKind::Struct(structure.do_specialization(self, context))
            }
            // The alias keeps its name and strength around the specialized type.
            TypeKind::Alias(alias) => {
                let aliased = alias.aliased().specialize(context);
                let Ok(rebuilt) = AliasType::new(alias.image(), aliased.clone(), alias.strength()) else {
                    return aliased;
                };
                TypeKind::Alias(rebuilt)
            }
            _ => return self.clone(),
        };
        let specialized = Type::new(kind);
        trace!(from = %self, to = %specialized, "specialized type");
        specialized
    }

    fn specialize_array(array: &ArrayType, context: &SpecializationContext) -> ArrayType {
        let element = array.element().specialize(context);
        let indices = array
            .indices()
            .iter()
            .map(|index| index.specialize(context))
            .collect();
        array.rebuild(element, indices)
    }
}
