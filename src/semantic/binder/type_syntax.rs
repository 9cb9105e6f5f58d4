//! Types of type expressions.

use smol_str::format_smolstr;

use super::Binder;
use crate::base::{Name, NodeId};
use crate::semantic::error::ResolveError;
use crate::semantic::node_types::TypeNode;
use crate::semantic::symbol_table::{DeclarationKind, ScopeKind, VariableKind, TOBJECT};
use crate::syntax::{EnumElementSyntax, MemberSyntax, ReferenceSyntax, StructSyntax, TypeSyntax};
use crate::types::{StructDefinition, StructKind, Type};

impl TypeNode for TypeSyntax {
    fn node_id(&self) -> NodeId {
        self.node()
    }

    fn create_type(&self, binder: &mut Binder<'_>) -> Result<Type, ResolveError> {
        binder.build_type(self, None)
    }
}

impl Binder<'_> {
    /// Build the type `syntax` denotes. `image` names it when it is the
    /// right-hand side of a type declaration.
    pub(super) fn build_type(&mut self, syntax: &TypeSyntax, image: Option<Name>) -> Result<Type, ResolveError> {
        let factory = self.factory;
        let ty = match syntax {
            TypeSyntax::Named { reference, .. } => self.named_type(reference)?,
            TypeSyntax::Pointer { target, .. } => {
                let target = self.type_of(target.as_ref())?;
                factory.pointer_to(image, target, false)
            }
            TypeSyntax::DynamicArray { element, .. } => {
                let element = self.type_of(element.as_ref())?;
                factory.dynamic_array(image, element)
            }
            TypeSyntax::FixedArray {
                indices, element, ..
            } => {
                let element = self.type_of(element.as_ref())?;
                let indices = self.type_arguments(indices)?;
                factory.fixed_array(image, element, indices)
            }
            TypeSyntax::OpenArray { element, .. } => {
                let element = self.type_of(element.as_ref())?;
                factory.open_array(element)
            }
            TypeSyntax::ArrayOfConst { .. } => factory.array_of_const(),
            TypeSyntax::Set { element, .. } => {
                let element = self.type_of(element.as_ref())?;
                factory.set(image, element)
            }
            TypeSyntax::File { element, .. } => match element {
                Some(element) => {
                    let element = self.type_of(element.as_ref())?;
                    factory.file_of(image, element)
                }
                None => factory.untyped_file(),
            },
            TypeSyntax::ClassOf { class, .. } => {
                let class = self.type_of(class.as_ref())?;
                factory.class_of(image, class)
            }
            TypeSyntax::Subrange { low, high, .. } => factory.subrange(image, *low, *high)?,
            TypeSyntax::Enum { elements, .. } => self.enum_type(elements, image),
            TypeSyntax::Procedural {
                kind,
                parameters,
                return_type,
                ..
            } => {
                let parameters = self.parameters(parameters)?;
                let return_type = match return_type {
                    Some(return_type) => self.type_of(return_type.as_ref())?,
                    None => factory.void(),
                };
                factory.procedural(image, *kind, parameters, return_type)
            }
            TypeSyntax::Struct { structure, .. } => self.anonymous_struct(structure)?,
            TypeSyntax::ShortString { length, .. } => factory.short_string(*length),
        };
        Ok(ty)
    }

    /// The type a type name denotes, `Unresolved` when it names no type.
    fn named_type(&mut self, reference: &ReferenceSyntax) -> Result<Type, ResolveError> {
        let named = self
            .resolve_reference(reference, None)?
            .and_then(|id| self.table.occurrence(id).ty())
            .and_then(Type::as_type_type)
            .map(|type_type| type_type.ty().clone());
        Ok(named.unwrap_or_else(|| {
            let image: Vec<&str> = reference.segments.iter().map(|segment| segment.name.as_str()).collect();
            self.factory.unresolved(image.join("."))
        }))
    }

    /// Elements are declared in the enum's own scope and are also visible
    /// unqualified where the enum is declared.
    fn enum_type(&mut self, elements: &[EnumElementSyntax], image: Option<Name>) -> Type {
        let enclosing = self.scope;
        let scope = self.table.add_scope(ScopeKind::Enum, enclosing);

        let mut next = 0i128;
        let values: Vec<(Name, i128)> = elements
            .iter()
            .map(|element| {
                let ordinal = element.value.unwrap_or(next);
                next = ordinal + 1;
                (element.name.clone(), ordinal)
            })
            .collect();
        let image = image.unwrap_or_else(|| {
            let names: Vec<&str> = values.iter().map(|(name, _)| name.as_str()).collect();
            format_smolstr!("({})", names.join(", "))
        });
        let ty = self.factory.enumeration(image, values.clone(), Some(scope));

        for (element, (_, ordinal)) in elements.iter().zip(values) {
            let id = self.table.declare(
                scope,
                element.name.clone(),
                DeclarationKind::EnumElement { ordinal },
                ty.clone(),
                Some(element.node),
            );
            self.table.expose(enclosing, id);
            self.declared_at.insert(element.node, id);
        }
        ty
    }

    /// An inline `record ... end`. Only fields are declared.
    fn anonymous_struct(&mut self, structure: &StructSyntax) -> Result<Type, ResolveError> {
        let scope = self.table.add_scope(ScopeKind::Type, self.scope);
        let parents = match structure.kind {
            StructKind::Class => vec![self.system_type(TOBJECT)],
            _ => Vec::new(),
        };
        let ty = self
            .factory
            .anonymous_struct(StructDefinition::new(structure.kind, scope, parents))?;
        self.table.set_scope_owner(scope, ty.clone());

        let fields = self.in_scope(scope, |binder| {
            let mut fields = Vec::new();
            for member in &structure.members {
                if let MemberSyntax::Field(field) = member {
                    fields.push(binder.declare_variable(field, VariableKind::Field)?);
                }
            }
            Ok::<_, ResolveError>(fields)
        })?;
        if structure.kind == StructKind::Record {
            let size = fields.iter().map(Type::size).fold(0u32, u32::saturating_add);
            if let Some(structure) = ty.as_struct() {
                structure.set_record_fields(fields)?;
                structure.set_record_size(size)?;
            }
        }
        Ok(ty)
    }
}
