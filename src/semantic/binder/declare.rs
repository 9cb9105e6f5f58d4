//! Declaring types, values and routines.

use tracing::{trace, warn};

use super::{Binder, ForwardStruct, ForwardTarget, PendingStruct, PendingType};
use crate::base::{DeclId, NameKey, ScopeId};
use crate::semantic::error::ResolveError;
use crate::semantic::symbol_table::{
    DeclarationKind, PropertyDeclaration, RoutineDeclaration, ScopeKind, VariableKind,
};
use crate::syntax::{
    ConstantSyntax, DeclarationSyntax, MemberSyntax, ParameterSyntax, PropertySyntax,
    RoutineHeadingSyntax, RoutineKind, RoutineSyntax, StructSyntax, TypeDeclarationSyntax,
    TypeDefinition, TypeSyntax, VariableSyntax,
};
use crate::types::{ImagePart, Parameter, ProceduralKind, StructKind, Type};

impl<'a> Binder<'a> {
    // ========================================================================
    // PASS 1: TYPES
    // ========================================================================

    /// Declare every type of a declaration section. Structs and pointer or
    /// class reference targets become forward cells, everything else is
    /// typed on first reference.
    pub(super) fn declare_types(
        &mut self,
        declarations: &'a [DeclarationSyntax],
        scope: ScopeId,
        prefix: &[ImagePart],
    ) {
        for declaration in declarations {
            if let DeclarationSyntax::Type(declaration) = declaration {
                self.declare_type(declaration, scope, prefix);
            }
        }
    }

    fn declare_type(&mut self, declaration: &'a TypeDeclarationSyntax, scope: ScopeId, prefix: &[ImagePart]) {
        match &declaration.definition {
            TypeDefinition::Forward(kind) => self.declare_forward(declaration, *kind, scope, prefix),
            TypeDefinition::Struct(structure) => {
                self.declare_struct(declaration, structure, scope, prefix)
            }
            TypeDefinition::Type { strong, ty } => {
                self.declare_other(declaration, *strong, ty, scope)
            }
        }
    }

    fn declare_forward(
        &mut self,
        declaration: &'a TypeDeclarationSyntax,
        kind: StructKind,
        scope: ScopeId,
        prefix: &[ImagePart],
    ) {
        let key = (scope, NameKey::new(&declaration.name));
        if let Some(existing) = self.work.forwards.get(&key) {
            self.declared_at.insert(declaration.node, existing.declaration);
            return;
        }
        let (ty, member_scope, type_parameters) = self.new_struct_cell(declaration, scope, prefix);
        let id = self.declare_type_name(declaration, scope, ty.clone(), type_parameters);
        self.work.kinds.insert(ty.clone(), kind);
        self.work.forwards.insert(
            key,
            ForwardStruct {
                ty,
                scope: member_scope,
                declaration: id,
                kind,
            },
        );
    }

    fn declare_struct(
        &mut self,
        declaration: &'a TypeDeclarationSyntax,
        structure: &'a StructSyntax,
        scope: ScopeId,
        prefix: &[ImagePart],
    ) {
        let key = (scope, NameKey::new(&declaration.name));
        let (ty, member_scope) = match self.work.forwards.shift_remove(&key) {
            Some(forward) => {
                self.declared_at.insert(declaration.node, forward.declaration);
                (forward.ty, forward.scope)
            }
            None => {
                let (ty, member_scope, type_parameters) =
                    self.new_struct_cell(declaration, scope, prefix);
                self.declare_type_name(declaration, scope, ty.clone(), type_parameters);
                (ty, member_scope)
            }
        };
        self.work.kinds.insert(ty.clone(), structure.kind);

        let parts = ty
            .as_struct()
            .map(|structure| structure.parts().to_vec())
            .unwrap_or_default();
        for member in &structure.members {
            if let MemberSyntax::Type(nested) = member {
                self.declare_type(nested, member_scope, &parts);
            }
        }
        self.work.structs.push(PendingStruct {
            ty,
            scope: member_scope,
            syntax: structure,
        });
    }

    /// A forward struct with its member scope and type parameters.
    fn new_struct_cell(
        &mut self,
        declaration: &'a TypeDeclarationSyntax,
        scope: ScopeId,
        prefix: &[ImagePart],
    ) -> (Type, ScopeId, Vec<Type>) {
        let type_parameters = self.new_type_parameters(declaration);
        let mut parts = prefix.to_vec();
        parts.push(ImagePart::generic(
            declaration.name.clone(),
            type_parameters.clone(),
        ));
        let ty = self.factory.forward_struct(parts);
        let member_scope = self.table.add_type_scope(scope, ty.clone());
        self.declare_type_parameters(declaration, &type_parameters, member_scope);
        (ty, member_scope, type_parameters)
    }

    fn new_type_parameters(&self, declaration: &TypeDeclarationSyntax) -> Vec<Type> {
        declaration
            .type_parameters
            .iter()
            .map(|parameter| self.factory.type_parameter(parameter.name.clone()))
            .collect()
    }

    fn declare_type_parameters(
        &mut self,
        declaration: &'a TypeDeclarationSyntax,
        type_parameters: &[Type],
        scope: ScopeId,
    ) {
        for (syntax, ty) in declaration.type_parameters.iter().zip(type_parameters) {
            let id = self.table.declare(
                scope,
                syntax.name.clone(),
                DeclarationKind::TypeParameter,
                ty.clone(),
                Some(syntax.node),
            );
            self.declared_at.insert(syntax.node, id);
            if !syntax.constraints.is_empty() {
                self.work
                    .constraints
                    .push((ty.clone(), syntax.constraints.as_slice(), scope));
            }
        }
    }

    fn declare_type_name(
        &mut self,
        declaration: &TypeDeclarationSyntax,
        scope: ScopeId,
        ty: Type,
        type_parameters: Vec<Type>,
    ) -> DeclId {
        let id = self.table.declare(
            scope,
            declaration.name.clone(),
            DeclarationKind::Type { type_parameters },
            ty,
            Some(declaration.node),
        );
        self.declared_at.insert(declaration.node, id);
        id
    }

    fn declare_other(
        &mut self,
        declaration: &'a TypeDeclarationSyntax,
        strong: bool,
        ty: &'a TypeSyntax,
        scope: ScopeId,
    ) {
        if declaration.type_parameters.is_empty() && !strong {
            let forward = match ty {
                TypeSyntax::Pointer { target, .. } => Some((
                    self.factory.forward_pointer(declaration.name.clone(), false),
                    target.as_ref(),
                )),
                TypeSyntax::ClassOf { class, .. } => Some((
                    self.factory.forward_class_reference(declaration.name.clone()),
                    class.as_ref(),
                )),
                _ => None,
            };
            if let Some((forward, target)) = forward {
                self.declare_type_name(declaration, scope, forward.clone(), Vec::new());
                self.node_types.insert(ty.node(), forward.clone());
                self.work.forward_targets.push(ForwardTarget {
                    ty: forward,
                    target,
                    scope,
                });
                return;
            }
        }

        let type_parameters = self.new_type_parameters(declaration);
        let resolve_in = if type_parameters.is_empty() {
            scope
        } else {
            let generic = self.table.add_scope(ScopeKind::Type, scope);
            self.declare_type_parameters(declaration, &type_parameters, generic);
            generic
        };
        let unknown = self.factory.unknown();
        let id = self.declare_type_name(declaration, scope, unknown, type_parameters);
        self.work.pending.insert(
            id,
            PendingType {
                declaration,
                scope: resolve_in,
            },
        );
    }

    // ========================================================================
    // PASS 2: VALUES AND ROUTINES
    // ========================================================================

    pub(super) fn declare_values(
        &mut self,
        declarations: &'a [DeclarationSyntax],
        scope: ScopeId,
    ) -> Result<(), ResolveError> {
        self.in_scope(scope, |binder| {
            for declaration in declarations {
                match declaration {
                    DeclarationSyntax::Variable(variable) => {
                        let kind = binder.variable_kind();
                        binder.declare_variable(variable, kind)?;
                    }
                    DeclarationSyntax::Constant(constant) => binder.declare_constant(constant)?,
                    DeclarationSyntax::Routine(routine) => binder.declare_routine(routine)?,
                    DeclarationSyntax::Type(_) => {}
                }
            }
            Ok(())
        })
    }

    fn variable_kind(&self) -> VariableKind {
        match self.table.scope(self.scope).kind() {
            ScopeKind::Routine => VariableKind::Local,
            ScopeKind::Type => VariableKind::Field,
            ScopeKind::System | ScopeKind::Unit | ScopeKind::Enum => VariableKind::Global,
        }
    }

    pub(super) fn declare_variable(
        &mut self,
        variable: &VariableSyntax,
        kind: VariableKind,
    ) -> Result<Type, ResolveError> {
        let ty = self.type_of(&variable.ty)?;
        let id = self.table.declare(
            self.scope,
            variable.name.clone(),
            DeclarationKind::Variable(kind),
            ty.clone(),
            Some(variable.node),
        );
        self.declared_at.insert(variable.node, id);
        Ok(ty)
    }

    pub(super) fn declare_constant(&mut self, constant: &ConstantSyntax) -> Result<(), ResolveError> {
        let value = self.type_of(&constant.value)?;
        let ty = match &constant.ty {
            Some(ty) => self.type_of(ty)?,
            None => value,
        };
        let id = self.table.declare(
            self.scope,
            constant.name.clone(),
            DeclarationKind::Constant,
            ty,
            Some(constant.node),
        );
        self.declared_at.insert(constant.node, id);
        Ok(())
    }

    pub(super) fn declare_property(&mut self, property: &'a PropertySyntax) -> Result<(), ResolveError> {
        let ty = self.type_of(&property.ty)?;
        let parameters = self.parameters(&property.parameters)?;
        let id = self.table.declare(
            self.scope,
            property.name.clone(),
            DeclarationKind::Property(PropertyDeclaration {
                parameters,
                is_default: property.is_default,
                is_class: property.is_class,
            }),
            ty,
            Some(property.node),
        );
        self.declared_at.insert(property.node, id);
        for accessor in property.read.iter().chain(&property.write) {
            self.work.accessors.push((self.scope, accessor));
        }
        Ok(())
    }

    pub(super) fn parameters(&mut self, parameters: &[ParameterSyntax]) -> Result<Vec<Parameter>, ResolveError> {
        let mut result = Vec::with_capacity(parameters.len());
        for parameter in parameters {
            let ty = match &parameter.ty {
                Some(ty) => self.type_of(ty)?,
                None => self.factory.untyped(),
            };
            let mut declared = Parameter::new(parameter.name.clone(), ty).with_kind(parameter.kind);
            if parameter.has_default {
                declared = declared.with_default();
            }
            result.push(declared);
        }
        Ok(result)
    }

    fn routine_declaration(&mut self, heading: &RoutineHeadingSyntax) -> Result<RoutineDeclaration, ResolveError> {
        let parameters = self.parameters(&heading.parameters)?;
        let return_type = match (&heading.return_type, heading.kind) {
            (Some(ty), RoutineKind::Function | RoutineKind::Operator) => self.type_of(ty)?,
            _ => self.factory.void(),
        };
        Ok(RoutineDeclaration {
            kind: heading.kind,
            parameters,
            return_type,
            directives: heading.directives,
            is_class: heading.is_class,
            implementation: None,
        })
    }

    /// Declare a routine heading in the current scope.
    pub(super) fn declare_heading(&mut self, heading: &RoutineHeadingSyntax) -> Result<DeclId, ResolveError> {
        let routine = self.routine_declaration(heading)?;
        let ty = self.factory.procedural(
            None,
            ProceduralKind::Routine,
            routine.parameters.clone(),
            routine.return_type.clone(),
        );
        let id = self.table.declare(
            self.scope,
            heading.name.clone(),
            DeclarationKind::Routine(routine),
            ty,
            Some(heading.node),
        );
        self.declared_at.insert(heading.node, id);
        Ok(id)
    }

    /// Declare a routine, or attach an implementation to the heading it
    /// completes, then bind its local declarations.
    fn declare_routine(&mut self, routine: &'a RoutineSyntax) -> Result<(), ResolveError> {
        let (declaration, parent) = match &routine.owner {
            Some(owner) => self.link_method(routine, owner)?,
            None => (self.link_routine(routine, self.scope)?, self.scope),
        };
        self.declared_at.insert(routine.heading.node, declaration);
        let Some(body) = &routine.body else {
            return Ok(());
        };

        let scope = self.table.add_scope(ScopeKind::Routine, parent);
        self.table.set_routine_implementation(declaration, scope);
        self.declare_implicit_variables(routine, declaration, parent, scope);

        self.declare_types(&routine.declarations, scope, &[]);
        self.complete_types()?;
        self.declare_values(&routine.declarations, scope)?;
        self.work.bodies.push((scope, body.as_slice()));
        trace!(routine = %routine.heading.name, scope = scope.index(), "declared routine body");
        Ok(())
    }

    /// `TFoo.Bar`: find the heading inside `TFoo`.
    fn link_method(&mut self, routine: &'a RoutineSyntax, owner: &str) -> Result<(DeclId, ScopeId), ResolveError> {
        let member_scope = self
            .resolve_owner(owner)
            .and_then(|ty| ty.as_struct().and_then(|structure| structure.scope()));
        let Some(member_scope) = member_scope else {
            warn!(owner, routine = %routine.heading.name, "method of an unknown type");
            return Ok((self.link_routine(routine, self.scope)?, self.scope));
        };
        let declaration = self.link_routine(routine, member_scope)?;
        Ok((declaration, member_scope))
    }

    /// The heading in `scope` an implementation completes, or a new
    /// declaration when there is none.
    fn link_routine(&mut self, routine: &'a RoutineSyntax, scope: ScopeId) -> Result<DeclId, ResolveError> {
        let heading = &routine.heading;
        if routine.body.is_some() {
            if let Some(existing) = self.find_heading(heading, scope)? {
                return Ok(existing);
            }
            if routine.owner.is_some() {
                warn!(routine = %heading.name, "method implementation without a declaration");
            }
        }
        self.in_scope(scope, |binder| binder.declare_heading(heading))
    }

    fn find_heading(&mut self, heading: &RoutineHeadingSyntax, scope: ScopeId) -> Result<Option<DeclId>, ResolveError> {
        let key = NameKey::new(&heading.name);
        let candidates: Vec<DeclId> = self
            .table
            .scope(scope)
            .get(&key)
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(|id| {
                self.table.declaration(*id).as_routine().is_some_and(|routine| {
                    routine.implementation.is_none()
                        && routine.parameters.len() == heading.parameters.len()
                })
            })
            .collect();
        if candidates.len() <= 1 {
            return Ok(candidates.first().copied());
        }

        let parameters = self.in_scope(scope, |binder| binder.parameters(&heading.parameters))?;
        let exact = candidates.iter().copied().find(|id| {
            self.table.declaration(*id).as_routine().is_some_and(|routine| {
                routine
                    .parameters
                    .iter()
                    .zip(&parameters)
                    .all(|(declared, written)| declared.ty.is_type(&written.ty))
            })
        });
        Ok(exact.or(candidates.first().copied()))
    }

    /// The struct a method implementation names, e.g. `TOuter.TInner`.
    fn resolve_owner(&self, owner: &str) -> Option<Type> {
        let mut segments = owner.split('.');
        let first = self.table.lookup(self.scope, segments.next()?)?;
        let mut ty = self.table.declaration(first.first()).ty().clone();
        for segment in segments {
            let found = self.table.lookup_member(&ty, segment)?;
            ty = self.table.declaration(found.first()).ty().clone();
        }
        Some(ty)
    }

    /// Parameters, `Self` and `Result` of a routine implementation.
    fn declare_implicit_variables(
        &mut self,
        routine: &RoutineSyntax,
        declaration: DeclId,
        parent: ScopeId,
        scope: ScopeId,
    ) {
        let Some(signature) = self.table.declaration(declaration).as_routine().cloned() else {
            return;
        };
        for (index, parameter) in signature.parameters.iter().enumerate() {
            let written = routine.heading.parameters.get(index);
            let name = written.map_or_else(|| parameter.name.clone(), |written| written.name.clone());
            let id = self.table.declare(
                scope,
                name,
                DeclarationKind::Variable(VariableKind::Parameter),
                parameter.ty.clone(),
                written.map(|written| written.node),
            );
            if let Some(written) = written {
                self.declared_at.insert(written.node, id);
            }
        }

        if let Some(owner) = self.table.scope(parent).owner_type().cloned() {
            self.table.declare(
                scope,
                "Self",
                DeclarationKind::Variable(VariableKind::SelfReference),
                owner,
                None,
            );
        }
        let returns_value = matches!(signature.kind, RoutineKind::Function | RoutineKind::Operator)
            && !signature.return_type.is_void();
        if returns_value {
            self.table.declare(
                scope,
                "Result",
                DeclarationKind::Variable(VariableKind::Result),
                signature.return_type,
                None,
            );
        }
    }
}
