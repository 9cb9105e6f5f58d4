//! Completing forward cells and declaring struct members.

use std::mem;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{trace, warn};

use super::{Binder, PendingStruct, PendingType};
use crate::base::DeclId;
use crate::semantic::error::ResolveError;
use crate::semantic::symbol_table::{VariableKind, IINTERFACE, TCLASS_HELPER_BASE, TOBJECT};
use crate::syntax::{MemberSyntax, StructSyntax, TypeDefinition, TypeSyntax};
use crate::types::{StructDefinition, StructKind, Type};

impl<'a> Binder<'a> {
    /// Complete everything pass 1 left forward, then declare struct members.
    ///
    /// Struct bodies come first so that nothing later reads a forward
    /// struct; pending declarations are forced after forward targets so
    /// that their own references find completed cells.
    pub(super) fn complete_types(&mut self) -> Result<(), ResolveError> {
        self.complete_structs()?;
        self.complete_forward_targets()?;
        self.apply_constraints()?;
        self.force_pending()?;
        self.declare_members()?;
        self.layout_records()?;
        self.resolve_accessors()
    }

    // ========================================================================
    // STRUCT BODIES
    // ========================================================================

    fn complete_structs(&mut self) -> Result<(), ResolveError> {
        let structs = mem::take(&mut self.work.structs);
        for pending in &structs {
            self.in_scope(pending.scope, |binder| binder.complete_struct(pending))?;
        }
        self.complete_unfinished_forwards()?;
        self.work.members.extend(structs);
        Ok(())
    }

    fn complete_struct(&mut self, pending: &PendingStruct<'a>) -> Result<(), ResolveError> {
        let syntax = pending.syntax;
        let mut parents = Vec::with_capacity(syntax.parents.len() + 1);
        for parent in &syntax.parents {
            parents.push(self.type_of(parent)?);
        }

        let definition = match &syntax.extended_type {
            Some(extended) => {
                let extended = self.type_of(extended)?;
                let kind = if self.struct_kind(&extended) == Some(StructKind::Class) {
                    StructKind::ClassHelper
                } else {
                    StructKind::RecordHelper
                };
                if kind == StructKind::ClassHelper && parents.is_empty() {
                    parents.push(self.system_type(TCLASS_HELPER_BASE));
                }
                StructDefinition::helper(kind, pending.scope, extended, parents)
            }
            None => {
                self.add_default_parents(syntax.kind, &mut parents);
                StructDefinition::new(syntax.kind, pending.scope, parents)
            }
        };
        trace!(
            ty = %pending.ty,
            kind = ?definition.kind,
            parents = definition.parents.len(),
            "completing struct"
        );
        self.factory.complete_struct(&pending.ty, definition)?;
        Ok(())
    }

    /// Classes descend from `TObject` and interfaces from `IInterface`
    /// unless their heritage says otherwise.
    fn add_default_parents(&self, kind: StructKind, parents: &mut Vec<Type>) {
        match kind {
            StructKind::Class => {
                let has_class_parent = parents
                    .iter()
                    .any(|parent| self.struct_kind(parent) == Some(StructKind::Class));
                if !has_class_parent {
                    parents.insert(0, self.system_type(TOBJECT));
                }
            }
            StructKind::Interface if parents.is_empty() => {
                parents.push(self.system_type(IINTERFACE));
            }
            _ => {}
        }
    }

    /// Kind of a struct, also while it is still a forward cell.
    fn struct_kind(&self, ty: &Type) -> Option<StructKind> {
        let structure = ty.as_struct()?;
        if !structure.is_forward() {
            return structure.kind();
        }
        let declared = structure.template().unwrap_or(ty.actual());
        self.work.kinds.get(declared).copied()
    }

    /// `TFoo = class;` with no declaration following it.
    fn complete_unfinished_forwards(&mut self) -> Result<(), ResolveError> {
        let forwards = mem::take(&mut self.work.forwards);
        for ((_, name), forward) in forwards {
            warn!(name = name.as_str(), "forward declaration is never completed");
            let mut parents = Vec::new();
            self.add_default_parents(forward.kind, &mut parents);
            self.factory.complete_struct(
                &forward.ty,
                StructDefinition::new(forward.kind, forward.scope, parents),
            )?;
        }
        Ok(())
    }

    fn complete_forward_targets(&mut self) -> Result<(), ResolveError> {
        for forward in mem::take(&mut self.work.forward_targets) {
            let target = self.in_scope(forward.scope, |binder| binder.type_of(forward.target))?;
            if let Some(pointer) = forward.ty.as_pointer() {
                pointer.set_dereferenced_type(target)?;
            } else if let Some(reference) = forward.ty.as_class_reference() {
                reference.set_class_type(target)?;
            }
        }
        Ok(())
    }

    fn apply_constraints(&mut self) -> Result<(), ResolveError> {
        for (parameter, constraints, scope) in mem::take(&mut self.work.constraints) {
            let types = self.in_scope(scope, |binder| binder.type_arguments(constraints))?;
            if let Some(parameter) = parameter.as_type_parameter() {
                parameter.set_constraints(types)?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // PENDING DECLARATIONS
    // ========================================================================

    fn force_pending(&mut self) -> Result<(), ResolveError> {
        let mut pending: Vec<DeclId> = self.work.pending.keys().copied().collect();
        pending.sort();
        for id in pending {
            self.force(id)?;
        }
        Ok(())
    }

    /// Compute a pending declaration's type now. A declaration that is
    /// reached again while computing keeps its `Unknown` placeholder.
    pub(super) fn force(&mut self, id: DeclId) -> Result<(), ResolveError> {
        let Some(pending) = self.work.pending.get(&id).copied() else {
            return Ok(());
        };
        if !self.work.computing.insert(id) {
            warn!(name = %pending.declaration.name, "type declaration refers to itself");
            return Ok(());
        }
        let ty = self.in_scope(pending.scope, |binder| binder.declared_type(pending));
        self.work.computing.remove(&id);
        let ty = ty?;
        self.work.pending.remove(&id);
        trace!(name = %pending.declaration.name, ty = %ty, "computed declared type");
        self.table.set_declaration_type(id, ty);
        Ok(())
    }

    fn declared_type(&mut self, pending: PendingType<'a>) -> Result<Type, ResolveError> {
        let declaration = pending.declaration;
        let TypeDefinition::Type { strong, ty } = &declaration.definition else {
            return Ok(self.factory.unknown());
        };
        let name = declaration.name.clone();
        if matches!(ty, TypeSyntax::Named { .. }) || *strong {
            let aliased = self.type_of(ty)?;
            let alias = if *strong {
                self.factory.strong_alias(name, aliased)?
            } else {
                self.factory.weak_alias(name, aliased)?
            };
            return Ok(alias);
        }
        let declared = self.build_type(ty, Some(name))?;
        self.node_types.insert(ty.node(), declared.clone());
        Ok(declared)
    }

    // ========================================================================
    // MEMBERS
    // ========================================================================

    fn declare_members(&mut self) -> Result<(), ResolveError> {
        for pending in mem::take(&mut self.work.members) {
            let syntax = pending.syntax;
            let fields = self.in_scope(pending.scope, |binder| binder.declare_struct_members(syntax))?;
            let is_record = pending
                .ty
                .as_struct()
                .is_some_and(|structure| structure.kind() == Some(StructKind::Record));
            if is_record {
                self.work.records.insert(pending.ty, fields);
            }
        }
        Ok(())
    }

    /// Declare the members of one struct; returns its instance field types.
    fn declare_struct_members(&mut self, syntax: &'a StructSyntax) -> Result<Vec<Type>, ResolveError> {
        let mut fields = Vec::new();
        for member in &syntax.members {
            match member {
                MemberSyntax::Field(field) => {
                    let ty = self.declare_variable(field, VariableKind::Field)?;
                    if !field.is_class {
                        fields.push(ty);
                    }
                }
                MemberSyntax::Method(heading) => {
                    self.declare_heading(heading)?;
                }
                MemberSyntax::Property(property) => self.declare_property(property)?,
                MemberSyntax::Constant(constant) => self.declare_constant(constant)?,
                MemberSyntax::Type(_) => {}
            }
        }
        Ok(fields)
    }

    /// Records are laid out packed, one field after another. Field lists
    /// are stored first so that specializations of generic records can be
    /// laid out from them.
    fn layout_records(&mut self) -> Result<(), ResolveError> {
        let records = mem::take(&mut self.work.records);
        for (ty, fields) in &records {
            if let Some(structure) = ty.as_struct() {
                structure.set_record_fields(fields.clone())?;
            }
        }
        let mut sizes = FxHashMap::default();
        let mut visiting = FxHashSet::default();
        for ty in records.keys() {
            let size = record_size(ty, &records, &mut sizes, &mut visiting);
            if let Some(structure) = ty.as_struct() {
                structure.set_record_size(size)?;
            }
        }
        Ok(())
    }

    fn resolve_accessors(&mut self) -> Result<(), ResolveError> {
        for (scope, accessor) in mem::take(&mut self.work.accessors) {
            self.in_scope(scope, |binder| binder.resolve_reference(accessor, None))?;
        }
        Ok(())
    }
}

fn record_size(
    ty: &Type,
    records: &IndexMap<Type, Vec<Type>>,
    sizes: &mut FxHashMap<Type, u32>,
    visiting: &mut FxHashSet<Type>,
) -> u32 {
    if let Some(size) = sizes.get(ty) {
        return *size;
    }
    let Some(fields) = records.get(ty) else {
        return ty.size();
    };
    if !visiting.insert(ty.clone()) {
        warn!(record = %ty, "record contains itself");
        return 0;
    }
    let size = fields
        .iter()
        .map(|field| field_size(field, records, sizes, visiting))
        .fold(0u32, u32::saturating_add);
    visiting.remove(ty);
    sizes.insert(ty.clone(), size);
    size
}

/// A field of a record declared in this unit, or of a specialization of
/// one, is laid out from that record's fields rather than a stored size.
fn field_size(
    field: &Type,
    records: &IndexMap<Type, Vec<Type>>,
    sizes: &mut FxHashMap<Type, u32>,
    visiting: &mut FxHashSet<Type>,
) -> u32 {
    let field = field.actual();
    if records.contains_key(field) {
        return record_size(field, records, sizes, visiting);
    }
    let Some(structure) = field.as_struct() else {
        return field.size();
    };
    let Some((template, fields)) = structure
        .template()
        .and_then(|template| records.get_key_value(template))
    else {
        return field.size();
    };
    if !visiting.insert(template.clone()) {
        warn!(record = %template, "record contains itself");
        return 0;
    }
    let context = structure.member_context();
    let size = fields
        .iter()
        .map(|inner| field_size(&inner.specialize(&context), records, sizes, visiting))
        .fold(0u32, u32::saturating_add);
    visiting.remove(template);
    size
}
