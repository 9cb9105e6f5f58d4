use tracing::trace;

use super::overloads::OverloadSet;
use crate::base::{DeclId, NameKey, OccurrenceId};
use crate::semantic::symbol_table::{
    DeclarationKind, LookupResult, Resolution, SymbolTable,
};
use crate::types::{SpecializationContext, Type, TypeFactory, TypeKind};

/// Binds name occurrences to declarations.
///
/// All resolution logic lives here; the symbol table only stores the
/// outcome. Resolving an occurrence a second time returns the first answer
/// without recording another usage.
pub struct NameResolver<'a> {
    table: &'a mut SymbolTable,
    factory: &'a TypeFactory,
}

impl<'a> NameResolver<'a> {
    pub fn new(table: &'a mut SymbolTable, factory: &'a TypeFactory) -> Self {
        Self { table, factory }
    }

    pub fn table(&self) -> &SymbolTable {
        self.table
    }

    // ============================================================
    // Primary Resolution API
    // ============================================================

    /// Resolve a reference that is not a call.
    pub fn resolve(&mut self, id: OccurrenceId) -> Option<DeclId> {
        self.resolve_with(id, &[])
    }

    /// Resolve the callee of a call, choosing among overloads by the
    /// argument types.
    pub fn resolve_call(&mut self, id: OccurrenceId, arguments: &[Type]) -> Option<DeclId> {
        self.resolve_with(id, arguments)
    }

    fn resolve_with(&mut self, id: OccurrenceId, arguments: &[Type]) -> Option<DeclId> {
        match self.table.occurrence(id).resolution() {
            Resolution::Resolved(declaration) => return Some(declaration),
            Resolution::NotFound | Resolution::Resolving => return None,
            Resolution::Unresolved => {}
        }
        if let Some(qualifier) = self.table.occurrence(id).qualifier() {
            self.resolve(qualifier);
        }
        self.table.begin_resolution(id);

        let Some(found) = self.candidates(id) else {
            trace!(name = %self.table.occurrence(id).name(), "unresolved occurrence");
            let unknown = self.factory.unknown();
            self.table.finish_resolution(id, None, unknown);
            return None;
        };
        let Some(chosen) =
            OverloadSet::new(self.table, &found.declarations, found.owner.as_ref())
                .disambiguate(arguments)
        else {
            let unknown = self.factory.unknown();
            self.table.finish_resolution(id, None, unknown);
            return None;
        };

        let ty = self.occurrence_type(id, chosen, found.owner.as_ref());
        trace!(
            name = %self.table.occurrence(id).name(),
            declaration = chosen.index(),
            ty = %ty,
            "resolved occurrence"
        );
        self.table.finish_resolution(id, Some(chosen), ty);
        Some(chosen)
    }

    /// Declarations `id` may refer to, without recording anything.
    ///
    /// A qualifier naming a unit restricts the search to what that unit
    /// declares; any other qualifier searches the members of its type.
    pub fn candidates(&self, id: OccurrenceId) -> Option<LookupResult> {
        let occurrence = self.table.occurrence(id);
        if let Some(qualifier) = occurrence.qualifier() {
            let qualifier = self.table.occurrence(qualifier);
            let declaration = self.table.declaration(qualifier.declaration()?);
            if let Some(scope) = declaration.unit_scope() {
                let key = NameKey::new(occurrence.name());
                return self
                    .table
                    .scope(scope)
                    .get(&key)
                    .map(|declarations| LookupResult {
                        declarations: declarations.to_vec(),
                        owner: None,
                    });
            }
            return self.table.lookup_member(qualifier.ty()?, occurrence.name());
        }
        if let Some(receiver) = occurrence.receiver() {
            return self.table.lookup_member(receiver, occurrence.name());
        }
        self.table.lookup(occurrence.scope(), occurrence.name())
    }

    // ============================================================
    // Occurrence Types
    // ============================================================

    fn occurrence_type(&self, id: OccurrenceId, declaration: DeclId, owner: Option<&Type>) -> Type {
        let occurrence = self.table.occurrence(id);
        let is_constructor = self
            .table
            .declaration(declaration)
            .as_routine()
            .is_some_and(|routine| routine.is_constructor());
        if is_constructor {
            let receiver = occurrence
                .qualifier()
                .and_then(|qualifier| self.table.occurrence(qualifier).ty())
                .or(occurrence.receiver())
                .and_then(constructed_type);
            if let Some(constructed) = receiver {
                return constructed;
            }
        }
        self.declaration_type(declaration, owner, occurrence.type_arguments())
    }

    /// The type a reference to `declaration` has.
    ///
    /// Type names denote a `TypeType`; routine names their return type, or
    /// the constructed struct for constructors. Members found through a
    /// specialized struct are specialized with it.
    pub fn declaration_type(&self, declaration: DeclId, owner: Option<&Type>, type_arguments: &[Type]) -> Type {
        let declaration = self.table.declaration(declaration);
        let context = owner
            .and_then(Type::as_struct)
            .map(|structure| structure.member_context())
            .unwrap_or_default();
        match declaration.kind() {
            DeclarationKind::Unit { .. } | DeclarationKind::UnitImport { .. } => {
                self.factory.unknown()
            }
            DeclarationKind::Type { type_parameters } => {
                let mut ty = declaration.ty().specialize(&context);
                if !type_arguments.is_empty() {
                    let arguments = SpecializationContext::from_pairs(type_parameters, type_arguments);
                    ty = ty.specialize(&arguments);
                }
                self.factory.type_type(ty)
            }
            DeclarationKind::TypeParameter => {
                self.factory.type_type(declaration.ty().specialize(&context))
            }
            DeclarationKind::Variable(_)
            | DeclarationKind::Constant
            | DeclarationKind::EnumElement { .. }
            | DeclarationKind::Property(_) => declaration.ty().specialize(&context),
            DeclarationKind::Routine(routine) => {
                if routine.is_constructor() {
                    let owner = owner
                        .or_else(|| self.table.scope(declaration.scope()).owner_type())
                        .cloned();
                    return owner.unwrap_or_else(|| self.factory.unknown());
                }
                routine.return_type.specialize(&context)
            }
        }
    }
}

/// `TFoo.Create` constructs a `TFoo`, whichever ancestor declares `Create`.
fn constructed_type(receiver: &Type) -> Option<Type> {
    match receiver.actual().kind() {
        TypeKind::TypeType(type_type) => Some(type_type.ty().clone()),
        TypeKind::ClassReference(reference) => reference.class_type().cloned(),
        _ => None,
    }
}
