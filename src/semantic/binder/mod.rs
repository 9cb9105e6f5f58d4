//! # Binder
//!
//! Turns a [`UnitSyntax`] into a [`ResolvedUnit`]: every declaration entered
//! into the symbol table, every forward type completed, every name reference
//! resolved and every expression typed.
//!
//! ## Passes
//!
//! ```text
//! 1. declare   every type, structs/pointers/class references as forward cells
//! 2. complete  struct bodies and forward targets, then members, variables,
//!              constants and routine headings
//! 3. bodies    routine bodies and the initialization section
//! ```
//!
//! Forward cells are completed strictly before anything reads them. Type
//! declarations that are not structs are computed on first reference, so a
//! section may use a type before declaring it.
//!
//! Units listed in a `uses` clause are bound into the same table first with
//! [`Binder::bind_dependency`].

mod bodies;
mod complete;
mod declare;
mod resolved;
mod type_syntax;

pub use resolved::ResolvedUnit;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use super::error::ResolveError;
use super::node_types::{NodeTypes, TypeNode};
use super::resolver::NameResolver;
use super::symbol_table::{DeclarationKind, Resolution, ScopeKind, SymbolTable};
use crate::base::{DeclId, NameKey, NodeId, OccurrenceId, ScopeId};
use crate::syntax::{
    ReferenceSyntax, StatementSyntax, StructSyntax, TypeDeclarationSyntax, TypeSyntax, UnitSyntax,
};
use crate::types::{StructKind, Type, TypeFactory};

/// Binds units against one [`TypeFactory`] into one [`SymbolTable`].
pub struct Binder<'a> {
    factory: &'a TypeFactory,
    table: SymbolTable,
    node_types: NodeTypes,
    declared_at: FxHashMap<NodeId, DeclId>,
    /// Scope that [`TypeNode::create_type`] resolves names in.
    scope: ScopeId,
    units: FxHashMap<NameKey, ScopeId>,
    work: Worklist<'a>,
}

/// Declarations waiting for a later pass.
#[derive(Default)]
struct Worklist<'a> {
    /// Non-struct type declarations, typed on first reference.
    pending: FxHashMap<DeclId, PendingType<'a>>,
    computing: FxHashSet<DeclId>,
    /// `TFoo = class;` not yet followed by its full declaration.
    forwards: IndexMap<(ScopeId, NameKey), ForwardStruct>,
    /// Declared kind of every struct of the unit, readable before completion.
    kinds: FxHashMap<Type, StructKind>,
    structs: Vec<PendingStruct<'a>>,
    members: Vec<PendingStruct<'a>>,
    forward_targets: Vec<ForwardTarget<'a>>,
    constraints: Vec<(Type, &'a [TypeSyntax], ScopeId)>,
    records: IndexMap<Type, Vec<Type>>,
    accessors: Vec<(ScopeId, &'a ReferenceSyntax)>,
    bodies: Vec<(ScopeId, &'a [StatementSyntax])>,
}

#[derive(Clone, Copy)]
struct PendingType<'a> {
    declaration: &'a TypeDeclarationSyntax,
    scope: ScopeId,
}

struct ForwardStruct {
    ty: Type,
    scope: ScopeId,
    declaration: DeclId,
    kind: StructKind,
}

struct PendingStruct<'a> {
    ty: Type,
    scope: ScopeId,
    syntax: &'a StructSyntax,
}

/// `PFoo = ^TFoo` or `TFooClass = class of TFoo`.
struct ForwardTarget<'a> {
    ty: Type,
    target: &'a TypeSyntax,
    scope: ScopeId,
}

impl<'a> Binder<'a> {
    pub fn new(factory: &'a TypeFactory) -> Result<Self, ResolveError> {
        let table = SymbolTable::new(factory)?;
        let scope = table.system_scope();
        Ok(Self {
            factory,
            table,
            node_types: NodeTypes::new(),
            declared_at: FxHashMap::default(),
            scope,
            units: FxHashMap::default(),
            work: Worklist::default(),
        })
    }

    pub fn factory(&self) -> &'a TypeFactory {
        self.factory
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// Scope names are currently resolved in.
    pub fn current_scope(&self) -> ScopeId {
        self.scope
    }

    /// Bind a unit the main unit uses. Its declarations become visible to
    /// later units naming it in their `uses` clause.
    pub fn bind_dependency(&mut self, unit: &'a UnitSyntax) -> Result<ScopeId, ResolveError> {
        self.bind_unit(unit)
    }

    pub fn bind(mut self, unit: &'a UnitSyntax) -> Result<ResolvedUnit, ResolveError> {
        let first_declaration = self.table.declaration_count();
        let scope = self.bind_unit(unit)?;
        Ok(ResolvedUnit::new(
            unit.name.clone(),
            scope,
            self.table,
            self.node_types,
            self.declared_at,
            first_declaration,
        ))
    }

    fn bind_unit(&mut self, unit: &'a UnitSyntax) -> Result<ScopeId, ResolveError> {
        let system = self.table.system_scope();
        let scope = self.table.add_scope(ScopeKind::Unit, system);
        let own = self.table.declare(
            scope,
            unit.name.clone(),
            DeclarationKind::Unit { scope },
            self.factory.unknown(),
            Some(unit.node),
        );
        self.declared_at.insert(unit.node, own);

        for used in &unit.uses {
            let imported = self.units.get(&NameKey::new(&used.name)).copied();
            match imported {
                Some(imported) => self.table.add_used_unit(scope, imported),
                None => debug!(unit = %unit.name, used = %used.name, "used unit is not available"),
            }
            let id = self.table.declare(
                scope,
                used.name.clone(),
                DeclarationKind::UnitImport { scope: imported },
                self.factory.unknown(),
                Some(used.node),
            );
            self.declared_at.insert(used.node, id);
        }
        self.units.insert(NameKey::new(&unit.name), scope);

        debug!(unit = %unit.name, "declaring types");
        self.declare_types(&unit.declarations, scope, &[]);
        debug!(unit = %unit.name, "completing types");
        self.complete_types()?;
        debug!(unit = %unit.name, "declaring values and routines");
        self.declare_values(&unit.declarations, scope)?;
        debug!(unit = %unit.name, "binding bodies");
        self.bind_bodies()?;
        self.in_scope(scope, |binder| binder.bind_statements(&unit.initialization))?;
        debug!(
            unit = %unit.name,
            declarations = self.table.declaration_count(),
            occurrences = self.table.occurrences().count(),
            "bound unit"
        );
        Ok(scope)
    }

    // ========================================================================
    // NODE TYPES
    // ========================================================================

    /// The type of `node`, computed on first request.
    pub fn type_of<N: TypeNode + ?Sized>(&mut self, node: &N) -> Result<Type, ResolveError> {
        let id = node.node_id();
        if let Some(ty) = self.node_types.get(id) {
            return Ok(ty.clone());
        }
        let ty = node.create_type(self)?;
        self.node_types.insert(id, ty.clone());
        Ok(ty)
    }

    fn type_arguments(&mut self, arguments: &[TypeSyntax]) -> Result<Vec<Type>, ResolveError> {
        arguments
            .iter()
            .map(|argument| self.type_of(argument))
            .collect()
    }

    /// Run `f` with names resolving in `scope`.
    fn in_scope<T>(&mut self, scope: ScopeId, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.scope, scope);
        let result = f(self);
        self.scope = saved;
        result
    }

    // ========================================================================
    // NAME REFERENCES
    // ========================================================================

    /// Resolve each segment of `reference` in turn from the current scope.
    /// The last segment is resolved as a call when `arguments` is given.
    pub fn resolve_reference(
        &mut self,
        reference: &ReferenceSyntax,
        arguments: Option<&[Type]>,
    ) -> Result<Option<OccurrenceId>, ResolveError> {
        let last = reference.segments.len().saturating_sub(1);
        let mut qualifier = None;
        for (index, segment) in reference.segments.iter().enumerate() {
            let id = match self.table.occurrence_at(segment.node) {
                Some(id) => id,
                None => {
                    let type_arguments = self.type_arguments(&segment.type_arguments)?;
                    self.table.add_occurrence(
                        segment.node,
                        segment.name.clone(),
                        self.scope,
                        qualifier,
                        type_arguments,
                    )
                }
            };
            let arguments = if index == last { arguments } else { None };
            self.resolve_occurrence(id, arguments)?;
            qualifier = Some(id);
        }
        Ok(qualifier)
    }

    fn resolve_occurrence(
        &mut self,
        id: OccurrenceId,
        arguments: Option<&[Type]>,
    ) -> Result<Option<DeclId>, ResolveError> {
        if self.table.occurrence(id).resolution() == Resolution::Unresolved {
            let candidates = NameResolver::new(&mut self.table, self.factory).candidates(id);
            for declaration in candidates.map(|found| found.declarations).unwrap_or_default() {
                self.force(declaration)?;
            }
        }
        let mut resolver = NameResolver::new(&mut self.table, self.factory);
        Ok(match arguments {
            Some(arguments) => resolver.resolve_call(id, arguments),
            None => resolver.resolve(id),
        })
    }

    /// Declared type of a System scope type, `Unknown` if absent.
    fn system_type(&self, name: &str) -> Type {
        let system = self.table.system_scope();
        self.table
            .lookup_in_scope(system, &NameKey::new(name))
            .map(|found| self.table.declaration(found.first()).ty().clone())
            .unwrap_or_else(|| self.factory.unknown())
    }
}

#[cfg(test)]
mod tests;
