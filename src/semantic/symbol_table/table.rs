use rustc_hash::FxHashMap;
use tracing::trace;

use super::declaration::{Declaration, DeclarationKind};
use super::occurrence::{Occurrence, Resolution};
use super::scope::{Scope, ScopeKind};
use super::system;
use crate::base::{DeclId, Name, NameKey, NodeId, OccurrenceId, ScopeId};
use crate::types::{Type, TypeError, TypeFactory};

/// Owns every scope, declaration and occurrence of one unit.
///
/// Ids handed out by a table are only meaningful for that table.
pub struct SymbolTable {
    /// Arena storage; `ScopeId` indexes it. Index 0 is the System scope.
    pub(super) scopes: Vec<Scope>,
    pub(super) declarations: Vec<Declaration>,
    pub(super) occurrences: Vec<Occurrence>,
    occurrences_by_node: FxHashMap<NodeId, OccurrenceId>,
}

impl SymbolTable {
    /// A table holding only the System scope.
    pub fn new(factory: &TypeFactory) -> Result<Self, TypeError> {
        let mut table = Self {
            scopes: vec![Scope::new(ScopeKind::System, None, None)],
            declarations: Vec::new(),
            occurrences: Vec::new(),
            occurrences_by_node: FxHashMap::default(),
        };
        system::populate(&mut table, factory)?;
        Ok(table)
    }

    pub fn system_scope(&self) -> ScopeId {
        ScopeId::new(0)
    }

    // ========================================================================
    // SCOPES
    // ========================================================================

    pub fn add_scope(&mut self, kind: ScopeKind, parent: ScopeId) -> ScopeId {
        let id = ScopeId::new(self.scopes.len());
        self.scopes.push(Scope::new(kind, Some(parent), None));
        id
    }

    /// A member scope for `owner`.
    pub fn add_type_scope(&mut self, parent: ScopeId, owner: Type) -> ScopeId {
        let id = ScopeId::new(self.scopes.len());
        self.scopes
            .push(Scope::new(ScopeKind::Type, Some(parent), Some(owner)));
        id
    }

    pub fn set_scope_owner(&mut self, scope: ScopeId, owner: Type) {
        self.scopes[scope.index()].set_owner_type(owner);
    }

    pub fn add_used_unit(&mut self, scope: ScopeId, unit: ScopeId) {
        self.scopes[scope.index()].add_used_unit(unit);
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    // ========================================================================
    // DECLARATIONS
    // ========================================================================

    pub fn declare(
        &mut self,
        scope: ScopeId,
        name: impl Into<Name>,
        kind: DeclarationKind,
        ty: Type,
        node: Option<NodeId>,
    ) -> DeclId {
        let name = name.into();
        let id = DeclId::new(self.declarations.len());
        trace!(scope = scope.index(), name = %name, ty = %ty, "declare");
        self.scopes[scope.index()].insert(NameKey::new(&name), id);
        self.declarations
            .push(Declaration::new(name, kind, ty, scope, node));
        id
    }

    /// Make an existing declaration visible in one more scope, as enum
    /// elements are in the scope enclosing their type.
    pub fn expose(&mut self, scope: ScopeId, id: DeclId) {
        let key = NameKey::new(self.declarations[id.index()].name());
        self.scopes[scope.index()].insert(key, id);
    }

    pub fn declaration(&self, id: DeclId) -> &Declaration {
        &self.declarations[id.index()]
    }

    pub fn declarations(&self) -> impl Iterator<Item = (DeclId, &Declaration)> {
        self.declarations
            .iter()
            .enumerate()
            .map(|(index, declaration)| (DeclId::new(index), declaration))
    }

    pub fn declaration_count(&self) -> usize {
        self.declarations.len()
    }

    /// Replace a placeholder type once the declaration's type is known.
    pub(crate) fn set_declaration_type(&mut self, id: DeclId, ty: Type) {
        self.declarations[id.index()].set_type(ty);
    }

    pub(crate) fn set_routine_implementation(&mut self, id: DeclId, scope: ScopeId) {
        if let DeclarationKind::Routine(routine) = self.declarations[id.index()].kind_mut() {
            routine.implementation = Some(scope);
        }
    }

    // ========================================================================
    // OCCURRENCES
    // ========================================================================

    pub fn add_occurrence(
        &mut self,
        node: NodeId,
        name: impl Into<Name>,
        scope: ScopeId,
        qualifier: Option<OccurrenceId>,
        type_arguments: Vec<Type>,
    ) -> OccurrenceId {
        self.push_occurrence(Occurrence::new(
            node,
            name.into(),
            scope,
            qualifier,
            None,
            type_arguments,
        ))
    }

    /// An occurrence looked up among the members of `receiver`.
    pub fn add_member_occurrence(
        &mut self,
        node: NodeId,
        name: impl Into<Name>,
        scope: ScopeId,
        receiver: Type,
        type_arguments: Vec<Type>,
    ) -> OccurrenceId {
        self.push_occurrence(Occurrence::new(
            node,
            name.into(),
            scope,
            None,
            Some(receiver),
            type_arguments,
        ))
    }

    fn push_occurrence(&mut self, occurrence: Occurrence) -> OccurrenceId {
        let id = OccurrenceId::new(self.occurrences.len());
        self.occurrences_by_node.insert(occurrence.node(), id);
        self.occurrences.push(occurrence);
        id
    }

    pub fn occurrence(&self, id: OccurrenceId) -> &Occurrence {
        &self.occurrences[id.index()]
    }

    pub fn occurrences(&self) -> impl Iterator<Item = (OccurrenceId, &Occurrence)> {
        self.occurrences
            .iter()
            .enumerate()
            .map(|(index, occurrence)| (OccurrenceId::new(index), occurrence))
    }

    /// The occurrence introduced by a name segment node.
    pub fn occurrence_at(&self, node: NodeId) -> Option<OccurrenceId> {
        self.occurrences_by_node.get(&node).copied()
    }

    pub(crate) fn begin_resolution(&mut self, id: OccurrenceId) {
        self.occurrences[id.index()].set_resolution(Resolution::Resolving);
    }

    /// Record the outcome of resolving `id`; the declaration gains a usage.
    pub(crate) fn finish_resolution(&mut self, id: OccurrenceId, declaration: Option<DeclId>, ty: Type) {
        let occurrence = &mut self.occurrences[id.index()];
        occurrence.set_type(ty);
        let Some(declaration) = declaration else {
            occurrence.set_resolution(Resolution::NotFound);
            return;
        };
        occurrence.set_resolution(Resolution::Resolved(declaration));
        let target = &mut self.declarations[declaration.index()];
        if target.is_self_reference() {
            occurrence.set_self();
        }
        target.add_usage(id);
    }
}

impl std::fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolTable")
            .field("scopes", &self.scopes.len())
            .field("declarations", &self.declarations.len())
            .field("occurrences", &self.occurrences.len())
            .finish()
    }
}
