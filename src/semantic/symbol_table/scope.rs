use indexmap::IndexMap;

use crate::base::{DeclId, NameKey, ScopeId};
use crate::types::Type;

/// What introduced a scope. Decides the lookup order through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// Intrinsics and language roots; parent of every unit scope.
    System,
    Unit,
    /// Members of a struct.
    Type,
    /// Elements of an enumerated type.
    Enum,
    /// Parameters and locals of a routine implementation.
    Routine,
}

/// A lexical scope. Never owns its parent, only references it.
#[derive(Debug)]
pub struct Scope {
    kind: ScopeKind,
    parent: Option<ScopeId>,
    /// Overloads of a name share one entry.
    names: IndexMap<NameKey, Vec<DeclId>>,
    declarations: Vec<DeclId>,
    owner_type: Option<Type>,
    used_units: Vec<ScopeId>,
}

impl Scope {
    pub(super) fn new(kind: ScopeKind, parent: Option<ScopeId>, owner_type: Option<Type>) -> Self {
        Self {
            kind,
            parent,
            names: IndexMap::new(),
            declarations: Vec::new(),
            owner_type,
            used_units: Vec::new(),
        }
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    /// Struct whose members a `Type` scope declares.
    pub fn owner_type(&self) -> Option<&Type> {
        self.owner_type.as_ref()
    }

    /// Exported scopes of the units named in a `uses` clause, in order.
    pub fn used_units(&self) -> &[ScopeId] {
        &self.used_units
    }

    /// Declarations of this scope in declaration order.
    pub fn declaration_ids(&self) -> impl Iterator<Item = DeclId> + '_ {
        self.declarations.iter().copied()
    }

    pub fn get(&self, key: &NameKey) -> Option<&[DeclId]> {
        self.names.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub(super) fn insert(&mut self, key: NameKey, id: DeclId) {
        self.names.entry(key).or_default().push(id);
        self.declarations.push(id);
    }

    pub(super) fn add_used_unit(&mut self, unit: ScopeId) {
        self.used_units.push(unit);
    }

    pub(super) fn set_owner_type(&mut self, owner: Type) {
        self.owner_type = Some(owner);
    }
}
