use crate::base::{DeclId, Name, NodeId, OccurrenceId, ScopeId};
use crate::types::Type;

/// Resolution state of one occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resolution {
    Unresolved,
    /// Lookup in progress; guards against re-entrant resolution.
    Resolving,
    Resolved(DeclId),
    NotFound,
}

/// One use of a name in source.
///
/// `a.b.c` is three occurrences; each links to the one before it through
/// `qualifier` and is looked up in the context that qualifier resolves to.
#[derive(Debug)]
pub struct Occurrence {
    node: NodeId,
    name: Name,
    scope: ScopeId,
    qualifier: Option<OccurrenceId>,
    receiver: Option<Type>,
    type_arguments: Vec<Type>,
    resolution: Resolution,
    ty: Option<Type>,
    is_self: bool,
}

impl Occurrence {
    pub(super) fn new(
        node: NodeId,
        name: Name,
        scope: ScopeId,
        qualifier: Option<OccurrenceId>,
        receiver: Option<Type>,
        type_arguments: Vec<Type>,
    ) -> Self {
        Self {
            node,
            name,
            scope,
            qualifier,
            receiver,
            type_arguments,
            resolution: Resolution::Unresolved,
            ty: None,
            is_self: false,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Lexical scope at the reference site.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    pub fn qualifier(&self) -> Option<OccurrenceId> {
        self.qualifier
    }

    /// Type of the expression left of the dot when the qualifier is not a
    /// plain name, as in `GetList().Count`.
    pub fn receiver(&self) -> Option<&Type> {
        self.receiver.as_ref()
    }

    /// Generic arguments written on this segment (`TList<Integer>`).
    pub fn type_arguments(&self) -> &[Type] {
        &self.type_arguments
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn declaration(&self) -> Option<DeclId> {
        match self.resolution {
            Resolution::Resolved(id) => Some(id),
            _ => None,
        }
    }

    /// Type of the named entity at this site; set once resolution finishes.
    pub fn ty(&self) -> Option<&Type> {
        self.ty.as_ref()
    }

    /// True when the name denotes `Self`.
    pub fn is_self(&self) -> bool {
        self.is_self
    }

    pub(super) fn set_resolution(&mut self, resolution: Resolution) {
        self.resolution = resolution;
    }

    pub(super) fn set_type(&mut self, ty: Type) {
        self.ty = Some(ty);
    }

    pub(super) fn set_self(&mut self) {
        self.is_self = true;
    }
}
