//! Per-unit cache of node types.
//!
//! A node's type is computed by its [`TypeNode`] implementation the first
//! time it is asked for and served from the cache afterwards, so a node
//! computes its type at most once even when queried recursively by its
//! parents.

use rustc_hash::FxHashMap;

use super::binder::Binder;
use super::error::ResolveError;
use crate::base::NodeId;
use crate::types::Type;

/// A tree node that has a type.
pub trait TypeNode {
    fn node_id(&self) -> NodeId;

    /// Compute the type. May query child nodes through the binder, which
    /// also supplies the enclosing scope.
    fn create_type(&self, binder: &mut Binder<'_>) -> Result<Type, ResolveError>;
}

#[derive(Debug, Default, Clone)]
pub struct NodeTypes {
    types: FxHashMap<NodeId, Type>,
}

impl NodeTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: NodeId) -> Option<&Type> {
        self.types.get(&node)
    }

    pub fn insert(&mut self, node: NodeId, ty: Type) {
        self.types.insert(node, ty);
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.types.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
