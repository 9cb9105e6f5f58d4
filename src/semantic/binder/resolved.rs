use rustc_hash::FxHashMap;

use crate::base::{DeclId, Name, NodeId, OccurrenceId, ScopeId};
use crate::semantic::node_types::NodeTypes;
use crate::semantic::symbol_table::{
    Declaration, DeclarationKind, LookupResult, Occurrence, RoutineDeclaration, SymbolTable,
    VariableKind,
};
use crate::syntax::RoutineDirective;
use crate::types::Type;

/// A fully bound unit: its symbol table plus the type of every node.
#[derive(Debug)]
pub struct ResolvedUnit {
    name: Name,
    scope: ScopeId,
    table: SymbolTable,
    node_types: NodeTypes,
    declared_at: FxHashMap<NodeId, DeclId>,
    /// Declarations before this index belong to System or to used units.
    first_declaration: usize,
}

impl ResolvedUnit {
    pub(super) fn new(
        name: Name,
        scope: ScopeId,
        table: SymbolTable,
        node_types: NodeTypes,
        declared_at: FxHashMap<NodeId, DeclId>,
        first_declaration: usize,
    ) -> Self {
        Self {
            name,
            scope,
            table,
            node_types,
            declared_at,
            first_declaration,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Scope holding the unit's own top-level declarations.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    pub fn node_types(&self) -> &NodeTypes {
        &self.node_types
    }

    /// Type of an expression, type expression or name segment.
    pub fn type_of(&self, node: NodeId) -> Option<&Type> {
        self.node_types
            .get(node)
            .or_else(|| self.occurrence_at(node).and_then(Occurrence::ty))
    }

    pub fn occurrence_at(&self, node: NodeId) -> Option<&Occurrence> {
        self.table
            .occurrence_at(node)
            .map(|id| self.table.occurrence(id))
    }

    /// The declaration a name segment refers to, or the one a declaring
    /// node introduces.
    pub fn declaration_of(&self, node: NodeId) -> Option<DeclId> {
        match self.occurrence_at(node) {
            Some(occurrence) => occurrence.declaration(),
            None => self.declared_at.get(&node).copied(),
        }
    }

    pub fn declaration(&self, id: DeclId) -> &Declaration {
        self.table.declaration(id)
    }

    pub fn usages(&self, id: DeclId) -> &[OccurrenceId] {
        self.table.declaration(id).usages()
    }

    pub fn is_used(&self, id: DeclId) -> bool {
        !self.usages(id).is_empty()
    }

    /// Resolve `name` as if written at the top level of the unit.
    pub fn lookup(&self, name: &str) -> Option<LookupResult> {
        self.table.lookup(self.scope, name)
    }

    /// The type a top-level type name declares.
    pub fn find_type(&self, name: &str) -> Option<&Type> {
        let found = self.lookup(name)?;
        let declaration = self.table.declaration(found.first());
        declaration.is_type().then(|| declaration.ty())
    }

    /// Declarations of this unit that nothing refers to.
    ///
    /// Unit names, imports, the implicit `Self` and `Result`, overrides and
    /// operators are never reported.
    pub fn unused_declarations(&self) -> Vec<DeclId> {
        self.table
            .declarations()
            .skip(self.first_declaration)
            .filter(|(_, declaration)| declaration.node().is_some())
            .filter(|(_, declaration)| declaration.usages().is_empty())
            .filter(|(_, declaration)| may_be_unused(declaration))
            .map(|(id, _)| id)
            .collect()
    }
}

fn may_be_unused(declaration: &Declaration) -> bool {
    match declaration.kind() {
        DeclarationKind::Unit { .. } | DeclarationKind::UnitImport { .. } => false,
        DeclarationKind::Variable(VariableKind::SelfReference | VariableKind::Result) => false,
        DeclarationKind::Routine(routine) => !is_dispatched(routine),
        _ => true,
    }
}

/// Routines reached without naming them.
fn is_dispatched(routine: &RoutineDeclaration) -> bool {
    routine.is_operator() || routine.directives.contains(RoutineDirective::Override)
}
