#![allow(clippy::unwrap_used)]

use super::*;
use crate::base::{DeclId, NodeId, ScopeId, TargetConfig};
use crate::types::{ImagePart, StructDefinition, StructKind, Type, TypeFactory};

mod tests_system;

fn factory() -> TypeFactory {
    TypeFactory::new(TargetConfig::default())
}

fn table(factory: &TypeFactory) -> SymbolTable {
    SymbolTable::new(factory).unwrap()
}

fn unit_scope(table: &mut SymbolTable) -> ScopeId {
    let system = table.system_scope();
    table.add_scope(ScopeKind::Unit, system)
}

/// A complete struct declared in `scope`, with its member scope.
fn declare_struct(
    factory: &TypeFactory,
    table: &mut SymbolTable,
    scope: ScopeId,
    name: &str,
    kind: StructKind,
    parents: Vec<Type>,
) -> (Type, ScopeId) {
    let ty = factory.forward_struct(vec![ImagePart::new(name)]);
    let members = table.add_type_scope(scope, ty.clone());
    factory
        .complete_struct(&ty, StructDefinition::new(kind, members, parents))
        .unwrap();
    table.declare(
        scope,
        name,
        DeclarationKind::Type {
            type_parameters: Vec::new(),
        },
        ty.clone(),
        None,
    );
    (ty, members)
}

fn declare_variable(table: &mut SymbolTable, scope: ScopeId, name: &str, ty: Type, node: usize) -> DeclId {
    table.declare(
        scope,
        name,
        DeclarationKind::Variable(VariableKind::Global),
        ty,
        Some(NodeId::new(node)),
    )
}
