#![allow(clippy::unwrap_used)]

use enumset::EnumSet;

use super::*;
use crate::base::{DeclId, NodeId, OccurrenceId, ScopeId, TargetConfig};
use crate::semantic::symbol_table::{
    DeclarationKind, RoutineDeclaration, ScopeKind, SymbolTable, VariableKind,
};
use crate::syntax::RoutineKind;
use crate::types::{
    ImagePart, IntrinsicType, Parameter, ProceduralKind, StructDefinition, StructKind, Type,
    TypeFactory,
};


fn factory() -> TypeFactory {
    TypeFactory::new(TargetConfig::default())
}

/// A table with one unit scope under System.
fn unit_table(factory: &TypeFactory) -> (SymbolTable, ScopeId) {
    let mut table = SymbolTable::new(factory).unwrap();
    let system = table.system_scope();
    let unit = table.add_scope(ScopeKind::Unit, system);
    (table, unit)
}

fn variable(table: &mut SymbolTable, scope: ScopeId, name: &str, ty: Type) -> DeclId {
    let node = NodeId::new(1000 + table.declaration_count());
    table.declare(
        scope,
        name,
        DeclarationKind::Variable(VariableKind::Global),
        ty,
        Some(node),
    )
}

fn routine(
    factory: &TypeFactory,
    table: &mut SymbolTable,
    scope: ScopeId,
    name: &str,
    parameters: Vec<Parameter>,
    return_type: Type,
) -> DeclId {
    let kind = if return_type.is_void() {
        RoutineKind::Procedure
    } else {
        RoutineKind::Function
    };
    let ty = factory.procedural(
        None,
        ProceduralKind::Routine,
        parameters.clone(),
        return_type.clone(),
    );
    let node = NodeId::new(1000 + table.declaration_count());
    table.declare(
        scope,
        name,
        DeclarationKind::Routine(RoutineDeclaration {
            kind,
            parameters,
            return_type,
            directives: EnumSet::new(),
            is_class: false,
            implementation: None,
        }),
        ty,
        Some(node),
    )
}

fn class(
    factory: &TypeFactory,
    table: &mut SymbolTable,
    scope: ScopeId,
    name: &str,
    parents: Vec<Type>,
) -> (Type, ScopeId) {
    let ty = factory.forward_struct(vec![ImagePart::new(name)]);
    let members = table.add_type_scope(scope, ty.clone());
    factory
        .complete_struct(&ty, StructDefinition::new(StructKind::Class, members, parents))
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

fn occurrence(table: &mut SymbolTable, scope: ScopeId, name: &str) -> OccurrenceId {
    let node = NodeId::new(table.occurrences().count());
    table.add_occurrence(node, name, scope, None, Vec::new())
}

fn qualified(table: &mut SymbolTable, scope: ScopeId, qualifier: OccurrenceId, name: &str) -> OccurrenceId {
    let node = NodeId::new(table.occurrences().count());
    table.add_occurrence(node, name, scope, Some(qualifier), Vec::new())
}

fn int(factory: &TypeFactory, intrinsic: IntrinsicType) -> Type {
    factory.get_intrinsic(intrinsic)
}
