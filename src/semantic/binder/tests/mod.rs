#![allow(clippy::unwrap_used)]

use once_cell::sync::Lazy;

use super::*;
use crate::base::TargetConfig;
use crate::base::NodeId;
use crate::syntax::{
    DeclarationSyntax, ExpressionSyntax, MemberSyntax, NodeIds, RoutineHeadingSyntax,
    StructSyntax, TypeDeclarationSyntax, TypeSyntax, VariableSyntax,
};
use crate::types::{IntrinsicType, StructKind, Type, TypeFactory};

mod tests_routines;

static FACTORY: Lazy<TypeFactory> = Lazy::new(|| TypeFactory::new(TargetConfig::default()));

fn bind(unit: &UnitSyntax) -> ResolvedUnit {
    Binder::new(&FACTORY).unwrap().bind(unit).unwrap()
}

fn intrinsic(intrinsic: IntrinsicType) -> Type {
    FACTORY.get_intrinsic(intrinsic)
}

fn field(ids: &mut NodeIds, name: &str, ty: &str) -> MemberSyntax {
    MemberSyntax::Field(variable_syntax(ids, name, ty))
}

fn variable(ids: &mut NodeIds, name: &str, ty: &str) -> DeclarationSyntax {
    DeclarationSyntax::Variable(variable_syntax(ids, name, ty))
}

fn variable_syntax(ids: &mut NodeIds, name: &str, ty: &str) -> VariableSyntax {
    let ty = TypeSyntax::named(ids, ty);
    VariableSyntax::new(ids, name, ty)
}

fn structure(
    ids: &mut NodeIds,
    name: &str,
    kind: StructKind,
    parents: &[&str],
    members: Vec<MemberSyntax>,
) -> TypeDeclarationSyntax {
    let mut syntax = StructSyntax::new(ids, kind);
    for parent in parents {
        let parent = TypeSyntax::named(ids, parent);
        syntax = syntax.with_parent(parent);
    }
    for member in members {
        syntax = syntax.with_member(member);
    }
    TypeDeclarationSyntax::structure(ids, name, syntax)
}

fn class(ids: &mut NodeIds, name: &str, parents: &[&str], members: Vec<MemberSyntax>) -> TypeDeclarationSyntax {
    structure(ids, name, StructKind::Class, parents, members)
}

fn record(ids: &mut NodeIds, name: &str, members: Vec<MemberSyntax>) -> TypeDeclarationSyntax {
    structure(ids, name, StructKind::Record, &[], members)
}

fn function(ids: &mut NodeIds, name: &str, returns: &str) -> RoutineHeadingSyntax {
    let returns = TypeSyntax::named(ids, returns);
    RoutineHeadingSyntax::function(ids, name, returns)
}

/// Declared type of a top-level type name.
fn type_named(resolved: &ResolvedUnit, name: &str) -> Type {
    resolved.find_type(name).unwrap().clone()
}

/// Declared type of a top-level variable, constant or routine.
fn value_type(resolved: &ResolvedUnit, name: &str) -> Type {
    let found = resolved.lookup(name).unwrap();
    resolved.declaration(found.first()).ty().clone()
}

/// Node of the last name segment of a name expression.
fn last_segment(expression: &ExpressionSyntax) -> NodeId {
    match expression {
        ExpressionSyntax::Name { reference, .. } => reference.last().unwrap().node,
        ExpressionSyntax::Member { segment, .. } => segment.node,
        other => panic!("not a name: {other:?}"),
    }
}
