//! Declaration tree builders.

use delphi::semantic::{Binder, ResolvedUnit};
use delphi::syntax::{
    DeclarationSyntax, ExpressionSyntax, MemberSyntax, NodeIds, ParameterSyntax,
    RoutineHeadingSyntax, RoutineKind, RoutineSyntax, StatementSyntax, StructSyntax,
    TypeDeclarationSyntax, TypeSyntax, UnitSyntax, VariableSyntax,
};
use delphi::types::{StructKind, Type, TypeFactory};

use super::factories::WIN32;

pub fn bind(unit: &UnitSyntax) -> ResolvedUnit {
    bind_with(&WIN32, unit)
}

pub fn bind_with(factory: &TypeFactory, unit: &UnitSyntax) -> ResolvedUnit {
    Binder::new(factory).unwrap().bind(unit).unwrap()
}

pub fn named(ids: &mut NodeIds, name: &str) -> TypeSyntax {
    TypeSyntax::named(ids, name)
}

pub fn variable(ids: &mut NodeIds, name: &str, ty: &str) -> DeclarationSyntax {
    let ty = named(ids, ty);
    DeclarationSyntax::Variable(VariableSyntax::new(ids, name, ty))
}

pub fn field(ids: &mut NodeIds, name: &str, ty: &str) -> MemberSyntax {
    let ty = named(ids, ty);
    MemberSyntax::Field(VariableSyntax::new(ids, name, ty))
}

pub fn parameter(ids: &mut NodeIds, name: &str, ty: &str) -> ParameterSyntax {
    let ty = named(ids, ty);
    ParameterSyntax::new(ids, name, ty)
}

/// `Name(Parameters)` as a procedure with an empty body.
pub fn procedure(ids: &mut NodeIds, name: &str, parameters: &[(&str, &str)]) -> DeclarationSyntax {
    let mut heading = RoutineHeadingSyntax::procedure(ids, name);
    for (parameter_name, ty) in parameters {
        let parameter = parameter(ids, parameter_name, ty);
        heading = heading.with_parameter(parameter);
    }
    DeclarationSyntax::Routine(RoutineSyntax::new(ids, heading))
}

/// `class operator Implicit(Value: From): To`
pub fn implicit_operator(ids: &mut NodeIds, from: &str, to: &str) -> MemberSyntax {
    let value = parameter(ids, "Value", from);
    let returns = named(ids, to);
    let heading = RoutineHeadingSyntax::new(ids, "Implicit", RoutineKind::Operator)
        .with_parameter(value)
        .returning(returns);
    MemberSyntax::Method(heading)
}

pub fn structure(
    ids: &mut NodeIds,
    name: &str,
    kind: StructKind,
    parents: &[&str],
    members: Vec<MemberSyntax>,
) -> DeclarationSyntax {
    let mut syntax = StructSyntax::new(ids, kind);
    for parent in parents {
        let parent = named(ids, parent);
        syntax = syntax.with_parent(parent);
    }
    for member in members {
        syntax = syntax.with_member(member);
    }
    DeclarationSyntax::Type(TypeDeclarationSyntax::structure(ids, name, syntax))
}

pub fn class(ids: &mut NodeIds, name: &str, parents: &[&str]) -> DeclarationSyntax {
    structure(ids, name, StructKind::Class, parents, Vec::new())
}

/// A unit whose initialization section evaluates `statements`.
pub fn unit(
    ids: &mut NodeIds,
    name: &str,
    uses: &[&str],
    declarations: Vec<DeclarationSyntax>,
    statements: Vec<ExpressionSyntax>,
) -> UnitSyntax {
    let mut unit = UnitSyntax::new(ids, name);
    for used in uses {
        unit = unit.using(ids, used);
    }
    for declaration in declarations {
        unit = unit.with(declaration);
    }
    for statement in statements {
        unit = unit.with_initialization(StatementSyntax::Expression(statement));
    }
    unit
}

/// `Callee(Arguments)`
pub fn call(ids: &mut NodeIds, callee: &str, arguments: Vec<ExpressionSyntax>) -> ExpressionSyntax {
    let callee = ExpressionSyntax::name(ids, callee);
    ExpressionSyntax::call(ids, callee, arguments)
}

pub fn declared_type(resolved: &ResolvedUnit, name: &str) -> Type {
    let found = resolved
        .lookup(name)
        .unwrap_or_else(|| panic!("expected '{name}' to be declared"));
    resolved.declaration(found.first()).ty().clone()
}
