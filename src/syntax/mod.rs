//! # Declaration Tree
//!
//! The inbound contract with the tree layer: a parsed compilation unit
//! reduced to what name resolution and typing need. Every node that can be
//! asked for a type or that introduces an occurrence carries a [`NodeId`],
//! allocated by [`NodeIds`] when the tree is built.
//!
//! The tree is immutable once built; the binder only borrows it.
//!
//! [`NodeId`]: crate::base::NodeId

mod expressions;
mod types;
mod unit;

pub use expressions::{
    BinaryOperator, ExpressionSyntax, NameSegment, ReferenceSyntax, StatementSyntax,
    UnaryOperator,
};
pub use types::{
    EnumElementSyntax, MemberSyntax, ParameterSyntax, PropertySyntax, RoutineDirective,
    RoutineHeadingSyntax, RoutineKind, StructSyntax, TypeDeclarationSyntax, TypeDefinition,
    TypeParameterSyntax, TypeSyntax,
};
pub use unit::{
    ConstantSyntax, DeclarationSyntax, NodeIds, RoutineSyntax, UnitSyntax, VariableSyntax,
};
