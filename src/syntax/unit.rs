//! Compilation units and their top-level declarations.

use super::expressions::{ExpressionSyntax, NameSegment, StatementSyntax};
use super::types::{RoutineHeadingSyntax, TypeDeclarationSyntax, TypeSyntax};
use crate::base::{Name, NodeId};

/// Allocates the node ids of one tree.
#[derive(Debug, Default)]
pub struct NodeIds {
    next: usize,
}

impl NodeIds {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> NodeId {
        let id = NodeId::new(self.next);
        self.next += 1;
        id
    }
}

/// A `unit` (or program) after parsing.
#[derive(Debug, Clone)]
pub struct UnitSyntax {
    pub node: NodeId,
    pub name: Name,
    /// `uses` clause entries in source order.
    pub uses: Vec<NameSegment>,
    pub declarations: Vec<DeclarationSyntax>,
    pub initialization: Vec<StatementSyntax>,
}

impl UnitSyntax {
    pub fn new(ids: &mut NodeIds, name: &str) -> Self {
        Self {
            node: ids.next(),
            name: name.into(),
            uses: Vec::new(),
            declarations: Vec::new(),
            initialization: Vec::new(),
        }
    }

    pub fn using(mut self, ids: &mut NodeIds, unit: &str) -> Self {
        self.uses.push(NameSegment::new(ids, unit));
        self
    }

    pub fn with(mut self, declaration: DeclarationSyntax) -> Self {
        self.declarations.push(declaration);
        self
    }

    pub fn with_type(self, declaration: TypeDeclarationSyntax) -> Self {
        self.with(DeclarationSyntax::Type(declaration))
    }

    pub fn with_initialization(mut self, statement: StatementSyntax) -> Self {
        self.initialization.push(statement);
        self
    }
}

#[derive(Debug, Clone)]
pub enum DeclarationSyntax {
    Type(TypeDeclarationSyntax),
    Variable(VariableSyntax),
    Constant(ConstantSyntax),
    Routine(RoutineSyntax),
}

/// A variable or field.
#[derive(Debug, Clone)]
pub struct VariableSyntax {
    pub node: NodeId,
    pub name: Name,
    pub ty: TypeSyntax,
    /// `class var`
    pub is_class: bool,
}

impl VariableSyntax {
    pub fn new(ids: &mut NodeIds, name: &str, ty: TypeSyntax) -> Self {
        Self {
            node: ids.next(),
            name: name.into(),
            ty,
            is_class: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConstantSyntax {
    pub node: NodeId,
    pub name: Name,
    /// Typed constants (`C: Integer = 1`).
    pub ty: Option<TypeSyntax>,
    pub value: ExpressionSyntax,
}

impl ConstantSyntax {
    pub fn new(ids: &mut NodeIds, name: &str, value: ExpressionSyntax) -> Self {
        Self {
            node: ids.next(),
            name: name.into(),
            ty: None,
            value,
        }
    }

    pub fn typed(mut self, ty: TypeSyntax) -> Self {
        self.ty = Some(ty);
        self
    }
}

/// A routine declaration, with its implementation when it has one.
///
/// Method implementations name their owning type (`TFoo.Bar`) and attach
/// to the heading declared inside the struct.
#[derive(Debug, Clone)]
pub struct RoutineSyntax {
    pub node: NodeId,
    pub owner: Option<Name>,
    pub heading: RoutineHeadingSyntax,
    /// Local types, variables, constants and nested routines.
    pub declarations: Vec<DeclarationSyntax>,
    /// `None` for a heading without a block (`forward`, interface section).
    pub body: Option<Vec<StatementSyntax>>,
}

impl RoutineSyntax {
    pub fn new(ids: &mut NodeIds, heading: RoutineHeadingSyntax) -> Self {
        Self {
            node: ids.next(),
            owner: None,
            heading,
            declarations: Vec::new(),
            body: Some(Vec::new()),
        }
    }

    pub fn method(ids: &mut NodeIds, owner: &str, heading: RoutineHeadingSyntax) -> Self {
        Self {
            owner: Some(owner.into()),
            ..Self::new(ids, heading)
        }
    }

    pub fn heading_only(mut self) -> Self {
        self.body = None;
        self
    }

    pub fn with_local(mut self, declaration: DeclarationSyntax) -> Self {
        self.declarations.push(declaration);
        self
    }

    pub fn with_statement(mut self, statement: StatementSyntax) -> Self {
        self.body.get_or_insert_with(Vec::new).push(statement);
        self
    }
}
