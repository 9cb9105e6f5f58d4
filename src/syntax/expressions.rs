//! Name references, expressions and statements.

use smol_str::SmolStr;

use super::types::TypeSyntax;
use super::unit::NodeIds;
use crate::base::{Name, NodeId};

/// One identifier of a dotted reference, with optional generic arguments.
#[derive(Debug, Clone)]
pub struct NameSegment {
    pub node: NodeId,
    pub name: Name,
    pub type_arguments: Vec<TypeSyntax>,
}

impl NameSegment {
    pub fn new(ids: &mut NodeIds, name: &str) -> Self {
        Self {
            node: ids.next(),
            name: name.into(),
            type_arguments: Vec::new(),
        }
    }
}

/// `A.B.C`: each segment is resolved in the context of the one before it.
#[derive(Debug, Clone)]
pub struct ReferenceSyntax {
    pub node: NodeId,
    pub segments: Vec<NameSegment>,
}

impl ReferenceSyntax {
    pub fn dotted(ids: &mut NodeIds, path: &str) -> Self {
        let segments = path
            .split('.')
            .map(|name| NameSegment::new(ids, name.trim()))
            .collect();
        Self {
            node: ids.next(),
            segments,
        }
    }

    pub fn generic(ids: &mut NodeIds, name: &str, type_arguments: Vec<TypeSyntax>) -> Self {
        let mut segment = NameSegment::new(ids, name);
        segment.type_arguments = type_arguments;
        Self {
            node: ids.next(),
            segments: vec![segment],
        }
    }

    pub fn last(&self) -> Option<&NameSegment> {
        self.segments.last()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
    Plus,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    /// `/`
    Divide,
    Div,
    Mod,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    In,
    Is,
    As,
}

impl BinaryOperator {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOperator::Equal
                | BinaryOperator::NotEqual
                | BinaryOperator::Less
                | BinaryOperator::LessEqual
                | BinaryOperator::Greater
                | BinaryOperator::GreaterEqual
                | BinaryOperator::In
                | BinaryOperator::Is
        )
    }
}

#[derive(Debug, Clone)]
pub enum ExpressionSyntax {
    Integer {
        node: NodeId,
        value: i128,
    },
    Real {
        node: NodeId,
    },
    String {
        node: NodeId,
        value: SmolStr,
    },
    Nil {
        node: NodeId,
    },
    Name {
        node: NodeId,
        reference: ReferenceSyntax,
    },
    /// `target.Name` where `target` is not itself a plain name.
    Member {
        node: NodeId,
        target: Box<ExpressionSyntax>,
        segment: NameSegment,
    },
    Call {
        node: NodeId,
        callee: Box<ExpressionSyntax>,
        arguments: Vec<ExpressionSyntax>,
    },
    Index {
        node: NodeId,
        target: Box<ExpressionSyntax>,
        indices: Vec<ExpressionSyntax>,
    },
    /// `P^`
    Dereference {
        node: NodeId,
        operand: Box<ExpressionSyntax>,
    },
    /// `@X`
    AddressOf {
        node: NodeId,
        operand: Box<ExpressionSyntax>,
    },
    Unary {
        node: NodeId,
        operator: UnaryOperator,
        operand: Box<ExpressionSyntax>,
    },
    Binary {
        node: NodeId,
        operator: BinaryOperator,
        left: Box<ExpressionSyntax>,
        right: Box<ExpressionSyntax>,
    },
    /// `[a, b, c]`
    Set {
        node: NodeId,
        elements: Vec<ExpressionSyntax>,
    },
}

impl ExpressionSyntax {
    pub fn node(&self) -> NodeId {
        match self {
            ExpressionSyntax::Integer { node, .. }
            | ExpressionSyntax::Real { node }
            | ExpressionSyntax::String { node, .. }
            | ExpressionSyntax::Nil { node }
            | ExpressionSyntax::Name { node, .. }
            | ExpressionSyntax::Member { node, .. }
            | ExpressionSyntax::Call { node, .. }
            | ExpressionSyntax::Index { node, .. }
            | ExpressionSyntax::Dereference { node, .. }
            | ExpressionSyntax::AddressOf { node, .. }
            | ExpressionSyntax::Unary { node, .. }
            | ExpressionSyntax::Binary { node, .. }
            | ExpressionSyntax::Set { node, .. } => *node,
        }
    }

    pub fn integer(ids: &mut NodeIds, value: i128) -> Self {
        ExpressionSyntax::Integer {
            node: ids.next(),
            value,
        }
    }

    pub fn string(ids: &mut NodeIds, value: &str) -> Self {
        ExpressionSyntax::String {
            node: ids.next(),
            value: value.into(),
        }
    }

    pub fn nil(ids: &mut NodeIds) -> Self {
        ExpressionSyntax::Nil { node: ids.next() }
    }

    pub fn name(ids: &mut NodeIds, path: &str) -> Self {
        ExpressionSyntax::Name {
            node: ids.next(),
            reference: ReferenceSyntax::dotted(ids, path),
        }
    }

    pub fn member(ids: &mut NodeIds, target: ExpressionSyntax, name: &str) -> Self {
        ExpressionSyntax::Member {
            node: ids.next(),
            target: Box::new(target),
            segment: NameSegment::new(ids, name),
        }
    }

    pub fn call(ids: &mut NodeIds, callee: ExpressionSyntax, arguments: Vec<ExpressionSyntax>) -> Self {
        ExpressionSyntax::Call {
            node: ids.next(),
            callee: Box::new(callee),
            arguments,
        }
    }

    pub fn index(ids: &mut NodeIds, target: ExpressionSyntax, indices: Vec<ExpressionSyntax>) -> Self {
        ExpressionSyntax::Index {
            node: ids.next(),
            target: Box::new(target),
            indices,
        }
    }

    pub fn dereference(ids: &mut NodeIds, operand: ExpressionSyntax) -> Self {
        ExpressionSyntax::Dereference {
            node: ids.next(),
            operand: Box::new(operand),
        }
    }

    pub fn binary(
        ids: &mut NodeIds,
        operator: BinaryOperator,
        left: ExpressionSyntax,
        right: ExpressionSyntax,
    ) -> Self {
        ExpressionSyntax::Binary {
            node: ids.next(),
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn set(ids: &mut NodeIds, elements: Vec<ExpressionSyntax>) -> Self {
        ExpressionSyntax::Set {
            node: ids.next(),
            elements,
        }
    }
}

#[derive(Debug, Clone)]
pub enum StatementSyntax {
    Expression(ExpressionSyntax),
    Assignment {
        node: NodeId,
        target: ExpressionSyntax,
        value: ExpressionSyntax,
    },
    Compound {
        node: NodeId,
        statements: Vec<StatementSyntax>,
    },
    If {
        node: NodeId,
        condition: ExpressionSyntax,
        then_branch: Box<StatementSyntax>,
        else_branch: Option<Box<StatementSyntax>>,
    },
    While {
        node: NodeId,
        condition: ExpressionSyntax,
        body: Box<StatementSyntax>,
    },
    Repeat {
        node: NodeId,
        body: Vec<StatementSyntax>,
        condition: ExpressionSyntax,
    },
    For {
        node: NodeId,
        variable: ReferenceSyntax,
        from: ExpressionSyntax,
        to: ExpressionSyntax,
        body: Box<StatementSyntax>,
    },
}

impl StatementSyntax {
    pub fn assign(ids: &mut NodeIds, target: ExpressionSyntax, value: ExpressionSyntax) -> Self {
        StatementSyntax::Assignment {
            node: ids.next(),
            target,
            value,
        }
    }

    pub fn call(ids: &mut NodeIds, callee: &str, arguments: Vec<ExpressionSyntax>) -> Self {
        let callee = ExpressionSyntax::name(ids, callee);
        StatementSyntax::Expression(ExpressionSyntax::call(ids, callee, arguments))
    }
}
