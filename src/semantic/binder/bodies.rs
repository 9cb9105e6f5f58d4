//! Statements and expression types.

use std::mem;

use super::Binder;
use crate::base::{NodeId, OccurrenceId};
use crate::semantic::error::ResolveError;
use crate::semantic::node_types::TypeNode;
use crate::syntax::{
    BinaryOperator, ExpressionSyntax, NameSegment, ReferenceSyntax, StatementSyntax,
};
use crate::types::{IntrinsicType, Type};

impl TypeNode for ExpressionSyntax {
    fn node_id(&self) -> NodeId {
        self.node()
    }

    fn create_type(&self, binder: &mut Binder<'_>) -> Result<Type, ResolveError> {
        binder.expression_type(self)
    }
}

impl Binder<'_> {
    // ========================================================================
    // STATEMENTS
    // ========================================================================

    pub(super) fn bind_bodies(&mut self) -> Result<(), ResolveError> {
        for (scope, statements) in mem::take(&mut self.work.bodies) {
            self.in_scope(scope, |binder| binder.bind_statements(statements))?;
        }
        Ok(())
    }

    pub(super) fn bind_statements(&mut self, statements: &[StatementSyntax]) -> Result<(), ResolveError> {
        for statement in statements {
            self.bind_statement(statement)?;
        }
        Ok(())
    }

    fn bind_statement(&mut self, statement: &StatementSyntax) -> Result<(), ResolveError> {
        match statement {
            StatementSyntax::Expression(expression) => {
                self.type_of(expression)?;
            }
            StatementSyntax::Assignment { target, value, .. } => {
                self.type_of(target)?;
                self.type_of(value)?;
            }
            StatementSyntax::Compound { statements, .. } => self.bind_statements(statements)?,
            StatementSyntax::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.type_of(condition)?;
                self.bind_statement(then_branch)?;
                if let Some(else_branch) = else_branch {
                    self.bind_statement(else_branch)?;
                }
            }
            StatementSyntax::While {
                condition, body, ..
            } => {
                self.type_of(condition)?;
                self.bind_statement(body)?;
            }
            StatementSyntax::Repeat {
                body, condition, ..
            } => {
                self.bind_statements(body)?;
                self.type_of(condition)?;
            }
            StatementSyntax::For {
                variable,
                from,
                to,
                body,
                ..
            } => {
                self.resolve_reference(variable, None)?;
                self.type_of(from)?;
                self.type_of(to)?;
                self.bind_statement(body)?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // EXPRESSIONS
    // ========================================================================

    fn expression_type(&mut self, expression: &ExpressionSyntax) -> Result<Type, ResolveError> {
        let factory = self.factory;
        let ty = match expression {
            ExpressionSyntax::Integer { value, .. } => factory.integer_from_literal(*value)?,
            ExpressionSyntax::Real { .. } => factory.get_intrinsic(IntrinsicType::Extended),
            ExpressionSyntax::String { value, .. } => {
                if value.chars().count() == 1 {
                    factory.get_intrinsic(IntrinsicType::Char)
                } else {
                    factory.get_intrinsic(IntrinsicType::String)
                }
            }
            ExpressionSyntax::Nil { .. } => factory.nil_pointer(),
            ExpressionSyntax::Name { reference, .. } => self.reference_type(reference, None)?,
            ExpressionSyntax::Member {
                target, segment, ..
            } => {
                let receiver = self.type_of(target.as_ref())?;
                self.member_type(receiver, segment, None)?
            }
            ExpressionSyntax::Call {
                callee, arguments, ..
            } => self.call_type(callee, arguments)?,
            ExpressionSyntax::Index {
                target, indices, ..
            } => {
                let target = self.type_of(target.as_ref())?;
                for index in indices {
                    self.type_of(index)?;
                }
                self.indexed_type(&target, indices.len())
            }
            ExpressionSyntax::Dereference { operand, .. } => {
                let operand = self.type_of(operand.as_ref())?;
                operand
                    .as_pointer()
                    .and_then(|pointer| pointer.dereferenced().cloned())
                    .unwrap_or_else(|| factory.unknown())
            }
            ExpressionSyntax::AddressOf { operand, .. } => {
                self.type_of(operand.as_ref())?;
                factory.get_intrinsic(IntrinsicType::Pointer)
            }
            ExpressionSyntax::Unary { operand, .. } => self.type_of(operand.as_ref())?,
            ExpressionSyntax::Binary {
                operator,
                left,
                right,
                ..
            } => {
                let left = self.type_of(left.as_ref())?;
                let right = self.type_of(right.as_ref())?;
                self.binary_type(*operator, &left, &right)
            }
            ExpressionSyntax::Set { elements, .. } => {
                let mut types = Vec::with_capacity(elements.len());
                for element in elements {
                    types.push(self.type_of(element)?);
                }
                factory.array_constructor(types)
            }
        };
        Ok(ty)
    }

    fn reference_type(
        &mut self,
        reference: &ReferenceSyntax,
        arguments: Option<&[Type]>,
    ) -> Result<Type, ResolveError> {
        let id = self.resolve_reference(reference, arguments)?;
        Ok(self.occurrence_result(id).0)
    }

    /// `receiver.Name`, resolved among the members of the receiver's type.
    fn member_type(
        &mut self,
        receiver: Type,
        segment: &NameSegment,
        arguments: Option<&[Type]>,
    ) -> Result<Type, ResolveError> {
        let id = self.member_occurrence(receiver, segment, arguments)?;
        Ok(self.occurrence_result(Some(id)).0)
    }

    fn member_occurrence(
        &mut self,
        receiver: Type,
        segment: &NameSegment,
        arguments: Option<&[Type]>,
    ) -> Result<OccurrenceId, ResolveError> {
        let id = match self.table.occurrence_at(segment.node) {
            Some(id) => id,
            None => {
                let type_arguments = self.type_arguments(&segment.type_arguments)?;
                self.table.add_member_occurrence(
                    segment.node,
                    segment.name.clone(),
                    self.scope,
                    receiver,
                    type_arguments,
                )
            }
        };
        self.resolve_occurrence(id, arguments)?;
        Ok(id)
    }

    /// Type of a resolved occurrence and whether it names a routine.
    fn occurrence_result(&self, id: Option<OccurrenceId>) -> (Type, bool) {
        let Some(occurrence) = id.map(|id| self.table.occurrence(id)) else {
            return (self.factory.unknown(), false);
        };
        let ty = occurrence
            .ty()
            .cloned()
            .unwrap_or_else(|| self.factory.unknown());
        let is_routine = occurrence
            .declaration()
            .is_some_and(|declaration| self.table.declaration(declaration).is_routine());
        (ty, is_routine)
    }

    /// Arguments are typed first so the callee can be chosen among its
    /// overloads. Calling a type name is a cast.
    fn call_type(
        &mut self,
        callee: &ExpressionSyntax,
        arguments: &[ExpressionSyntax],
    ) -> Result<Type, ResolveError> {
        let mut argument_types = Vec::with_capacity(arguments.len());
        for argument in arguments {
            argument_types.push(self.type_of(argument)?);
        }

        let (callee_type, is_routine) = match callee {
            ExpressionSyntax::Name { node, reference } => {
                let id = self.resolve_reference(reference, Some(&argument_types))?;
                let result = self.occurrence_result(id);
                self.node_types.insert(*node, result.0.clone());
                result
            }
            ExpressionSyntax::Member {
                node,
                target,
                segment,
            } => {
                let receiver = self.type_of(target.as_ref())?;
                let id = self.member_occurrence(receiver, segment, Some(&argument_types))?;
                let result = self.occurrence_result(Some(id));
                self.node_types.insert(*node, result.0.clone());
                result
            }
            other => (self.type_of(other)?, false),
        };

        if is_routine {
            return Ok(callee_type);
        }
        if let Some(type_type) = callee_type.as_type_type() {
            return Ok(type_type.ty().clone());
        }
        if let Some(procedural) = callee_type.as_procedural() {
            return Ok(procedural.return_type().clone());
        }
        Ok(callee_type)
    }

    /// Element type after `count` indices: array elements, string
    /// characters, pointer targets, or a default array property.
    fn indexed_type(&self, target: &Type, count: usize) -> Type {
        let mut current = target.clone();
        let mut remaining = count;
        while remaining > 0 {
            if let Some(array) = current.as_array() {
                let consumed = array.indices().len().clamp(1, remaining);
                remaining -= consumed;
                current = array.element().clone();
                continue;
            }
            if let Some(string) = current.as_string() {
                return string.char_type().clone();
            }
            if let Some(pointer) = current.as_pointer() {
                if !pointer.allows_pointer_math() {
                    return self.factory.unknown();
                }
                current = pointer
                    .dereferenced()
                    .cloned()
                    .unwrap_or_else(|| self.factory.unknown());
                remaining -= 1;
                continue;
            }
            return self.default_property_type(&current);
        }
        current
    }

    fn default_property_type(&self, target: &Type) -> Type {
        let Some(structure) = target.as_struct() else {
            return self.factory.unknown();
        };
        structure
            .default_array_properties(&self.table)
            .first()
            .map(|property| {
                self.table
                    .declaration(property.declaration)
                    .ty()
                    .specialize(&property.context)
            })
            .unwrap_or_else(|| self.factory.unknown())
    }

    fn binary_type(&self, operator: BinaryOperator, left: &Type, right: &Type) -> Type {
        let factory = self.factory;
        if operator.is_comparison() {
            return factory.get_intrinsic(IntrinsicType::Boolean);
        }
        match operator {
            BinaryOperator::As => right
                .as_type_type()
                .map(|type_type| type_type.ty().clone())
                .unwrap_or_else(|| factory.unknown()),
            BinaryOperator::Divide => factory.get_intrinsic(IntrinsicType::Extended),
            BinaryOperator::Add if is_text(left) || is_text(right) => {
                factory.get_intrinsic(IntrinsicType::String)
            }
            BinaryOperator::Add | BinaryOperator::Subtract | BinaryOperator::Multiply
                if left.is_set() =>
            {
                left.clone()
            }
            BinaryOperator::And | BinaryOperator::Or | BinaryOperator::Xor
                if left.is_boolean() =>
            {
                factory.get_intrinsic(IntrinsicType::Boolean)
            }
            _ if left.is_real() || right.is_real() => {
                factory.get_intrinsic(IntrinsicType::Extended)
            }
            _ if left.is_integer() && right.is_integer() => {
                if left.size() == 8 || right.size() == 8 {
                    factory.get_intrinsic(IntrinsicType::Int64)
                } else {
                    factory.get_intrinsic(IntrinsicType::Integer)
                }
            }
            BinaryOperator::Add | BinaryOperator::Subtract if left.is_pointer() => left.clone(),
            _ => factory.unknown(),
        }
    }
}

fn is_text(ty: &Type) -> bool {
    ty.is_string() || ty.is_char()
}
