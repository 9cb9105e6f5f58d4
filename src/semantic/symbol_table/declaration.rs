use enumset::EnumSet;

use crate::base::{Name, NodeId, OccurrenceId, ScopeId};
use crate::syntax::{RoutineDirective, RoutineKind};
use crate::types::{Parameter, Type};

/// Role of a variable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Local,
    Field,
    Parameter,
    Global,
    /// Implicit `Result` of a function.
    Result,
    /// Implicit `Self` of a method.
    SelfReference,
}

#[derive(Debug, Clone)]
pub struct RoutineDeclaration {
    pub kind: RoutineKind,
    pub parameters: Vec<Parameter>,
    /// `Void` for procedures.
    pub return_type: Type,
    pub directives: EnumSet<RoutineDirective>,
    pub is_class: bool,
    /// Scope of the implementation block, once one is seen.
    pub implementation: Option<ScopeId>,
}

impl RoutineDeclaration {
    pub fn is_operator(&self) -> bool {
        self.kind == RoutineKind::Operator
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == RoutineKind::Constructor
    }

    pub fn required_parameter_count(&self) -> usize {
        self.parameters.iter().filter(|p| !p.has_default).count()
    }

    /// True if a call with `count` arguments matches the arity.
    pub fn accepts(&self, count: usize) -> bool {
        if self.directives.contains(RoutineDirective::Varargs) {
            return count >= self.required_parameter_count();
        }
        (self.required_parameter_count()..=self.parameters.len()).contains(&count)
    }
}

#[derive(Debug, Clone)]
pub struct PropertyDeclaration {
    /// Index parameters; empty for plain properties.
    pub parameters: Vec<Parameter>,
    pub is_default: bool,
    pub is_class: bool,
}

#[derive(Debug, Clone)]
pub enum DeclarationKind {
    /// A compilation unit; `scope` holds what it exports.
    Unit { scope: ScopeId },
    /// An entry of a `uses` clause. `None` when the unit is not available.
    UnitImport { scope: Option<ScopeId> },
    Type { type_parameters: Vec<Type> },
    TypeParameter,
    Variable(VariableKind),
    Constant,
    EnumElement { ordinal: i128 },
    Routine(RoutineDeclaration),
    Property(PropertyDeclaration),
}

/// A named entity: its kind, its type and the scope declaring it.
#[derive(Debug)]
pub struct Declaration {
    name: Name,
    kind: DeclarationKind,
    ty: Type,
    scope: ScopeId,
    node: Option<NodeId>,
    usages: Vec<OccurrenceId>,
}

impl Declaration {
    pub(super) fn new(
        name: Name,
        kind: DeclarationKind,
        ty: Type,
        scope: ScopeId,
        node: Option<NodeId>,
    ) -> Self {
        Self {
            name,
            kind,
            ty,
            scope,
            node,
            usages: Vec::new(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn kind(&self) -> &DeclarationKind {
        &self.kind
    }

    /// For types, the declared type; for routines, their signature.
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// The scope the declaration belongs to.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// Declaring node, `None` for System declarations.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    pub fn as_routine(&self) -> Option<&RoutineDeclaration> {
        match &self.kind {
            DeclarationKind::Routine(routine) => Some(routine),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyDeclaration> {
        match &self.kind {
            DeclarationKind::Property(property) => Some(property),
            _ => None,
        }
    }

    pub fn is_type(&self) -> bool {
        matches!(
            self.kind,
            DeclarationKind::Type { .. } | DeclarationKind::TypeParameter
        )
    }

    pub fn is_routine(&self) -> bool {
        matches!(self.kind, DeclarationKind::Routine(_))
    }

    pub fn type_parameters(&self) -> &[Type] {
        match &self.kind {
            DeclarationKind::Type { type_parameters } => type_parameters,
            _ => &[],
        }
    }

    /// Exported scope of a unit or an import.
    pub fn unit_scope(&self) -> Option<ScopeId> {
        match self.kind {
            DeclarationKind::Unit { scope } => Some(scope),
            DeclarationKind::UnitImport { scope } => scope,
            _ => None,
        }
    }

    pub fn is_self_reference(&self) -> bool {
        matches!(
            self.kind,
            DeclarationKind::Variable(VariableKind::SelfReference)
        )
    }

    /// Occurrences resolved to this declaration so far. Complete only once
    /// the whole unit is resolved.
    pub(crate) fn usages(&self) -> &[OccurrenceId] {
        &self.usages
    }

    pub(super) fn add_usage(&mut self, occurrence: OccurrenceId) {
        self.usages.push(occurrence);
    }

    pub(super) fn set_type(&mut self, ty: Type) {
        self.ty = ty;
    }

    pub(super) fn kind_mut(&mut self) -> &mut DeclarationKind {
        &mut self.kind
    }
}
