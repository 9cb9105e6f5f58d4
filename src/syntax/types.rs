//! Type expressions, type declarations and struct members.

use enumset::{EnumSet, EnumSetType};

use super::expressions::ReferenceSyntax;
use super::unit::{ConstantSyntax, NodeIds, VariableSyntax};
use crate::base::{Name, NodeId};
use crate::types::{ParameterKind, ProceduralKind, StructKind};

// ============================================================================
// TYPE EXPRESSIONS
// ============================================================================

/// A type as written at a use site.
#[derive(Debug, Clone)]
pub enum TypeSyntax {
    /// `Integer`, `System.TObject`, `TList<string>`
    Named {
        node: NodeId,
        reference: ReferenceSyntax,
    },
    /// `^T`
    Pointer {
        node: NodeId,
        target: Box<TypeSyntax>,
    },
    /// `array of T`
    DynamicArray {
        node: NodeId,
        element: Box<TypeSyntax>,
    },
    /// `array[I, J] of T`
    FixedArray {
        node: NodeId,
        indices: Vec<TypeSyntax>,
        element: Box<TypeSyntax>,
    },
    /// `array of T` in a parameter list
    OpenArray {
        node: NodeId,
        element: Box<TypeSyntax>,
    },
    /// `array of const`
    ArrayOfConst { node: NodeId },
    /// `set of T`
    Set {
        node: NodeId,
        element: Box<TypeSyntax>,
    },
    /// `file of T`, or untyped `file`
    File {
        node: NodeId,
        element: Option<Box<TypeSyntax>>,
    },
    /// `class of T`
    ClassOf {
        node: NodeId,
        class: Box<TypeSyntax>,
    },
    /// `low..high`
    Subrange { node: NodeId, low: i128, high: i128 },
    /// `(A, B = 5, C)`
    Enum {
        node: NodeId,
        elements: Vec<EnumElementSyntax>,
    },
    /// `procedure(...)`, `function(...): T of object`, `reference to ...`
    Procedural {
        node: NodeId,
        kind: ProceduralKind,
        parameters: Vec<ParameterSyntax>,
        return_type: Option<Box<TypeSyntax>>,
    },
    /// An inline `record ... end` or `class ... end`.
    Struct {
        node: NodeId,
        structure: Box<StructSyntax>,
    },
    /// `string[n]`
    ShortString { node: NodeId, length: u8 },
}

impl TypeSyntax {
    pub fn node(&self) -> NodeId {
        match self {
            TypeSyntax::Named { node, .. }
            | TypeSyntax::Pointer { node, .. }
            | TypeSyntax::DynamicArray { node, .. }
            | TypeSyntax::FixedArray { node, .. }
            | TypeSyntax::OpenArray { node, .. }
            | TypeSyntax::ArrayOfConst { node }
            | TypeSyntax::Set { node, .. }
            | TypeSyntax::File { node, .. }
            | TypeSyntax::ClassOf { node, .. }
            | TypeSyntax::Subrange { node, .. }
            | TypeSyntax::Enum { node, .. }
            | TypeSyntax::Procedural { node, .. }
            | TypeSyntax::Struct { node, .. }
            | TypeSyntax::ShortString { node, .. } => *node,
        }
    }

    pub fn named(ids: &mut NodeIds, name: &str) -> Self {
        TypeSyntax::Named {
            node: ids.next(),
            reference: ReferenceSyntax::dotted(ids, name),
        }
    }

    /// `Name<Arguments>`.
    pub fn generic(ids: &mut NodeIds, name: &str, arguments: Vec<TypeSyntax>) -> Self {
        TypeSyntax::Named {
            node: ids.next(),
            reference: ReferenceSyntax::generic(ids, name, arguments),
        }
    }

    pub fn pointer(ids: &mut NodeIds, target: TypeSyntax) -> Self {
        TypeSyntax::Pointer {
            node: ids.next(),
            target: Box::new(target),
        }
    }

    pub fn dynamic_array(ids: &mut NodeIds, element: TypeSyntax) -> Self {
        TypeSyntax::DynamicArray {
            node: ids.next(),
            element: Box::new(element),
        }
    }

    pub fn fixed_array(ids: &mut NodeIds, indices: Vec<TypeSyntax>, element: TypeSyntax) -> Self {
        TypeSyntax::FixedArray {
            node: ids.next(),
            indices,
            element: Box::new(element),
        }
    }

    pub fn open_array(ids: &mut NodeIds, element: TypeSyntax) -> Self {
        TypeSyntax::OpenArray {
            node: ids.next(),
            element: Box::new(element),
        }
    }

    pub fn set_of(ids: &mut NodeIds, element: TypeSyntax) -> Self {
        TypeSyntax::Set {
            node: ids.next(),
            element: Box::new(element),
        }
    }

    pub fn class_of(ids: &mut NodeIds, class: TypeSyntax) -> Self {
        TypeSyntax::ClassOf {
            node: ids.next(),
            class: Box::new(class),
        }
    }

    pub fn subrange(ids: &mut NodeIds, low: i128, high: i128) -> Self {
        TypeSyntax::Subrange {
            node: ids.next(),
            low,
            high,
        }
    }

    pub fn enumeration(ids: &mut NodeIds, names: &[&str]) -> Self {
        let elements = names
            .iter()
            .map(|name| EnumElementSyntax::new(ids, name))
            .collect();
        TypeSyntax::Enum {
            node: ids.next(),
            elements,
        }
    }

    pub fn procedural(
        ids: &mut NodeIds,
        kind: ProceduralKind,
        parameters: Vec<ParameterSyntax>,
        return_type: Option<TypeSyntax>,
    ) -> Self {
        TypeSyntax::Procedural {
            node: ids.next(),
            kind,
            parameters,
            return_type: return_type.map(Box::new),
        }
    }

    pub fn anonymous(ids: &mut NodeIds, structure: StructSyntax) -> Self {
        TypeSyntax::Struct {
            node: ids.next(),
            structure: Box::new(structure),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnumElementSyntax {
    pub node: NodeId,
    pub name: Name,
    /// Explicit ordinal (`B = 5`).
    pub value: Option<i128>,
}

impl EnumElementSyntax {
    pub fn new(ids: &mut NodeIds, name: &str) -> Self {
        Self {
            node: ids.next(),
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: i128) -> Self {
        self.value = Some(value);
        self
    }
}

// ============================================================================
// TYPE DECLARATIONS
// ============================================================================

#[derive(Debug, Clone)]
pub struct TypeParameterSyntax {
    pub node: NodeId,
    pub name: Name,
    pub constraints: Vec<TypeSyntax>,
}

impl TypeParameterSyntax {
    pub fn new(ids: &mut NodeIds, name: &str) -> Self {
        Self {
            node: ids.next(),
            name: name.into(),
            constraints: Vec::new(),
        }
    }
}

/// `Name<TypeParameters> = Definition;`
#[derive(Debug, Clone)]
pub struct TypeDeclarationSyntax {
    pub node: NodeId,
    pub name: Name,
    pub type_parameters: Vec<TypeParameterSyntax>,
    pub definition: TypeDefinition,
}

#[derive(Debug, Clone)]
pub enum TypeDefinition {
    /// A full `class`, `interface`, `record` or helper body.
    Struct(StructSyntax),
    /// `TFoo = class;` completed by a later declaration of the same name.
    Forward(StructKind),
    /// Any other type. A bare type name makes an alias: weak unless
    /// written `type Name`.
    Type { strong: bool, ty: TypeSyntax },
}

impl TypeDeclarationSyntax {
    pub fn new(ids: &mut NodeIds, name: &str, definition: TypeDefinition) -> Self {
        Self {
            node: ids.next(),
            name: name.into(),
            type_parameters: Vec::new(),
            definition,
        }
    }

    pub fn structure(ids: &mut NodeIds, name: &str, structure: StructSyntax) -> Self {
        Self::new(ids, name, TypeDefinition::Struct(structure))
    }

    pub fn forward(ids: &mut NodeIds, name: &str, kind: StructKind) -> Self {
        Self::new(ids, name, TypeDefinition::Forward(kind))
    }

    /// `Name = Type`
    pub fn weak(ids: &mut NodeIds, name: &str, ty: TypeSyntax) -> Self {
        Self::new(ids, name, TypeDefinition::Type { strong: false, ty })
    }

    /// `Name = type Type`
    pub fn strong(ids: &mut NodeIds, name: &str, ty: TypeSyntax) -> Self {
        Self::new(ids, name, TypeDefinition::Type { strong: true, ty })
    }

    pub fn with_type_parameters(mut self, ids: &mut NodeIds, names: &[&str]) -> Self {
        self.type_parameters = names
            .iter()
            .map(|name| TypeParameterSyntax::new(ids, name))
            .collect();
        self
    }
}

// ============================================================================
// STRUCTS AND MEMBERS
// ============================================================================

#[derive(Debug, Clone)]
pub struct StructSyntax {
    pub node: NodeId,
    pub kind: StructKind,
    /// Heritage list in source order.
    pub parents: Vec<TypeSyntax>,
    /// `helper for T`
    pub extended_type: Option<TypeSyntax>,
    pub members: Vec<MemberSyntax>,
}

impl StructSyntax {
    pub fn new(ids: &mut NodeIds, kind: StructKind) -> Self {
        Self {
            node: ids.next(),
            kind,
            parents: Vec::new(),
            extended_type: None,
            members: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: TypeSyntax) -> Self {
        self.parents.push(parent);
        self
    }

    pub fn helper_for(mut self, extended_type: TypeSyntax) -> Self {
        self.extended_type = Some(extended_type);
        self
    }

    pub fn with_member(mut self, member: MemberSyntax) -> Self {
        self.members.push(member);
        self
    }
}

#[derive(Debug, Clone)]
pub enum MemberSyntax {
    Field(VariableSyntax),
    Method(RoutineHeadingSyntax),
    Property(PropertySyntax),
    Type(TypeDeclarationSyntax),
    Constant(ConstantSyntax),
}

/// Modifiers after a routine heading.
#[derive(EnumSetType, Debug, Hash)]
pub enum RoutineDirective {
    Virtual,
    Override,
    Dynamic,
    Abstract,
    Reintroduce,
    Overload,
    Message,
    Static,
    Final,
    Inline,
    Deprecated,
    Class,
    Varargs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutineKind {
    Procedure,
    Function,
    Constructor,
    Destructor,
    /// `class operator`
    Operator,
}

#[derive(Debug, Clone)]
pub struct ParameterSyntax {
    pub node: NodeId,
    pub name: Name,
    pub kind: ParameterKind,
    /// `None` for untyped `const`/`var` parameters.
    pub ty: Option<TypeSyntax>,
    pub has_default: bool,
}

impl ParameterSyntax {
    pub fn new(ids: &mut NodeIds, name: &str, ty: TypeSyntax) -> Self {
        Self {
            node: ids.next(),
            name: name.into(),
            kind: ParameterKind::Value,
            ty: Some(ty),
            has_default: false,
        }
    }

    pub fn untyped(ids: &mut NodeIds, name: &str, kind: ParameterKind) -> Self {
        Self {
            node: ids.next(),
            name: name.into(),
            kind,
            ty: None,
            has_default: false,
        }
    }

    pub fn with_kind(mut self, kind: ParameterKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }
}

/// A routine signature, either in a struct or at unit level.
#[derive(Debug, Clone)]
pub struct RoutineHeadingSyntax {
    pub node: NodeId,
    pub name: Name,
    pub kind: RoutineKind,
    pub parameters: Vec<ParameterSyntax>,
    pub return_type: Option<TypeSyntax>,
    pub directives: EnumSet<RoutineDirective>,
    /// `class procedure`, `class function`, `class operator`.
    pub is_class: bool,
}

impl RoutineHeadingSyntax {
    pub fn new(ids: &mut NodeIds, name: &str, kind: RoutineKind) -> Self {
        Self {
            node: ids.next(),
            name: name.into(),
            kind,
            parameters: Vec::new(),
            return_type: None,
            directives: EnumSet::new(),
            is_class: kind == RoutineKind::Operator,
        }
    }

    pub fn procedure(ids: &mut NodeIds, name: &str) -> Self {
        Self::new(ids, name, RoutineKind::Procedure)
    }

    pub fn function(ids: &mut NodeIds, name: &str, return_type: TypeSyntax) -> Self {
        Self::new(ids, name, RoutineKind::Function).returning(return_type)
    }

    pub fn returning(mut self, return_type: TypeSyntax) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn with_parameter(mut self, parameter: ParameterSyntax) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_directive(mut self, directive: RoutineDirective) -> Self {
        self.directives.insert(directive);
        if directive == RoutineDirective::Class {
            self.is_class = true;
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct PropertySyntax {
    pub node: NodeId,
    pub name: Name,
    /// Index parameters of an array property.
    pub parameters: Vec<ParameterSyntax>,
    pub ty: TypeSyntax,
    pub read: Option<ReferenceSyntax>,
    pub write: Option<ReferenceSyntax>,
    pub is_default: bool,
    pub is_class: bool,
}

impl PropertySyntax {
    pub fn new(ids: &mut NodeIds, name: &str, ty: TypeSyntax) -> Self {
        Self {
            node: ids.next(),
            name: name.into(),
            parameters: Vec::new(),
            ty,
            read: None,
            write: None,
            is_default: false,
            is_class: false,
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterSyntax) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn reading(mut self, ids: &mut NodeIds, accessor: &str) -> Self {
        self.read = Some(ReferenceSyntax::dotted(ids, accessor));
        self
    }

    pub fn writing(mut self, ids: &mut NodeIds, accessor: &str) -> Self {
        self.write = Some(ReferenceSyntax::dotted(ids, accessor));
        self
    }

    pub fn default_property(mut self) -> Self {
        self.is_default = true;
        self
    }
}
