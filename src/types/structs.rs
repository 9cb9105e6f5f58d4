//! Struct types: classes, interfaces, records and helpers.
//!
//! A struct declared with `TFoo = class;` starts as a forward type with no
//! body. The binder completes it in place once the full declaration is seen,
//! so every handle taken in between observes the completed type.
//!
//! Specializations of a generic struct never copy or mutate the generic
//! template: their body is derived from the template's on first read, with
//! parents substituted through the specialization's type arguments.

use std::fmt;
use std::sync::OnceLock;

use smol_str::SmolStr;
use tracing::{trace, warn};

use super::specialize::SpecializationContext;
use super::{Parameter, Type, TypeError};
use crate::base::{DeclId, Name, ScopeId, names_match};
use crate::semantic::SymbolTable;

/// Operator method name searched when indexing implicit conversions.
const IMPLICIT_OPERATOR: &str = "Implicit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructKind {
    Class,
    Interface,
    Record,
    ClassHelper,
    RecordHelper,
}

impl StructKind {
    pub fn is_helper(self) -> bool {
        matches!(self, StructKind::ClassHelper | StructKind::RecordHelper)
    }

    /// Classes, interfaces and class helpers are references.
    pub fn is_reference(self) -> bool {
        !matches!(self, StructKind::Record | StructKind::RecordHelper)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            StructKind::Class => "class",
            StructKind::Interface => "interface",
            StructKind::Record => "record",
            StructKind::ClassHelper => "class helper",
            StructKind::RecordHelper => "record helper",
        }
    }
}

/// One segment of a struct's dotted image, e.g. `TDictionary<K, V>`.
#[derive(Debug, Clone)]
pub struct ImagePart {
    pub name: Name,
    pub type_arguments: Vec<Type>,
}

impl ImagePart {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            type_arguments: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<Name>, type_arguments: Vec<Type>) -> Self {
        Self {
            name: name.into(),
            type_arguments,
        }
    }
}

impl fmt::Display for ImagePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.type_arguments.is_empty() {
            let arguments: Vec<&str> = self.type_arguments.iter().map(Type::image).collect();
            write!(f, "<{}>", arguments.join(","))?;
        }
        Ok(())
    }
}

/// Types convertible to and from a struct through `class operator Implicit`.
#[derive(Debug, Default)]
pub struct ImplicitConversions {
    from: Vec<Type>,
    to: Vec<Type>,
}

impl ImplicitConversions {
    /// Parameter types of `Implicit` operators returning the struct.
    pub fn from_types(&self) -> &[Type] {
        &self.from
    }

    /// Return types of `Implicit` operators taking the struct.
    pub fn to_types(&self) -> &[Type] {
        &self.to
    }
}

#[derive(Debug)]
struct StructBody {
    kind: StructKind,
    scope: ScopeId,
    parents: Vec<Type>,
    extended_type: Option<Type>,
    pointer_size: u32,
}

impl StructBody {
    fn specialize(&self, context: &SpecializationContext) -> Self {
        Self {
            kind: self.kind,
            scope: self.scope,
            parents: self
                .parents
                .iter()
                .map(|parent| parent.specialize(context))
                .collect(),
            extended_type: self
                .extended_type
                .as_ref()
                .map(|extended| extended.specialize(context)),
            pointer_size: self.pointer_size,
        }
    }
}

#[derive(Debug)]
enum StructOrigin {
    Declared,
    Specialized { template: Type },
}

#[derive(Debug)]
pub struct StructType {
    parts: Vec<ImagePart>,
    image: SmolStr,
    origin: StructOrigin,
    body: OnceLock<StructBody>,
    record_fields: OnceLock<Vec<Type>>,
    record_size: OnceLock<u32>,
    conversions: OnceLock<ImplicitConversions>,
}

/// Specialized records nested deeper than this are laid out as empty.
const MAX_RECORD_NESTING: usize = 32;

/// A default array property and the bindings its declared types are read
/// through on the struct it was found on.
#[derive(Debug, Clone)]
pub struct DefaultProperty {
    pub declaration: DeclId,
    pub context: SpecializationContext,
}

impl StructType {
    pub(crate) fn forward(parts: Vec<ImagePart>) -> Self {
        let image = Self::image_of(&parts);
        Self {
            parts,
            image,
            origin: StructOrigin::Declared,
            body: OnceLock::new(),
            record_fields: OnceLock::new(),
            record_size: OnceLock::new(),
            conversions: OnceLock::new(),
        }
    }

    pub(crate) fn specialized(template: Type, parts: Vec<ImagePart>) -> Self {
        Self {
            origin: StructOrigin::Specialized { template },
            ..Self::forward(parts)
        }
    }

    fn image_of(parts: &[ImagePart]) -> SmolStr {
        let parts: Vec<String> = parts.iter().map(ImagePart::to_string).collect();
        SmolStr::new(parts.join("."))
    }

    /// Complete a forward struct. Fails if it was completed before.
    pub(crate) fn complete(
        &self,
        kind: StructKind,
        scope: ScopeId,
        parents: Vec<Type>,
        extended_type: Option<Type>,
        pointer_size: u32,
    ) -> Result<(), TypeError> {
        if matches!(self.origin, StructOrigin::Specialized { .. }) {
            return Err(TypeError::AlreadyCompleted(self.image.clone()));
        }
        let body = StructBody {
            kind,
            scope,
            parents,
            extended_type,
            pointer_size,
        };
        self.body
            .set(body)
            .map_err(|_| TypeError::AlreadyCompleted(self.image.clone()))
    }

    /// Record the laid out size of a record once its fields are known.
    pub fn set_record_size(&self, size: u32) -> Result<(), TypeError> {
        self.record_size
            .set(size)
            .map_err(|_| TypeError::AlreadyCompleted(self.image.clone()))
    }

    /// Record the instance field types of a record, in declaration order.
    pub fn set_record_fields(&self, fields: Vec<Type>) -> Result<(), TypeError> {
        self.record_fields
            .set(fields)
            .map_err(|_| TypeError::AlreadyCompleted(self.image.clone()))
    }

    /// Instance field types of a declared record, once its members are known.
    pub fn record_fields(&self) -> Option<&[Type]> {
        self.record_fields.get().map(Vec::as_slice)
    }

    fn try_body(&self) -> Option<&StructBody> {
        if let Some(body) = self.body.get() {
            return Some(body);
        }
        let StructOrigin::Specialized { template } = &self.origin else {
            return None;
        };
        let template_body = template.as_struct()?.try_body()?;
        let context = self.member_context();
        Some(self.body.get_or_init(|| template_body.specialize(&context)))
    }

    fn body(&self) -> Option<&StructBody> {
        let body = self.try_body();
        debug_assert!(
            body.is_some(),
            "struct {} read before its declaration was completed",
            self.image
        );
        body
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    /// One part per enclosing declaration, outermost first.
    pub fn parts(&self) -> &[ImagePart] {
        &self.parts
    }

    /// Type arguments of the innermost part.
    pub fn type_arguments(&self) -> &[Type] {
        self.parts
            .last()
            .map(|part| part.type_arguments.as_slice())
            .unwrap_or(&[])
    }

    /// Simple name of the innermost part.
    pub fn simple_name(&self) -> &str {
        self.parts.last().map(|part| part.name.as_str()).unwrap_or("")
    }

    pub fn size(&self) -> u32 {
        self.size_at(0)
    }

    fn size_at(&self, depth: usize) -> u32 {
        let Some(body) = self.body() else {
            return 0;
        };
        if body.kind.is_reference() {
            return body.pointer_size;
        }
        if let Some(size) = self.record_size.get() {
            return *size;
        }
        match &self.origin {
            StructOrigin::Specialized { template } => self.specialized_record_size(template, depth),
            StructOrigin::Declared => 0,
        }
    }

    /// The template's fields laid out with this struct's type arguments.
    fn specialized_record_size(&self, template: &Type, depth: usize) -> u32 {
        let Some(fields) = template.as_struct().and_then(StructType::record_fields) else {
            return template.size();
        };
        if depth >= MAX_RECORD_NESTING {
            warn!(record = %self.image, "specialized record nests too deeply");
            return 0;
        }
        let context = self.member_context();
        fields
            .iter()
            .map(|field| {
                let field = field.specialize(&context);
                match field.as_struct() {
                    Some(structure) => structure.size_at(depth + 1),
                    None => field.size(),
                }
            })
            .fold(0u32, u32::saturating_add)
    }

    pub fn is_forward(&self) -> bool {
        self.try_body().is_none()
    }

    pub fn kind(&self) -> Option<StructKind> {
        self.body().map(|body| body.kind)
    }

    /// Scope holding the struct's own member declarations.
    pub fn scope(&self) -> Option<ScopeId> {
        self.body().map(|body| body.scope)
    }

    /// Direct ancestors: explicit or the language-mandated default.
    pub fn parents(&self) -> &[Type] {
        self.body().map(|body| body.parents.as_slice()).unwrap_or(&[])
    }

    /// Type extended by a class or record helper.
    pub fn extended_type(&self) -> Option<&Type> {
        self.body().and_then(|body| body.extended_type.as_ref())
    }

    /// First non-interface struct parent, or the first parent of an interface.
    pub fn super_type(&self) -> Option<Type> {
        let body = self.body()?;
        if body.kind == StructKind::Interface {
            return body.parents.first().cloned();
        }
        body.parents
            .iter()
            .find(|parent| parent.is_struct() && !parent.is_interface())
            .cloned()
    }

    /// True if `image` names any transitive parent. Inheritance is acyclic.
    pub fn is_sub_type_of(&self, image: &str) -> bool {
        self.parents()
            .iter()
            .any(|parent| parent.is(image) || parent.is_sub_type_of(image))
    }

    /// Any part is parameterized by an unsubstituted type parameter.
    pub fn is_generic(&self) -> bool {
        self.parts
            .iter()
            .flat_map(|part| &part.type_arguments)
            .any(Type::is_type_parameter)
    }

    pub fn is_specialization(&self) -> bool {
        matches!(self.origin, StructOrigin::Specialized { .. })
    }

    /// The generic declaration this struct was specialized from.
    pub fn template(&self) -> Option<&Type> {
        match &self.origin {
            StructOrigin::Specialized { template } => Some(template),
            StructOrigin::Declared => None,
        }
    }

    /// Bindings from the template's type parameters to this struct's type
    /// arguments. Member types are specialized through it on lookup.
    pub fn member_context(&self) -> SpecializationContext {
        let mut context = SpecializationContext::new();
        let Some(template) = self.template().and_then(Type::as_struct) else {
            return context;
        };
        for (generic, specialized) in template.parts.iter().zip(&self.parts) {
            for (parameter, argument) in generic
                .type_arguments
                .iter()
                .zip(&specialized.type_arguments)
            {
                if parameter.is_type_parameter() {
                    context.bind(parameter.clone(), argument.clone());
                }
            }
        }
        context
    }

    // ========================================================================
    // SPECIALIZATION
    // ========================================================================

    pub(crate) fn can_be_specialized(
        &self,
        context: &SpecializationContext,
        visiting: &mut Vec<*const StructType>,
    ) -> bool {
        let this = self as *const StructType;
        if visiting.contains(&this) {
            return false;
        }
        visiting.push(this);
        let result = self
            .parts
            .iter()
            .flat_map(|part| &part.type_arguments)
            .any(|argument| argument.can_be_specialized_inner(context, visiting))
            || self.try_body().is_some_and(|body| {
                body.parents.iter().any(|parent| {
                    parent.is_struct() && parent.can_be_specialized_inner(context, visiting)
                })
            });
        visiting.pop();
        result
    }

    pub(crate) fn do_specialization(&self, this: &Type, context: &SpecializationContext) -> Self {
        let template = self.template().cloned().unwrap_or_else(|| this.clone());
        let parts = self
            .parts
            .iter()
            .map(|part| {
                ImagePart::generic(
                    part.name.clone(),
                    part.type_arguments
                        .iter()
                        .map(|argument| argument.specialize(context))
                        .collect(),
                )
            })
            .collect();
        let specialized = Self::specialized(template, parts);
        trace!(from = %self.image, to = %specialized.image, "specialized struct");
        specialized
    }

    // ========================================================================
    // MEMBER QUERIES
    // ========================================================================

    /// Index of `class operator Implicit` conversions declared by this struct
    /// itself (inherited operators are not considered). Built on first use.
    pub fn implicit_conversions(&self, table: &SymbolTable) -> &ImplicitConversions {
        self.conversions.get_or_init(|| self.index_conversions(table))
    }

    fn index_conversions(&self, table: &SymbolTable) -> ImplicitConversions {
        let mut conversions = ImplicitConversions::default();
        let Some(scope) = self.scope() else {
            return conversions;
        };
        let context = self.member_context();
        for id in table.scope(scope).declaration_ids() {
            let declaration = table.declaration(id);
            let Some(routine) = declaration.as_routine() else {
                continue;
            };
            if !routine.is_operator()
                || !names_match(declaration.name(), IMPLICIT_OPERATOR)
                || routine.parameters.len() != 1
            {
                continue;
            }
            let parameter = routine.parameters[0].ty.specialize(&context);
            let returned = routine.return_type.specialize(&context);
            if returned.is(&self.image) {
                conversions.from.push(parameter);
            } else if parameter.is(&self.image) {
                conversions.to.push(returned);
            }
        }
        conversions
    }

    pub fn is_convertible_from(&self, ty: &Type, table: &SymbolTable) -> bool {
        self.implicit_conversions(table)
            .from_types()
            .iter()
            .any(|from| ty.is_type(from))
    }

    pub fn is_convertible_to(&self, ty: &Type, table: &SymbolTable) -> bool {
        self.implicit_conversions(table)
            .to_types()
            .iter()
            .any(|to| ty.is_type(to))
    }

    /// Default array properties of this struct and its super types.
    ///
    /// An ancestor's property is hidden by a closer one with the same
    /// parameter types. Each property carries the bindings of the struct
    /// that declares it, so a property inherited from `TList<string>` reads
    /// its `T` as `string`.
    pub fn default_array_properties(&self, table: &SymbolTable) -> Vec<DefaultProperty> {
        let mut found: Vec<(DefaultProperty, Vec<Type>)> = Vec::new();
        self.collect_default_array_properties(table, &mut found);
        let mut ancestor = self.super_type();
        while let Some(current) = ancestor {
            let Some(structure) = current.as_struct() else {
                break;
            };
            structure.collect_default_array_properties(table, &mut found);
            ancestor = structure.super_type();
        }
        found.into_iter().map(|(property, _)| property).collect()
    }

    fn collect_default_array_properties(
        &self,
        table: &SymbolTable,
        found: &mut Vec<(DefaultProperty, Vec<Type>)>,
    ) {
        let Some(scope) = self.scope() else {
            return;
        };
        let context = self.member_context();
        for id in table.scope(scope).declaration_ids() {
            let Some(property) = table.declaration(id).as_property() else {
                continue;
            };
            if !property.is_default || property.parameters.is_empty() {
                continue;
            }
            let signature: Vec<Type> = property
                .parameters
                .iter()
                .map(|parameter: &Parameter| parameter.ty.specialize(&context))
                .collect();
            let hidden = found
                .iter()
                .any(|(_, existing)| same_signature(existing, &signature));
            if !hidden {
                let property = DefaultProperty {
                    declaration: id,
                    context: context.clone(),
                };
                found.push((property, signature));
            }
        }
    }
}

fn same_signature(a: &[Type], b: &[Type]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.is_type(y))
}
