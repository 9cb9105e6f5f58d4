//! Procedural types and routine parameters.

use smol_str::SmolStr;

use super::Type;
use crate::base::Name;

/// How an argument is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParameterKind {
    #[default]
    Value,
    Const,
    Var,
    Out,
}

/// A formal parameter of a routine, procedural type or array property.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: Name,
    pub ty: Type,
    pub kind: ParameterKind,
    pub has_default: bool,
}

impl Parameter {
    pub fn new(name: impl Into<Name>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            kind: ParameterKind::Value,
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

    pub(crate) fn with_type(&self, ty: Type) -> Self {
        Self {
            ty,
            ..self.clone()
        }
    }
}

/// Flavour of a procedural type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProceduralKind {
    /// `procedure(...)`: a plain code pointer.
    Procedure,
    /// `procedure(...) of object`: code pointer plus instance.
    Method,
    /// `reference to procedure(...)`: an anonymous method.
    Reference,
    /// The signature of a declared routine.
    Routine,
}

#[derive(Debug)]
pub struct ProceduralType {
    image: SmolStr,
    size: u32,
    kind: ProceduralKind,
    parameters: Vec<Parameter>,
    return_type: Type,
}

impl ProceduralType {
    pub(crate) fn new(
        image: Option<SmolStr>,
        kind: ProceduralKind,
        parameters: Vec<Parameter>,
        return_type: Type,
        pointer_size: u32,
    ) -> Self {
        let image = image.unwrap_or_else(|| Self::structural_image(kind, &parameters, &return_type));
        let size = match kind {
            ProceduralKind::Method => pointer_size * 2,
            ProceduralKind::Procedure | ProceduralKind::Reference | ProceduralKind::Routine => {
                pointer_size
            }
        };
        Self {
            image,
            size,
            kind,
            parameters,
            return_type,
        }
    }

    pub(crate) fn rebuild(&self, parameters: Vec<Parameter>, return_type: Type) -> Self {
        let size = self.size;
        Self {
            image: Self::structural_image(self.kind, &parameters, &return_type),
            size,
            kind: self.kind,
            parameters,
            return_type,
        }
    }

    fn structural_image(kind: ProceduralKind, parameters: &[Parameter], return_type: &Type) -> SmolStr {
        let mut image = String::new();
        if kind == ProceduralKind::Reference {
            image.push_str("reference to ");
        }
        image.push_str(if return_type.is_void() {
            "procedure"
        } else {
            "function"
        });
        if !parameters.is_empty() {
            let types: Vec<&str> = parameters.iter().map(|p| p.ty.image()).collect();
            image.push('(');
            image.push_str(&types.join(", "));
            image.push(')');
        }
        if !return_type.is_void() {
            image.push_str(": ");
            image.push_str(return_type.image());
        }
        if kind == ProceduralKind::Method {
            image.push_str(" of object");
        }
        SmolStr::new(image)
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn kind(&self) -> ProceduralKind {
        self.kind
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn return_type(&self) -> &Type {
        &self.return_type
    }

    /// Parameters without a default value.
    pub fn required_parameter_count(&self) -> usize {
        self.parameters.iter().filter(|p| !p.has_default).count()
    }
}
