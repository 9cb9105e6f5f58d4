//! The System scope: intrinsic type names, language root types and the
//! compiler-magic routines every unit can call.

use enumset::EnumSet;
use tracing::debug;

use super::declaration::{DeclarationKind, RoutineDeclaration};
use super::table::SymbolTable;
use crate::base::ScopeId;
use crate::syntax::{RoutineDirective, RoutineKind};
use crate::types::{
    ImagePart, IntrinsicType, Parameter, ParameterKind, ProceduralKind, StructDefinition,
    StructKind, Type, TypeError, TypeFactory,
};

pub(crate) const TOBJECT: &str = "TObject";
pub(crate) const IINTERFACE: &str = "IInterface";
pub(crate) const TCLASS_HELPER_BASE: &str = "TClassHelperBase";

pub(super) fn populate(table: &mut SymbolTable, factory: &TypeFactory) -> Result<(), TypeError> {
    let system = table.system_scope();
    table.declare(
        system,
        "System",
        DeclarationKind::Unit { scope: system },
        factory.unknown(),
        None,
    );
    for intrinsic in IntrinsicType::ALL {
        declare_type(table, system, intrinsic.image(), factory.get_intrinsic(intrinsic));
    }

    let object = root_struct(table, factory, TOBJECT, StructKind::Class, Vec::new())?;
    declare_object_members(table, factory, &object);

    let interface = root_struct(table, factory, IINTERFACE, StructKind::Interface, Vec::new())?;
    declare_type(
        table,
        system,
        "IUnknown",
        factory.weak_alias("IUnknown", interface)?,
    );
    root_struct(
        table,
        factory,
        TCLASS_HELPER_BASE,
        StructKind::Class,
        vec![object],
    )?;

    let boolean = factory.get_intrinsic(IntrinsicType::Boolean);
    for name in ["True", "False"] {
        table.declare(system, name, DeclarationKind::Constant, boolean.clone(), None);
    }

    declare_intrinsic_routines(table, factory);
    debug!(declarations = table.declaration_count(), "populated system scope");
    Ok(())
}

fn declare_type(table: &mut SymbolTable, scope: ScopeId, name: &str, ty: Type) {
    table.declare(
        scope,
        name,
        DeclarationKind::Type {
            type_parameters: Vec::new(),
        },
        ty,
        None,
    );
}

fn root_struct(
    table: &mut SymbolTable,
    factory: &TypeFactory,
    name: &str,
    kind: StructKind,
    parents: Vec<Type>,
) -> Result<Type, TypeError> {
    let system = table.system_scope();
    let ty = factory.forward_struct(vec![ImagePart::new(name)]);
    let scope = table.add_type_scope(system, ty.clone());
    factory.complete_struct(&ty, StructDefinition::new(kind, scope, parents))?;
    declare_type(table, system, name, ty.clone());
    Ok(ty)
}

fn declare_object_members(table: &mut SymbolTable, factory: &TypeFactory, object: &Type) {
    let Some(scope) = object.as_struct().and_then(|structure| structure.scope()) else {
        return;
    };
    let void = factory.void();
    let string = factory.get_intrinsic(IntrinsicType::String);
    let signature = |kind, parameters: &[Parameter], return_type: &Type| RoutineDeclaration {
        kind,
        parameters: parameters.to_vec(),
        return_type: return_type.clone(),
        directives: EnumSet::new(),
        is_class: false,
        implementation: None,
    };

    declare_routine(table, factory, scope, "Create", signature(RoutineKind::Constructor, &[], &void));
    declare_routine(
        table,
        factory,
        scope,
        "Destroy",
        RoutineDeclaration {
            directives: RoutineDirective::Virtual.into(),
            ..signature(RoutineKind::Destructor, &[], &void)
        },
    );
    declare_routine(table, factory, scope, "Free", signature(RoutineKind::Procedure, &[], &void));
    declare_routine(
        table,
        factory,
        scope,
        "ClassName",
        RoutineDeclaration {
            is_class: true,
            ..signature(RoutineKind::Function, &[], &string)
        },
    );
}

fn declare_routine(
    table: &mut SymbolTable,
    factory: &TypeFactory,
    scope: ScopeId,
    name: &str,
    routine: RoutineDeclaration,
) {
    let ty = factory.procedural(
        None,
        ProceduralKind::Routine,
        routine.parameters.clone(),
        routine.return_type.clone(),
    );
    table.declare(scope, name, DeclarationKind::Routine(routine), ty, None);
}

/// Routines the compiler implements itself. Their parameters are untyped so
/// any argument is accepted.
fn declare_intrinsic_routines(table: &mut SymbolTable, factory: &TypeFactory) {
    let system = table.system_scope();
    let untyped = |name: &str| Parameter::new(name, factory.untyped());
    let integer = factory.get_intrinsic(IntrinsicType::Integer);
    let int64 = factory.get_intrinsic(IntrinsicType::Int64);
    let boolean = factory.get_intrinsic(IntrinsicType::Boolean);
    let char_type = factory.get_intrinsic(IntrinsicType::Char);
    let void = factory.void();

    let routines: Vec<(&str, RoutineKind, Vec<Parameter>, Type, EnumSet<RoutineDirective>)> = vec![
        ("Length", RoutineKind::Function, vec![untyped("S")], integer.clone(), EnumSet::new()),
        (
            "SetLength",
            RoutineKind::Procedure,
            vec![
                untyped("S").with_kind(ParameterKind::Var),
                Parameter::new("NewLength", integer.clone()),
            ],
            void.clone(),
            EnumSet::new(),
        ),
        (
            "Inc",
            RoutineKind::Procedure,
            vec![
                untyped("X").with_kind(ParameterKind::Var),
                Parameter::new("N", int64.clone()).with_default(),
            ],
            void.clone(),
            EnumSet::new(),
        ),
        (
            "Dec",
            RoutineKind::Procedure,
            vec![
                untyped("X").with_kind(ParameterKind::Var),
                Parameter::new("N", int64.clone()).with_default(),
            ],
            void.clone(),
            EnumSet::new(),
        ),
        ("Assigned", RoutineKind::Function, vec![untyped("P")], boolean, EnumSet::new()),
        ("Ord", RoutineKind::Function, vec![untyped("X")], int64, EnumSet::new()),
        (
            "Chr",
            RoutineKind::Function,
            vec![Parameter::new("X", factory.get_intrinsic(IntrinsicType::Byte))],
            char_type,
            EnumSet::new(),
        ),
        ("High", RoutineKind::Function, vec![untyped("X")], integer.clone(), EnumSet::new()),
        ("Low", RoutineKind::Function, vec![untyped("X")], integer.clone(), EnumSet::new()),
        ("SizeOf", RoutineKind::Function, vec![untyped("X")], integer, EnumSet::new()),
        (
            "Exit",
            RoutineKind::Procedure,
            vec![untyped("Result").with_default()],
            void.clone(),
            EnumSet::new(),
        ),
        (
            "WriteLn",
            RoutineKind::Procedure,
            Vec::new(),
            void,
            RoutineDirective::Varargs.into(),
        ),
    ];

    for (name, kind, parameters, return_type, directives) in routines {
        declare_routine(
            table,
            factory,
            system,
            name,
            RoutineDeclaration {
                kind,
                parameters,
                return_type,
                directives,
                is_class: false,
                implementation: None,
            },
        );
    }
}

