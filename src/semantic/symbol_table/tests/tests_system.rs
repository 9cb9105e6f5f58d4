use rstest::rstest;

use super::*;
use crate::base::NameKey;
use crate::types::IntrinsicType;

#[rstest]
#[case("Integer", IntrinsicType::Integer)]
#[case("INTEGER", IntrinsicType::Integer)]
#[case("string", IntrinsicType::String)]
#[case("Pointer", IntrinsicType::Pointer)]
#[case("extended", IntrinsicType::Extended)]
fn test_intrinsic_names_are_declared(#[case] name: &str, #[case] intrinsic: IntrinsicType) {
    let factory = factory();
    let table = table(&factory);

    let found = table.lookup(table.system_scope(), name).unwrap();
    let declaration = table.declaration(found.first());
    assert!(declaration.is_type());
    assert!(declaration.ty().ptr_eq(&factory.get_intrinsic(intrinsic)));
    assert!(declaration.node().is_none());
}

#[test]
fn test_language_roots() {
    let factory = factory();
    let table = table(&factory);
    let system = table.system_scope();
    let type_named = |name: &str| {
        let found = table.lookup(system, name).unwrap();
        table.declaration(found.first()).ty().clone()
    };

    let object = type_named(TOBJECT);
    assert!(object.is_class());
    assert!(object.super_type().is_none());

    let interface = type_named(IINTERFACE);
    assert!(interface.is_interface());

    let unknown = type_named("IUnknown");
    assert!(unknown.is_weak_alias());
    assert!(unknown.actual().ptr_eq(&interface));

    let helper_base = type_named(TCLASS_HELPER_BASE);
    assert!(helper_base.super_type().unwrap().ptr_eq(&object));
}

#[test]
fn test_object_members() {
    let factory = factory();
    let table = table(&factory);
    let found = table.lookup(table.system_scope(), TOBJECT).unwrap();
    let object = table.declaration(found.first()).ty().clone();

    let create = table.lookup_member(&object, "create").unwrap();
    let routine = table.declaration(create.first()).as_routine().unwrap();
    assert!(routine.is_constructor());
    assert!(create.owner.unwrap().ptr_eq(&object));

    let class_name = table.lookup_member(&object, "ClassName").unwrap();
    let routine = table.declaration(class_name.first()).as_routine().unwrap();
    assert!(routine.is_class);
    assert!(routine.return_type.is_string());

    assert!(table.lookup_member(&object, "Missing").is_none());
}

#[test]
fn test_intrinsic_routines_accept_any_argument() {
    let factory = factory();
    let table = table(&factory);
    let system = table.system_scope();

    let write_line = table.lookup(system, "WriteLn").unwrap();
    let routine = table.declaration(write_line.first()).as_routine().unwrap();
    assert!(routine.accepts(0));
    assert!(routine.accepts(5));

    let inc = table.lookup(system, "Inc").unwrap();
    let routine = table.declaration(inc.first()).as_routine().unwrap();
    assert!(routine.accepts(1));
    assert!(routine.accepts(2));
    assert!(!routine.accepts(3));
    assert!(routine.parameters[0].ty.is_untyped());
}

#[test]
fn test_boolean_constants_and_system_unit() {
    let factory = factory();
    let table = table(&factory);
    let system = table.system_scope();

    let found = table.lookup_in_scope(system, &NameKey::new("true")).unwrap();
    let declaration = table.declaration(found.first());
    assert!(matches!(declaration.kind(), DeclarationKind::Constant));
    assert!(declaration.ty().is_boolean());

    let unit = table.lookup(system, "System").unwrap();
    assert_eq!(table.declaration(unit.first()).unit_scope(), Some(system));
}
