use delphi::syntax::{NodeIds, StructSyntax, TypeDeclarationSyntax, UnitSyntax};
use delphi::types::{IntrinsicType, Parameter, ProceduralKind, SpecializationContext, StructKind, Type};

use crate::helpers::assertions::assert_same;
use crate::helpers::factories::WIN32;
use crate::helpers::units::{bind, field};

fn context(parameter: &Type, argument: IntrinsicType) -> SpecializationContext {
    SpecializationContext::from_pairs(&[parameter.clone()], &[WIN32.get_intrinsic(argument)])
}

#[test]
fn test_types_without_parameters_specialize_to_themselves() {
    let t = WIN32.type_parameter("T");
    let context = context(&t, IntrinsicType::Integer);
    let integer = WIN32.get_intrinsic(IntrinsicType::Integer);
    let candidates = [
        integer.clone(),
        WIN32.get_intrinsic(IntrinsicType::String),
        WIN32.dynamic_array(None, integer.clone()),
        WIN32.pointer_to(None, integer.clone(), false),
        WIN32.set(None, WIN32.get_intrinsic(IntrinsicType::Byte)),
        WIN32.procedural(None, ProceduralKind::Routine, vec![Parameter::new("X", integer.clone())], integer),
        WIN32.unknown(),
    ];

    for ty in &candidates {
        assert!(!ty.can_be_specialized(&context), "{ty:?}");
        assert_same(&ty.specialize(&context), ty);
    }
}

#[test]
fn test_composites_of_a_parameter_are_rebuilt() {
    let t = WIN32.type_parameter("T");
    let context = context(&t, IntrinsicType::Double);

    let array = WIN32.dynamic_array(None, t.clone()).specialize(&context);
    assert!(array.as_array().unwrap().element().is_intrinsic(IntrinsicType::Double));

    let pointer = WIN32.pointer_to(None, t.clone(), false).specialize(&context);
    assert!(pointer.as_pointer().unwrap().dereferenced().unwrap().is_intrinsic(IntrinsicType::Double));

    let routine = WIN32
        .procedural(None, ProceduralKind::Routine, vec![Parameter::new("X", t.clone())], t.clone())
        .specialize(&context);
    let routine = routine.as_procedural().unwrap();
    assert!(routine.return_type().is_intrinsic(IntrinsicType::Double));
    assert!(routine.parameters()[0].ty.is_intrinsic(IntrinsicType::Double));

    assert!(t.specialize(&context).is_intrinsic(IntrinsicType::Double));
    assert_same(&t.specialize(&SpecializationContext::new()), &t);
}

#[test]
fn test_specialize_generic_binds_template_parameters() {
    let mut ids = NodeIds::new();
    let value = field(&mut ids, "Value", "T");
    let structure = StructSyntax::new(&mut ids, StructKind::Class).with_member(value);
    let declaration =
        TypeDeclarationSyntax::structure(&mut ids, "TBox", structure).with_type_parameters(&mut ids, &["T"]);
    let unit = UnitSyntax::new(&mut ids, "Boxes").with_type(declaration);

    let resolved = bind(&unit);
    let template = resolved.find_type("TBox").unwrap().clone();
    let string = WIN32.get_intrinsic(IntrinsicType::String);
    let specialized = WIN32.specialize_generic(&template, &[string.clone()]);

    assert_eq!(specialized.image(), "TBox<String>");
    let structure = specialized.as_struct().unwrap();
    assert!(structure.is_specialization());
    assert_same(structure.template().unwrap(), &template);
    assert_same(&structure.type_arguments()[0], &string);

    let integer = WIN32.get_intrinsic(IntrinsicType::Integer);
    assert_same(&WIN32.specialize_generic(&integer, &[string]), &integer);
}
