use delphi::syntax::{ExpressionSyntax, MemberSyntax, NodeIds, RoutineDirective, RoutineHeadingSyntax};
use delphi::types::StructKind;

use crate::helpers::assertions::{resolved_declaration, segment_node};
use crate::helpers::units::{bind, declared_type, field, structure, unit, variable};

fn speak(ids: &mut NodeIds, directive: RoutineDirective) -> MemberSyntax {
    MemberSyntax::Method(RoutineHeadingSyntax::procedure(ids, "Speak").with_directive(directive))
}

#[test]
fn test_animal_hierarchy_end_to_end() {
    let mut ids = NodeIds::new();
    let animal_members = vec![field(&mut ids, "Name", "String"), speak(&mut ids, RoutineDirective::Virtual)];
    let animal = structure(&mut ids, "TAnimal", StructKind::Class, &[], animal_members);
    let dog_members = vec![speak(&mut ids, RoutineDirective::Override)];
    let dog = structure(&mut ids, "TDog", StructKind::Class, &["TAnimal"], dog_members);
    let rex = variable(&mut ids, "Rex", "TDog");

    let speaks = ExpressionSyntax::name(&mut ids, "Rex.Speak");
    let named = ExpressionSyntax::name(&mut ids, "Rex.Name");
    let created = ExpressionSyntax::name(&mut ids, "TDog.Create");
    let (speaks_node, named_node, created_node) =
        (segment_node(&speaks), segment_node(&named), created.node());
    let unit = unit(&mut ids, "Zoo", &[], vec![animal, dog, rex], vec![speaks, named, created]);

    let resolved = bind(&unit);
    let animal = declared_type(&resolved, "TAnimal");
    let dog = declared_type(&resolved, "TDog");
    let table = resolved.table();

    assert!(dog.is_sub_type_of("TAnimal"));
    assert!(dog.is_sub_type_of("TObject"));
    assert!(dog.super_type().unwrap().ptr_eq(&animal));

    let own_speak = table.lookup_member(&dog, "Speak").unwrap().first();
    assert_eq!(resolved_declaration(&resolved, speaks_node), own_speak);
    assert_ne!(own_speak, table.lookup_member(&animal, "Speak").unwrap().first());

    let inherited_name = table.lookup_member(&animal, "Name").unwrap().first();
    assert_eq!(resolved_declaration(&resolved, named_node), inherited_name);
    assert!(resolved.type_of(named_node).unwrap().is_string());

    assert!(resolved.type_of(created_node).unwrap().ptr_eq(&dog));
}

#[test]
fn test_interface_and_class_parents() {
    let mut ids = NodeIds::new();
    let walker = structure(&mut ids, "IWalker", StructKind::Interface, &[], Vec::new());
    let robot = structure(&mut ids, "TRobot", StructKind::Class, &["TInterfacedThing", "IWalker"], Vec::new());
    let base = structure(&mut ids, "TInterfacedThing", StructKind::Class, &[], Vec::new());
    let unit = unit(&mut ids, "Machines", &[], vec![walker, robot, base], Vec::new());

    let resolved = bind(&unit);
    let robot = declared_type(&resolved, "TRobot");

    assert!(robot.is_sub_type_of("IWalker"));
    assert!(robot.is_sub_type_of("IInterface"));
    assert!(robot.super_type().unwrap().is("TInterfacedThing"));
}
