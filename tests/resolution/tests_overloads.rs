use delphi::syntax::{DeclarationSyntax, ExpressionSyntax, NodeIds, RoutineHeadingSyntax, RoutineSyntax};
use rstest::rstest;

use crate::helpers::assertions::{resolved_declaration, segment_node};
use crate::helpers::units::{bind, call, named, parameter, procedure, unit, variable};

/// `function Name(X: Parameter): Returns`
fn function(ids: &mut NodeIds, name: &str, parameter_type: &str, returns: &str) -> DeclarationSyntax {
    let returns = named(ids, returns);
    let parameter = parameter(ids, "X", parameter_type);
    let heading = RoutineHeadingSyntax::function(ids, name, returns).with_parameter(parameter);
    DeclarationSyntax::Routine(RoutineSyntax::new(ids, heading))
}

fn overloaded_declarations(ids: &mut NodeIds) -> Vec<DeclarationSyntax> {
    vec![
        variable(ids, "Count", "Integer"),
        variable(ids, "Title", "String"),
        variable(ids, "Ratio", "Double"),
        function(ids, "Describe", "Integer", "Integer"),
        function(ids, "Describe", "String", "String"),
        function(ids, "Describe", "Double", "Double"),
    ]
}

#[rstest]
#[case("Count", 0)]
#[case("Title", 1)]
#[case("Ratio", 2)]
fn test_overload_chosen_by_argument_type(#[case] argument: &str, #[case] expected: usize) {
    let mut ids = NodeIds::new();
    let declarations = overloaded_declarations(&mut ids);
    let argument = ExpressionSyntax::name(&mut ids, argument);
    let described = call(&mut ids, "Describe", vec![argument]);
    let (callee, call_node) = (segment_node(&described), described.node());
    let unit = unit(&mut ids, "Overloads", &[], declarations, vec![described]);

    let resolved = bind(&unit);
    let candidates = resolved.lookup("Describe").unwrap();
    assert!(candidates.is_overloaded());
    let chosen = resolved_declaration(&resolved, callee);
    assert_eq!(chosen, candidates.declarations[expected]);

    let returned = resolved.type_of(call_node).unwrap();
    let declared = &resolved.declaration(chosen).as_routine().unwrap().return_type;
    assert!(returned.is_type(declared));
}

#[test]
fn test_arity_filters_before_types() {
    let mut ids = NodeIds::new();
    let one = procedure(&mut ids, "Log", &[("Message", "String")]);
    let two = procedure(&mut ids, "Log", &[("Level", "Integer"), ("Message", "String")]);
    let level = ExpressionSyntax::integer(&mut ids, 3);
    let message = ExpressionSyntax::string(&mut ids, "started");
    let logged = call(&mut ids, "Log", vec![level, message]);
    let callee = segment_node(&logged);
    let unit = unit(&mut ids, "Logging", &[], vec![one, two], vec![logged]);

    let resolved = bind(&unit);
    let candidates = resolved.lookup("Log").unwrap();
    assert_eq!(resolved_declaration(&resolved, callee), candidates.declarations[1]);
}

#[test]
fn test_equal_fits_go_to_first_declared() {
    let mut ids = NodeIds::new();
    let real = procedure(&mut ids, "Store", &[("Value", "Double")]);
    let integer = procedure(&mut ids, "Store", &[("Value", "Int64")]);
    let small = ExpressionSyntax::integer(&mut ids, 7);
    let stored = call(&mut ids, "Store", vec![small]);
    let callee = segment_node(&stored);
    let unit = unit(&mut ids, "Storage", &[], vec![real, integer], vec![stored]);

    let resolved = bind(&unit);
    let candidates = resolved.lookup("Store").unwrap();
    // Both fit without conversion; the first declared wins the tie.
    assert_eq!(resolved_declaration(&resolved, callee), candidates.declarations[0]);
}
