use super::*;
use crate::semantic::symbol_table::VariableKind;
use crate::syntax::{BinaryOperator, ParameterSyntax, RoutineDirective, RoutineSyntax};

fn parameter(ids: &mut NodeIds, name: &str, ty: &str) -> ParameterSyntax {
    let ty = TypeSyntax::named(ids, ty);
    ParameterSyntax::new(ids, name, ty)
}

fn routine_named<'a>(resolved: &'a ResolvedUnit, name: &str) -> &'a crate::semantic::Declaration {
    let found = resolved.lookup(name).unwrap();
    resolved.declaration(found.first())
}

#[test]
fn test_implementation_completes_heading() {
    let mut ids = NodeIds::new();
    let x = parameter(&mut ids, "X", "Integer");
    let heading = function(&mut ids, "Twice", "Integer").with_parameter(x);
    let forward = RoutineSyntax::new(&mut ids, heading).heading_only();
    let x = parameter(&mut ids, "X", "Integer");
    let heading = function(&mut ids, "Twice", "Integer").with_parameter(x);
    let implementation_node = heading.node;
    let implementation = RoutineSyntax::new(&mut ids, heading);
    let unit = UnitSyntax::new(&mut ids, "Math")
        .with(DeclarationSyntax::Routine(forward))
        .with(DeclarationSyntax::Routine(implementation));

    let resolved = bind(&unit);
    let found = resolved.lookup("Twice").unwrap();

    assert!(!found.is_overloaded());
    let routine = resolved.declaration(found.first()).as_routine().unwrap();
    assert!(routine.implementation.is_some());
    assert!(routine.return_type.is_intrinsic(IntrinsicType::Integer));
    assert_eq!(resolved.declaration_of(implementation_node), Some(found.first()));
}

#[test]
fn test_heading_without_body_has_no_implementation() {
    let mut ids = NodeIds::new();
    let heading = RoutineHeadingSyntax::procedure(&mut ids, "Later");
    let forward = RoutineSyntax::new(&mut ids, heading).heading_only();
    let unit = UnitSyntax::new(&mut ids, "Pending").with(DeclarationSyntax::Routine(forward));

    let resolved = bind(&unit);
    let routine = routine_named(&resolved, "Later").as_routine().unwrap();

    assert!(routine.implementation.is_none());
    assert!(routine.return_type.is_void());
}

#[test]
fn test_method_implementation_binds_self_and_fields() {
    let mut ids = NodeIds::new();
    let bar = RoutineHeadingSyntax::procedure(&mut ids, "Bar");
    let members = vec![field(&mut ids, "Count", "Integer"), MemberSyntax::Method(bar)];
    let this = ExpressionSyntax::name(&mut ids, "Self");
    let this_segment = last_segment(&this);
    let count = ExpressionSyntax::name(&mut ids, "Count");
    let count_segment = last_segment(&count);
    let one = ExpressionSyntax::integer(&mut ids, 1);
    let assignment = StatementSyntax::assign(&mut ids, count, one);
    let heading = RoutineHeadingSyntax::procedure(&mut ids, "Bar");
    let implementation = RoutineSyntax::method(&mut ids, "TFoo", heading)
        .with_statement(StatementSyntax::Expression(this))
        .with_statement(assignment);
    let unit = UnitSyntax::new(&mut ids, "Foos")
        .with_type(class(&mut ids, "TFoo", &[], members))
        .with(DeclarationSyntax::Routine(implementation));

    let resolved = bind(&unit);
    let foo = type_named(&resolved, "TFoo");

    let this = resolved.occurrence_at(this_segment).unwrap();
    assert!(this.is_self());
    assert!(resolved.type_of(this_segment).unwrap().ptr_eq(&foo));
    let self_declaration = resolved.declaration(this.declaration().unwrap());
    assert!(self_declaration.is_self_reference());

    let count = resolved.declaration_of(count_segment).unwrap();
    assert!(matches!(
        resolved.declaration(count).kind(),
        DeclarationKind::Variable(VariableKind::Field)
    ));
    assert!(resolved.type_of(count_segment).unwrap().is_intrinsic(IntrinsicType::Integer));

    let bar = resolved.table().lookup_member(&foo, "Bar").unwrap();
    assert!(resolved.declaration(bar.first()).as_routine().unwrap().implementation.is_some());
    assert!(resolved.lookup("Bar").is_none());
}

#[test]
fn test_overloaded_methods_link_by_parameter_types() {
    let mut ids = NodeIds::new();
    let integer = parameter(&mut ids, "Value", "Integer");
    let put_integer = RoutineHeadingSyntax::procedure(&mut ids, "Put").with_parameter(integer);
    let put_integer_node = put_integer.node;
    let text = parameter(&mut ids, "Value", "string");
    let put_string = RoutineHeadingSyntax::procedure(&mut ids, "Put").with_parameter(text);
    let put_string_node = put_string.node;
    let members = vec![MemberSyntax::Method(put_integer), MemberSyntax::Method(put_string)];

    let text = parameter(&mut ids, "Value", "string");
    let heading = RoutineHeadingSyntax::procedure(&mut ids, "Put").with_parameter(text);
    let string_implementation_node = heading.node;
    let string_implementation = RoutineSyntax::method(&mut ids, "TWriter", heading);
    let integer = parameter(&mut ids, "Value", "Integer");
    let heading = RoutineHeadingSyntax::procedure(&mut ids, "Put").with_parameter(integer);
    let integer_implementation_node = heading.node;
    let integer_implementation = RoutineSyntax::method(&mut ids, "TWriter", heading);

    let unit = UnitSyntax::new(&mut ids, "Writers")
        .with_type(class(&mut ids, "TWriter", &[], members))
        .with(DeclarationSyntax::Routine(string_implementation))
        .with(DeclarationSyntax::Routine(integer_implementation));

    let resolved = bind(&unit);
    let put_integer = resolved.declaration_of(put_integer_node).unwrap();
    let put_string = resolved.declaration_of(put_string_node).unwrap();

    assert_ne!(put_integer, put_string);
    assert_eq!(resolved.declaration_of(string_implementation_node), Some(put_string));
    assert_eq!(resolved.declaration_of(integer_implementation_node), Some(put_integer));
    for id in [put_integer, put_string] {
        assert!(resolved.declaration(id).as_routine().unwrap().implementation.is_some());
    }
}

#[test]
fn test_result_and_parameters_in_function_body() {
    let mut ids = NodeIds::new();
    let x = parameter(&mut ids, "X", "Integer");
    let x_node = x.node;
    let heading = function(&mut ids, "Square", "Int64").with_parameter(x);
    let result = ExpressionSyntax::name(&mut ids, "Result");
    let result_segment = last_segment(&result);
    let left = ExpressionSyntax::name(&mut ids, "x");
    let x_segment = last_segment(&left);
    let right = ExpressionSyntax::name(&mut ids, "X");
    let product = ExpressionSyntax::binary(&mut ids, BinaryOperator::Multiply, left, right);
    let assignment = StatementSyntax::assign(&mut ids, result, product);
    let routine = RoutineSyntax::new(&mut ids, heading).with_statement(assignment);
    let unit = UnitSyntax::new(&mut ids, "Math").with(DeclarationSyntax::Routine(routine));

    let resolved = bind(&unit);

    let result = resolved.occurrence_at(result_segment).unwrap();
    let declaration = resolved.declaration(result.declaration().unwrap());
    assert!(matches!(declaration.kind(), DeclarationKind::Variable(VariableKind::Result)));
    assert!(declaration.node().is_none());
    assert!(result.ty().unwrap().is_intrinsic(IntrinsicType::Int64));

    let parameter = resolved.declaration_of(x_node).unwrap();
    assert_eq!(resolved.declaration_of(x_segment), Some(parameter));
    assert_eq!(resolved.usages(parameter).len(), 2);
    assert!(matches!(
        resolved.declaration(parameter).kind(),
        DeclarationKind::Variable(VariableKind::Parameter)
    ));
}

#[test]
fn test_procedure_has_no_result() {
    let mut ids = NodeIds::new();
    let heading = RoutineHeadingSyntax::procedure(&mut ids, "Run");
    let result = ExpressionSyntax::name(&mut ids, "Result");
    let result_segment = last_segment(&result);
    let routine = RoutineSyntax::new(&mut ids, heading).with_statement(StatementSyntax::Expression(result));
    let unit = UnitSyntax::new(&mut ids, "Runner").with(DeclarationSyntax::Routine(routine));

    let resolved = bind(&unit);

    let occurrence = resolved.occurrence_at(result_segment).unwrap();
    assert_eq!(occurrence.resolution(), Resolution::NotFound);
}

#[test]
fn test_local_shadows_global() {
    let mut ids = NodeIds::new();
    let global = variable(&mut ids, "Value", "Integer");
    let reference = ExpressionSyntax::name(&mut ids, "Value");
    let reference_segment = last_segment(&reference);
    let local = variable_syntax(&mut ids, "Value", "string");
    let local_node = local.node;
    let heading = RoutineHeadingSyntax::procedure(&mut ids, "Run");
    let routine = RoutineSyntax::new(&mut ids, heading)
        .with_local(DeclarationSyntax::Variable(local))
        .with_statement(StatementSyntax::Expression(reference));
    let unit = UnitSyntax::new(&mut ids, "Scopes")
        .with(global)
        .with(DeclarationSyntax::Routine(routine));

    let resolved = bind(&unit);
    let local = resolved.declaration_of(local_node).unwrap();

    assert_eq!(resolved.declaration_of(reference_segment), Some(local));
    assert!(matches!(
        resolved.declaration(local).kind(),
        DeclarationKind::Variable(VariableKind::Local)
    ));
    assert!(resolved.type_of(reference_segment).unwrap().is_string());
}

#[test]
fn test_nested_routine_sees_enclosing_locals() {
    let mut ids = NodeIds::new();
    let counter = variable_syntax(&mut ids, "Counter", "Integer");
    let counter_node = counter.node;
    let reference = ExpressionSyntax::name(&mut ids, "Counter");
    let reference_segment = last_segment(&reference);
    let inner_heading = RoutineHeadingSyntax::procedure(&mut ids, "Bump");
    let inner = RoutineSyntax::new(&mut ids, inner_heading).with_statement(StatementSyntax::Expression(reference));
    let outer_heading = RoutineHeadingSyntax::procedure(&mut ids, "Run");
    let outer = RoutineSyntax::new(&mut ids, outer_heading)
        .with_local(DeclarationSyntax::Variable(counter))
        .with_local(DeclarationSyntax::Routine(inner));
    let unit = UnitSyntax::new(&mut ids, "Nested").with(DeclarationSyntax::Routine(outer));

    let resolved = bind(&unit);

    let counter = resolved.declaration_of(counter_node).unwrap();
    assert_eq!(resolved.declaration_of(reference_segment), Some(counter));
    assert!(resolved.lookup("Bump").is_none());
}

#[test]
fn test_unused_declarations() {
    let mut ids = NodeIds::new();
    let used = variable(&mut ids, "Used", "Integer");
    let unused = variable(&mut ids, "Unused", "Integer");
    let target = ExpressionSyntax::name(&mut ids, "Used");
    let one = ExpressionSyntax::integer(&mut ids, 1);
    let assignment = StatementSyntax::assign(&mut ids, target, one);
    let heading = RoutineHeadingSyntax::procedure(&mut ids, "Run");
    let routine = RoutineSyntax::new(&mut ids, heading).with_statement(assignment);
    let call = StatementSyntax::call(&mut ids, "Run", Vec::new());
    let unit = UnitSyntax::new(&mut ids, "Usage")
        .using(&mut ids, "System")
        .with(used)
        .with(unused)
        .with(DeclarationSyntax::Routine(routine))
        .with_initialization(call);

    let resolved = bind(&unit);
    let names: Vec<&str> = resolved
        .unused_declarations()
        .into_iter()
        .map(|id| resolved.declaration(id).name().as_str())
        .collect();

    assert_eq!(names, vec!["Unused"]);
}

#[test]
fn test_overrides_are_never_unused() {
    let mut ids = NodeIds::new();
    let paint = RoutineHeadingSyntax::procedure(&mut ids, "Paint").with_directive(RoutineDirective::Virtual);
    let paint_node = paint.node;
    let repaint = RoutineHeadingSyntax::procedure(&mut ids, "Paint").with_directive(RoutineDirective::Override);
    let repaint_node = repaint.node;
    let unit = UnitSyntax::new(&mut ids, "Painting")
        .with_type(class(&mut ids, "TShape", &[], vec![MemberSyntax::Method(paint)]))
        .with_type(class(&mut ids, "TCircle", &["TShape"], vec![MemberSyntax::Method(repaint)]));

    let resolved = bind(&unit);
    let unused = resolved.unused_declarations();

    assert!(unused.contains(&resolved.declaration_of(paint_node).unwrap()));
    assert!(!unused.contains(&resolved.declaration_of(repaint_node).unwrap()));
    let shape = resolved.lookup("TShape").unwrap().first();
    assert!(resolved.is_used(shape));
    assert!(!unused.contains(&shape));
}
