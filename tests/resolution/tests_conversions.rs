use delphi::syntax::{ExpressionSyntax, NodeIds};
use delphi::types::{IntrinsicType, StructKind};

use crate::helpers::assertions::{resolved_declaration, segment_node};
use crate::helpers::factories::WIN32;
use crate::helpers::units::{bind, call, declared_type, field, implicit_operator, procedure, structure, unit, variable};

#[test]
fn test_implicit_operators_convert_arguments() {
    let mut ids = NodeIds::new();
    let money_members = vec![
        field(&mut ids, "Cents", "Int64"),
        implicit_operator(&mut ids, "Integer", "TMoney"),
        implicit_operator(&mut ids, "TMoney", "Double"),
    ];
    let money = structure(&mut ids, "TMoney", StructKind::Record, &[], money_members);
    let declarations = vec![
        money,
        procedure(&mut ids, "Pay", &[("Memo", "String")]),
        procedure(&mut ids, "Pay", &[("Amount", "TMoney")]),
        procedure(&mut ids, "Report", &[("Memo", "String")]),
        procedure(&mut ids, "Report", &[("Total", "Double")]),
        variable(&mut ids, "Amount", "Integer"),
        variable(&mut ids, "Wallet", "TMoney"),
    ];
    let amount = ExpressionSyntax::name(&mut ids, "Amount");
    let paid = call(&mut ids, "Pay", vec![amount]);
    let wallet = ExpressionSyntax::name(&mut ids, "Wallet");
    let reported = call(&mut ids, "Report", vec![wallet]);
    let (pay, report) = (segment_node(&paid), segment_node(&reported));
    let unit = unit(&mut ids, "Accounts", &[], declarations, vec![paid, reported]);

    let resolved = bind(&unit);
    assert_eq!(resolved_declaration(&resolved, pay), resolved.lookup("Pay").unwrap().declarations[1]);
    assert_eq!(
        resolved_declaration(&resolved, report),
        resolved.lookup("Report").unwrap().declarations[1]
    );

    let money = declared_type(&resolved, "TMoney");
    let money = money.as_struct().unwrap();
    let table = resolved.table();
    assert!(money.is_convertible_from(&WIN32.get_intrinsic(IntrinsicType::Integer), table));
    assert!(!money.is_convertible_from(&WIN32.get_intrinsic(IntrinsicType::String), table));
    assert!(money.is_convertible_to(&WIN32.get_intrinsic(IntrinsicType::Double), table));
    assert!(!money.is_convertible_to(&WIN32.get_intrinsic(IntrinsicType::Integer), table));

    let conversions = money.implicit_conversions(table);
    assert_eq!(conversions.from_types().len(), 1);
    assert_eq!(conversions.to_types().len(), 1);
}

#[test]
fn test_operators_of_a_parent_are_not_inherited() {
    let mut ids = NodeIds::new();
    let base_members = vec![implicit_operator(&mut ids, "Integer", "TBase")];
    let base = structure(&mut ids, "TBase", StructKind::Class, &[], base_members);
    let derived = structure(&mut ids, "TDerived", StructKind::Class, &["TBase"], Vec::new());
    let unit = unit(&mut ids, "Operators", &[], vec![base, derived], Vec::new());

    let resolved = bind(&unit);
    let integer = WIN32.get_intrinsic(IntrinsicType::Integer);
    let base = declared_type(&resolved, "TBase");
    let derived = declared_type(&resolved, "TDerived");

    assert!(base.as_struct().unwrap().is_convertible_from(&integer, resolved.table()));
    assert!(!derived.as_struct().unwrap().is_convertible_from(&integer, resolved.table()));
}

#[test]
fn test_operators_are_never_reported_unused() {
    let mut ids = NodeIds::new();
    let members = vec![implicit_operator(&mut ids, "Integer", "TCelsius")];
    let celsius = structure(&mut ids, "TCelsius", StructKind::Record, &[], members);
    let unit = unit(&mut ids, "Weather", &[], vec![celsius], Vec::new());

    let resolved = bind(&unit);
    for id in resolved.unused_declarations() {
        assert_ne!(resolved.declaration(id).name().as_str(), "Implicit");
    }
}
