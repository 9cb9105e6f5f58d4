//! Assertions over types and resolved units.

use delphi::base::{DeclId, NodeId};
use delphi::semantic::ResolvedUnit;
use delphi::syntax::ExpressionSyntax;
use delphi::types::Type;

/// Every category predicate of `alias` agrees with `aliased`.
pub fn assert_same_capabilities(alias: &Type, aliased: &Type) {
    let predicates: [(&str, fn(&Type) -> bool); 12] = [
        ("integer", Type::is_integer),
        ("real", Type::is_real),
        ("boolean", Type::is_boolean),
        ("char", Type::is_char),
        ("string", Type::is_string),
        ("pointer", Type::is_pointer),
        ("array", Type::is_array),
        ("set", Type::is_set),
        ("struct", Type::is_struct),
        ("procedural", Type::is_procedural),
        ("enum", Type::is_enum),
        ("ordinal", Type::is_ordinal),
    ];
    for (name, predicate) in predicates {
        assert_eq!(
            predicate(alias),
            predicate(aliased),
            "{alias:?} and {aliased:?} disagree on is_{name}"
        );
    }
}

pub fn assert_same(actual: &Type, expected: &Type) {
    assert!(
        actual.ptr_eq(expected),
        "expected the {expected:?} instance, got {actual:?}"
    );
}

/// Node of the last name segment of a name expression.
pub fn segment_node(expression: &ExpressionSyntax) -> NodeId {
    match expression {
        ExpressionSyntax::Name { reference, .. } => reference.last().unwrap().node,
        ExpressionSyntax::Call { callee, .. } => segment_node(callee),
        ExpressionSyntax::Member { segment, .. } => segment.node,
        other => panic!("not a name: {other:?}"),
    }
}

/// The declaration a name segment resolved to.
pub fn resolved_declaration(resolved: &ResolvedUnit, segment: NodeId) -> DeclId {
    resolved
        .declaration_of(segment)
        .unwrap_or_else(|| panic!("segment {segment:?} did not resolve"))
}
