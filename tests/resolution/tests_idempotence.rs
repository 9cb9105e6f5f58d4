use delphi::base::NodeId;
use delphi::semantic::{DeclarationKind, NameResolver, Resolution, ScopeKind, SymbolTable, VariableKind};
use delphi::types::IntrinsicType;

use crate::helpers::factories::WIN32;

#[test]
fn test_resolving_twice_returns_the_first_answer() {
    let mut table = SymbolTable::new(&WIN32).unwrap();
    let unit = table.add_scope(ScopeKind::Unit, table.system_scope());
    let integer = WIN32.get_intrinsic(IntrinsicType::Integer);
    let count = table.declare(
        unit,
        "Count",
        DeclarationKind::Variable(VariableKind::Global),
        integer.clone(),
        Some(NodeId::new(1)),
    );
    let occurrence = table.add_occurrence(NodeId::new(2), "COUNT", unit, None, Vec::new());

    let mut resolver = NameResolver::new(&mut table, &WIN32);
    assert_eq!(resolver.resolve(occurrence), Some(count));
    assert_eq!(resolver.resolve(occurrence), Some(count));
    assert_eq!(resolver.resolve_call(occurrence, &[integer.clone()]), Some(count));

    let resolved = table.occurrence(occurrence);
    assert_eq!(resolved.resolution(), Resolution::Resolved(count));
    assert!(resolved.ty().unwrap().ptr_eq(&integer));
}

#[test]
fn test_missing_name_stays_not_found() {
    let mut table = SymbolTable::new(&WIN32).unwrap();
    let unit = table.add_scope(ScopeKind::Unit, table.system_scope());
    let occurrence = table.add_occurrence(NodeId::new(1), "Nowhere", unit, None, Vec::new());

    let mut resolver = NameResolver::new(&mut table, &WIN32);
    assert_eq!(resolver.resolve(occurrence), None);
    assert_eq!(resolver.resolve(occurrence), None);

    let occurrence = table.occurrence(occurrence);
    assert_eq!(occurrence.resolution(), Resolution::NotFound);
    assert!(occurrence.ty().unwrap().is_unknown());
}

#[test]
fn test_qualifier_is_resolved_first() {
    let mut table = SymbolTable::new(&WIN32).unwrap();
    let unit = table.add_scope(ScopeKind::Unit, table.system_scope());
    let system = table.add_occurrence(NodeId::new(1), "System", unit, None, Vec::new());
    let integer = table.add_occurrence(NodeId::new(2), "Integer", unit, Some(system), Vec::new());

    let mut resolver = NameResolver::new(&mut table, &WIN32);
    let found = resolver.resolve(integer).unwrap();

    assert!(table.occurrence(system).declaration().is_some());
    assert!(table.declaration(found).is_type());
    assert!(table.occurrence(integer).ty().unwrap().is_type_type());
}
