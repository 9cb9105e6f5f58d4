use delphi::types::{IntrinsicType, Type};
use rstest::rstest;

use crate::helpers::assertions::assert_same_capabilities;
use crate::helpers::factories::WIN32;

fn intrinsic(intrinsic: IntrinsicType) -> Type {
    WIN32.get_intrinsic(intrinsic)
}

#[rstest]
#[case(IntrinsicType::Integer)]
#[case(IntrinsicType::Byte)]
#[case(IntrinsicType::Double)]
#[case(IntrinsicType::Boolean)]
#[case(IntrinsicType::Char)]
#[case(IntrinsicType::AnsiString)]
#[case(IntrinsicType::Pointer)]
fn test_aliases_answer_like_aliased(#[case] aliased: IntrinsicType) {
    let aliased = intrinsic(aliased);
    let weak = WIN32.weak_alias("TWeak", aliased.clone()).unwrap();
    let strong = WIN32.strong_alias("TStrong", aliased.clone()).unwrap();

    for alias in [&weak, &strong] {
        assert_same_capabilities(alias, &aliased);
        assert_eq!(alias.size(), aliased.size());
        assert_eq!(alias.ordinal_range(), aliased.ordinal_range());
        assert!(alias.actual().ptr_eq(aliased.actual()));
    }
}

#[test]
fn test_weak_alias_matches_both_names() {
    let integer = intrinsic(IntrinsicType::Integer);
    let weak = WIN32.weak_alias("TCount", integer.clone()).unwrap();

    assert!(weak.is_type(&integer));
    assert!(integer.is_type(&weak));
    assert!(weak.is("tcount"));
    assert_eq!(weak.image(), "TCount");
}

#[test]
fn test_strong_alias_is_its_own_type() {
    let integer = intrinsic(IntrinsicType::Integer);
    let strong = WIN32.strong_alias("TIdentifier", integer.clone()).unwrap();

    assert!(!strong.is_type(&integer));
    assert!(!integer.is_type(&strong));
    assert!(strong.is_strong_alias());
    assert!(strong.is_integer());
}

#[test]
fn test_alias_of_alias_reaches_the_root() {
    let integer = intrinsic(IntrinsicType::Integer);
    let inner = WIN32.weak_alias("TInner", integer.clone()).unwrap();
    let outer = WIN32.strong_alias("TOuter", inner).unwrap();

    assert!(outer.actual().ptr_eq(&integer));
    assert_same_capabilities(&outer, &integer);
}

#[test]
fn test_void_and_constructors_are_not_aliasable() {
    assert!(WIN32.weak_alias("TNothing", WIN32.void()).is_err());
    assert!(WIN32.strong_alias("TNothing", WIN32.untyped()).is_err());
    let constructor = WIN32.array_constructor(vec![intrinsic(IntrinsicType::Integer)]);
    assert!(WIN32.weak_alias("TElements", constructor).is_err());
}
