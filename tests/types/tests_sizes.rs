use delphi::base::{Architecture, CompilerVersion, Toolchain};
use delphi::types::IntrinsicType;
use rstest::rstest;

use crate::helpers::factories::{LINUX64, WIN32, WIN64, factory, factory_for};

#[rstest]
#[case(Toolchain::Dcc32, CompilerVersion::LATEST, 4)]
#[case(Toolchain::Dcc64, CompilerVersion::LATEST, 4)]
#[case(Toolchain::DccLinux64, CompilerVersion::LATEST, 8)]
#[case(Toolchain::DccOsx64, CompilerVersion::LATEST, 8)]
#[case(Toolchain::DccAArm64, CompilerVersion::LATEST, 8)]
#[case(Toolchain::DccAArm, CompilerVersion::LATEST, 4)]
#[case(Toolchain::DccLinux64, CompilerVersion::VER200, 4)]
fn test_long_int_size(#[case] toolchain: Toolchain, #[case] version: CompilerVersion, #[case] size: u32) {
    let factory = factory(toolchain, version);
    let long_int = factory.get_intrinsic(IntrinsicType::LongInt);
    assert_eq!(long_int.size(), size);
    assert!(long_int.is_integer());
    assert!(long_int.is_weak_alias());
}

#[test]
fn test_architecture_override_changes_pointer_size() {
    let narrowed = factory_for(Toolchain::DccLinux64, CompilerVersion::LATEST, Architecture::X86);
    assert_eq!(narrowed.get_intrinsic(IntrinsicType::Pointer).size(), 4);
    assert_eq!(narrowed.get_intrinsic(IntrinsicType::LongInt).size(), 4);
    assert_eq!(LINUX64.get_intrinsic(IntrinsicType::Pointer).size(), 8);
}

#[rstest]
#[case(IntrinsicType::Pointer, 4, 8)]
#[case(IntrinsicType::NativeInt, 4, 8)]
#[case(IntrinsicType::Extended, 10, 8)]
#[case(IntrinsicType::Integer, 4, 4)]
#[case(IntrinsicType::Int64, 8, 8)]
#[case(IntrinsicType::Char, 2, 2)]
fn test_sizes_follow_windows_target(#[case] intrinsic: IntrinsicType, #[case] win32: u32, #[case] win64: u32) {
    assert_eq!(WIN32.get_intrinsic(intrinsic).size(), win32);
    assert_eq!(WIN64.get_intrinsic(intrinsic).size(), win64);
}

#[test]
fn test_literal_300_is_the_smallest_two_byte_integer() {
    let ty = WIN32.integer_from_literal(300).unwrap();
    assert!(ty.is_intrinsic(IntrinsicType::SmallInt));
    assert_eq!(ty.size(), 2);
    assert!(ty.is_signed());
}

#[test]
fn test_char_is_ansi_before_unicode() {
    let legacy = factory(Toolchain::Dcc32, CompilerVersion::VER120);
    assert_eq!(legacy.get_intrinsic(IntrinsicType::Char).size(), 1);
    assert!(legacy.get_intrinsic(IntrinsicType::String).is_ansi_string());
    assert!(WIN32.get_intrinsic(IntrinsicType::String).is_unicode_string());
}
