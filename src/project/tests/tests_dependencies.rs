use super::*;
use crate::project::dependencies::UnitIndex;
use crate::semantic::ResolveError;

fn names(units: Vec<&UnitSyntax>) -> Vec<&str> {
    units.into_iter().map(|unit| unit.name.as_str()).collect()
}

#[test]
fn test_dependencies_come_before_their_users() {
    let mut ids = NodeIds::new();
    let units = vec![
        unit(&mut ids, "Main", &["Views", "Models"], &[]),
        unit(&mut ids, "Views", &["Models"], &[]),
        unit(&mut ids, "Models", &["Base"], &[]),
        unit(&mut ids, "Base", &[], &[]),
    ];

    let (index, duplicates) = UnitIndex::new(&units);

    assert!(duplicates.is_empty());
    assert_eq!(names(index.dependencies(0).unwrap()), vec!["Base", "Models", "Views"]);
    assert_eq!(names(index.dependencies(1).unwrap()), vec!["Base", "Models"]);
    assert!(index.dependencies(3).unwrap().is_empty());
}

#[test]
fn test_units_outside_the_batch_are_skipped() {
    let mut ids = NodeIds::new();
    let units = vec![unit(&mut ids, "Main", &["SysUtils", "Helpers"], &[]), unit(&mut ids, "helpers", &[], &[])];

    let (index, _) = UnitIndex::new(&units);

    assert_eq!(names(index.dependencies(0).unwrap()), vec!["helpers"]);
}

#[test]
fn test_circular_uses_are_reported() {
    let mut ids = NodeIds::new();
    let units = vec![
        unit(&mut ids, "Left", &["Right"], &[]),
        unit(&mut ids, "Right", &["Left"], &[]),
    ];

    let (index, _) = UnitIndex::new(&units);

    assert_eq!(
        index.dependencies(0).err(),
        Some(ResolveError::CircularUses("Left".to_string()))
    );
}

#[test]
fn test_duplicate_names_are_reported_by_position() {
    let mut ids = NodeIds::new();
    let units = vec![
        unit(&mut ids, "Shared", &[], &[]),
        unit(&mut ids, "Other", &[], &[]),
        unit(&mut ids, "SHARED", &[], &[]),
    ];

    let (_, duplicates) = UnitIndex::new(&units);

    assert_eq!(duplicates, vec![2]);
}
