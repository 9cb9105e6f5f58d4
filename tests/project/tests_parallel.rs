use std::sync::Arc;

use delphi::base::{CompilerVersion, TargetConfig, Toolchain};
use delphi::project::Project;
use delphi::semantic::ResolveError;
use delphi::syntax::{ExpressionSyntax, NodeIds, UnitSyntax};
use delphi::types::IntrinsicType;

use crate::helpers::factories::{LINUX64, WIN32};
use crate::helpers::units::{unit, variable};

/// `Layer0` declares `Value0`; every later layer uses the one before it.
fn layered_units(count: usize) -> Vec<UnitSyntax> {
    let mut ids = NodeIds::new();
    (0..count)
        .map(|layer| {
            let declarations = vec![variable(&mut ids, &format!("Value{layer}"), "Integer")];
            let previous = layer.checked_sub(1).map(|previous| format!("Layer{previous}"));
            let uses: Vec<&str> = previous.iter().map(String::as_str).collect();
            let statements = match &previous {
                Some(_) => vec![ExpressionSyntax::name(&mut ids, &format!("Value{}", layer - 1))],
                None => Vec::new(),
            };
            unit(&mut ids, &format!("Layer{layer}"), &uses, declarations, statements)
        })
        .collect()
}

#[test]
fn test_parallel_analysis_shares_one_factory() {
    let project = Project::with_factory(Arc::clone(&WIN32));
    let units = layered_units(12);

    let outcomes = project.analyze(&units);

    assert_eq!(outcomes.len(), 12);
    let integer = WIN32.get_intrinsic(IntrinsicType::Integer);
    for (layer, outcome) in outcomes.iter().enumerate() {
        assert_eq!(outcome.name().as_str(), format!("Layer{layer}"));
        let resolved = outcome.resolved().unwrap();
        assert!(resolved.find_type("Integer").unwrap().ptr_eq(&integer));
        assert!(resolved.lookup(&format!("Value{layer}")).is_some());
    }
    assert!(Arc::ptr_eq(project.factory(), &WIN32));
}

#[test]
fn test_projects_for_different_targets_run_side_by_side() {
    let units = layered_units(4);
    let (win32, linux64) = rayon::join(
        || Project::with_factory(Arc::clone(&WIN32)).analyze(&units),
        || Project::with_factory(Arc::clone(&LINUX64)).analyze(&units),
    );

    let pointer_size = |outcomes: &[delphi::project::UnitOutcome]| {
        outcomes[3]
            .resolved()
            .unwrap()
            .find_type("Pointer")
            .unwrap()
            .size()
    };
    assert_eq!(pointer_size(&win32), 4);
    assert_eq!(pointer_size(&linux64), 8);
}

#[test]
fn test_failures_are_reported_per_unit() {
    let mut ids = NodeIds::new();
    let first = unit(&mut ids, "Ping", &["Pong"], Vec::new(), Vec::new());
    let second = unit(&mut ids, "Pong", &["Ping"], Vec::new(), Vec::new());
    let healthy = unit(&mut ids, "Healthy", &[], Vec::new(), Vec::new());
    let duplicate = unit(&mut ids, "healthy", &[], Vec::new(), Vec::new());

    let project = Project::new(TargetConfig::new(Toolchain::Dcc64, CompilerVersion::LATEST));
    let outcomes = project.analyze(&[first, second, healthy, duplicate]);

    assert!(matches!(outcomes[0].error(), Some(ResolveError::CircularUses(_))));
    assert!(matches!(outcomes[1].error(), Some(ResolveError::CircularUses(_))));
    assert!(outcomes[2].is_resolved());
    assert!(matches!(outcomes[3].error(), Some(ResolveError::DuplicateUnit(_))));
}
