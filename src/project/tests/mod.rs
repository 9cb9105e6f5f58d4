#![allow(clippy::unwrap_used)]

use super::*;
use crate::base::TargetConfig;
use crate::syntax::{DeclarationSyntax, NodeIds, TypeSyntax, UnitSyntax, VariableSyntax};

mod tests_dependencies;

/// A unit using `uses` and declaring one `Integer` variable per name.
fn unit(ids: &mut NodeIds, name: &str, uses: &[&str], variables: &[&str]) -> UnitSyntax {
    let mut unit = UnitSyntax::new(ids, name);
    for used in uses {
        unit = unit.using(ids, used);
    }
    for variable in variables {
        let ty = TypeSyntax::named(ids, "Integer");
        let variable = VariableSyntax::new(ids, variable, ty);
        unit = unit.with(DeclarationSyntax::Variable(variable));
    }
    unit
}

fn project() -> Project {
    Project::new(TargetConfig::default())
}
