use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, warn};

use super::dependencies::UnitIndex;
use crate::base::{Name, TargetConfig};
use crate::semantic::{Binder, ResolveError, ResolvedUnit};
use crate::syntax::UnitSyntax;
use crate::types::TypeFactory;

/// What analysing one unit produced.
#[derive(Debug)]
pub enum UnitOutcome {
    Resolved(ResolvedUnit),
    Failed { unit: Name, error: ResolveError },
}

impl UnitOutcome {
    pub fn name(&self) -> &Name {
        match self {
            UnitOutcome::Resolved(resolved) => resolved.name(),
            UnitOutcome::Failed { unit, .. } => unit,
        }
    }

    pub fn resolved(&self) -> Option<&ResolvedUnit> {
        match self {
            UnitOutcome::Resolved(resolved) => Some(resolved),
            UnitOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ResolveError> {
        match self {
            UnitOutcome::Resolved(_) => None,
            UnitOutcome::Failed { error, .. } => Some(error),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, UnitOutcome::Resolved(_))
    }
}

/// Units analysed for one target configuration.
#[derive(Debug, Clone)]
pub struct Project {
    factory: Arc<TypeFactory>,
}

impl Project {
    pub fn new(config: TargetConfig) -> Self {
        Self::with_factory(Arc::new(TypeFactory::new(config)))
    }

    pub fn with_factory(factory: Arc<TypeFactory>) -> Self {
        Self { factory }
    }

    pub fn factory(&self) -> &Arc<TypeFactory> {
        &self.factory
    }

    /// Analyse every unit, in parallel. Outcomes keep the order of `units`;
    /// one unit failing never stops the others.
    pub fn analyze(&self, units: &[UnitSyntax]) -> Vec<UnitOutcome> {
        debug!(units = units.len(), "analysing project");
        let (index, duplicates) = UnitIndex::new(units);
        units
            .par_iter()
            .enumerate()
            .map(|(position, unit)| {
                let result = if duplicates.contains(&position) {
                    Err(ResolveError::DuplicateUnit(unit.name.to_string()))
                } else {
                    index
                        .dependencies(position)
                        .and_then(|dependencies| self.analyze_unit(unit, &dependencies))
                };
                match result {
                    Ok(resolved) => UnitOutcome::Resolved(resolved),
                    Err(error) => {
                        warn!(unit = %unit.name, %error, "unit analysis failed");
                        UnitOutcome::Failed {
                            unit: unit.name.clone(),
                            error,
                        }
                    }
                }
            })
            .collect()
    }

    /// Bind `unit` after the units it uses, given in dependency order.
    pub fn analyze_unit(
        &self,
        unit: &UnitSyntax,
        dependencies: &[&UnitSyntax],
    ) -> Result<ResolvedUnit, ResolveError> {
        let mut binder = Binder::new(&self.factory)?;
        for dependency in dependencies {
            binder.bind_dependency(dependency)?;
        }
        binder.bind(unit)
    }
}
