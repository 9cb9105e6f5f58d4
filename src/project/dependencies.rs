//! Ordering the units a unit uses.

use rustc_hash::FxHashMap;

use crate::base::NameKey;
use crate::semantic::ResolveError;
use crate::syntax::UnitSyntax;

/// Units of one batch by name.
pub(super) struct UnitIndex<'a> {
    units: &'a [UnitSyntax],
    by_name: FxHashMap<NameKey, usize>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

impl<'a> UnitIndex<'a> {
    /// Index `units`; a unit whose name an earlier unit already took is
    /// reported by position.
    pub(super) fn new(units: &'a [UnitSyntax]) -> (Self, Vec<usize>) {
        let mut by_name = FxHashMap::default();
        let mut duplicates = Vec::new();
        for (index, unit) in units.iter().enumerate() {
            let key = NameKey::new(&unit.name);
            if by_name.contains_key(&key) {
                duplicates.push(index);
            } else {
                by_name.insert(key, index);
            }
        }
        (Self { units, by_name }, duplicates)
    }

    /// Units `root` uses, directly or not, each after the units it uses
    /// itself. Units missing from the batch are skipped.
    pub(super) fn dependencies(&self, root: usize) -> Result<Vec<&'a UnitSyntax>, ResolveError> {
        let mut state = FxHashMap::default();
        let mut order = Vec::new();
        self.visit(root, &mut state, &mut order)?;
        order.pop();
        Ok(order.into_iter().map(|index| &self.units[index]).collect())
    }

    fn visit(
        &self,
        index: usize,
        state: &mut FxHashMap<usize, Visit>,
        order: &mut Vec<usize>,
    ) -> Result<(), ResolveError> {
        match state.get(&index) {
            Some(Visit::Done) => return Ok(()),
            Some(Visit::InProgress) => {
                return Err(ResolveError::CircularUses(self.units[index].name.to_string()));
            }
            None => {}
        }
        state.insert(index, Visit::InProgress);
        for used in &self.units[index].uses {
            if let Some(&dependency) = self.by_name.get(&NameKey::new(&used.name)) {
                self.visit(dependency, state, order)?;
            }
        }
        state.insert(index, Visit::Done);
        order.push(index);
        Ok(())
    }
}
