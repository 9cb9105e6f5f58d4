//! Choosing one routine among the overloads a lookup returned.

use tracing::{trace, warn};

use crate::base::DeclId;
use crate::semantic::symbol_table::{RoutineDeclaration, SymbolTable};
use crate::types::{SpecializationContext, Type, TypeCategory};

/// How well an argument fits a parameter. Higher is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Fit {
    Conversion = 1,
    Compatible = 2,
    Exact = 3,
}

/// The declarations of one name in one scope.
pub struct OverloadSet<'a> {
    table: &'a SymbolTable,
    candidates: &'a [DeclId],
    context: SpecializationContext,
}

impl<'a> OverloadSet<'a> {
    /// `owner` is the struct the candidates were found in; parameter types
    /// are specialized through it.
    pub fn new(table: &'a SymbolTable, candidates: &'a [DeclId], owner: Option<&Type>) -> Self {
        let context = owner
            .and_then(Type::as_struct)
            .map(|structure| structure.member_context())
            .unwrap_or_default();
        Self {
            table,
            candidates,
            context,
        }
    }

    /// The candidate best matching `arguments`.
    ///
    /// Anything that is not a routine wins outright. Among routines, arity
    /// filters first, then the summed argument fit ranks. Ties go to the
    /// first declared.
    pub fn disambiguate(&self, arguments: &[Type]) -> Option<DeclId> {
        let first = *self.candidates.first()?;
        if self.table.declaration(first).as_routine().is_none() {
            return Some(first);
        }

        let arity_matches: Vec<(DeclId, &RoutineDeclaration)> = self
            .candidates
            .iter()
            .filter_map(|id| Some((*id, self.table.declaration(*id).as_routine()?)))
            .filter(|(_, routine)| routine.accepts(arguments.len()))
            .collect();

        let mut best: Option<(DeclId, u32)> = None;
        let mut tied = false;
        for (id, routine) in &arity_matches {
            let Some(score) = self.score(routine, arguments) else {
                continue;
            };
            trace!(candidate = id.index(), score, "overload candidate");
            match best {
                Some((_, best_score)) if score < best_score => {}
                Some((_, best_score)) if score == best_score => tied = true,
                _ => {
                    best = Some((*id, score));
                    tied = false;
                }
            }
        }

        if let Some((id, _)) = best {
            if tied {
                warn!(
                    name = %self.table.declaration(id).name(),
                    "ambiguous overloaded call, using the first declared candidate"
                );
            }
            return Some(id);
        }
        Some(arity_matches.first().map(|(id, _)| *id).unwrap_or(first))
    }

    fn score(&self, routine: &RoutineDeclaration, arguments: &[Type]) -> Option<u32> {
        routine
            .parameters
            .iter()
            .zip(arguments)
            .map(|(parameter, argument)| {
                let parameter = parameter.ty.specialize(&self.context);
                self.fit(&parameter, argument).map(|fit| fit as u32)
            })
            .sum()
    }

    fn fit(&self, parameter: &Type, argument: &Type) -> Option<Fit> {
        if argument.is_type(parameter) {
            return Some(Fit::Exact);
        }
        if parameter.is_untyped() || argument.is_unknown() || argument.is_unresolved() {
            return Some(Fit::Compatible);
        }
        if compatible(parameter, argument) {
            return Some(Fit::Compatible);
        }
        let converts = parameter
            .as_struct()
            .is_some_and(|structure| structure.is_convertible_from(argument, self.table))
            || argument
                .as_struct()
                .is_some_and(|structure| structure.is_convertible_to(parameter, self.table));
        converts.then_some(Fit::Conversion)
    }
}

fn compatible(parameter: &Type, argument: &Type) -> bool {
    if parameter.is_integer() && argument.is_integer() {
        return true;
    }
    if parameter.is_real() && argument.is_numeric() {
        return true;
    }
    if parameter.is_string() && (argument.is_string() || argument.is_char()) {
        return true;
    }
    if argument.is_nil_pointer() {
        return matches!(
            parameter.category(),
            TypeCategory::Pointer
                | TypeCategory::Struct
                | TypeCategory::ClassReference
                | TypeCategory::Procedural
                | TypeCategory::Array
        );
    }
    if parameter.is_struct() && argument.is_struct() {
        return argument.is_sub_type_of(parameter.image());
    }
    if parameter.is_array() && argument.is_array_constructor() {
        return true;
    }
    parameter.category() == argument.category() && !parameter.is_struct()
}
