//! # Project
//!
//! Analyses a batch of units in parallel against one shared
//! [`TypeFactory`](crate::types::TypeFactory). Each unit gets its own symbol
//! table; the units it uses from the same batch are bound into that table
//! first.
mod analysis;
mod dependencies;

pub use analysis::{Project, UnitOutcome};

#[cfg(test)]
mod tests;
