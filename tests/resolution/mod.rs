#![allow(clippy::unwrap_used)]

mod tests_conversions;
mod tests_hierarchy;
mod tests_idempotence;
mod tests_overloads;
mod tests_units;
