#![allow(clippy::unwrap_used)]

mod tests_aliases;
mod tests_sizes;
mod tests_specialization;
