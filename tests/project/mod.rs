#![allow(clippy::unwrap_used)]

mod tests_parallel;
