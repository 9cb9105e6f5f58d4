//! Shared builders and assertions for integration tests.

#![allow(dead_code)]

pub mod assertions;
pub mod factories;
pub mod units;
