#![allow(clippy::unwrap_used)]

use super::*;
use crate::base::{CompilerVersion, TargetConfig, Toolchain};


fn factory(toolchain: Toolchain, version: u16) -> TypeFactory {
    TypeFactory::new(TargetConfig::new(
        toolchain,
        CompilerVersion::from_symbol_number(version),
    ))
}

fn latest() -> TypeFactory {
    TypeFactory::new(TargetConfig::default())
}
