//! Type factories shared across tests, one per target configuration.

use std::sync::Arc;

use delphi::base::{Architecture, CompilerVersion, TargetConfig, Toolchain};
use delphi::types::TypeFactory;
use once_cell::sync::Lazy;

/// DCC32 at the latest known version.
pub static WIN32: Lazy<Arc<TypeFactory>> = Lazy::new(|| factory(Toolchain::Dcc32, CompilerVersion::LATEST));

/// DCC64 at the latest known version.
pub static WIN64: Lazy<Arc<TypeFactory>> = Lazy::new(|| factory(Toolchain::Dcc64, CompilerVersion::LATEST));

/// DCCLINUX64 at the latest known version.
pub static LINUX64: Lazy<Arc<TypeFactory>> =
    Lazy::new(|| factory(Toolchain::DccLinux64, CompilerVersion::LATEST));

pub fn factory(toolchain: Toolchain, version: CompilerVersion) -> Arc<TypeFactory> {
    Arc::new(TypeFactory::new(TargetConfig::new(toolchain, version)))
}

pub fn factory_for(toolchain: Toolchain, version: CompilerVersion, architecture: Architecture) -> TypeFactory {
    TypeFactory::new(TargetConfig::new(toolchain, version).with_architecture(architecture))
}
