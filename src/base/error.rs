//! Errors raised while reading the target configuration.

use thiserror::Error;

/// Errors produced when parsing toolchain or compiler version text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The toolchain name is not one of the known compiler executables.
    #[error("Unknown toolchain: {0}")]
    UnknownToolchain(String),

    /// The compiler version is neither `VERnnn` nor `major.minor`.
    #[error("Invalid compiler version: {0}")]
    InvalidCompilerVersion(String),

    /// The architecture name is not recognized.
    #[error("Unknown architecture: {0}")]
    UnknownArchitecture(String),
}
