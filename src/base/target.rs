//! Target configuration: the three axes that govern type sizes and aliasing.

use std::fmt;
use std::str::FromStr;

use super::{CompilerVersion, ConfigError};

/// Operating system targeted by a toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Ios,
    Android,
}

/// Processor architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Architecture {
    X86,
    X64,
    Arm32,
    Arm64,
}

impl Architecture {
    pub fn is_64_bit(self) -> bool {
        matches!(self, Architecture::X64 | Architecture::Arm64)
    }

    pub fn is_arm(self) -> bool {
        matches!(self, Architecture::Arm32 | Architecture::Arm64)
    }
}

impl FromStr for Architecture {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x86" | "win32" | "32" => Ok(Architecture::X86),
            "x64" | "x86_64" | "win64" | "64" => Ok(Architecture::X64),
            "arm" | "arm32" => Ok(Architecture::Arm32),
            "arm64" | "aarch64" => Ok(Architecture::Arm64),
            _ => Err(ConfigError::UnknownArchitecture(s.to_string())),
        }
    }
}

/// A Delphi compiler executable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum Toolchain {
    Dcc32,
    Dcc64,
    DccOsx,
    DccOsx64,
    DccOsxArm64,
    DccIosArm,
    DccIosArm64,
    DccIosSimArm64,
    DccAArm,
    DccAArm64,
    DccLinux64,
}

impl Toolchain {
    pub const ALL: [Toolchain; 11] = [
        Toolchain::Dcc32,
        Toolchain::Dcc64,
        Toolchain::DccOsx,
        Toolchain::DccOsx64,
        Toolchain::DccOsxArm64,
        Toolchain::DccIosArm,
        Toolchain::DccIosArm64,
        Toolchain::DccIosSimArm64,
        Toolchain::DccAArm,
        Toolchain::DccAArm64,
        Toolchain::DccLinux64,
    ];

    /// Name of the compiler executable (e.g. `DCC32`).
    pub fn executable(self) -> &'static str {
        match self {
            Toolchain::Dcc32 => "DCC32",
            Toolchain::Dcc64 => "DCC64",
            Toolchain::DccOsx => "DCCOSX",
            Toolchain::DccOsx64 => "DCCOSX64",
            Toolchain::DccOsxArm64 => "DCCOSXARM64",
            Toolchain::DccIosArm => "DCCIOSARM",
            Toolchain::DccIosArm64 => "DCCIOSARM64",
            Toolchain::DccIosSimArm64 => "DCCIOSSIMARM64",
            Toolchain::DccAArm => "DCCAARM",
            Toolchain::DccAArm64 => "DCCAARM64",
            Toolchain::DccLinux64 => "DCCLINUX64",
        }
    }

    pub fn platform(self) -> Platform {
        match self {
            Toolchain::Dcc32 | Toolchain::Dcc64 => Platform::Windows,
            Toolchain::DccOsx | Toolchain::DccOsx64 | Toolchain::DccOsxArm64 => Platform::MacOs,
            Toolchain::DccIosArm | Toolchain::DccIosArm64 | Toolchain::DccIosSimArm64 => {
                Platform::Ios
            }
            Toolchain::DccAArm | Toolchain::DccAArm64 => Platform::Android,
            Toolchain::DccLinux64 => Platform::Linux,
        }
    }

    /// Architecture the toolchain emits code for.
    pub fn architecture(self) -> Architecture {
        match self {
            Toolchain::Dcc32 | Toolchain::DccOsx => Architecture::X86,
            Toolchain::Dcc64 | Toolchain::DccOsx64 | Toolchain::DccLinux64 => Architecture::X64,
            Toolchain::DccIosArm | Toolchain::DccAArm => Architecture::Arm32,
            Toolchain::DccOsxArm64
            | Toolchain::DccIosArm64
            | Toolchain::DccIosSimArm64
            | Toolchain::DccAArm64 => Architecture::Arm64,
        }
    }
}

impl FromStr for Toolchain {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let name = name
            .get(name.len().saturating_sub(4)..)
            .filter(|ext| ext.eq_ignore_ascii_case(".exe"))
            .map_or(name, |_| &name[..name.len() - 4]);
        Toolchain::ALL
            .into_iter()
            .find(|toolchain| toolchain.executable().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownToolchain(s.to_string()))
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable())
    }
}

impl TryFrom<String> for Toolchain {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Toolchain> for String {
    fn from(value: Toolchain) -> Self {
        value.executable().to_string()
    }
}

/// The `(toolchain, architecture, compiler version)` triple a
/// [`TypeFactory`](crate::types::TypeFactory) is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetConfig {
    toolchain: Toolchain,
    architecture: Architecture,
    compiler_version: CompilerVersion,
}

impl TargetConfig {
    /// Target the toolchain's own architecture.
    pub fn new(toolchain: Toolchain, compiler_version: CompilerVersion) -> Self {
        Self {
            toolchain,
            architecture: toolchain.architecture(),
            compiler_version,
        }
    }

    /// Override the architecture implied by the toolchain.
    pub fn with_architecture(mut self, architecture: Architecture) -> Self {
        self.architecture = architecture;
        self
    }

    pub fn toolchain(&self) -> Toolchain {
        self.toolchain
    }

    pub fn platform(&self) -> Platform {
        self.toolchain.platform()
    }

    pub fn architecture(&self) -> Architecture {
        self.architecture
    }

    pub fn compiler_version(&self) -> CompilerVersion {
        self.compiler_version
    }

    pub fn is_64_bit(&self) -> bool {
        self.architecture.is_64_bit()
    }

    /// True when the compiler is at or after `threshold`.
    pub fn is_at_least(&self, threshold: CompilerVersion) -> bool {
        self.compiler_version >= threshold
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self::new(Toolchain::Dcc32, CompilerVersion::LATEST)
    }
}
