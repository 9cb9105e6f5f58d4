//! Target-dependent type sizes.

use crate::base::{Architecture, Platform, TargetConfig};

/// Sizes that vary with the target, resolved once per factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeSizes {
    pub pointer: u32,
    pub extended: u32,
    pub variant: u32,
    pub file: u32,
    pub text: u32,
}

impl TypeSizes {
    pub fn new(config: &TargetConfig) -> Self {
        let is_64_bit = config.is_64_bit();
        Self {
            pointer: if is_64_bit { 8 } else { 4 },
            extended: Self::extended_size(config.platform(), config.architecture()),
            variant: if is_64_bit { 24 } else { 16 },
            file: if is_64_bit { 616 } else { 592 },
            text: if is_64_bit { 754 } else { 730 },
        }
    }

    /// `Extended` is the x87 10-byte real only on 32-bit Windows; ARM and
    /// 64-bit Windows map it to `Double`, other x86 targets pad it to 16.
    fn extended_size(platform: Platform, architecture: Architecture) -> u32 {
        if architecture.is_arm() {
            return 8;
        }
        match (platform, architecture) {
            (Platform::Windows, Architecture::X64) => 8,
            (Platform::Windows, _) => 10,
            _ => 16,
        }
    }
}
