//! Compiler versions.

use std::fmt;
use std::str::FromStr;

use super::ConfigError;

/// A Delphi compiler version, ordered by release.
///
/// Stored as the three digits of the `VERnnn` conditional symbol, which is
/// also the `CompilerVersion` constant times ten (`VER360` is `36.0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct CompilerVersion(u16);

impl CompilerVersion {
    /// Delphi 4. `Real` becomes an alias of `Double`.
    pub const VER120: CompilerVersion = CompilerVersion(120);
    /// Delphi 2009. `string` and `Char` become Unicode.
    pub const VER200: CompilerVersion = CompilerVersion(200);
    /// Delphi XE8. `LongInt` and `LongWord` are 64-bit on 64-bit non-Windows targets.
    pub const VER290: CompilerVersion = CompilerVersion(290);
    /// Delphi 12 Athens. `NativeInt` and `NativeUInt` become weak aliases.
    pub const VER360: CompilerVersion = CompilerVersion(360);
    /// Delphi 13 Florence.
    pub const VER370: CompilerVersion = CompilerVersion(370);

    /// Latest compiler version known to this crate.
    pub const LATEST: CompilerVersion = Self::VER370;

    /// Create a version from its `VERnnn` number.
    pub const fn from_symbol_number(number: u16) -> Self {
        Self(number)
    }

    /// The `VERnnn` number.
    pub fn symbol_number(self) -> u16 {
        self.0
    }

    /// The `VERnnn` conditional symbol.
    pub fn symbol(self) -> String {
        format!("VER{}", self.0)
    }

    /// The value of the `CompilerVersion` constant.
    pub fn number(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    fn parse_numeric(text: &str) -> Option<Self> {
        let (major, minor) = match text.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (text, "0"),
        };
        if minor.len() != 1 {
            return None;
        }
        let major: u16 = major.parse().ok()?;
        let minor: u16 = minor.parse().ok()?;
        major.checked_mul(10)?.checked_add(minor).map(Self)
    }
}

impl Default for CompilerVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl FromStr for CompilerVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let parsed = match text.get(..3) {
            Some(prefix) if prefix.eq_ignore_ascii_case("VER") => {
                let digits = &text[3..];
                if digits.len() == 3 && digits.bytes().all(|b| b.is_ascii_digit()) {
                    digits.parse().ok().map(Self)
                } else {
                    None
                }
            }
            _ => Self::parse_numeric(text),
        };
        parsed.ok_or_else(|| ConfigError::InvalidCompilerVersion(s.to_string()))
    }
}

impl fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VER{}", self.0)
    }
}

impl TryFrom<String> for CompilerVersion {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CompilerVersion> for String {
    fn from(value: CompilerVersion) -> Self {
        value.symbol()
    }
}
