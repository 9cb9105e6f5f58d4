//! Built-in types.

use std::fmt;

/// The built-in types every compilation context provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IntrinsicType {
    // Booleans
    Boolean,
    ByteBool,
    WordBool,
    LongBool,
    // Integers
    ShortInt,
    Byte,
    SmallInt,
    Word,
    Integer,
    Cardinal,
    Int64,
    UInt64,
    NativeInt,
    NativeUInt,
    LongInt,
    LongWord,
    FixedInt,
    FixedUInt,
    // Reals
    Single,
    Double,
    Extended,
    Real,
    Real48,
    Comp,
    Currency,
    // Chars
    AnsiChar,
    WideChar,
    Char,
    // Strings
    AnsiString,
    UnicodeString,
    WideString,
    ShortString,
    String,
    // Pointers
    Pointer,
    PAnsiChar,
    PWideChar,
    PChar,
    // Variants
    Variant,
    OleVariant,
    // Files
    Text,
}

impl IntrinsicType {
    pub const ALL: [IntrinsicType; 40] = [
        IntrinsicType::Boolean,
        IntrinsicType::ByteBool,
        IntrinsicType::WordBool,
        IntrinsicType::LongBool,
        IntrinsicType::ShortInt,
        IntrinsicType::Byte,
        IntrinsicType::SmallInt,
        IntrinsicType::Word,
        IntrinsicType::Integer,
        IntrinsicType::Cardinal,
        IntrinsicType::Int64,
        IntrinsicType::UInt64,
        IntrinsicType::NativeInt,
        IntrinsicType::NativeUInt,
        IntrinsicType::LongInt,
        IntrinsicType::LongWord,
        IntrinsicType::FixedInt,
        IntrinsicType::FixedUInt,
        IntrinsicType::Single,
        IntrinsicType::Double,
        IntrinsicType::Extended,
        IntrinsicType::Real,
        IntrinsicType::Real48,
        IntrinsicType::Comp,
        IntrinsicType::Currency,
        IntrinsicType::AnsiChar,
        IntrinsicType::WideChar,
        IntrinsicType::Char,
        IntrinsicType::AnsiString,
        IntrinsicType::UnicodeString,
        IntrinsicType::WideString,
        IntrinsicType::ShortString,
        IntrinsicType::String,
        IntrinsicType::Pointer,
        IntrinsicType::PAnsiChar,
        IntrinsicType::PWideChar,
        IntrinsicType::PChar,
        IntrinsicType::Variant,
        IntrinsicType::OleVariant,
        IntrinsicType::Text,
    ];

    /// Integer types searched, in this order, when typing integer literals.
    pub const LITERAL_INTEGERS: [IntrinsicType; 8] = [
        IntrinsicType::ShortInt,
        IntrinsicType::Byte,
        IntrinsicType::SmallInt,
        IntrinsicType::Word,
        IntrinsicType::Integer,
        IntrinsicType::Cardinal,
        IntrinsicType::Int64,
        IntrinsicType::UInt64,
    ];

    pub fn image(self) -> &'static str {
        match self {
            IntrinsicType::Boolean => "Boolean",
            IntrinsicType::ByteBool => "ByteBool",
            IntrinsicType::WordBool => "WordBool",
            IntrinsicType::LongBool => "LongBool",
            IntrinsicType::ShortInt => "ShortInt",
            IntrinsicType::Byte => "Byte",
            IntrinsicType::SmallInt => "SmallInt",
            IntrinsicType::Word => "Word",
            IntrinsicType::Integer => "Integer",
            IntrinsicType::Cardinal => "Cardinal",
            IntrinsicType::Int64 => "Int64",
            IntrinsicType::UInt64 => "UInt64",
            IntrinsicType::NativeInt => "NativeInt",
            IntrinsicType::NativeUInt => "NativeUInt",
            IntrinsicType::LongInt => "LongInt",
            IntrinsicType::LongWord => "LongWord",
            IntrinsicType::FixedInt => "FixedInt",
            IntrinsicType::FixedUInt => "FixedUInt",
            IntrinsicType::Single => "Single",
            IntrinsicType::Double => "Double",
            IntrinsicType::Extended => "Extended",
            IntrinsicType::Real => "Real",
            IntrinsicType::Real48 => "Real48",
            IntrinsicType::Comp => "Comp",
            IntrinsicType::Currency => "Currency",
            IntrinsicType::AnsiChar => "AnsiChar",
            IntrinsicType::WideChar => "WideChar",
            IntrinsicType::Char => "Char",
            IntrinsicType::AnsiString => "AnsiString",
            IntrinsicType::UnicodeString => "UnicodeString",
            IntrinsicType::WideString => "WideString",
            IntrinsicType::ShortString => "ShortString",
            IntrinsicType::String => "string",
            IntrinsicType::Pointer => "Pointer",
            IntrinsicType::PAnsiChar => "PAnsiChar",
            IntrinsicType::PWideChar => "PWideChar",
            IntrinsicType::PChar => "PChar",
            IntrinsicType::Variant => "Variant",
            IntrinsicType::OleVariant => "OleVariant",
            IntrinsicType::Text => "Text",
        }
    }

    /// Look up an intrinsic by name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|intrinsic| intrinsic.image().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for IntrinsicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.image())
    }
}
