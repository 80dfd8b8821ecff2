//! Primitive type kinds.
//!
//! A `BasicKind` identifies a predeclared type. Untyped kinds are the types
//! of constants that have not been given a fixed representation yet; they
//! never compare equal to any sized kind.

use std::fmt;

/// Kind of a predeclared (basic) type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,

    // Types of untyped constants
    UntypedBool,
    UntypedInt,
    UntypedRune,
    UntypedFloat,
    UntypedComplex,
    UntypedString,
    UntypedNil,
}

impl BasicKind {
    /// `rune` is an alias for `int32`.
    pub const RUNE: Self = Self::Int32;
    /// `byte` is an alias for `uint8`.
    pub const BYTE: Self = Self::Uint8;

    /// Check if this is the type of an untyped constant.
    #[inline]
    pub const fn is_untyped(self) -> bool {
        matches!(
            self,
            Self::UntypedBool
                | Self::UntypedInt
                | Self::UntypedRune
                | Self::UntypedFloat
                | Self::UntypedComplex
                | Self::UntypedString
                | Self::UntypedNil
        )
    }

    /// Check if values of this kind are integers.
    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Uint
                | Self::Uint8
                | Self::Uint16
                | Self::Uint32
                | Self::Uint64
                | Self::Uintptr
                | Self::UntypedInt
                | Self::UntypedRune
        )
    }

    /// Check if values of this kind are unsigned integers.
    #[inline]
    pub const fn is_unsigned(self) -> bool {
        matches!(
            self,
            Self::Uint | Self::Uint8 | Self::Uint16 | Self::Uint32 | Self::Uint64 | Self::Uintptr
        )
    }

    /// Check if values of this kind are floating point numbers.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64 | Self::UntypedFloat)
    }

    /// Check if values of this kind are complex numbers.
    #[inline]
    pub const fn is_complex(self) -> bool {
        matches!(
            self,
            Self::Complex64 | Self::Complex128 | Self::UntypedComplex
        )
    }

    /// The name used when rendering this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint => "uint",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Uintptr => "uintptr",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::String => "string",
            Self::UntypedBool => "untyped bool",
            Self::UntypedInt => "untyped int",
            Self::UntypedRune => "untyped rune",
            Self::UntypedFloat => "untyped float",
            Self::UntypedComplex => "untyped complex",
            Self::UntypedString => "untyped string",
            Self::UntypedNil => "untyped nil",
        }
    }
}

impl fmt::Display for BasicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
