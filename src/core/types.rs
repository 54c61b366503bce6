use std::fmt;

use strum::{Display, EnumString};

/// Longest `CHAR` a column may declare.
pub const MAX_CHAR_LENGTH: u32 = 255;

/// Longest `VARCHAR` a column may declare.
pub const MAX_VARCHAR_LENGTH: u32 = 65533;

pub const MAX_DECIMAL_PRECISION: u32 = 27;
pub const MAX_DECIMAL_SCALE: u32 = 9;

/// Precision used when `DECIMAL` is declared without parameters.
pub const DEFAULT_DECIMAL_PRECISION: u32 = 10;
pub const DEFAULT_DECIMAL_SCALE: u32 = 0;

/// Storage length of an HLL sketch column.
pub const HLL_LENGTH: u32 = 16385;

/// The base scalar kind of a column, independent of length, precision and scale.
///
/// Parsing is case-insensitive, so `bigint`, `BigInt` and `BIGINT` all resolve
/// to [`PrimitiveType::BigInt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum PrimitiveType {
    #[strum(to_string = "BOOLEAN", serialize = "BOOL")]
    Boolean,

    /// 8-bit signed integer.
    #[strum(to_string = "TINYINT")]
    TinyInt,

    /// 16-bit signed integer.
    #[strum(to_string = "SMALLINT")]
    SmallInt,

    /// 32-bit signed integer.
    #[strum(to_string = "INT", serialize = "INTEGER")]
    Int,

    /// 64-bit signed integer.
    #[strum(to_string = "BIGINT")]
    BigInt,

    /// 128-bit signed integer.
    #[strum(to_string = "LARGEINT")]
    LargeInt,

    /// Single-precision floating point.
    #[strum(to_string = "FLOAT")]
    Float,

    /// Double-precision floating point.
    #[strum(to_string = "DOUBLE")]
    Double,

    /// Fixed-point decimal with declared precision and scale.
    #[strum(to_string = "DECIMAL")]
    Decimal,

    #[strum(to_string = "DATE")]
    Date,

    #[strum(to_string = "DATETIME")]
    DateTime,

    /// Time of day. Exists for expressions only, never as a column type.
    #[strum(to_string = "TIME")]
    Time,

    /// Fixed-length character string.
    #[strum(to_string = "CHAR")]
    Char,

    /// Variable-length character string with a declared maximum length.
    #[strum(to_string = "VARCHAR")]
    Varchar,

    /// HyperLogLog approximate-distinct-count sketch.
    #[strum(to_string = "HLL")]
    Hll,

    #[strum(to_string = "BITMAP")]
    Bitmap,
}

impl PrimitiveType {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Self::TinyInt | Self::SmallInt | Self::Int | Self::BigInt | Self::LargeInt
        )
    }

    pub fn is_floating_point(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_floating_point() || self == Self::Decimal
    }

    pub fn is_date(self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }

    pub fn is_string(self) -> bool {
        matches!(self, Self::Char | Self::Varchar)
    }

    /// Sketch types hold pre-aggregated state rather than plain values.
    pub fn is_sketch(self) -> bool {
        matches!(self, Self::Hll | Self::Bitmap)
    }
}

/// A fully resolved column type: a primitive kind plus the parameters it carries.
///
/// Only `CHAR`, `VARCHAR` and `HLL` carry a length, only `DECIMAL` carries
/// precision and scale. Instances are produced by type resolution and are
/// immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScalarType {
    primitive: PrimitiveType,
    length: Option<u32>,
    precision: Option<u32>,
    scale: Option<u32>,
}

impl ScalarType {
    /// Creates a type for `primitive` with its default parameters.
    ///
    /// `CHAR` gets length 1, `DECIMAL` gets (10, 0) and `HLL` its storage
    /// length. `VARCHAR` has no default length.
    pub fn new(primitive: PrimitiveType) -> Self {
        match primitive {
            PrimitiveType::Char => Self::char(1),
            PrimitiveType::Decimal => {
                Self::decimal(DEFAULT_DECIMAL_PRECISION, DEFAULT_DECIMAL_SCALE)
            }
            PrimitiveType::Hll => Self::hll(),
            primitive => Self {
                primitive,
                length: None,
                precision: None,
                scale: None,
            },
        }
    }

    pub fn char(length: u32) -> Self {
        Self {
            primitive: PrimitiveType::Char,
            length: Some(length),
            precision: None,
            scale: None,
        }
    }

    pub fn varchar(length: u32) -> Self {
        Self {
            primitive: PrimitiveType::Varchar,
            length: Some(length),
            precision: None,
            scale: None,
        }
    }

    pub fn decimal(precision: u32, scale: u32) -> Self {
        Self {
            primitive: PrimitiveType::Decimal,
            length: None,
            precision: Some(precision),
            scale: Some(scale),
        }
    }

    pub fn hll() -> Self {
        Self {
            primitive: PrimitiveType::Hll,
            length: Some(HLL_LENGTH),
            precision: None,
            scale: None,
        }
    }

    pub fn primitive(&self) -> PrimitiveType {
        self.primitive
    }

    /// Maximum length in characters, for string and sketch types.
    pub fn length(&self) -> Option<u32> {
        self.length
    }

    pub fn precision(&self) -> Option<u32> {
        self.precision
    }

    pub fn scale(&self) -> Option<u32> {
        self.scale
    }

    /// Renders the type the way it appears in a column definition.
    pub fn to_sql(&self) -> String {
        match (self.primitive, self.length, self.precision, self.scale) {
            (PrimitiveType::Char | PrimitiveType::Varchar, Some(length), _, _) => {
                format!("{}({length})", self.primitive)
            }
            (PrimitiveType::Decimal, _, Some(precision), Some(scale)) => {
                format!("DECIMAL({precision}, {scale})")
            }
            (primitive, ..) => primitive.to_string(),
        }
    }
}

impl From<PrimitiveType> for ScalarType {
    fn from(primitive: PrimitiveType) -> Self {
        Self::new(primitive)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}
