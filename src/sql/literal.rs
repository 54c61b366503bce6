//! Literals built from the textual default values of column definitions.
//!
//! A default is accepted only if the engine can construct its own literal
//! representation of it for the column's type. Each literal type here mirrors
//! one of those representations and fails the same way the engine would.

use std::{num::IntErrorKind, str::FromStr};

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::trace;
use rust_decimal::Decimal;

use crate::{
    common::error::{AnalysisError, Result},
    core::types::{DEFAULT_DECIMAL_PRECISION, DEFAULT_DECIMAL_SCALE, PrimitiveType, ScalarType},
};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const MAX_DATE_YEAR: i32 = 9999;

/// A signed integer literal of at most 64 bits, checked against the width of
/// its target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntLiteral {
    value: i64,
    primitive: PrimitiveType,
}

impl IntLiteral {
    pub fn new(text: &str, scalar_type: &ScalarType) -> Result<Self> {
        let value = i64::from_str(text)
            .map_err(|_| AnalysisError::InvalidNumber(text.to_string()))?;

        let primitive = scalar_type.primitive();
        let in_range = match primitive {
            PrimitiveType::TinyInt => i8::try_from(value).is_ok(),
            PrimitiveType::SmallInt => i16::try_from(value).is_ok(),
            PrimitiveType::Int => i32::try_from(value).is_ok(),
            PrimitiveType::BigInt => true,
            _ => false,
        };

        if !in_range {
            return Err(AnalysisError::NumberOutOfRange {
                value: text.to_string(),
                type_sql: scalar_type.to_sql(),
            });
        }

        Ok(Self { value, primitive })
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn primitive(&self) -> PrimitiveType {
        self.primitive
    }
}

/// A 128-bit integer literal for `LARGEINT` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LargeIntLiteral {
    value: i128,
}

impl LargeIntLiteral {
    pub fn new(text: &str) -> Result<Self> {
        match i128::from_str(text) {
            Ok(value) => Ok(Self { value }),
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                Err(AnalysisError::LargeIntOutOfRange(text.to_string()))
            }
            Err(_) => Err(AnalysisError::InvalidLargeInt(text.to_string())),
        }
    }

    pub fn value(&self) -> i128 {
        self.value
    }
}

/// A floating point literal.
///
/// The text is always parsed at double precision first. The literal's natural
/// type is `FLOAT` only when narrowing that value to single precision and
/// widening it back reproduces it exactly. `NaN` and infinities are not
/// literals and are rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatLiteral {
    value: f64,
    natural_type: PrimitiveType,
}

impl FloatLiteral {
    pub fn new(text: &str) -> Result<Self> {
        let value = f64::from_str(text)
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| AnalysisError::InvalidFloat(text.to_string()))?;

        let natural_type = if f64::from(value as f32) == value {
            PrimitiveType::Float
        } else {
            PrimitiveType::Double
        };

        Ok(Self {
            value,
            natural_type,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// The narrowest floating type that holds the value without loss.
    pub fn natural_type(&self) -> PrimitiveType {
        self.natural_type
    }
}

/// An exact decimal literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalLiteral {
    value: Decimal,
}

impl DecimalLiteral {
    /// Parses plain (`123.45`) or scientific (`1.2345e2`) notation.
    pub fn new(text: &str) -> Result<Self> {
        // rust_decimal skips `_` separators, SQL literals have none.
        if text.contains('_') {
            return Err(AnalysisError::InvalidDecimal(text.to_string()));
        }

        Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .map(|value| Self { value })
            .map_err(|_| AnalysisError::InvalidDecimal(text.to_string()))
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Number of significant digits, counting a lone zero as one digit.
    pub fn precision(&self) -> u32 {
        match self.value.mantissa().unsigned_abs() {
            0 => 1,
            mantissa => mantissa.ilog10() + 1,
        }
    }

    /// Number of digits after the decimal point.
    pub fn scale(&self) -> u32 {
        self.value.scale()
    }

    /// Fails unless the literal fits a `DECIMAL(precision, scale)` column.
    ///
    /// Both the fractional digits and the integer digits must fit; a literal
    /// with few fractional digits cannot borrow room for integer digits.
    pub fn check_precision_and_scale(&self, precision: u32, scale: u32) -> Result<()> {
        let actual_precision = self.precision();
        let actual_scale = self.scale();
        // Zero has no integer digits, however it is spelled.
        let integer_digits = if self.value.is_zero() {
            0
        } else {
            actual_precision.saturating_sub(actual_scale)
        };

        if actual_scale > scale || integer_digits > precision.saturating_sub(scale) {
            return Err(AnalysisError::DecimalOverflow {
                precision,
                scale,
                actual_precision,
                actual_scale,
            });
        }

        Ok(())
    }
}

/// A calendar literal for `DATE` or `DATETIME` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLiteral {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl DateLiteral {
    pub fn new(text: &str, primitive: PrimitiveType) -> Result<Self> {
        let invalid = || AnalysisError::InvalidDate(text.to_string());

        let literal = match primitive {
            PrimitiveType::Date => NaiveDate::parse_from_str(text, DATE_FORMAT)
                .map(DateLiteral::Date)
                .map_err(|_| invalid())?,
            PrimitiveType::DateTime => NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
                .map(DateLiteral::DateTime)
                .map_err(|_| invalid())?,
            _ => return Err(invalid()),
        };

        if !(0..=MAX_DATE_YEAR).contains(&literal.year()) {
            return Err(invalid());
        }

        Ok(literal)
    }

    pub fn year(&self) -> i32 {
        match self {
            DateLiteral::Date(date) => date.year(),
            DateLiteral::DateTime(date_time) => date_time.year(),
        }
    }
}

/// Checks that `text` is a valid default value for a column of `scalar_type`.
///
/// Dispatches on the primitive kind; kinds without a literal form (`BOOLEAN`,
/// `TIME`, `BITMAP`) are rejected as unsupported.
pub fn validate_default_value(scalar_type: &ScalarType, text: &str) -> Result<()> {
    trace!("validating default {text:?} for {scalar_type}");

    match scalar_type.primitive() {
        PrimitiveType::TinyInt
        | PrimitiveType::SmallInt
        | PrimitiveType::Int
        | PrimitiveType::BigInt => {
            IntLiteral::new(text, scalar_type)?;
        }
        PrimitiveType::LargeInt => {
            LargeIntLiteral::new(text)?;
        }
        PrimitiveType::Float => {
            let literal = FloatLiteral::new(text)?;
            if literal.natural_type() == PrimitiveType::Double {
                return Err(AnalysisError::PrecisionLoss(text.to_string()));
            }
        }
        PrimitiveType::Double => {
            FloatLiteral::new(text)?;
        }
        PrimitiveType::Decimal => {
            let precision = scalar_type.precision().unwrap_or(DEFAULT_DECIMAL_PRECISION);
            let scale = scalar_type.scale().unwrap_or(DEFAULT_DECIMAL_SCALE);
            DecimalLiteral::new(text)?.check_precision_and_scale(precision, scale)?;
        }
        PrimitiveType::Date | PrimitiveType::DateTime => {
            DateLiteral::new(text, scalar_type.primitive())?;
        }
        PrimitiveType::Char | PrimitiveType::Varchar | PrimitiveType::Hll => {
            // An undeclared length admits only the empty string.
            let max_length = scalar_type.length().unwrap_or(0) as usize;
            if text.chars().count() > max_length {
                return Err(AnalysisError::DefaultTooLong(text.to_string()));
            }
        }
        PrimitiveType::Boolean | PrimitiveType::Time | PrimitiveType::Bitmap => {
            return Err(AnalysisError::UnsupportedType(scalar_type.to_sql()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_type(primitive: PrimitiveType) -> ScalarType {
        ScalarType::new(primitive)
    }

    #[test]
    fn test_integer_bounds_per_width() {
        let cases: [(PrimitiveType, i128, i128); 4] = [
            (PrimitiveType::TinyInt, i8::MIN.into(), i8::MAX.into()),
            (PrimitiveType::SmallInt, i16::MIN.into(), i16::MAX.into()),
            (PrimitiveType::Int, i32::MIN.into(), i32::MAX.into()),
            (PrimitiveType::BigInt, i64::MIN.into(), i64::MAX.into()),
        ];

        for (primitive, min, max) in cases {
            let scalar_type = int_type(primitive);
            assert!(validate_default_value(&scalar_type, &min.to_string()).is_ok());
            assert!(validate_default_value(&scalar_type, &max.to_string()).is_ok());
            assert!(validate_default_value(&scalar_type, "0").is_ok());

            assert!(
                validate_default_value(&scalar_type, &(min - 1).to_string()).is_err(),
                "{primitive} below range"
            );
            assert!(
                validate_default_value(&scalar_type, &(max + 1).to_string()).is_err(),
                "{primitive} above range"
            );
        }
    }

    #[test]
    fn test_integer_out_of_range_message() {
        let err = validate_default_value(&int_type(PrimitiveType::TinyInt), "128").unwrap_err();
        assert_eq!(err.to_string(), "Number out of range[128]. type: TINYINT");
    }

    #[test]
    fn test_integer_malformed() {
        let scalar_type = int_type(PrimitiveType::Int);
        for text in ["", "abc", "1.5", " 1", "1e3"] {
            assert_eq!(
                validate_default_value(&scalar_type, text),
                Err(AnalysisError::InvalidNumber(text.to_string())),
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_large_int_range() {
        let scalar_type = int_type(PrimitiveType::LargeInt);
        assert!(validate_default_value(&scalar_type, &i128::MAX.to_string()).is_ok());
        assert!(validate_default_value(&scalar_type, &i128::MIN.to_string()).is_ok());
        assert!(validate_default_value(&scalar_type, "-1").is_ok());

        // 2^127, one past the maximum
        let above = "170141183460469231731687303715884105728";
        assert_eq!(
            validate_default_value(&scalar_type, above),
            Err(AnalysisError::LargeIntOutOfRange(above.to_string()))
        );
        let below = "-170141183460469231731687303715884105729";
        assert_eq!(
            validate_default_value(&scalar_type, below),
            Err(AnalysisError::LargeIntOutOfRange(below.to_string()))
        );
        assert_eq!(
            validate_default_value(&scalar_type, "12x"),
            Err(AnalysisError::InvalidLargeInt("12x".to_string()))
        );
    }

    #[test]
    fn test_float_precision_loss() {
        let scalar_type = int_type(PrimitiveType::Float);
        assert!(validate_default_value(&scalar_type, "3.5").is_ok());
        assert!(validate_default_value(&scalar_type, "-0.25").is_ok());
        assert!(validate_default_value(&scalar_type, "100").is_ok());

        assert_eq!(
            validate_default_value(&scalar_type, "3.14159265358979"),
            Err(AnalysisError::PrecisionLoss("3.14159265358979".to_string()))
        );
        assert!(validate_default_value(&scalar_type, "0.1").is_err());
        assert_eq!(
            validate_default_value(&scalar_type, "pi"),
            Err(AnalysisError::InvalidFloat("pi".to_string()))
        );
    }

    #[test]
    fn test_float_literal_natural_type() {
        assert_eq!(
            FloatLiteral::new("3.5").unwrap().natural_type(),
            PrimitiveType::Float
        );
        assert_eq!(
            FloatLiteral::new("3.14").unwrap().natural_type(),
            PrimitiveType::Double
        );
        assert_eq!(FloatLiteral::new("3.14").unwrap().value(), 3.14);
    }

    #[test]
    fn test_double_has_no_precision_check() {
        let scalar_type = int_type(PrimitiveType::Double);
        assert!(validate_default_value(&scalar_type, "3.14159265358979").is_ok());
        assert!(validate_default_value(&scalar_type, "1e300").is_ok());
        assert!(validate_default_value(&scalar_type, "1..2").is_err());
    }

    #[test]
    fn test_non_finite_floats_rejected() {
        for primitive in [PrimitiveType::Float, PrimitiveType::Double] {
            let scalar_type = int_type(primitive);
            for text in ["NaN", "nan", "inf", "Infinity", "-infinity", "1e400"] {
                assert_eq!(
                    validate_default_value(&scalar_type, text),
                    Err(AnalysisError::InvalidFloat(text.to_string())),
                    "{primitive} {text}"
                );
            }
        }
    }

    #[test]
    fn test_decimal_precision_and_scale() {
        let scalar_type = ScalarType::decimal(5, 2);
        assert!(validate_default_value(&scalar_type, "123.45").is_ok());
        assert!(validate_default_value(&scalar_type, "-999.99").is_ok());
        assert!(validate_default_value(&scalar_type, "0.5").is_ok());
        assert!(validate_default_value(&scalar_type, "7").is_ok());

        assert_eq!(
            validate_default_value(&scalar_type, "1234.5"),
            Err(AnalysisError::DecimalOverflow {
                precision: 5,
                scale: 2,
                actual_precision: 5,
                actual_scale: 1,
            })
        );
        assert!(validate_default_value(&scalar_type, "1.234").is_err());
        assert!(validate_default_value(&scalar_type, "1000").is_err());
        assert_eq!(
            validate_default_value(&scalar_type, "12a5"),
            Err(AnalysisError::InvalidDecimal("12a5".to_string()))
        );
    }

    #[test]
    fn test_decimal_zero_fits_fraction_only_column() {
        let scalar_type = ScalarType::decimal(5, 5);
        for text in ["0", "-0", "0.0", "0.00000", "0.5"] {
            assert!(validate_default_value(&scalar_type, text).is_ok(), "{text}");
        }
        assert!(validate_default_value(&scalar_type, "1").is_err());
        assert!(validate_default_value(&scalar_type, "0.000001").is_err());
    }

    #[test]
    fn test_decimal_rejects_digit_separators() {
        let scalar_type = ScalarType::decimal(5, 2);
        for text in ["1_0", "1__2.5"] {
            assert_eq!(
                validate_default_value(&scalar_type, text),
                Err(AnalysisError::InvalidDecimal(text.to_string()))
            );
        }
    }

    #[test]
    fn test_decimal_literal_digits() {
        let literal = DecimalLiteral::new("123.45").unwrap();
        assert_eq!(literal.precision(), 5);
        assert_eq!(literal.scale(), 2);

        let zero = DecimalLiteral::new("0").unwrap();
        assert_eq!(zero.precision(), 1);
        assert_eq!(zero.scale(), 0);

        let scientific = DecimalLiteral::new("1.5e2").unwrap();
        assert_eq!(scientific.value(), Decimal::from(150));
    }

    #[test]
    fn test_date_literals() {
        let date = int_type(PrimitiveType::Date);
        assert!(validate_default_value(&date, "2024-02-29").is_ok());
        assert_eq!(
            validate_default_value(&date, "2023-02-29"),
            Err(AnalysisError::InvalidDate("2023-02-29".to_string()))
        );
        assert!(validate_default_value(&date, "2024-01-01 00:00:00").is_err());
        assert!(validate_default_value(&date, "yesterday").is_err());

        let date_time = int_type(PrimitiveType::DateTime);
        assert!(validate_default_value(&date_time, "2024-01-01 12:30:00").is_ok());
        assert!(validate_default_value(&date_time, "2024-01-01 25:00:00").is_err());
        assert!(validate_default_value(&date_time, "2024-01-01").is_err());
    }

    #[test]
    fn test_date_literal_year() {
        let literal = DateLiteral::new("1970-01-01", PrimitiveType::Date).unwrap();
        assert_eq!(literal.year(), 1970);
        assert!(DateLiteral::new("1970-01-01", PrimitiveType::Int).is_err());
    }

    #[test]
    fn test_string_length() {
        for scalar_type in [ScalarType::char(10), ScalarType::varchar(10)] {
            assert!(validate_default_value(&scalar_type, "abcdefghij").is_ok());
            assert!(validate_default_value(&scalar_type, "").is_ok());
            assert_eq!(
                validate_default_value(&scalar_type, "abcdefghijk"),
                Err(AnalysisError::DefaultTooLong("abcdefghijk".to_string()))
            );
        }
    }

    #[test]
    fn test_string_length_counts_characters() {
        let scalar_type = ScalarType::varchar(3);
        assert!(validate_default_value(&scalar_type, "äöü").is_ok());
        assert!(validate_default_value(&scalar_type, "äöüß").is_err());
    }

    #[test]
    fn test_hll_accepts_empty_set() {
        assert!(validate_default_value(&ScalarType::hll(), "0").is_ok());
    }

    #[test]
    fn test_unsupported_types() {
        for primitive in [
            PrimitiveType::Boolean,
            PrimitiveType::Time,
            PrimitiveType::Bitmap,
        ] {
            assert_eq!(
                validate_default_value(&ScalarType::new(primitive), "1"),
                Err(AnalysisError::UnsupportedType(primitive.to_string()))
            );
        }
    }
}
