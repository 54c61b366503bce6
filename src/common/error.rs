use miette::Diagnostic;
use thiserror::Error;

use crate::catalog::aggregate_type::AggregateType;

/// Reasons a column definition is rejected during analysis.
///
/// Every variant renders as the message shown to the user when a
/// `CREATE TABLE` is refused, so the wording is part of the contract.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum AnalysisError {
    #[error("No column name or column type in column definition.")]
    #[diagnostic(code(ddl::missing_field))]
    MissingField,

    #[error("Incorrect column name '{name}': {reason}")]
    #[diagnostic(
        code(ddl::invalid_name),
        help("column names start with a letter or underscore and contain only letters, digits and underscores")
    )]
    InvalidName { name: String, reason: String },

    #[error("Unsupported data type: {0}")]
    #[diagnostic(code(ddl::unsupported_data_type))]
    UnsupportedDataType(String),

    /// A type descriptor carried parameters outside the allowed range.
    #[error("{0}")]
    #[diagnostic(code(ddl::invalid_type))]
    InvalidType(String),

    #[error("Aggregate type {aggregate} is not compatible with primitive type {type_sql}")]
    #[diagnostic(code(ddl::incompatible_aggregate))]
    IncompatibleAggregate {
        aggregate: AggregateType,
        type_sql: String,
    },

    #[error("Float or double can not used as a key, use decimal instead.")]
    #[diagnostic(code(ddl::float_key))]
    FloatKey,

    #[error("Key column {name} can not set aggregation type")]
    #[diagnostic(code(ddl::key_with_aggregate))]
    KeyWithAggregate { name: String },

    #[error("HLL or BITMAP column {name} can not be a key")]
    #[diagnostic(code(ddl::sketch_key))]
    SketchKey { name: String },

    #[error("Hll can not set default value")]
    #[diagnostic(code(ddl::hll_default))]
    HllDefault,

    #[error("Invalid number format: {0}")]
    #[diagnostic(code(ddl::invalid_number))]
    InvalidNumber(String),

    #[error("Number out of range[{value}]. type: {type_sql}")]
    #[diagnostic(code(ddl::number_out_of_range))]
    NumberOutOfRange { value: String, type_sql: String },

    #[error("Invalid integer literal: {0}")]
    #[diagnostic(code(ddl::invalid_large_int))]
    InvalidLargeInt(String),

    #[error("Large int literal is out of range: {0}")]
    #[diagnostic(code(ddl::large_int_out_of_range))]
    LargeIntOutOfRange(String),

    #[error("Invalid floating-point literal: {0}")]
    #[diagnostic(code(ddl::invalid_float))]
    InvalidFloat(String),

    #[error("Default value will loose precision: {0}")]
    #[diagnostic(code(ddl::precision_loss), help("declare the column as DOUBLE or DECIMAL"))]
    PrecisionLoss(String),

    #[error("Invalid decimal literal: {0}")]
    #[diagnostic(code(ddl::invalid_decimal))]
    InvalidDecimal(String),

    #[error(
        "Invalid precise and scale - expect ({precision}, {scale}), but ({actual_precision}, {actual_scale})"
    )]
    #[diagnostic(code(ddl::decimal_overflow))]
    DecimalOverflow {
        precision: u32,
        scale: u32,
        actual_precision: u32,
        actual_scale: u32,
    },

    #[error("date literal [{0}] is invalid")]
    #[diagnostic(code(ddl::invalid_date))]
    InvalidDate(String),

    #[error("Default value is too long: {0}")]
    #[diagnostic(code(ddl::default_too_long))]
    DefaultTooLong(String),

    #[error("Unsupported type: {0}")]
    #[diagnostic(code(ddl::unsupported_type))]
    UnsupportedType(String),
}

pub type Result<T, E = AnalysisError> = std::result::Result<T, E>;
