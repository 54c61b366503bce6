//! Analysis of the column definitions in a `CREATE TABLE` statement.
//!
//! A [`ColumnDefinition`] holds what the parser saw. Analyzing it resolves
//! the declared type, enforces the aggregation and key rules of the table
//! model, and checks the textual default value against the type. The result
//! is an [`AnalyzedColumnDef`], which renders canonical DDL and builds the
//! catalog [`Column`].

pub mod catalog;
pub mod common;
pub mod core;
pub mod sql;

pub use crate::catalog::{
    aggregate_type::AggregateType,
    column::Column,
    name_format::{CheckName, NameFormat},
};
pub use crate::common::error::{AnalysisError, Result};
pub use crate::core::types::{PrimitiveType, ScalarType};
pub use crate::sql::{
    column_def::{AnalysisOptions, AnalyzedColumnDef, ColumnDefinition, HLL_EMPTY_SET},
    literal::{
        DateLiteral, DecimalLiteral, FloatLiteral, IntLiteral, LargeIntLiteral,
        validate_default_value,
    },
    type_def::{ResolveType, TypeDef},
};
