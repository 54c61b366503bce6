use std::fmt;

use log::debug;

use crate::{
    catalog::{
        aggregate_type::AggregateType,
        column::Column,
        name_format::{CheckName, NameFormat},
    },
    common::error::{AnalysisError, Result},
    core::types::{PrimitiveType, ScalarType},
    sql::{
        literal::validate_default_value,
        type_def::{ResolveType, TypeDef},
    },
};

/// Default stored for every HLL column: the canonical empty sketch.
pub const HLL_EMPTY_SET: &str = "0";

static DEFAULT_NAME_FORMAT: NameFormat = NameFormat::new();

/// Settings that vary between the tables a column can belong to.
#[derive(Clone, Copy)]
pub struct AnalysisOptions<'a> {
    /// Whether the table is stored by the row-columnar storage engine, which
    /// restricts the types usable as keys.
    pub storage_engine_aware: bool,

    /// Policy applied to the column name.
    pub name_checker: &'a dyn CheckName,
}

impl<'a> AnalysisOptions<'a> {
    pub fn new(storage_engine_aware: bool) -> Self {
        Self {
            storage_engine_aware,
            name_checker: &DEFAULT_NAME_FORMAT,
        }
    }

    pub fn with_name_checker(mut self, name_checker: &'a dyn CheckName) -> Self {
        self.name_checker = name_checker;
        self
    }
}

/// A column definition as produced by the parser for `CREATE TABLE`.
///
/// ```text
/// name type [KEY] [agg_type] [NULL | NOT NULL] [DEFAULT "value"] [COMMENT "text"]
///
/// id BIGINT KEY NOT NULL DEFAULT "-1" COMMENT "user id"
/// pv BIGINT SUM NULL DEFAULT "-1" COMMENT "page visit"
/// ```
///
/// Nothing is checked on construction. [`ColumnDefinition::analyze`] validates
/// the definition and yields an [`AnalyzedColumnDef`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition<T = TypeDef> {
    name: Option<String>,
    type_def: Option<T>,
    is_key: bool,
    aggregate_type: Option<AggregateType>,
    nullable: bool,
    default_value: Option<String>,
    comment: String,
}

impl<T: ResolveType> ColumnDefinition<T> {
    /// Creates a non-key, non-nullable column with no default and no comment.
    pub fn new(name: impl Into<String>, type_def: T) -> Self {
        Self::from_parts(Some(name.into()), Some(type_def))
    }

    /// Creates a fully specified column definition.
    pub fn with_attributes(
        name: impl Into<String>,
        type_def: T,
        is_key: bool,
        aggregate_type: Option<AggregateType>,
        nullable: bool,
        default_value: Option<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            type_def: Some(type_def),
            is_key,
            aggregate_type,
            nullable,
            default_value,
            comment: comment.into(),
        }
    }

    /// Creates a definition from parser fragments, either of which may be absent.
    pub fn from_parts(name: Option<String>, type_def: Option<T>) -> Self {
        Self {
            name,
            type_def,
            is_key: false,
            aggregate_type: None,
            nullable: false,
            default_value: None,
            comment: String::new(),
        }
    }

    pub fn with_key(mut self, is_key: bool) -> Self {
        self.is_key = is_key;
        self
    }

    pub fn with_aggregate_type(mut self, aggregate_type: Option<AggregateType>) -> Self {
        self.aggregate_type = aggregate_type;
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_default_value(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn type_def(&self) -> Option<&T> {
        self.type_def.as_ref()
    }

    pub fn is_key(&self) -> bool {
        self.is_key
    }

    pub fn aggregate_type(&self) -> Option<AggregateType> {
        self.aggregate_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Validates the definition with the default name policy.
    ///
    /// `is_olap` marks tables kept by the row-columnar storage engine.
    pub fn analyze(&self, is_olap: bool) -> Result<AnalyzedColumnDef> {
        self.analyze_with(&AnalysisOptions::new(is_olap))
    }

    /// Validates the definition and returns its resolved form.
    ///
    /// Checks run in a fixed order and stop at the first violation: presence
    /// of name and type, the name policy, type resolution, aggregation
    /// compatibility, key restrictions, and finally the default value.
    pub fn analyze_with(&self, options: &AnalysisOptions<'_>) -> Result<AnalyzedColumnDef> {
        let (Some(name), Some(type_def)) = (
            self.name.as_deref().filter(|name| !name.is_empty()),
            self.type_def.as_ref(),
        ) else {
            return Err(AnalysisError::MissingField);
        };

        options.name_checker.check_column_name(name)?;

        let scalar_type = type_def.resolve()?;
        let primitive = scalar_type.primitive();

        if let Some(aggregate) = self.aggregate_type
            && !aggregate.is_compatible(primitive)
        {
            return Err(AnalysisError::IncompatibleAggregate {
                aggregate,
                type_sql: scalar_type.to_sql(),
            });
        }

        if primitive.is_floating_point() && options.storage_engine_aware && self.is_key {
            return Err(AnalysisError::FloatKey);
        }

        if self.is_key {
            if self.aggregate_type.is_some() {
                return Err(AnalysisError::KeyWithAggregate {
                    name: name.to_string(),
                });
            }
            if primitive.is_sketch() && options.storage_engine_aware {
                return Err(AnalysisError::SketchKey {
                    name: name.to_string(),
                });
            }
        }

        let default_value = if primitive == PrimitiveType::Hll {
            if self.default_value.is_some() {
                return Err(AnalysisError::HllDefault);
            }
            debug!("column `{name}` gets the empty HLL set as default");
            Some(HLL_EMPTY_SET.to_string())
        } else {
            self.default_value.clone()
        };

        if let Some(default_value) = &default_value {
            validate_default_value(&scalar_type, default_value)?;
        }

        debug!("analyzed column `{name}` as {scalar_type}");

        Ok(AnalyzedColumnDef {
            name: name.to_string(),
            scalar_type,
            is_key: self.is_key,
            aggregate_type: self.aggregate_type,
            nullable: self.nullable,
            default_value,
            comment: self.comment.clone(),
        })
    }

    /// Renders the definition as written, without resolving its type.
    ///
    /// Omitted type parameters stay omitted (`CHAR`, not `CHAR(1)`), so the
    /// output can change once the column goes through the catalog. Only
    /// [`AnalyzedColumnDef::to_sql`] is stable across that round trip.
    pub fn to_sql(&self) -> String {
        let type_sql = self
            .type_def
            .as_ref()
            .map(ResolveType::to_sql)
            .unwrap_or_default();

        render_column_sql(
            self.name(),
            &type_sql,
            self.aggregate_type,
            self.nullable,
            self.default_value.as_deref(),
            &self.comment,
        )
    }
}

impl<T: ResolveType> fmt::Display for ColumnDefinition<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}

impl From<&Column> for ColumnDefinition {
    fn from(column: &Column) -> Self {
        Self::with_attributes(
            column.name(),
            TypeDef::from(*column.scalar_type()),
            column.is_key(),
            column.aggregate_type(),
            column.is_nullable(),
            column.default_value().map(str::to_string),
            column.comment(),
        )
    }
}

/// A column definition that passed analysis.
///
/// The type is resolved and the default value is final, so this is the only
/// form that can be turned into a catalog [`Column`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzedColumnDef {
    name: String,
    scalar_type: ScalarType,
    is_key: bool,
    aggregate_type: Option<AggregateType>,
    nullable: bool,
    default_value: Option<String>,
    comment: String,
}

impl AnalyzedColumnDef {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scalar_type(&self) -> &ScalarType {
        &self.scalar_type
    }

    pub fn is_key(&self) -> bool {
        self.is_key
    }

    pub fn aggregate_type(&self) -> Option<AggregateType> {
        self.aggregate_type
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn to_sql(&self) -> String {
        render_column_sql(
            &self.name,
            &self.scalar_type.to_sql(),
            self.aggregate_type,
            self.nullable,
            self.default_value.as_deref(),
            &self.comment,
        )
    }

    pub fn to_column(&self) -> Column {
        Column::new(
            self.name.clone(),
            self.scalar_type,
            self.is_key,
            self.aggregate_type,
            self.nullable,
            self.default_value.clone(),
            self.comment.clone(),
        )
    }
}

impl fmt::Display for AnalyzedColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}

/// Field order is fixed: name, type, aggregation, nullability, default, comment.
fn render_column_sql(
    name: &str,
    type_sql: &str,
    aggregate_type: Option<AggregateType>,
    nullable: bool,
    default_value: Option<&str>,
    comment: &str,
) -> String {
    let mut sql = format!("`{name}` {type_sql} ");

    if let Some(aggregate) = aggregate_type {
        sql.push_str(&format!("{aggregate} "));
    }

    if !nullable {
        sql.push_str("NOT NULL ");
    }

    if let Some(default_value) = default_value {
        sql.push_str(&format!("DEFAULT \"{default_value}\" "));
    }

    sql.push_str(&format!("COMMENT \"{comment}\""));
    sql
}
