use std::fmt;

use crate::{
    common::error::{AnalysisError, Result},
    core::types::{
        DEFAULT_DECIMAL_PRECISION, DEFAULT_DECIMAL_SCALE, MAX_CHAR_LENGTH, MAX_DECIMAL_PRECISION,
        MAX_DECIMAL_SCALE, MAX_VARCHAR_LENGTH, PrimitiveType, ScalarType,
    },
};

/// Capability for turning a parsed type declaration into a concrete type.
pub trait ResolveType: fmt::Debug {
    /// Checks the declared parameters and returns the resolved type.
    fn resolve(&self) -> Result<ScalarType>;

    /// Renders the declaration as it was written.
    fn to_sql(&self) -> String;
}

/// A column type as declared in `CREATE TABLE`, before its parameters have
/// been checked.
///
/// Parameters are kept exactly as the parser produced them, including values
/// that are out of range, so that resolution can report them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    primitive: PrimitiveType,
    length: Option<i64>,
    precision: Option<i64>,
    scale: Option<i64>,
}

impl TypeDef {
    pub fn new(primitive: PrimitiveType) -> Self {
        Self {
            primitive,
            length: None,
            precision: None,
            scale: None,
        }
    }

    pub fn char(length: i64) -> Self {
        Self::new(PrimitiveType::Char).with_length(length)
    }

    pub fn varchar(length: i64) -> Self {
        Self::new(PrimitiveType::Varchar).with_length(length)
    }

    pub fn decimal(precision: i64, scale: i64) -> Self {
        Self::new(PrimitiveType::Decimal).with_precision_and_scale(precision, Some(scale))
    }

    pub fn with_length(mut self, length: i64) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_precision_and_scale(mut self, precision: i64, scale: Option<i64>) -> Self {
        self.precision = Some(precision);
        self.scale = scale;
        self
    }

    pub fn primitive(&self) -> PrimitiveType {
        self.primitive
    }

    fn reject_length(&self) -> Result<()> {
        match self.length {
            Some(length) => Err(AnalysisError::InvalidType(format!(
                "Type {} does not take a length. Length was set to: {length}",
                self.primitive
            ))),
            None => Ok(()),
        }
    }

    fn reject_precision(&self) -> Result<()> {
        if self.precision.is_some() || self.scale.is_some() {
            return Err(AnalysisError::InvalidType(format!(
                "Type {} does not take precision or scale",
                self.primitive
            )));
        }
        Ok(())
    }

    fn resolve_char(&self) -> Result<ScalarType> {
        self.reject_precision()?;
        let length = self.length.unwrap_or(1);
        if !(1..=i64::from(MAX_CHAR_LENGTH)).contains(&length) {
            return Err(AnalysisError::InvalidType(format!(
                "Char size must between 1 and {MAX_CHAR_LENGTH}. Size was set to: {length}"
            )));
        }
        Ok(ScalarType::char(length as u32))
    }

    fn resolve_varchar(&self) -> Result<ScalarType> {
        self.reject_precision()?;
        let Some(length) = self.length else {
            return Err(AnalysisError::InvalidType(
                "Varchar requires a declared size".to_string(),
            ));
        };
        if !(1..=i64::from(MAX_VARCHAR_LENGTH)).contains(&length) {
            return Err(AnalysisError::InvalidType(format!(
                "Varchar size must between 1 and {MAX_VARCHAR_LENGTH}. Size was set to: {length}"
            )));
        }
        Ok(ScalarType::varchar(length as u32))
    }

    fn resolve_decimal(&self) -> Result<ScalarType> {
        self.reject_length()?;
        let precision = self
            .precision
            .unwrap_or(i64::from(DEFAULT_DECIMAL_PRECISION));
        let scale = self.scale.unwrap_or(i64::from(DEFAULT_DECIMAL_SCALE));

        if !(1..=i64::from(MAX_DECIMAL_PRECISION)).contains(&precision) {
            return Err(AnalysisError::InvalidType(format!(
                "Precision of decimal must between 1 and {MAX_DECIMAL_PRECISION}. Precision was set to: {precision}"
            )));
        }
        if !(0..=i64::from(MAX_DECIMAL_SCALE)).contains(&scale) {
            return Err(AnalysisError::InvalidType(format!(
                "Scale of decimal must between 0 and {MAX_DECIMAL_SCALE}. Scale was set to: {scale}"
            )));
        }
        if scale > precision {
            return Err(AnalysisError::InvalidType(format!(
                "Scale of decimal must be smaller than precision. Scale is {scale} and precision is {precision}"
            )));
        }
        Ok(ScalarType::decimal(precision as u32, scale as u32))
    }
}

impl ResolveType for TypeDef {
    fn resolve(&self) -> Result<ScalarType> {
        match self.primitive {
            PrimitiveType::Time => Err(AnalysisError::UnsupportedDataType(
                self.primitive.to_string(),
            )),
            PrimitiveType::Char => self.resolve_char(),
            PrimitiveType::Varchar => self.resolve_varchar(),
            PrimitiveType::Decimal => self.resolve_decimal(),
            primitive => {
                self.reject_length()?;
                self.reject_precision()?;
                Ok(ScalarType::new(primitive))
            }
        }
    }

    fn to_sql(&self) -> String {
        match (self.length, self.precision, self.scale) {
            (Some(length), _, _) => format!("{}({length})", self.primitive),
            (None, Some(precision), Some(scale)) => {
                format!("{}({precision}, {scale})", self.primitive)
            }
            (None, Some(precision), None) => format!("{}({precision})", self.primitive),
            _ => self.primitive.to_string(),
        }
    }
}

impl From<ScalarType> for TypeDef {
    fn from(scalar_type: ScalarType) -> Self {
        let mut type_def = TypeDef::new(scalar_type.primitive());
        if scalar_type.primitive().is_string() {
            type_def.length = scalar_type.length().map(i64::from);
        }
        if let (Some(precision), Some(scale)) = (scalar_type.precision(), scalar_type.scale()) {
            type_def.precision = Some(i64::from(precision));
            type_def.scale = Some(i64::from(scale));
        }
        type_def
    }
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sql())
    }
}
