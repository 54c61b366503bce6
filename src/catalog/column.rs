use crate::{catalog::aggregate_type::AggregateType, core::types::ScalarType};

/// A column as stored in the catalog.
///
/// Built from an analyzed column definition; every field has already passed
/// validation by the time a `Column` exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    scalar_type: ScalarType,
    is_key: bool,
    aggregate_type: Option<AggregateType>,
    nullable: bool,
    default_value: Option<String>,
    comment: String,
}

impl Column {
    pub(crate) fn new(
        name: String,
        scalar_type: ScalarType,
        is_key: bool,
        aggregate_type: Option<AggregateType>,
        nullable: bool,
        default_value: Option<String>,
        comment: String,
    ) -> Self {
        Self {
            name,
            scalar_type,
            is_key,
            aggregate_type,
            nullable,
            default_value,
            comment,
        }
    }

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
}
