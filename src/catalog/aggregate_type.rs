use strum::{Display, EnumString};

use crate::core::types::PrimitiveType;

/// How values of a non-key column merge when rows with the same key are
/// loaded into an aggregate-model table.
///
/// Keywords are parsed case-insensitively, so `sum` and `SUM` are equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum AggregateType {
    Sum,
    Min,
    Max,
    /// Keep the most recently loaded value.
    Replace,
    /// Like `Replace`, but a NULL never overwrites an existing value.
    ReplaceIfNotNull,
    HllUnion,
    BitmapUnion,
}

impl AggregateType {
    /// Whether a column of `primitive` type may be merged with this aggregation.
    pub fn is_compatible(self, primitive: PrimitiveType) -> bool {
        match self {
            Self::Sum => primitive.is_numeric(),
            Self::Min | Self::Max => {
                primitive.is_numeric() || primitive.is_date() || primitive.is_string()
            }
            Self::Replace | Self::ReplaceIfNotNull => {
                primitive.is_numeric()
                    || primitive.is_date()
                    || primitive.is_string()
                    || primitive == PrimitiveType::Boolean
            }
            Self::HllUnion => primitive == PrimitiveType::Hll,
            Self::BitmapUnion => primitive == PrimitiveType::Bitmap,
        }
    }
}
