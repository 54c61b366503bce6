pub mod aggregate_type;
pub mod column;
pub mod name_format;
