pub mod column_def;
pub mod literal;
pub mod type_def;
