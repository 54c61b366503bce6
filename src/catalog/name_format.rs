use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

use crate::common::error::{AnalysisError, Result};

/// Prefix reserved for the shadow columns created by schema changes.
pub const SHADOW_COLUMN_PREFIX: &str = "__doris_shadow_";

pub const DEFAULT_MAX_NAME_LENGTH: usize = 64;

static COLUMN_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_a-zA-Z][a-zA-Z0-9_]*$").expect("valid column name pattern"));

/// Capability for validating identifiers before a column is accepted.
pub trait CheckName {
    fn check_column_name(&self, name: &str) -> Result<()>;
}

/// The default identifier policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameFormat {
    max_length: usize,
    reserved_prefix: Cow<'static, str>,
}

impl NameFormat {
    pub const fn new() -> Self {
        Self {
            max_length: DEFAULT_MAX_NAME_LENGTH,
            reserved_prefix: Cow::Borrowed(SHADOW_COLUMN_PREFIX),
        }
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_reserved_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.reserved_prefix = prefix.into();
        self
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

impl Default for NameFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckName for NameFormat {
    fn check_column_name(&self, name: &str) -> Result<()> {
        let invalid = |reason: String| AnalysisError::InvalidName {
            name: name.to_string(),
            reason,
        };

        if !COLUMN_NAME_PATTERN.is_match(name) {
            return Err(invalid("contains illegal characters".to_string()));
        }

        // The pattern only admits ASCII, so bytes and characters agree.
        if name.len() > self.max_length {
            return Err(invalid(format!(
                "longer than {} characters",
                self.max_length
            )));
        }

        if !self.reserved_prefix.is_empty() && name.starts_with(self.reserved_prefix.as_ref()) {
            return Err(invalid(format!(
                "prefix '{}' is reserved",
                self.reserved_prefix
            )));
        }

        Ok(())
    }
}
