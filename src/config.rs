//! generator configuration
//!
//! build a [`GeneratorConfig`] with scalar overrides and naming options.
//! pass it to [`crate::Generator::new`] or [`crate::generate`]. the struct
//! deserializes from json so an external loader can supply it as a file.

use serde::Deserialize;
use std::collections::BTreeMap;

/// configuration for a generation run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// target type name per custom scalar; unlisted custom scalars map to
    /// an opaque `String`
    pub custom_scalars: BTreeMap<String, String>,

    /// suffix appended when a resolved identifier hits a reserved word
    ///
    /// default: `"_"`
    pub reserved_word_suffix: String,

    /// emit fields and enum values marked `@deprecated`
    ///
    /// default: false
    pub include_deprecated: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            custom_scalars: BTreeMap::new(),
            reserved_word_suffix: "_".to_string(),
            include_deprecated: false,
        }
    }
}

impl GeneratorConfig {
    /// create a configuration with the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// map a custom scalar to a target type name
    pub fn with_custom_scalar(
        mut self,
        scalar: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.custom_scalars.insert(scalar.into(), target.into());
        self
    }

    /// set the reserved-word suffix
    pub fn with_reserved_word_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.reserved_word_suffix = suffix.into();
        self
    }

    /// include fields and enum values marked `@deprecated`
    pub fn with_include_deprecated(mut self, include: bool) -> Self {
        self.include_deprecated = include;
        self
    }

    /// whether a possibly-deprecated schema member should be emitted
    pub(crate) fn keeps(&self, deprecation: Option<&crate::schema::Deprecation>) -> bool {
        self.include_deprecated || deprecation.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert!(config.custom_scalars.is_empty());
        assert_eq!(config.reserved_word_suffix, "_");
        assert!(!config.include_deprecated);
    }

    #[test]
    fn test_builder_helpers() {
        let config = GeneratorConfig::new()
            .with_custom_scalar("DateTime", "chrono::DateTime<chrono::Utc>")
            .with_reserved_word_suffix("X")
            .with_include_deprecated(true);

        assert_eq!(
            config.custom_scalars.get("DateTime").map(String::as_str),
            Some("chrono::DateTime<chrono::Utc>")
        );
        assert_eq!(config.reserved_word_suffix, "X");
        assert!(config.include_deprecated);
    }

    #[test]
    fn test_deserializes_with_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"custom_scalars": {"DateTime": "String"}}"#).unwrap();
        assert_eq!(
            config.custom_scalars.get("DateTime").map(String::as_str),
            Some("String")
        );
        assert_eq!(config.reserved_word_suffix, "_");
    }
}
