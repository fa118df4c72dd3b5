//! Module: config
//! Responsibility: runtime limits and the location of the condition catalog.
//! Boundary: parsed from TOML; every key is optional and falls back to the
//! crate defaults.

use crate::{
    LOW_PRICE_LIMIT, NAZOTTE_LIMIT, RECOMMEND_LIMIT,
    model::condition::{ConditionError, SearchConditionCatalog},
};
use serde::Deserialize;
use std::{fs, path::PathBuf};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("limit '{0}' must be positive")]
    ZeroLimit(&'static str),

    #[error(transparent)]
    Conditions(#[from] ConditionError),
}

///
/// CatalogConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub limits: Limits,
    pub conditions: Option<ConditionPaths>,
}

impl CatalogConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.limits.validate()?;

        Ok(config)
    }

    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    /// Load the condition catalog named by `[conditions]`, or the standard
    /// catalog when the table is absent.
    pub fn condition_catalog(&self) -> Result<SearchConditionCatalog, ConfigError> {
        match &self.conditions {
            Some(paths) => Ok(SearchConditionCatalog::load(
                &paths.furniture,
                &paths.space,
            )?),
            None => Ok(SearchConditionCatalog::standard()),
        }
    }
}

///
/// Limits
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    pub low_price: usize,
    pub recommend: usize,
    pub nazotte: usize,
}

impl Limits {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("low_price", self.low_price),
            ("recommend", self.recommend),
            ("nazotte", self.nazotte),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroLimit(name));
            }
        }

        Ok(())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            low_price: LOW_PRICE_LIMIT,
            recommend: RECOMMEND_LIMIT,
            nazotte: NAZOTTE_LIMIT,
        }
    }
}

///
/// ConditionPaths
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConditionPaths {
    pub furniture: PathBuf,
    pub space: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = CatalogConfig::from_toml_str("").expect("empty config should parse");

        assert_eq!(config.limits, Limits::default());
        assert!(config.conditions.is_none(), "conditions should be optional");
    }

    #[test]
    fn partial_limits_keep_remaining_defaults() {
        let config = CatalogConfig::from_toml_str("[limits]\nnazotte = 10\n")
            .expect("partial limits should parse");

        assert_eq!(config.limits.nazotte, 10);
        assert_eq!(config.limits.low_price, LOW_PRICE_LIMIT);
        assert_eq!(config.limits.recommend, RECOMMEND_LIMIT);
    }

    #[test]
    fn zero_limit_is_rejected() {
        let err = CatalogConfig::from_toml_str("[limits]\nrecommend = 0\n")
            .expect_err("zero limit should be rejected");

        assert!(
            matches!(err, ConfigError::ZeroLimit("recommend")),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = CatalogConfig::from_toml_str("[limits]\ncheap = 5\n")
            .expect_err("unknown key should be rejected");

        assert!(matches!(err, ConfigError::Toml(_)), "unexpected error: {err}");
    }

    #[test]
    fn condition_paths_parse() {
        let config = CatalogConfig::from_toml_str(
            "[conditions]\nfurniture = \"fixture/chair.json\"\nspace = \"fixture/estate.json\"\n",
        )
        .expect("condition paths should parse");

        let paths = config.conditions.expect("conditions should be present");
        assert_eq!(paths.furniture, PathBuf::from("fixture/chair.json"));
        assert_eq!(paths.space, PathBuf::from("fixture/estate.json"));
    }

    #[test]
    fn missing_condition_file_is_reported() {
        let config = CatalogConfig::from_toml_str(
            "[conditions]\nfurniture = \"/nonexistent/a.json\"\nspace = \"/nonexistent/b.json\"\n",
        )
        .expect("condition paths should parse");

        let err = config
            .condition_catalog()
            .expect_err("missing file should fail");
        assert!(
            matches!(err, ConfigError::Conditions(ConditionError::Read { .. })),
            "unexpected error: {err}"
        );
    }
}
