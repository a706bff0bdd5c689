//! Configuration file support
//!
//! Settings live in `tablesmith.toml` next to the project; every value can
//! be overridden by a CLI flag. A missing config file is not an error — the
//! defaults apply.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tablesmith_codegen::GenerateOptions;
use tablesmith_types::Dialect;

use crate::error::ConfigError;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "tablesmith.toml";

/// Contents of `tablesmith.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TablesmithConfig {
    /// Target dialect name (built-in or registered)
    pub dialect: Option<String>,
    /// Path to the parsed-schema JSON document
    pub schema: Option<PathBuf>,
    /// Output file; stdout when unset
    pub out: Option<PathBuf>,
    pub naming: NamingConfig,
    pub generation: GenerationConfig,
}

/// Class-naming policy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NamingConfig {
    pub singular: bool,
    pub exceptions: Vec<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

/// Generation behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GenerationConfig {
    pub schema_global: bool,
    pub defaults_off: bool,
    pub relationships: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            schema_global: true,
            defaults_off: false,
            relationships: false,
        }
    }
}

impl TablesmithConfig {
    /// Load from the default path; missing file yields the defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: TablesmithConfig =
            toml::from_str(&text).map_err(|e| ConfigError::Invalid {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        if let Some(dialect) = &config.dialect {
            if Dialect::parse(dialect).is_none() {
                // Custom generators are registered programmatically; the CLI
                // only accepts the built-in names.
                return Err(ConfigError::UnknownDialect(dialect.clone()));
            }
        }
        Ok(config)
    }

    /// Fold the config into generation options
    #[must_use]
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            singular: self.naming.singular,
            naming_exceptions: self.naming.exceptions.clone(),
            schema_global: self.generation.schema_global,
            defaults_off: self.generation.defaults_off,
            relationships: self.generation.relationships,
            table_prefix: self.naming.prefix.clone().unwrap_or_default(),
            table_suffix: self.naming.suffix.clone().unwrap_or_default(),
        }
    }
}

/// Sample config written by `tablesmith init`
pub fn sample_config(dialect: &str) -> String {
    format!(
        r#"# tablesmith configuration

dialect = "{dialect}"
schema = "./schema.json"
out = "./models.rs"

[naming]
singular = false
exceptions = []

[generation]
schema-global = true
defaults-off = false
relationships = false
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_round_trips() {
        let config: TablesmithConfig = toml::from_str(&sample_config("orm")).unwrap();
        assert_eq!(config.dialect.as_deref(), Some("orm"));
        assert!(config.generation.schema_global);
        assert!(!config.generation.relationships);
    }

    #[test]
    fn test_defaults() {
        let config = TablesmithConfig::default();
        let options = config.generate_options();
        assert!(options.schema_global);
        assert!(!options.singular);
        assert!(options.table_prefix.is_empty());
    }
}
