//! Configuration loading, validation, and management for agglomerate.
//!
//! Loads configuration from `agglomerate.toml` in the working directory with
//! environment variable overrides. Command-line flags are layered on top by
//! the binary. Validates all settings before a run starts.

use agglomerate_core::{AssembleOptions, DEFAULT_GENERATOR, DEFAULT_GUARD, License};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "agglomerate.toml";

/// The root configuration structure.
///
/// Maps directly to `agglomerate.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgglomerateConfig {
    /// Include-guard macro wrapped around the merged header
    #[serde(default = "default_guard")]
    pub guard: String,

    /// Output path; `-` writes to stdout
    #[serde(default = "default_out")]
    pub out: PathBuf,

    /// Headers to merge, named exactly as other headers include them
    #[serde(default)]
    pub hdrs: Vec<PathBuf>,

    /// Plain-text license to place at the top instead of the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_file: Option<PathBuf>,

    /// Tool name written into the provenance comment
    #[serde(default = "default_generator")]
    pub generator: String,
}

fn default_guard() -> String {
    DEFAULT_GUARD.into()
}
fn default_out() -> PathBuf {
    PathBuf::from("cwisstable.h")
}
fn default_generator() -> String {
    DEFAULT_GENERATOR.into()
}

impl Default for AgglomerateConfig {
    fn default() -> Self {
        Self {
            guard: default_guard(),
            out: default_out(),
            hdrs: vec![],
            license_file: None,
            generator: default_generator(),
        }
    }
}

impl AgglomerateConfig {
    /// Load configuration from `agglomerate.toml` in the working directory,
    /// or from `path` when one is given explicitly.
    ///
    /// Environment variables override the file:
    /// - `AGGLOMERATE_GUARD`
    /// - `AGGLOMERATE_OUT`
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_required(path)?,
            None => Self::load_from(Path::new(DEFAULT_CONFIG_FILE))?,
        };

        if let Ok(guard) = std::env::var("AGGLOMERATE_GUARD") {
            config.guard = guard;
        }

        if let Ok(out) = std::env::var("AGGLOMERATE_OUT") {
            config.out = PathBuf::from(out);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path, falling back to
    /// defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_required(path)
    }

    /// Load configuration from a file that must exist.
    pub fn load_required(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_c_identifier(&self.guard) {
            return Err(ConfigError::ValidationError(format!(
                "guard '{}' is not a valid C identifier",
                self.guard
            )));
        }

        if self.generator.trim().is_empty() || self.generator.contains('\n') {
            return Err(ConfigError::ValidationError(
                "generator must be a non-empty single line".into(),
            ));
        }

        if self.out.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError("out must not be empty".into()));
        }

        Ok(())
    }

    /// The license header: the configured file if set, otherwise the built-in text.
    pub fn license(&self) -> Result<License, ConfigError> {
        let Some(path) = &self.license_file else {
            return Ok(License::default());
        };
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(License::from_plain_text(&text))
    }

    /// Settings handed to the assembler.
    pub fn assemble_options(&self) -> Result<AssembleOptions, ConfigError> {
        Ok(AssembleOptions {
            guard: self.guard.clone(),
            license: self.license()?,
            generator: self.generator.clone(),
        })
    }

    /// Generate a default config TOML string (for `config init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for agglomerate_core::Error {
    fn from(e: ConfigError) -> Self {
        agglomerate_core::Error::Config {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AgglomerateConfig::default();
        assert_eq!(config.guard, "CWISSTABLE_H_");
        assert_eq!(config.out, PathBuf::from("cwisstable.h"));
        assert!(config.hdrs.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AgglomerateConfig {
            hdrs: vec!["cwisstable/base.h".into(), "cwisstable/bits.h".into()],
            ..AgglomerateConfig::default()
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AgglomerateConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn invalid_guard_rejected() {
        for guard in ["", "1ABC", "MY-GUARD", "HAS SPACE"] {
            let config = AgglomerateConfig {
                guard: guard.into(),
                ..AgglomerateConfig::default()
            };
            assert!(config.validate().is_err(), "{guard:?} should be rejected");
        }
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AgglomerateConfig::load_from(Path::new("/nonexistent/agglomerate.toml"));
        assert_eq!(result.unwrap(), AgglomerateConfig::default());
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let result = AgglomerateConfig::load_required(Path::new("/nonexistent/agglomerate.toml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agglomerate.toml");
        std::fs::write(
            &path,
            r#"
guard = "MY_LIB_H_"
hdrs = ["lib/a.h", "lib/b.h"]
"#,
        )
        .unwrap();

        let config = AgglomerateConfig::load_required(&path).unwrap();
        assert_eq!(config.guard, "MY_LIB_H_");
        assert_eq!(config.hdrs, vec![PathBuf::from("lib/a.h"), PathBuf::from("lib/b.h")]);
        assert_eq!(config.out, PathBuf::from("cwisstable.h"));
        assert_eq!(config.generator, "agglomerate");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agglomerate.toml");
        std::fs::write(&path, "guard = [not toml").unwrap();
        let result = AgglomerateConfig::load_required(&path);
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn license_file_replaces_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let license_path = dir.path().join("LICENSE.txt");
        std::fs::write(&license_path, "Copyright Example\n\nAll rights reserved.\n").unwrap();

        let config = AgglomerateConfig {
            license_file: Some(license_path),
            ..AgglomerateConfig::default()
        };
        let options = config.assemble_options().unwrap();
        assert_eq!(
            options.license.lines(),
            ["// Copyright Example", "//", "// All rights reserved."]
        );
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AgglomerateConfig::default_toml();
        assert!(toml_str.contains("CWISSTABLE_H_"));
        assert!(toml_str.contains("cwisstable.h"));
        assert!(!toml_str.contains("license_file"));
    }

    #[test]
    fn c_identifiers() {
        assert!(is_c_identifier("CWISSTABLE_H_"));
        assert!(is_c_identifier("_private"));
        assert!(!is_c_identifier("9lives"));
    }
}
