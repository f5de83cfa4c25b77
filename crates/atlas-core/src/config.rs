// crates/atlas-core/src/config.rs

//! # Configuration
//!
//! Settings are resolved in priority order:
//! 1. **Command-line flags** (applied by the caller on top of the loaded value).
//! 2. **Config file**: an explicit path, or `atlas.toml` in the OS config
//!    directory (via the `directories` crate, feature `native`).
//! 3. **Compiled defaults**.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `page_size` | `20` | Cards per page |
//! | `fields` | `merged` | `single` request, or primary + `merged` secondary |
//! | `borders` | `names` | Neighbors as `codes` or resolved `names` |
//! | `base_url` | `https://restcountries.com` | API host |
//! | `primary_path` | `/v3.1/all` | Canonical endpoint |
//! | `fallback_path` | `/v2/all` | Legacy endpoint |
//! | `favorites_file` | data dir `store.json` | Where favorites are persisted |

use crate::error::{AtlasError, Result};
use crate::loader::{Endpoints, FieldStrategy, Loader};
use crate::pipeline::DEFAULT_PAGE_SIZE;
use crate::render::BorderDisplay;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration for atlas, stored in `atlas.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    pub page_size: usize,
    pub fields: FieldStrategy,
    pub borders: BorderDisplay,
    pub base_url: String,
    pub primary_path: String,
    pub fallback_path: String,
    pub favorites_file: Option<PathBuf>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        let endpoints = Endpoints::default();
        AtlasConfig {
            page_size: DEFAULT_PAGE_SIZE,
            fields: FieldStrategy::default(),
            borders: BorderDisplay::default(),
            base_url: endpoints.base_url,
            primary_path: endpoints.primary_path,
            fallback_path: endpoints.fallback_path,
            favorites_file: None,
        }
    }
}

impl AtlasConfig {
    /// `<config dir>/atlas.toml` for the current user.
    #[cfg(feature = "native")]
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("rs", "atlas", "atlas")
            .map(|dirs| dirs.config_dir().join("atlas.toml"))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: AtlasConfig =
            toml::from_str(text).map_err(|e| AtlasError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            AtlasError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), "config file loaded");
        Self::from_toml_str(&text)
    }

    /// Explicit file if given, else the default file if it exists, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_path(path);
        }
        #[cfg(feature = "native")]
        {
            if let Some(path) = Self::default_path().filter(|p| p.is_file()) {
                return Self::load_from_path(path);
            }
        }
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(AtlasError::Config("page_size must be at least 1".into()));
        }
        if self.base_url.trim().is_empty() {
            return Err(AtlasError::Config("base_url must not be empty".into()));
        }
        Ok(())
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            base_url: self.base_url.clone(),
            primary_path: self.primary_path.clone(),
            fallback_path: self.fallback_path.clone(),
        }
    }

    pub fn loader(&self) -> Loader {
        Loader::new(self.endpoints(), self.fields)
    }

    /// Where favorites live: the configured file, or the platform default.
    pub fn favorites_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.favorites_file {
            return Some(path.clone());
        }
        #[cfg(feature = "native")]
        {
            crate::store::FileStore::default_path()
        }
        #[cfg(not(feature = "native"))]
        {
            None
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AtlasError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AtlasConfig::default();
        assert_eq!(config.page_size, 20);
        assert_eq!(config.fields, FieldStrategy::Merged);
        assert_eq!(config.borders, BorderDisplay::Names);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AtlasConfig::from_toml_str("page_size = 21\nfields = \"single\"\n").unwrap();
        assert_eq!(config.page_size, 21);
        assert_eq!(config.fields, FieldStrategy::Single);
        assert_eq!(config.base_url, "https://restcountries.com");
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = AtlasConfig::from_toml_str("page_size = 0").unwrap_err();
        assert!(matches!(err, AtlasError::Config(_)));
    }

    #[test]
    fn test_unknown_enum_value_rejected() {
        assert!(AtlasConfig::from_toml_str("borders = \"flags\"").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AtlasConfig {
            page_size: 21,
            borders: BorderDisplay::Codes,
            favorites_file: Some(PathBuf::from("/tmp/favs.json")),
            ..Default::default()
        };
        let text = config.to_toml().unwrap();
        assert_eq!(AtlasConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        assert!(AtlasConfig::resolve(Some(Path::new("/nope/atlas.toml"))).is_err());
    }

    #[test]
    fn test_loader_follows_endpoints() {
        let config = AtlasConfig {
            base_url: "http://localhost:8080/".into(),
            fields: FieldStrategy::Single,
            ..Default::default()
        };
        let loader = config.loader();
        assert!(loader.primary_url().starts_with("http://localhost:8080/v3.1/all?fields="));
        assert!(loader.secondary_url().is_none());
    }
}
