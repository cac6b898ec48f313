//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treewalk/treewalk.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `TREEWALK__*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{ById, NodeStore, Tree};
use crate::search::{FilterDescent, SearchResult, SearchStrategy};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid setting {key}: {message}")]
    Invalid { key: String, message: String },
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Defaults applied to every search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum depth below the start node, unbounded if unset
    pub max_levels: Option<i64>,
    /// Whether rejected nodes still lead to their children
    pub descent: FilterDescent,
}

/// How children are ordered under their parent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChildrenOrder {
    #[default]
    Insertion,
    Id,
}

/// Unified configuration for treewalk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub children_order: ChildrenOrder,
    pub search: SearchSettings,
}

/// Get the XDG config directory for treewalk.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treewalk").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treewalk.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file that must exist if given
    #[instrument(level = "debug")]
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = Config::builder();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!(path = %global_path.display(), "using global config");
                builder = builder.add_source(File::from(global_path).required(false));
            }
        }

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("TREEWALK")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a TOML string (no layering).
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let settings: Self = Config::builder()
            .add_source(File::from_str(content, ::config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn validate(&self) -> ConfigResult<()> {
        if let Some(levels) = self.search.max_levels {
            if levels <= 0 {
                return Err(ConfigError::Invalid {
                    key: "search.max_levels".to_string(),
                    message: format!("must be greater than 0, got {}", levels),
                });
            }
        }
        Ok(())
    }

    /// Empty tree honouring the configured children order.
    pub fn new_tree<P, S: NodeStore<P>>(&self, tree_id: &str) -> Tree<P, S> {
        match self.children_order {
            ChildrenOrder::Insertion => Tree::new(tree_id),
            ChildrenOrder::Id => Tree::with_comparator(tree_id, ById),
        }
    }

    /// Applies the search defaults to `search`.
    pub fn apply_search<'t, P: 't, S, T>(&self, search: &mut T) -> SearchResult<()>
    where
        S: NodeStore<P> + 't,
        T: SearchStrategy<'t, P, S>,
    {
        search.set_descent(self.search.descent);
        match self.search.max_levels {
            Some(levels) => search.set_max_levels(levels),
            None => {
                search.clear_max_levels();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_toml_when_parsing_then_uses_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn given_search_section_when_parsing_then_reads_values() {
        let settings = Settings::from_toml(
            r#"
children_order = "id"

[search]
max_levels = 2
descent = "prune"
"#,
        )
        .unwrap();

        assert_eq!(settings.children_order, ChildrenOrder::Id);
        assert_eq!(settings.search.max_levels, Some(2));
        assert_eq!(settings.search.descent, FilterDescent::Prune);
    }

    #[test]
    fn given_settings_when_serializing_then_parses_back() {
        let settings = Settings {
            children_order: ChildrenOrder::Id,
            search: SearchSettings {
                max_levels: Some(4),
                descent: FilterDescent::Prune,
            },
        };

        let text = settings.to_toml().unwrap();

        assert!(text.contains("descent = \"prune\""));
        assert_eq!(Settings::from_toml(&text).unwrap(), settings);
    }

    #[test]
    fn given_zero_max_levels_when_parsing_then_rejects() {
        let result = Settings::from_toml("[search]\nmax_levels = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }
}
