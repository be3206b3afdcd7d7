use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CobuyError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CobuyConfig {
    #[serde(default)]
    pub recommend: RecommendSettings,
    #[serde(default)]
    pub graph: GraphSettings,
    #[serde(default)]
    pub data: DataSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendSettings {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    #[serde(default = "default_max_depth_cap")]
    pub max_depth_cap: u32,
}

impl Default for RecommendSettings {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            max_depth: default_max_depth(),
            max_depth_cap: default_max_depth_cap(),
        }
    }
}

impl RecommendSettings {
    /// Normalize user-supplied `(limit, depth)` into usable values.
    ///
    /// A missing or zero limit falls back to the configured default. A
    /// missing or zero depth falls back to the configured default depth, and
    /// any depth is clamped to `1..=max_depth_cap`.
    #[must_use]
    pub fn normalize(&self, limit: Option<usize>, depth: Option<u32>) -> (usize, u32) {
        let limit = match limit {
            Some(k) if k > 0 => k,
            _ => self.limit.max(1),
        };
        let cap = self.max_depth_cap.max(1);
        let depth = match depth {
            Some(d) if d >= 1 => d,
            _ => self.max_depth,
        };
        (limit, depth.clamp(1, cap))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSettings {
    #[serde(default = "default_co_purchase_weight")]
    pub co_purchase_weight: f64,
    #[serde(default = "default_category_weight")]
    pub category_weight: f64,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            co_purchase_weight: default_co_purchase_weight(),
            category_weight: default_category_weight(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSettings {
    /// Dataset file. Relative paths resolve against the project root for
    /// `.cobuy/config.toml`, otherwise against the config file's directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Load `.cobuy/config.toml` under `project_root`, falling back to the user
/// config and then to defaults.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed.
pub fn load_config(project_root: &Path) -> Result<CobuyConfig> {
    let project_path = project_root.join(".cobuy/config.toml");
    if project_path.exists() {
        return load_config_file(&project_path);
    }

    let Some(config_dir) = dirs::config_dir() else {
        return Ok(CobuyConfig::default());
    };

    let user_path = config_dir.join("cobuy/config.toml");
    if user_path.exists() {
        return load_config_file(&user_path);
    }

    Ok(CobuyConfig::default())
}

/// Load a single config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid config TOML.
pub fn load_config_file(path: &Path) -> Result<CobuyConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut config =
        toml::from_str::<CobuyConfig>(&content).map_err(|err| CobuyError::ConfigParse {
            path: path.display().to_string(),
            reason: err.message().to_string(),
        })?;

    if let (Some(data_path), Some(parent)) = (config.data.path.as_ref(), path.parent()) {
        if data_path.is_relative() {
            let base = parent.parent().filter(|_| parent.ends_with(".cobuy")).unwrap_or(parent);
            config.data.path = Some(base.join(data_path));
        }
    }

    Ok(config)
}

const fn default_limit() -> usize {
    5
}

const fn default_max_depth() -> u32 {
    2
}

const fn default_max_depth_cap() -> u32 {
    4
}

const fn default_co_purchase_weight() -> f64 {
    3.0
}

const fn default_category_weight() -> f64 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_documented_values() {
        let config = CobuyConfig::default();
        assert_eq!(config.recommend.limit, 5);
        assert_eq!(config.recommend.max_depth, 2);
        assert_eq!(config.recommend.max_depth_cap, 4);
        assert!((config.graph.co_purchase_weight - 3.0).abs() < f64::EPSILON);
        assert!((config.graph.category_weight - 1.0).abs() < f64::EPSILON);
        assert!(config.data.path.is_none());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: CobuyConfig = toml::from_str("[recommend]\nlimit = 8\n").expect("parse");
        assert_eq!(config.recommend.limit, 8);
        assert_eq!(config.recommend.max_depth, 2);
        assert!((config.graph.category_weight - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn normalize_falls_back_and_clamps() {
        let settings = RecommendSettings::default();
        assert_eq!(settings.normalize(None, None), (5, 2));
        assert_eq!(settings.normalize(Some(0), Some(0)), (5, 2));
        assert_eq!(settings.normalize(Some(3), Some(9)), (3, 4));
        assert_eq!(settings.normalize(Some(12), Some(1)), (12, 1));
    }

    #[test]
    fn project_config_is_loaded() {
        let dir = TempDir::new().expect("tempdir");
        std::fs::create_dir_all(dir.path().join(".cobuy")).expect("mkdir");
        std::fs::write(
            dir.path().join(".cobuy/config.toml"),
            "[recommend]\nmax_depth = 3\n\n[data]\npath = \"catalog.toml\"\n",
        )
        .expect("write config");

        let config = load_config(dir.path()).expect("load");
        assert_eq!(config.recommend.max_depth, 3);
        assert_eq!(config.data.path, Some(dir.path().join("catalog.toml")));
    }

    #[test]
    fn invalid_config_reports_path() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[recommend\nlimit = ").expect("write config");

        let err = load_config_file(&path).expect_err("must fail");
        let cobuy = err.downcast_ref::<CobuyError>().expect("typed error");
        assert!(matches!(cobuy, CobuyError::ConfigParse { .. }));
        assert!(err.to_string().contains("config.toml"));
    }
}
