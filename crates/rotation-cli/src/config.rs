//! Run configuration: TOML file, then command-line overrides.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rotation_model::SourceKind;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "rotation.toml";

/// File name patterns per source, `None` keeping the built-in default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatternConfig {
    pub stock: Option<String>,
    pub weekly_sales: Option<String>,
    pub recap: Option<String>,
    pub secondary_depot: Option<String>,
}

impl PatternConfig {
    pub fn get(&self, kind: SourceKind) -> Option<&str> {
        match kind {
            SourceKind::Stock => self.stock.as_deref(),
            SourceKind::WeeklySales => self.weekly_sales.as_deref(),
            SourceKind::Recap => self.recap.as_deref(),
            SourceKind::SecondaryDepot => self.secondary_depot.as_deref(),
        }
    }

    /// Effective pattern of every source kind.
    pub fn resolved(&self) -> BTreeMap<SourceKind, String> {
        SourceKind::ALL
            .into_iter()
            .map(|kind| {
                let pattern = self.get(kind).unwrap_or_else(|| kind.default_pattern());
                (kind, pattern.to_string())
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Folder holding the extracts.
    pub data_dir: PathBuf,
    /// Folder receiving the report workbook.
    pub output_dir: PathBuf,
    pub banner: String,
    /// Report file name prefix.
    pub report_prefix: String,
    pub currency: String,
    /// Articles in the top sellers tables.
    pub top_n: usize,
    pub patterns: PatternConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            output_dir: PathBuf::from("Dashboard"),
            banner: "ELECTROPLANET".to_string(),
            report_prefix: "EP".to_string(),
            currency: "DH".to_string(),
            top_n: 10,
            patterns: PatternConfig::default(),
        }
    }
}

/// Values given on the command line; they win over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub banner: Option<String>,
}

impl RunConfig {
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(dir) = &overrides.data_dir {
            self.data_dir = dir.clone();
        }
        if let Some(dir) = &overrides.output_dir {
            self.output_dir = dir.clone();
        }
        if let Some(banner) = &overrides.banner {
            self.banner = banner.clone();
        }
        self
    }

    /// Rejects values no run can work with.
    pub fn validate(&self) -> Result<()> {
        if self.banner.trim().is_empty() {
            bail!("banner must not be empty");
        }
        if self.top_n == 0 {
            bail!("top_n must be at least 1");
        }
        Ok(())
    }
}

pub fn parse_config(contents: &str) -> Result<RunConfig> {
    let config: RunConfig = toml::from_str(contents).context("parse configuration")?;
    config.validate()?;
    Ok(config)
}

/// Loads the configuration file.
///
/// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
/// read when present and defaults are used otherwise.
pub fn load_config(path: Option<&Path>) -> Result<RunConfig> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    if !path.is_file() {
        if explicit {
            bail!("configuration file not found: {}", path.display());
        }
        info!(file = %path.display(), "no configuration file; using defaults");
        return Ok(RunConfig::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("read configuration {}", path.display()))?;
    let config = parse_config(&contents)
        .with_context(|| format!("invalid configuration {}", path.display()))?;
    info!(file = %path.display(), banner = %config.banner, "configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), RunConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = parse_config(
            r#"
            banner = "ELECTROPLANET"
            top_n = 5

            [patterns]
            recap = "*Recap*.xls*"
            "#,
        )
        .unwrap();
        assert_eq!(config.top_n, 5);
        assert_eq!(config.currency, "DH");
        let patterns = config.patterns.resolved();
        assert_eq!(patterns[&SourceKind::Recap], "*Recap*.xls*");
        assert_eq!(patterns[&SourceKind::Stock], "ExcelStock-*.xlsx");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(parse_config("bannner = \"EP\"").is_err());
        assert!(parse_config("top_n = \"ten\"").is_err());
        assert!(parse_config("top_n = 0").is_err());
    }

    #[test]
    fn overrides_win() {
        let overrides = ConfigOverrides {
            banner: Some("MARJANE".to_string()),
            ..ConfigOverrides::default()
        };
        let config = RunConfig::default().with_overrides(&overrides);
        assert_eq!(config.banner, "MARJANE");
        assert_eq!(config.report_prefix, "EP");
    }
}
