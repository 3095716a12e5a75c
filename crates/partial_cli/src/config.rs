//! Partial configuration file handling

use anyhow::{Context, Result};
use partial_app::HeadlessRunConfig;
use partial_sheet::SheetConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "partial.toml";

/// Top-level configuration (partial.toml)
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct PartialConfig {
    #[serde(default)]
    pub sheet: SheetConfig,
    #[serde(default)]
    pub headless: HeadlessRunConfig,
}

impl PartialConfig {
    /// Load from a file, or from `partial.toml` inside a directory
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found at {}. Run `partial init` to create one.",
                CONFIG_FILE,
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Explicit path if given, else `./partial.toml` if present, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => {
                let local = PathBuf::from(CONFIG_FILE);
                if local.exists() {
                    Self::load_from_path(&local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: PartialConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.sheet.validate()?;
        self.headless.validate()
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = PartialConfig::from_toml(
            r#"
            [sheet]
            mid_percent = 50.0
            "#,
        )
        .unwrap();

        assert_eq!(config.sheet.mid_percent, Some(50.0));
        assert_eq!(config.sheet.max_percent, 85.0);
        assert_eq!(config.headless, HeadlessRunConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = PartialConfig::from_toml(
            r#"
            [sheet]
            min_percent = 90.0
            max_percent = 10.0
            "#,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("min_percent"));

        assert!(PartialConfig::from_toml("[headless]\ntick_ms = 0\n").is_err());
    }

    #[test]
    fn test_default_config_survives_toml() {
        let config = PartialConfig::default();
        let parsed = PartialConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_from_directory() {
        let dir = std::env::temp_dir().join(format!("partial-cli-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        assert!(PartialConfig::load_from_path(&dir).is_err());

        fs::write(dir.join(CONFIG_FILE), "[headless]\nheight = 1024.0\n").unwrap();
        let config = PartialConfig::load_from_path(&dir).unwrap();
        assert_eq!(config.headless.height, 1024.0);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_bundled_scenario_config() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../partial_app/scenarios")
            .join(CONFIG_FILE);
        let config = PartialConfig::load_from_path(&path).unwrap();

        let checkpoints = config.sheet.checkpoints(config.headless.height).unwrap();
        let offsets: Vec<f32> = checkpoints.iter().map(|c| c.offset).collect();
        assert_eq!(offsets, vec![40.0, 400.0, 680.0]);
    }
}
