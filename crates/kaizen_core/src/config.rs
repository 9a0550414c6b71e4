use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

// ---------------------------------------------------------------------------
// SlideStyle
// ---------------------------------------------------------------------------

/// Visual theme picked when exporting a slide deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideStyle {
    Minimalist,
    #[default]
    Professional,
    Colorful,
}

impl SlideStyle {
    pub const ALL: [SlideStyle; 3] = [Self::Minimalist, Self::Professional, Self::Colorful];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimalist => "minimalist",
            Self::Professional => "professional",
            Self::Colorful => "colorful",
        }
    }
}

// ---------------------------------------------------------------------------
// ExportConfig
// ---------------------------------------------------------------------------

/// Engine configuration stored at `~/.kaizen/config.json`.
///
/// The host application loads this once and hands it to the exporter; the
/// engine never writes it back on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Where delivered files land. `None` means `~/.kaizen/exports`.
    pub output_dir: Option<PathBuf>,
    /// Hard deadline for a single remote photo fetch.
    pub fetch_timeout_secs: u64,
    /// Prefix prepended to photo URLs, e.g. a CORS relay.
    pub image_proxy: Option<String>,
    pub user_agent: String,
    pub log_level: String,
    pub default_slide_style: SlideStyle,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            fetch_timeout_secs: 15,
            image_proxy: None,
            user_agent: "Kaizen-Export/0.1".into(),
            log_level: "info".into(),
            default_slide_style: SlideStyle::default(),
        }
    }
}

impl ExportConfig {
    /// Returns the base config directory: `~/.kaizen/`
    pub fn base_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".kaizen"))
    }

    /// Returns the config file path: `~/.kaizen/config.json`
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.json"))
    }

    /// Returns the logs directory: `~/.kaizen/logs/`
    pub fn logs_dir() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("logs"))
    }

    /// Returns the directory exported files are delivered to.
    pub fn exports_dir(&self) -> Result<PathBuf> {
        match &self.output_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::base_dir()?.join("exports")),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }

    /// Loads config from `~/.kaizen/config.json`, creating a default file if
    /// missing.
    pub fn load() -> Result<Self> {
        let base = Self::base_dir()?;
        std::fs::create_dir_all(&base)
            .with_context(|| format!("Failed to create directory: {}", base.display()))?;
        Self::load_from_path(&Self::config_path()?)
    }

    /// Load config from a specific file path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Self =
                serde_json::from_str(&content).with_context(|| "Failed to parse config.json")?;
            info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to_path(path)?;
            info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Save config to a specific file path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let cfg = ExportConfig::default();
        assert_eq!(cfg.fetch_timeout_secs, 15);
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(15));
        assert!(cfg.image_proxy.is_none());
        assert!(cfg.output_dir.is_none());
        assert_eq!(cfg.default_slide_style, SlideStyle::Professional);
    }

    #[test]
    fn test_fetch_timeout_never_zero() {
        let cfg = ExportConfig {
            fetch_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(cfg.fetch_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_load_from_missing_path_creates_default() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        let cfg = ExportConfig::load_from_path(&path).unwrap();
        assert_eq!(cfg, ExportConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        let cfg = ExportConfig {
            output_dir: Some(tmp.path().join("out")),
            fetch_timeout_secs: 3,
            image_proxy: Some("https://relay.example/".into()),
            default_slide_style: SlideStyle::Colorful,
            ..Default::default()
        };
        cfg.save_to_path(&path).unwrap();
        let loaded = ExportConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.exports_dir().unwrap(), tmp.path().join("out"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{ "fetch_timeout_secs": 5 }"#).unwrap();
        let cfg = ExportConfig::load_from_path(&path).unwrap();
        assert_eq!(cfg.fetch_timeout_secs, 5);
        assert_eq!(cfg.user_agent, "Kaizen-Export/0.1");
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        let err = ExportConfig::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("config.json"));
    }

    #[test]
    fn test_slide_style_serde_lowercase() {
        let json = serde_json::to_string(&SlideStyle::Professional).unwrap();
        assert_eq!(json, "\"professional\"");
    }
}
