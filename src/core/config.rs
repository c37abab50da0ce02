//! Application configuration management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::export::ExportFormat;
use super::presentation::DEFAULT_SLIDE_TITLE;

/// Maximum number of remembered templates
const MAX_RECENT_TEMPLATES: usize = 10;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Editor settings
    pub editor: EditorConfig,
    /// Export settings
    pub export: ExportConfig,
    /// UI settings
    pub ui: UiConfig,
    /// Recently used export templates, newest first
    pub recent_templates: Vec<PathBuf>,
}

/// Editor-specific settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Font size in pixels
    pub font_size: f32,
    /// Title given to new slides
    pub default_slide_title: String,
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Format preselected on the export screen
    pub default_format: ExportFormat,
    /// Milliseconds between progress steps
    pub tick_interval_ms: u64,
    /// Percent added per step
    pub progress_step: u8,
}

/// UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Theme (light/dark)
    pub theme: String,
    /// Sidebar width
    pub sidebar_width: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            default_slide_title: DEFAULT_SLIDE_TITLE.to_string(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: ExportFormat::Pptx,
            tick_interval_ms: 200,
            progress_step: 10,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            sidebar_width: 320.0,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "deckwright", "Deckwright")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific file, falling back to defaults if it's missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Add a template to recent templates
    pub fn add_recent_template(&mut self, path: PathBuf) {
        self.recent_templates.retain(|p| p != &path);
        self.recent_templates.insert(0, path);
        self.recent_templates.truncate(MAX_RECENT_TEMPLATES);
    }

    /// Whether the light theme is selected
    pub fn is_light_theme(&self) -> bool {
        self.ui.theme.eq_ignore_ascii_case("light")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join("deckwright-config-tests")
            .join(name)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = AppConfig::load_from(&temp_path("missing/config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.editor.default_slide_title, DEFAULT_SLIDE_TITLE);
        assert_eq!(config.export.tick_interval_ms, 200);
        assert_eq!(config.export.progress_step, 10);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roundtrip/config.json");
        let mut config = AppConfig::default();
        config.export.default_format = ExportFormat::Pdf;
        config.ui.theme = "light".to_string();
        config.add_recent_template(PathBuf::from("/tmp/brand.pptx"));

        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(loaded.is_light_theme());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_path("partial/config.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{ "export": { "default_format": "pdf" } }"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.export.default_format, ExportFormat::Pdf);
        assert_eq!(config.export.tick_interval_ms, 200);
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let path = temp_path("invalid/config.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_recent_templates() {
        let mut config = AppConfig::default();
        for i in 0..12 {
            config.add_recent_template(PathBuf::from(format!("t{}.pptx", i)));
        }
        assert_eq!(config.recent_templates.len(), MAX_RECENT_TEMPLATES);
        assert_eq!(config.recent_templates[0], PathBuf::from("t11.pptx"));

        config.add_recent_template(PathBuf::from("t5.pptx"));
        assert_eq!(config.recent_templates[0], PathBuf::from("t5.pptx"));
        assert_eq!(
            config.recent_templates.iter().filter(|p| p.ends_with("t5.pptx")).count(),
            1
        );
    }
}
