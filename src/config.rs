//! @ai:module:intent Configuration structs for the report pipeline
//! @ai:module:layer infrastructure
//! @ai:module:public_api OsintConfig, PathConfig, ChartConfig, ChartSize, SourceFilter
//! @ai:module:stateless true

use crate::sources::ToolKind;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent Main configuration for report generation
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OsintConfig {
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub charts: ChartConfig,
    #[serde(default)]
    pub sources: SourceFilter,
}

/// @ai:intent Where run directories and chart images live
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    /// Relative to the working directory
    #[serde(default = "default_visualizations_dir")]
    pub visualizations_dir: PathBuf,
}

/// @ai:intent Chart rendering settings
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_presence_size")]
    pub presence: ChartSize,
    #[serde(default = "default_activity_size")]
    pub activity: ChartSize,
}

/// @ai:intent Pixel dimensions of a chart image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
}

/// @ai:intent Restricts which tool outputs are aggregated
/// @ai:effects pure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceFilter {
    pub tools: Option<Vec<String>>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            visualizations_dir: default_visualizations_dir(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            presence: default_presence_size(),
            activity: default_activity_size(),
        }
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_visualizations_dir() -> PathBuf {
    PathBuf::from("visualizations")
}

fn default_true() -> bool {
    true
}

fn default_presence_size() -> ChartSize {
    ChartSize {
        width: 1200,
        height: 800,
    }
}

fn default_activity_size() -> ChartSize {
    ChartSize {
        width: 1200,
        height: 600,
    }
}

impl OsintConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// @ai:intent Check settings that parse but cannot be honored
    /// @ai:effects pure
    pub fn validate(&self) -> anyhow::Result<()> {
        let dir = &self.paths.visualizations_dir;
        // Chart images are linked from the HTML report by relative path.
        if dir.is_absolute() || dir.has_root() {
            anyhow::bail!(
                "paths.visualizations_dir must be relative to the working directory, got {}",
                dir.display()
            );
        }
        Ok(())
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl SourceFilter {
    /// @ai:intent Check if a tool's output should be aggregated
    /// @ai:effects pure
    pub fn matches(&self, tool: ToolKind) -> bool {
        self.tools
            .as_ref()
            .map(|t| t.iter().any(|name| name == tool.as_str()))
            .unwrap_or(true)
    }

    /// @ai:intent Tools selected by this filter, in report order
    /// @ai:effects pure
    pub fn selected(&self) -> Vec<ToolKind> {
        ToolKind::ALL
            .into_iter()
            .filter(|tool| self.matches(*tool))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_filter_matches_all_when_empty() {
        let filter = SourceFilter::default();
        assert_eq!(filter.selected(), ToolKind::ALL.to_vec());
    }

    #[test]
    fn test_filter_matches_specific_tools() {
        let filter = SourceFilter {
            tools: Some(vec!["sherlock".to_string(), "twitter".to_string()]),
        };
        assert!(filter.matches(ToolKind::PlatformPresence));
        assert!(filter.matches(ToolKind::SocialTimeline));
        assert!(!filter.matches(ToolKind::ProfileMetadata));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: OsintConfig = toml::from_str(
            r#"
[charts]
enabled = false

[charts.activity]
width = 640
height = 480
"#,
        )
        .unwrap();

        assert!(!config.charts.enabled);
        assert_eq!(config.charts.activity, ChartSize { width: 640, height: 480 });
        assert_eq!(config.charts.presence, default_presence_size());
        assert_eq!(config.paths.results_dir, PathBuf::from("results"));
        assert!(config.sources.tools.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("osint.toml");

        let mut config = OsintConfig::default();
        config.paths.results_dir = PathBuf::from("out");
        config.sources.tools = Some(vec!["sherlock".to_string()]);
        config.save(&path).unwrap();

        let loaded = OsintConfig::load(&path).unwrap();
        assert_eq!(loaded.paths.results_dir, PathBuf::from("out"));
        assert_eq!(loaded.sources.selected(), vec![ToolKind::PlatformPresence]);
    }

    #[test]
    fn test_absolute_visualizations_dir_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("osint.toml");
        std::fs::write(&path, "[paths]\nvisualizations_dir = \"/var/charts\"\n").unwrap();

        let error = OsintConfig::load(&path).unwrap_err();

        assert!(format!("{:#}", error).contains("visualizations_dir must be relative"));
    }

    #[test]
    fn test_nested_relative_visualizations_dir_accepted() {
        let mut config = OsintConfig::default();
        config.paths.visualizations_dir = PathBuf::from("assets/charts");
        assert!(config.validate().is_ok());
    }
}
