//! @ai:module:intent JSON report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter
//! @ai:module:stateless true

use crate::model::Report;
use anyhow::{Context, Result};
use std::path::Path;

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Generate JSON report from the canonical report
    fn generate(&self, report: &Report, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates the persisted JSON form of a report
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Pretty-printed JSON with keys username, timestamp, platforms
    /// @ai:effects pure
    pub fn render(&self, report: &Report) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:intent Generate JSON report to file
    /// @ai:effects fs:write
    fn generate(&self, report: &Report, output_path: &Path) -> Result<()> {
        let json = self.render(report)?;
        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }
}
