//! @ai:module:intent Report rendering: chart images, JSON and HTML artifacts
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, JsonReporter, HtmlReporter, ChartGenerator

pub mod charts;
pub mod html_report;
pub mod json_report;

pub use charts::{ChartGenerator, ChartGeneratorTrait, RenderedChart};
pub use html_report::{HtmlReporter, HtmlReporterTrait, RECENT_POSTS_LIMIT};
pub use json_report::{JsonReporter, JsonReporterTrait};

use crate::config::OsintConfig;
use crate::error::{Diagnostics, Warning};
use crate::model::{Report, SearchTarget};
use crate::visualization::ChartSeries;
use std::path::{Path, PathBuf};

/// @ai:intent Path of the persisted JSON report
/// @ai:effects pure
pub fn json_report_path(output_dir: &Path, target: &SearchTarget) -> PathBuf {
    output_dir.join(format!("{}_comprehensive_report.json", target.as_str()))
}

/// @ai:intent Path of the HTML report
/// @ai:effects pure
pub fn html_report_path(output_dir: &Path, target: &SearchTarget) -> PathBuf {
    output_dir.join(format!("{}_report.html", target.as_str()))
}

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    json: JsonReporter,
    html: HtmlReporter,
    charts: ChartGenerator,
}

impl ReportGenerator {
    /// @ai:intent Create a report generator from configuration
    /// @ai:effects pure
    pub fn new(config: &OsintConfig) -> Self {
        Self {
            json: JsonReporter::new(),
            html: HtmlReporter::new(),
            charts: ChartGenerator::new(
                config.charts.clone(),
                config.paths.visualizations_dir.clone(),
            ),
        }
    }

    /// @ai:intent Write charts, JSON and HTML; each failure is a warning, never an abort
    /// @ai:effects fs:write
    pub fn generate_all(
        &self,
        report: &Report,
        series: &[ChartSeries],
        output_dir: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Vec<PathBuf> {
        let mut written = Vec::new();

        if let Err(e) = std::fs::create_dir_all(output_dir) {
            diagnostics.record(Warning::Write {
                path: output_dir.to_path_buf(),
                message: e.to_string(),
            });
        }

        // Charts first so the HTML only references images that exist.
        let charts = self
            .charts
            .generate_all(&report.target, series, output_dir, diagnostics);
        written.extend(charts.iter().map(|c| output_dir.join(&c.relative_path)));

        let json_path = json_report_path(output_dir, &report.target);
        match self.json.generate(report, &json_path) {
            Ok(()) => {
                tracing::info!("Comprehensive report saved to {}", json_path.display());
                written.push(json_path);
            }
            Err(e) => diagnostics.record(Warning::Write {
                path: json_path,
                message: format!("{:#}", e),
            }),
        }

        let html_path = html_report_path(output_dir, &report.target);
        match self.html.generate(report, &charts, &html_path) {
            Ok(()) => {
                tracing::info!("HTML report saved to {}", html_path.display());
                written.push(html_path);
            }
            Err(e) => diagnostics.record(Warning::Write {
                path: html_path,
                message: format!("{:#}", e),
            }),
        }

        written
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(&OsintConfig::default())
    }
}
