//! @ai:module:intent Chart image rendering for derived series
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartGenerator, ChartGeneratorTrait, RenderedChart
//! @ai:module:stateless true

use crate::config::{ChartConfig, ChartSize};
use crate::error::{Diagnostics, Warning};
use crate::model::SearchTarget;
use crate::visualization::{ChartKind, ChartSeries};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// @ai:intent A chart image that was written, with its path relative to the report directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    pub kind: ChartKind,
    pub relative_path: String,
}

/// @ai:intent Trait for chart generation
pub trait ChartGeneratorTrait: Send + Sync {
    /// @ai:intent Render every series; failures become warnings and are left out
    fn generate_all(
        &self,
        target: &SearchTarget,
        series: &[ChartSeries],
        output_dir: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Vec<RenderedChart>;
}

/// @ai:intent Renders chart series to PNG files
pub struct ChartGenerator {
    config: ChartConfig,
    visualizations_dir: PathBuf,
}

impl ChartGenerator {
    /// @ai:intent Create a chart generator writing into `<output_dir>/<visualizations_dir>`
    /// @ai:effects pure
    pub fn new(config: ChartConfig, visualizations_dir: PathBuf) -> Self {
        Self {
            config,
            visualizations_dir,
        }
    }

    /// @ai:intent Relative image path with forward slashes for use in HTML
    /// @ai:effects pure
    fn relative_path(&self, file_name: &str) -> String {
        let dir = self.visualizations_dir.to_string_lossy().replace('\\', "/");
        let dir = dir.trim_end_matches('/');
        if dir.is_empty() {
            file_name.to_string()
        } else {
            format!("{}/{}", dir, file_name)
        }
    }

    /// @ai:intent Generate platform presence bar chart
    /// @ai:effects fs:write
    fn generate_presence_chart(series: &ChartSeries, size: ChartSize, output_path: &Path) -> Result<()> {
        let root = BitMapBackend::new(output_path, (size.width, size.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let count = series.points.len() as u32;

        let mut chart = ChartBuilder::on(&root)
            .caption(&series.label, ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(120)
            .y_label_area_size(50)
            .build_cartesian_2d((0u32..count).into_segmented(), 0u64..2u64)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(series.points.len())
            .y_labels(2)
            .y_desc("Found")
            .x_desc("Platform")
            .x_label_style(
                ("sans-serif", 12)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .x_label_formatter(&|x| match x {
                SegmentValue::CenterOf(i) => series
                    .points
                    .get(*i as usize)
                    .map(|(name, _)| name.clone())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.mix(0.7).filled())
                .margin(2)
                .data(
                    series
                        .points
                        .iter()
                        .enumerate()
                        .map(|(i, (_, value))| (i as u32, *value)),
                ),
        )?;

        root.present()?;
        Ok(())
    }

    /// @ai:intent Generate posts-per-day line chart, x spaced by calendar days
    /// @ai:effects fs:write
    fn generate_activity_chart(series: &ChartSeries, size: ChartSize, output_path: &Path) -> Result<()> {
        let dates = series
            .points
            .iter()
            .map(|(date, count)| {
                NaiveDate::parse_from_str(date, "%Y-%m-%d")
                    .map(|d| (d, *count))
                    .with_context(|| format!("Invalid activity date: {}", date))
            })
            .collect::<Result<Vec<_>>>()?;

        let first = match dates.first() {
            Some((date, _)) => *date,
            None => return Ok(()),
        };
        let span = dates
            .last()
            .map(|(date, _)| (*date - first).num_days())
            .unwrap_or(0)
            .max(1);
        let max_count = series.max_value().max(1) as f64;

        let root = BitMapBackend::new(output_path, (size.width, size.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&series.label, ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0i64..span, 0f64..max_count * 1.1)?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Number of Tweets")
            .x_label_formatter(&|offset| {
                (first + chrono::Duration::days(*offset))
                    .format("%Y-%m-%d")
                    .to_string()
            })
            .draw()?;

        let points: Vec<(i64, f64)> = dates
            .iter()
            .map(|(date, count)| ((*date - first).num_days(), *count as f64))
            .collect();

        chart.draw_series(LineSeries::new(points.iter().copied(), &BLUE))?;
        chart.draw_series(
            points
                .iter()
                .map(|point| Circle::new(*point, 3, BLUE.filled())),
        )?;

        root.present()?;
        Ok(())
    }
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new(ChartConfig::default(), PathBuf::from("visualizations"))
    }
}

impl ChartGeneratorTrait for ChartGenerator {
    /// @ai:intent Generate all charts
    /// @ai:effects fs:write
    fn generate_all(
        &self,
        target: &SearchTarget,
        series: &[ChartSeries],
        output_dir: &Path,
        diagnostics: &mut Diagnostics,
    ) -> Vec<RenderedChart> {
        if !self.config.enabled || series.is_empty() {
            return Vec::new();
        }

        let charts_dir = output_dir.join(&self.visualizations_dir);
        if let Err(e) = std::fs::create_dir_all(&charts_dir) {
            diagnostics.record(Warning::Write {
                path: charts_dir,
                message: e.to_string(),
            });
            return Vec::new();
        }

        let mut generated = Vec::new();

        for s in series {
            let file_name = s.kind.file_name(target);
            let path = charts_dir.join(&file_name);

            let result = match s.kind {
                ChartKind::PlatformPresence => {
                    Self::generate_presence_chart(s, self.config.presence, &path)
                }
                ChartKind::TweetActivity => {
                    Self::generate_activity_chart(s, self.config.activity, &path)
                }
            };

            match result {
                Ok(()) if path.is_file() => {
                    tracing::info!("{} chart saved to {}", s.kind, path.display());
                    generated.push(RenderedChart {
                        kind: s.kind,
                        relative_path: self.relative_path(&file_name),
                    });
                }
                Ok(()) => tracing::debug!("No {} chart drawn", s.kind),
                Err(e) => diagnostics.record(Warning::Chart {
                    path,
                    message: format!("{:#}", e),
                }),
            }
        }

        generated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn alice() -> SearchTarget {
        SearchTarget::new("alice").unwrap()
    }

    fn presence_series() -> ChartSeries {
        ChartSeries {
            kind: ChartKind::PlatformPresence,
            label: "Platform Presence for alice".to_string(),
            points: vec![("github".to_string(), 1), ("reddit".to_string(), 0)],
        }
    }

    #[test]
    fn test_relative_path_uses_forward_slashes() {
        let generator = ChartGenerator::default();
        assert_eq!(
            generator.relative_path("alice_platform_presence.png"),
            "visualizations/alice_platform_presence.png"
        );
    }

    #[test]
    fn test_disabled_charts_render_nothing() {
        let temp = TempDir::new().unwrap();
        let config = ChartConfig {
            enabled: false,
            ..Default::default()
        };
        let generator = ChartGenerator::new(config, PathBuf::from("visualizations"));
        let mut diagnostics = Diagnostics::new();

        let charts =
            generator.generate_all(&alice(), &[presence_series()], temp.path(), &mut diagnostics);

        assert!(charts.is_empty());
        assert!(!temp.path().join("visualizations").exists());
    }

    #[test]
    fn test_rendered_charts_exist_or_are_reported() {
        let temp = TempDir::new().unwrap();
        let generator = ChartGenerator::default();
        let mut diagnostics = Diagnostics::new();
        let activity = ChartSeries {
            kind: ChartKind::TweetActivity,
            label: "Tweet Activity for alice".to_string(),
            points: vec![("2024-01-01".to_string(), 2), ("2024-01-05".to_string(), 1)],
        };

        let charts = generator.generate_all(
            &alice(),
            &[presence_series(), activity],
            temp.path(),
            &mut diagnostics,
        );

        // Font availability varies between machines, so each chart is either
        // written or surfaced as a warning.
        assert_eq!(charts.len() + diagnostics.warnings().len(), 2);
        for chart in &charts {
            assert!(temp.path().join(&chart.relative_path).is_file());
        }
    }

    #[test]
    fn test_invalid_activity_date_is_a_warning() {
        let temp = TempDir::new().unwrap();
        let generator = ChartGenerator::default();
        let mut diagnostics = Diagnostics::new();
        let broken = ChartSeries {
            kind: ChartKind::TweetActivity,
            label: "Tweet Activity for alice".to_string(),
            points: vec![("someday".to_string(), 1)],
        };

        let charts = generator.generate_all(&alice(), &[broken], temp.path(), &mut diagnostics);

        assert!(charts.is_empty());
        assert!(matches!(diagnostics.warnings()[0], Warning::Chart { .. }));
    }
}
