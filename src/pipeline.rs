//! @ai:module:intent Straight-line report pipeline: read, build, derive, render
//! @ai:module:layer application
//! @ai:module:public_api Pipeline, PipelineOutcome

use crate::config::{OsintConfig, SourceFilter};
use crate::error::{Diagnostics, Warning};
use crate::model::{Report, ReportBuilder, ReportBuilderTrait, SearchTarget};
use crate::report::ReportGenerator;
use crate::sources::{ResultReader, ResultReaderTrait};
use crate::visualization::{ChartSeries, SeriesDeriver, SeriesDeriverTrait};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// @ai:intent Everything one run produced
#[derive(Debug)]
pub struct PipelineOutcome {
    pub report: Report,
    pub series: Vec<ChartSeries>,
    /// Artifacts actually written, charts first
    pub written: Vec<PathBuf>,
    pub warnings: Vec<Warning>,
}

/// @ai:intent Runs the aggregation pipeline for one target and working directory
pub struct Pipeline {
    reader: ResultReader,
    builder: ReportBuilder,
    deriver: SeriesDeriver,
    generator: ReportGenerator,
    filter: SourceFilter,
}

impl Pipeline {
    /// @ai:intent Create a pipeline from configuration
    /// @ai:effects pure
    pub fn new(config: &OsintConfig) -> Self {
        Self {
            reader: ResultReader::new(),
            builder: ReportBuilder::new(),
            deriver: SeriesDeriver::new(),
            generator: ReportGenerator::new(config),
            filter: config.sources.clone(),
        }
    }

    /// @ai:intent Run the pipeline stamped with the current time
    /// @ai:effects fs:read, fs:write
    pub fn run(&self, target: &SearchTarget, dir: &Path) -> PipelineOutcome {
        self.run_at(target, dir, Utc::now())
    }

    /// @ai:intent Run the pipeline; never fails, problems end up in warnings
    /// @ai:effects fs:read, fs:write
    pub fn run_at(
        &self,
        target: &SearchTarget,
        dir: &Path,
        generated_at: DateTime<Utc>,
    ) -> PipelineOutcome {
        tracing::info!("Generating comprehensive report for {} from {}", target, dir.display());

        let mut diagnostics = Diagnostics::new();

        let outputs = self
            .filter
            .selected()
            .into_iter()
            .filter_map(|tool| self.reader.read(dir, target, tool, &mut diagnostics))
            .collect();

        let report = self
            .builder
            .build(target, generated_at, outputs, &mut diagnostics);
        let series = self.deriver.derive(&report);
        let written = self
            .generator
            .generate_all(&report, &series, dir, &mut diagnostics);

        PipelineOutcome {
            report,
            series,
            written,
            warnings: diagnostics.into_warnings(),
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&OsintConfig::default())
    }
}
