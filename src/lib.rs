//! @ai:module:intent Social media OSINT report aggregation library
//! @ai:module:layer application
//! @ai:module:public_api config, error, model, pipeline, report, sources, visualization

pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod sources;
pub mod visualization;

pub use config::OsintConfig;
pub use error::{Diagnostics, Error, Warning};
pub use model::{Report, ReportBuilder, SearchTarget, ToolResult};
pub use pipeline::{Pipeline, PipelineOutcome};
pub use report::ReportGenerator;
pub use sources::{ResultReader, RunLocator, ToolKind};
pub use visualization::{ChartKind, ChartSeries, SeriesDeriver};
