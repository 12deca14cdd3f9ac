//! @ai:module:intent Chart data derived from reports
//! @ai:module:layer application
//! @ai:module:public_api ChartKind, ChartSeries, SeriesDeriver

pub mod deriver;
pub mod series;

pub use deriver::{SeriesDeriver, SeriesDeriverTrait};
pub use series::{ChartKind, ChartSeries};
