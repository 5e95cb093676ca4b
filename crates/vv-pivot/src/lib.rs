//! vv-pivot: reshapes a flat reading list for display.
//!
//! - grid: rows keyed by (parameter, name), columns keyed by period label
//! - series: one time series per parameter, with chart domains
//!
//! Both are pure functions returning plain data; drawing belongs to sinks.

pub mod grid;
pub mod label;
pub mod series;

pub use grid::{Cell, Grid, GridRow, GridSection, build_grid};
pub use label::clean_label;
pub use series::{
    CategoryCharts, DEFAULT_DOMAIN_PADDING, Domain, ParameterSeries, ParseWarning, PointMarker,
    SeriesPoint, build_series, build_series_with_warnings, group_by_category,
};
