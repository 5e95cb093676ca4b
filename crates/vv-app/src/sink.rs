//! Rendering sink boundary.

use vv_pivot::{Grid, ParameterSeries};

use crate::error::AppResult;

/// Consumer of prepared view data. Sinks own all layout and drawing.
pub trait RenderSink {
    /// Grid view: ordered columns and rows, never empty.
    fn grid(&mut self, grid: &Grid) -> AppResult<()>;

    /// Series view: name-sorted series, never empty, and the padding
    /// fraction to apply to each series' domain.
    fn series(&mut self, series: &[ParameterSeries], domain_padding: f64) -> AppResult<()>;

    /// Nothing left to show after filtering.
    fn no_data(&mut self, message: &str) -> AppResult<()>;
}

impl<S: RenderSink + ?Sized> RenderSink for &mut S {
    fn grid(&mut self, grid: &Grid) -> AppResult<()> {
        (**self).grid(grid)
    }

    fn series(&mut self, series: &[ParameterSeries], domain_padding: f64) -> AppResult<()> {
        (**self).series(series, domain_padding)
    }

    fn no_data(&mut self, message: &str) -> AppResult<()> {
        (**self).no_data(message)
    }
}
