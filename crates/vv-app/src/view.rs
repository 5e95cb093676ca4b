//! View controller: filter → pivot → sink on every change.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use vv_core::{
    AlertStatus, CategoryFilter, FilterChange, FilterSelection, FilterState, Reading,
    category_options,
};
use vv_pivot::{DEFAULT_DOMAIN_PADDING, build_grid, build_series};

use crate::config::{DEFAULT_NO_DATA_MESSAGE, DashboardConfig};
use crate::error::{AppError, AppResult};
use crate::sink::RenderSink;

/// Which presentation is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    #[serde(alias = "dashboard", alias = "chart")]
    Series,
}

impl FromStr for ViewMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "series" | "dashboard" | "chart" => Ok(ViewMode::Series),
            other => Err(AppError::InvalidInput(format!("Unknown view: {}", other))),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ViewMode::Grid => "grid",
            ViewMode::Series => "series",
        })
    }
}

/// Presentation settings handed through to the sink.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub domain_padding: f64,
    pub no_data_message: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            domain_padding: DEFAULT_DOMAIN_PADDING,
            no_data_message: DEFAULT_NO_DATA_MESSAGE.to_string(),
        }
    }
}

/// What one render pass produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub view: ViewMode,
    /// Readings left after filtering.
    pub readings: usize,
    /// Grid rows or chart series handed to the sink; zero means "no data".
    pub items: usize,
}

impl RenderSummary {
    pub fn is_empty(&self) -> bool {
        self.items == 0
    }
}

/// Owns the loaded readings, the filter selection and the active view, and
/// re-renders into its sink whenever one of them changes.
pub struct ViewController<S> {
    readings: Vec<Reading>,
    categories: Vec<String>,
    filter: FilterState,
    active_view: ViewMode,
    options: RenderOptions,
    sink: S,
    renders: usize,
}

impl<S: RenderSink> ViewController<S> {
    /// Controller with the grid view and an unrestricted filter.
    pub fn new(readings: Vec<Reading>, sink: S) -> Self {
        let categories = category_options(&readings);
        Self {
            readings,
            categories,
            filter: FilterState::default(),
            active_view: ViewMode::default(),
            options: RenderOptions::default(),
            sink,
            renders: 0,
        }
    }

    /// Controller starting from the view, filter and options in `config`.
    pub fn with_config(
        readings: Vec<Reading>,
        config: &DashboardConfig,
        sink: S,
    ) -> AppResult<Self> {
        config.validate()?;
        let mut controller = Self::new(readings, sink);
        controller.filter = FilterState::new(config.selection()?);
        controller.active_view = config.initial_view;
        controller.options = RenderOptions {
            domain_padding: config.domain_padding,
            no_data_message: config.no_data_message.clone(),
        };
        Ok(controller)
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Categories of the full dataset, fixed at load time.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn selection(&self) -> &FilterSelection {
        self.filter.selection()
    }

    pub fn active_view(&self) -> ViewMode {
        self.active_view
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn render_count(&self) -> usize {
        self.renders
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Filter, pivot for the active view, and hand the result to the sink.
    pub fn render(&mut self) -> AppResult<RenderSummary> {
        self.renders += 1;
        let filtered = self.filter.apply(&self.readings);

        let items = if filtered.is_empty() {
            0
        } else {
            match self.active_view {
                ViewMode::Grid => {
                    let grid = build_grid(&filtered);
                    if !grid.is_empty() {
                        self.sink.grid(&grid)?;
                    }
                    grid.rows.len()
                }
                ViewMode::Series => {
                    let series = build_series(&filtered);
                    if !series.is_empty() {
                        self.sink.series(&series, self.options.domain_padding)?;
                    }
                    series.len()
                }
            }
        };

        if items == 0 {
            self.sink.no_data(&self.options.no_data_message)?;
        }

        tracing::debug!(
            view = %self.active_view,
            readings = filtered.len(),
            items,
            "rendered"
        );
        Ok(RenderSummary {
            view: self.active_view,
            readings: filtered.len(),
            items,
        })
    }

    /// Switch view and render immediately.
    pub fn set_view(&mut self, view: ViewMode) -> AppResult<RenderSummary> {
        self.active_view = view;
        self.render()
    }

    pub fn set_category(&mut self, category: CategoryFilter) -> AppResult<RenderSummary> {
        let change = self.filter.set_category(category);
        self.on_filter_change(change)
    }

    pub fn set_alert_status(&mut self, alert_status: AlertStatus) -> AppResult<RenderSummary> {
        let change = self.filter.set_alert_status(alert_status);
        self.on_filter_change(change)
    }

    fn on_filter_change(&mut self, change: FilterChange) -> AppResult<RenderSummary> {
        tracing::info!(?change, "filter changed");
        self.render()
    }
}
