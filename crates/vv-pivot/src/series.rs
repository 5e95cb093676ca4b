//! Series pivot: one ordered time series per parameter, for charting.

use core::fmt;
use std::collections::HashMap;

use vv_core::Reading;

use crate::label::clean_label;

/// Fraction of the value span added on each side of a chart's domain.
pub const DEFAULT_DOMAIN_PADDING: f64 = 0.1;

/// Closed numeric interval used as a chart's y-axis domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Widen by `fraction` of the span on both sides.
    pub fn padded(&self, fraction: f64) -> Domain {
        let pad = self.span() * fraction;
        Domain {
            min: self.min - pad,
            max: self.max + pad,
        }
    }
}

/// Marker colouring for a plotted point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointMarker {
    High,
    Low,
    Normal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// Period label with line breaks folded to spaces.
    pub label: String,
    pub value: f64,
    pub reading: Reading,
}

impl SeriesPoint {
    pub fn marker(&self) -> PointMarker {
        if self.reading.is_high_limit {
            PointMarker::High
        } else if self.reading.is_low_limit {
            PointMarker::Low
        } else {
            PointMarker::Normal
        }
    }

    /// Hover text, one entry per line.
    pub fn tooltip(&self, series: &ParameterSeries) -> Vec<String> {
        let mut lines = vec![
            series.name.clone(),
            format!("Time: {}", self.label),
            format!("Value: {}", self.value),
            format!("Range: {} - {}", series.min_range, series.max_range),
        ];
        if !self.reading.comment.is_empty() {
            lines.push(format!("Comment: {}", self.reading.comment));
        }
        if self.reading.is_high_limit {
            lines.push("Alert: High Limit".to_string());
        }
        if self.reading.is_low_limit {
            lines.push("Alert: Low Limit".to_string());
        }
        lines
    }
}

/// Time series for one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSeries {
    pub parameter_id: i64,
    pub category: String,
    pub name: String,
    pub min_range: f64,
    pub max_range: f64,
    /// Input order; upstream is expected to deliver readings chronologically.
    pub points: Vec<SeriesPoint>,
}

impl ParameterSeries {
    fn seed(reading: &Reading) -> Self {
        Self {
            parameter_id: reading.parameter_id,
            category: reading.category.clone(),
            name: reading.name.clone(),
            min_range: reading.min_range,
            max_range: reading.max_range,
            points: Vec::new(),
        }
    }

    /// Normal range, drawn as a reference band.
    pub fn reference_band(&self) -> (f64, f64) {
        (self.min_range, self.max_range)
    }

    /// Union of the normal range and the observed values.
    pub fn domain(&self) -> Domain {
        self.points.iter().fold(
            Domain {
                min: self.min_range,
                max: self.max_range,
            },
            |d, p| Domain {
                min: d.min.min(p.value),
                max: d.max.max(p.value),
            },
        )
    }

    pub fn padded_domain(&self, fraction: f64) -> Domain {
        self.domain().padded(fraction)
    }
}

/// A value that could not be plotted. The point is dropped; rendering goes on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub parameter_id: i64,
    pub name: String,
    pub label: String,
    pub raw_value: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "non-numeric value {:?} for {} (parameter {}) at {}",
            self.raw_value, self.name, self.parameter_id, self.label
        )
    }
}

/// Charts of one category, in dashboard order.
#[derive(Debug, Clone)]
pub struct CategoryCharts<'a> {
    pub category: &'a str,
    pub series: Vec<&'a ParameterSeries>,
}

/// Pivot readings into per-parameter series sorted by name.
pub fn build_series(readings: &[Reading]) -> Vec<ParameterSeries> {
    build_series_with_warnings(readings).0
}

/// Like [`build_series`], also returning the values that were skipped.
pub fn build_series_with_warnings(
    readings: &[Reading],
) -> (Vec<ParameterSeries>, Vec<ParseWarning>) {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut series: Vec<ParameterSeries> = Vec::new();
    let mut warnings = Vec::new();

    for reading in readings {
        let idx = *index.entry(reading.parameter_id).or_insert_with(|| {
            series.push(ParameterSeries::seed(reading));
            series.len() - 1
        });

        if !reading.has_value() {
            continue;
        }

        let label = clean_label(&reading.column_display);
        match parse_value(&reading.value) {
            Some(value) => series[idx].points.push(SeriesPoint {
                label,
                value,
                reading: reading.clone(),
            }),
            None => {
                let warning = ParseWarning {
                    parameter_id: reading.parameter_id,
                    name: reading.name.clone(),
                    label,
                    raw_value: reading.value.clone(),
                };
                tracing::warn!(%warning, "skipping unplottable value");
                warnings.push(warning);
            }
        }
    }

    series.retain(|s| !s.points.is_empty());
    series.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::debug!(
        series = series.len(),
        skipped = warnings.len(),
        "built series"
    );
    (series, warnings)
}

fn parse_value(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Group name-sorted series by category, categories in first-seen order.
pub fn group_by_category(series: &[ParameterSeries]) -> Vec<CategoryCharts<'_>> {
    let mut groups: Vec<CategoryCharts<'_>> = Vec::new();
    for s in series {
        match groups.iter_mut().find(|g| g.category == s.category) {
            Some(group) => group.series.push(s),
            None => groups.push(CategoryCharts {
                category: &s.category,
                series: vec![s],
            }),
        }
    }
    groups
}
