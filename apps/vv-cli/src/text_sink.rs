//! Plain-text rendering sink.

use std::io::Write;

use vv_app::{AppResult, RenderSink};
use vv_pivot::{Cell, Grid, ParameterSeries, PointMarker, clean_label, group_by_category};

const NAME_WIDTH: usize = 18;
const CELL_WIDTH: usize = 14;

pub struct TextSink<W> {
    out: W,
    /// Print hover details under every chart point.
    pub verbose: bool,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            verbose: false,
        }
    }
}

fn cell_text(cell: &Cell<'_>) -> String {
    match cell {
        Cell::Empty => "-".to_string(),
        Cell::Filled { reading, status } => match status.alert_label() {
            Some(badge) => format!("{} !{}", reading.value, badge),
            None if reading.is_comment => format!("{} *", reading.value),
            None => reading.value.clone(),
        },
    }
}

fn marker_text(marker: PointMarker) -> &'static str {
    match marker {
        PointMarker::High => "HIGH",
        PointMarker::Low => "LOW",
        PointMarker::Normal => "",
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('~');
        cut
    }
}

impl<W: Write> RenderSink for TextSink<W> {
    fn grid(&mut self, grid: &Grid) -> AppResult<()> {
        writeln!(self.out, "Patient Vital Signs")?;

        let mut header = format!("{:<NAME_WIDTH$}", "");
        for column in &grid.columns {
            let label = truncate(&clean_label(column), CELL_WIDTH - 1);
            header.push_str(&format!("{:>CELL_WIDTH$}", label));
        }
        writeln!(self.out, "{}", header)?;

        for section in grid.sections() {
            writeln!(self.out, "\n[{}]", section.category)?;
            for row in section.rows {
                let mut line = format!("{:<NAME_WIDTH$}", truncate(&row.name, NAME_WIDTH - 1));
                for column in &grid.columns {
                    line.push_str(&format!("{:>CELL_WIDTH$}", cell_text(&row.cell(column))));
                }
                writeln!(self.out, "{}", line.trim_end())?;
                writeln!(
                    self.out,
                    "{:<NAME_WIDTH$}normal {}-{}",
                    "", row.min_range, row.max_range
                )?;
            }
        }
        Ok(())
    }

    fn series(&mut self, series: &[ParameterSeries], domain_padding: f64) -> AppResult<()> {
        for group in group_by_category(series) {
            writeln!(self.out, "\n== {} ==", group.category)?;
            for s in group.series {
                let domain = s.padded_domain(domain_padding);
                let (band_lo, band_hi) = s.reference_band();
                writeln!(
                    self.out,
                    "\n{}  (normal {} - {}, axis {:.2} .. {:.2})",
                    s.name, band_lo, band_hi, domain.min, domain.max
                )?;
                for point in &s.points {
                    writeln!(
                        self.out,
                        "  {:<20}{:>10}  {}",
                        point.label,
                        point.value,
                        marker_text(point.marker())
                    )?;
                    if self.verbose {
                        for line in point.tooltip(s) {
                            writeln!(self.out, "      {}", line)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn no_data(&mut self, message: &str) -> AppResult<()> {
        writeln!(self.out, "{}", message)?;
        Ok(())
    }
}
