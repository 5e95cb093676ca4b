//! Grid pivot: one row per (parameter, name), one column per period label.

use std::collections::{BTreeSet, HashMap};

use vv_core::{CellStatus, Reading};

/// Row of the tabular view.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub parameter_id: i64,
    pub name: String,
    pub category: String,
    pub min_range: f64,
    pub max_range: f64,
    /// Taken from the last reading seen for this row.
    pub group_sort_seq: i64,
    /// Taken from the last reading seen for this row.
    pub sort_seq: i64,
    /// Period label → the reading observed at that label (last one wins).
    pub values: HashMap<String, Reading>,
}

impl GridRow {
    fn seed(reading: &Reading) -> Self {
        Self {
            parameter_id: reading.parameter_id,
            name: reading.name.clone(),
            category: reading.category.clone(),
            min_range: reading.min_range,
            max_range: reading.max_range,
            group_sort_seq: reading.group_sort_seq,
            sort_seq: reading.sort_seq,
            values: HashMap::new(),
        }
    }

    pub fn sort_key(&self) -> (i64, i64) {
        (self.group_sort_seq, self.sort_seq)
    }

    pub fn cell(&self, column: &str) -> Cell<'_> {
        match self.values.get(column) {
            Some(reading) => match reading.status() {
                Some(status) => Cell::Filled { reading, status },
                None => Cell::Empty,
            },
            None => Cell::Empty,
        }
    }
}

/// Intersection of a row and a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    /// No reading at this period, or the reading has no value.
    Empty,
    Filled {
        reading: &'a Reading,
        status: CellStatus,
    },
}

impl<'a> Cell<'a> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn value(&self) -> Option<&'a str> {
        match self {
            Cell::Empty => None,
            Cell::Filled { reading, .. } => Some(reading.value.as_str()),
        }
    }

    pub fn range_label(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Filled { reading, .. } => Some(reading.range_label()),
        }
    }

    pub fn alert_label(&self) -> Option<&'static str> {
        match self {
            Cell::Empty => None,
            Cell::Filled { status, .. } => status.alert_label(),
        }
    }
}

/// Run of consecutive rows sharing a category.
#[derive(Debug, Clone, Copy)]
pub struct GridSection<'a> {
    pub category: &'a str,
    pub rows: &'a [GridRow],
}

/// Output of [`build_grid`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    /// Distinct period labels, sorted as strings.
    pub columns: Vec<String>,
    /// Rows sorted by (group_sort_seq, sort_seq).
    pub rows: Vec<GridRow>,
}

impl Grid {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consecutive rows grouped under category headers.
    pub fn sections(&self) -> Vec<GridSection<'_>> {
        let mut sections = Vec::new();
        let mut start = 0;
        for i in 1..=self.rows.len() {
            if i == self.rows.len() || self.rows[i].category != self.rows[start].category {
                sections.push(GridSection {
                    category: &self.rows[start].category,
                    rows: &self.rows[start..i],
                });
                start = i;
            }
        }
        sections
    }
}

/// Pivot readings into a grid.
///
/// Columns are ordered lexicographically by their raw label, which is only
/// chronological when upstream labels sort that way.
pub fn build_grid(readings: &[Reading]) -> Grid {
    let columns: Vec<String> = readings
        .iter()
        .map(|r| r.column_display.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut index: HashMap<(i64, &str), usize> = HashMap::new();
    let mut rows: Vec<GridRow> = Vec::new();

    for reading in readings {
        let key = (reading.parameter_id, reading.name.as_str());
        let idx = *index.entry(key).or_insert_with(|| {
            rows.push(GridRow::seed(reading));
            rows.len() - 1
        });

        let row = &mut rows[idx];
        row.group_sort_seq = reading.group_sort_seq;
        row.sort_seq = reading.sort_seq;
        row.values.insert(reading.column_display.clone(), reading.clone());
    }

    // Stable: ties keep first-encounter order.
    rows.sort_by_key(GridRow::sort_key);

    tracing::debug!(rows = rows.len(), columns = columns.len(), "built grid");
    Grid { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(pid: i64, name: &str, label: &str, value: &str, seq: (i64, i64)) -> Reading {
        Reading {
            parameter_id: pid,
            name: name.to_string(),
            category: "Vitals".to_string(),
            column_display: label.to_string(),
            value: value.to_string(),
            group_sort_seq: seq.0,
            sort_seq: seq.1,
            ..Reading::default()
        }
    }

    #[test]
    fn empty_input_gives_empty_grid() {
        let grid = build_grid(&[]);
        assert!(grid.columns.is_empty());
        assert!(grid.rows.is_empty());
        assert!(grid.is_empty());
        assert!(grid.sections().is_empty());
    }

    #[test]
    fn columns_are_distinct_and_sorted() {
        let readings = vec![
            reading(1, "HR", "10:00", "1", (0, 0)),
            reading(1, "HR", "08:00", "1", (0, 0)),
            reading(2, "RR", "10:00", "1", (0, 0)),
            reading(2, "RR", "09:00", "1", (0, 0)),
        ];
        let grid = build_grid(&readings);
        assert_eq!(grid.columns, vec!["08:00", "09:00", "10:00"]);
    }

    #[test]
    fn rows_sort_by_group_then_sort_seq() {
        let readings = vec![
            reading(1, "A", "08:00", "1", (1, 2)),
            reading(2, "B", "08:00", "1", (1, 1)),
            reading(3, "C", "08:00", "1", (2, 0)),
        ];
        let grid = build_grid(&readings);
        let keys: Vec<_> = grid.rows.iter().map(GridRow::sort_key).collect();
        assert_eq!(keys, vec![(1, 1), (1, 2), (2, 0)]);
    }

    #[test]
    fn ties_keep_encounter_order() {
        let readings = vec![
            reading(9, "Z", "08:00", "1", (1, 1)),
            reading(1, "A", "08:00", "1", (1, 1)),
        ];
        let grid = build_grid(&readings);
        let names: Vec<_> = grid.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Z", "A"]);
    }

    #[test]
    fn sort_keys_come_from_last_reading() {
        let readings = vec![
            reading(1, "HR", "08:00", "70", (5, 5)),
            reading(2, "RR", "08:00", "12", (3, 0)),
            reading(1, "HR", "09:00", "72", (1, 0)),
        ];
        let grid = build_grid(&readings);
        assert_eq!(grid.rows[0].name, "HR");
        assert_eq!(grid.rows[0].sort_key(), (1, 0));
        assert_eq!(grid.rows[1].name, "RR");
    }

    #[test]
    fn same_label_last_reading_wins() {
        let readings = vec![
            reading(1, "HR", "08:00", "70", (0, 0)),
            reading(1, "HR", "08:00", "75", (0, 0)),
        ];
        let grid = build_grid(&readings);
        assert_eq!(grid.rows.len(), 1);
        assert_eq!(grid.rows[0].cell("08:00").value(), Some("75"));
    }

    #[test]
    fn same_parameter_different_name_is_a_separate_row() {
        let readings = vec![
            reading(1, "BP Sys", "08:00", "120", (0, 0)),
            reading(1, "BP Dia", "08:00", "80", (0, 1)),
        ];
        assert_eq!(build_grid(&readings).rows.len(), 2);
    }

    #[test]
    fn cells_classify_empty_and_alerts() {
        let mut high = reading(1, "HR", "09:00", "140", (0, 0));
        high.is_high_limit = true;
        high.is_low_limit = true;
        let mut low = reading(1, "HR", "10:00", "40", (0, 0));
        low.is_low_limit = true;
        let readings = vec![reading(1, "HR", "08:00", "", (0, 0)), high, low];

        let grid = build_grid(&readings);
        let row = &grid.rows[0];

        assert!(row.cell("08:00").is_empty());
        assert!(row.cell("11:00").is_empty());
        assert_eq!(row.cell("09:00").alert_label(), Some("HIGH"));
        assert_eq!(row.cell("10:00").alert_label(), Some("LOW"));
        assert!(matches!(
            row.cell("10:00"),
            Cell::Filled {
                status: CellStatus::LowLimit,
                ..
            }
        ));
        assert_eq!(row.cell("09:00").range_label().as_deref(), Some("0-0"));
    }

    #[test]
    fn sections_follow_category_runs() {
        let mut labs = reading(3, "Na", "08:00", "140", (2, 0));
        labs.category = "Labs".to_string();
        let readings = vec![
            reading(1, "HR", "08:00", "70", (1, 0)),
            reading(2, "RR", "08:00", "14", (1, 1)),
            labs,
        ];
        let grid = build_grid(&readings);
        let sections = grid.sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].category, "Vitals");
        assert_eq!(sections[0].rows.len(), 2);
        assert_eq!(sections[1].category, "Labs");
        assert_eq!(sections[1].rows[0].name, "Na");
    }
}
