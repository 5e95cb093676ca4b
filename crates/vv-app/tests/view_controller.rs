use vv_app::{AppResult, RenderSink, ViewController, ViewMode};
use vv_core::{AlertStatus, CategoryFilter, Reading};
use vv_pivot::{Grid, ParameterSeries};

#[derive(Debug, PartialEq)]
enum Rendered {
    Grid { columns: usize, rows: Vec<String> },
    Series { names: Vec<String>, padding: f64 },
    NoData(String),
}

#[derive(Default)]
struct RecordingSink {
    calls: Vec<Rendered>,
}

impl RenderSink for RecordingSink {
    fn grid(&mut self, grid: &Grid) -> AppResult<()> {
        self.calls.push(Rendered::Grid {
            columns: grid.columns.len(),
            rows: grid.rows.iter().map(|r| r.name.clone()).collect(),
        });
        Ok(())
    }

    fn series(&mut self, series: &[ParameterSeries], padding: f64) -> AppResult<()> {
        self.calls.push(Rendered::Series {
            names: series.iter().map(|s| s.name.clone()).collect(),
            padding,
        });
        Ok(())
    }

    fn no_data(&mut self, message: &str) -> AppResult<()> {
        self.calls.push(Rendered::NoData(message.to_string()));
        Ok(())
    }
}

fn reading(pid: i64, name: &str, category: &str, label: &str, value: &str, high: bool) -> Reading {
    Reading {
        parameter_id: pid,
        name: name.to_string(),
        category: category.to_string(),
        column_display: label.to_string(),
        value: value.to_string(),
        is_high_limit: high,
        min_range: 0.0,
        max_range: 100.0,
        sort_seq: pid,
        ..Reading::default()
    }
}

fn dataset() -> Vec<Reading> {
    vec![
        reading(1, "HR", "Vitals", "08:00", "72", false),
        reading(1, "HR", "Vitals", "09:00", "130", true),
        reading(2, "RR", "Vitals", "08:00", "14", false),
        reading(3, "Na", "Labs", "08:00", "140", false),
        reading(4, "Pain", "Assessment", "08:00", "", false),
    ]
}

#[test]
fn initial_render_shows_grid() {
    let mut controller = ViewController::new(dataset(), RecordingSink::default());
    let summary = controller.render().unwrap();

    assert_eq!(summary.view, ViewMode::Grid);
    assert_eq!(summary.readings, 5);
    assert_eq!(summary.items, 4);
    assert_eq!(
        controller.sink().calls,
        vec![Rendered::Grid {
            columns: 2,
            rows: vec!["HR".into(), "RR".into(), "Na".into(), "Pain".into()],
        }]
    );
}

#[test]
fn set_view_renders_immediately() {
    let mut controller = ViewController::new(dataset(), RecordingSink::default());
    let summary = controller.set_view(ViewMode::Series).unwrap();

    assert_eq!(controller.active_view(), ViewMode::Series);
    assert_eq!(controller.render_count(), 1);
    // Pain has no values and is left out.
    assert_eq!(summary.items, 3);
    assert_eq!(
        controller.sink().calls,
        vec![Rendered::Series {
            names: vec!["HR".into(), "Na".into(), "RR".into()],
            padding: 0.1,
        }]
    );
}

#[test]
fn each_filter_change_renders_once() {
    let mut controller = ViewController::new(dataset(), RecordingSink::default());

    controller
        .set_category(CategoryFilter::Only("Vitals".to_string()))
        .unwrap();
    assert_eq!(controller.render_count(), 1);

    let summary = controller.set_alert_status(AlertStatus::Alerts).unwrap();
    assert_eq!(controller.render_count(), 2);
    assert_eq!(summary.readings, 1);

    assert_eq!(
        controller.sink().calls.last(),
        Some(&Rendered::Grid {
            columns: 1,
            rows: vec!["HR".into()],
        })
    );
}

#[test]
fn empty_filter_result_reaches_no_data() {
    let mut controller = ViewController::new(dataset(), RecordingSink::default());
    controller
        .set_category(CategoryFilter::Only("Labs".to_string()))
        .unwrap();
    let summary = controller.set_alert_status(AlertStatus::Alerts).unwrap();

    assert!(summary.is_empty());
    assert_eq!(summary.readings, 0);
    assert_eq!(
        controller.sink().calls.last(),
        Some(&Rendered::NoData(
            "No data matches the selected filters".to_string()
        ))
    );
}

#[test]
fn series_without_values_reaches_no_data() {
    let mut controller = ViewController::new(dataset(), RecordingSink::default());
    controller
        .set_category(CategoryFilter::Only("Assessment".to_string()))
        .unwrap();
    let summary = controller.set_view(ViewMode::Series).unwrap();

    assert_eq!(summary.readings, 1);
    assert!(summary.is_empty());
    assert!(matches!(
        controller.sink().calls.last(),
        Some(Rendered::NoData(_))
    ));
}

#[test]
fn categories_are_fixed_at_load() {
    let mut controller = ViewController::new(dataset(), RecordingSink::default());
    assert_eq!(controller.categories(), ["Assessment", "Labs", "Vitals"]);

    controller
        .set_category(CategoryFilter::Only("Labs".to_string()))
        .unwrap();
    assert_eq!(controller.categories(), ["Assessment", "Labs", "Vitals"]);
    assert_eq!(controller.readings().len(), 5);
}

#[test]
fn empty_dataset_is_a_display_state() {
    let mut controller = ViewController::new(Vec::new(), RecordingSink::default());
    let summary = controller.render().unwrap();
    assert!(summary.is_empty());
    assert_eq!(controller.into_sink().calls.len(), 1);
}

#[test]
fn view_mode_parses_aliases() {
    assert_eq!("grid".parse::<ViewMode>().unwrap(), ViewMode::Grid);
    assert_eq!("Dashboard".parse::<ViewMode>().unwrap(), ViewMode::Series);
    assert_eq!("chart".parse::<ViewMode>().unwrap(), ViewMode::Series);
    assert!("pie".parse::<ViewMode>().is_err());
    assert_eq!(ViewMode::Series.to_string(), "series");
}
