use vv_app::{
    AppError, AppResult, DashboardConfig, LoadStage, RenderSink, StaticSource, ViewMode,
    load_readings, load_readings_with_progress, open_dashboard,
};
use vv_core::{AlertStatus, Reading};
use vv_pivot::{Grid, ParameterSeries};

#[derive(Default)]
struct CountingSink {
    grids: usize,
    series: usize,
    no_data: usize,
}

impl RenderSink for CountingSink {
    fn grid(&mut self, _grid: &Grid) -> AppResult<()> {
        self.grids += 1;
        Ok(())
    }

    fn series(&mut self, _series: &[ParameterSeries], _padding: f64) -> AppResult<()> {
        self.series += 1;
        Ok(())
    }

    fn no_data(&mut self, _message: &str) -> AppResult<()> {
        self.no_data += 1;
        Ok(())
    }
}

fn readings() -> Vec<Reading> {
    vec![
        Reading {
            parameter_id: 1,
            name: "HR".to_string(),
            category: "Vitals".to_string(),
            column_display: "08:00".to_string(),
            value: "140".to_string(),
            is_high_limit: true,
            ..Reading::default()
        },
        Reading {
            parameter_id: 2,
            name: "Temp".to_string(),
            category: "Vitals".to_string(),
            column_display: "08:00".to_string(),
            value: "36.8".to_string(),
            ..Reading::default()
        },
    ]
}

#[test]
fn load_decodes_payload() {
    let payload = vv_payload::encode(&readings()).unwrap();
    let mut source = StaticSource::new(payload);

    let loaded = load_readings(&mut source, &DashboardConfig::default()).unwrap();
    assert_eq!(loaded, readings());
}

#[test]
fn load_reports_stages_in_order() {
    let payload = vv_payload::encode(&readings()).unwrap();
    let mut source = StaticSource::new(payload);
    let mut stages = Vec::new();

    load_readings_with_progress(
        &mut source,
        &DashboardConfig::default(),
        Some(&mut |event| stages.push((event.stage, event.readings))),
    )
    .unwrap();

    assert_eq!(
        stages,
        vec![
            (LoadStage::Fetching, None),
            (LoadStage::Decoding, None),
            (LoadStage::Ready, Some(2)),
        ]
    );
}

#[test]
fn decode_failure_surfaces_message() {
    let mut source = StaticSource::new("<response><nothing/></response>");
    let err = load_readings(&mut source, &DashboardConfig::default()).unwrap_err();

    assert!(matches!(err, AppError::Decode(_)));
    assert_eq!(
        err.to_string(),
        "Failed to decode payload: No <data> element found in payload"
    );
}

#[test]
fn configured_element_is_used() {
    let payload = vv_payload::encode_with_element(&readings(), "result").unwrap();
    let config = DashboardConfig {
        data_element: "result".to_string(),
        ..DashboardConfig::default()
    };
    let mut source = StaticSource::new(payload);

    assert_eq!(load_readings(&mut source, &config).unwrap().len(), 2);
}

#[test]
fn open_dashboard_applies_config() {
    let payload = vv_payload::encode(&readings()).unwrap();
    let config = DashboardConfig::from_yaml(
        "initial_view: series\nalert_status: normal\ndomain_padding: 0.2\n",
    )
    .unwrap();
    let mut source = StaticSource::new(payload);

    let mut controller = open_dashboard(&mut source, &config, CountingSink::default()).unwrap();
    assert_eq!(controller.active_view(), ViewMode::Series);
    assert_eq!(controller.selection().alert_status, AlertStatus::Normal);
    assert_eq!(controller.options().domain_padding, 0.2);
    assert_eq!(controller.render_count(), 0);

    let summary = controller.render().unwrap();
    assert_eq!(summary.readings, 1);
    assert_eq!(controller.sink().series, 1);

    controller.set_view(ViewMode::Grid).unwrap();
    assert_eq!(controller.sink().grids, 1);
    assert_eq!(controller.sink().no_data, 0);
}
