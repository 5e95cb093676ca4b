//! One-shot load: fetch, decode, hand off to a view controller.

use std::time::Instant;

use vv_core::Reading;

use crate::config::DashboardConfig;
use crate::error::AppResult;
use crate::progress::{LoadProgressEvent, LoadStage};
use crate::sink::RenderSink;
use crate::source::PayloadSource;
use crate::view::ViewController;

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(LoadProgressEvent)>,
    stage: LoadStage,
    origin: &str,
    started: Instant,
    payload_bytes: Option<usize>,
    readings: Option<usize>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(LoadProgressEvent {
            stage,
            origin: origin.to_string(),
            elapsed_wall_s: started.elapsed().as_secs_f64(),
            payload_bytes,
            readings,
        });
    }
}

/// Fetch once and decode. Failures are returned as-is; nothing is retried.
pub fn load_readings(
    source: &mut dyn PayloadSource,
    config: &DashboardConfig,
) -> AppResult<Vec<Reading>> {
    load_readings_with_progress(source, config, None)
}

/// [`load_readings`] reporting each stage to `progress_cb`.
pub fn load_readings_with_progress(
    source: &mut dyn PayloadSource,
    config: &DashboardConfig,
    mut progress_cb: Option<&mut dyn FnMut(LoadProgressEvent)>,
) -> AppResult<Vec<Reading>> {
    let started = Instant::now();
    let origin = source.origin();

    emit_progress(&mut progress_cb, LoadStage::Fetching, &origin, started, None, None);
    let raw = source.fetch()?;

    emit_progress(
        &mut progress_cb,
        LoadStage::Decoding,
        &origin,
        started,
        Some(raw.len()),
        None,
    );
    let readings = match vv_payload::decode_with_element(&raw, &config.data_element) {
        Ok(readings) => readings,
        Err(e) => {
            tracing::error!(%origin, error = %e, "payload decode failed");
            return Err(e.into());
        }
    };

    emit_progress(
        &mut progress_cb,
        LoadStage::Ready,
        &origin,
        started,
        Some(raw.len()),
        Some(readings.len()),
    );
    tracing::info!(%origin, readings = readings.len(), "loaded readings");
    Ok(readings)
}

/// Load from `source` and build a controller configured by `config`.
/// The caller triggers the first render.
pub fn open_dashboard<S: RenderSink>(
    source: &mut dyn PayloadSource,
    config: &DashboardConfig,
    sink: S,
) -> AppResult<ViewController<S>> {
    config.validate()?;
    let readings = load_readings(source, config)?;
    ViewController::with_config(readings, config, sink)
}
