//! Shared application layer for vitalview.
//!
//! Ties the pieces together for frontends: payload sources, loading,
//! dashboard configuration, and the view controller that drives a
//! rendering sink through filter and pivot on every change.

pub mod config;
pub mod error;
pub mod load;
pub mod progress;
pub mod sink;
pub mod source;
pub mod view;

// Re-export key types for convenience
pub use config::{ConfigError, DashboardConfig, load_config};
pub use error::{AppError, AppResult};
pub use load::{load_readings, load_readings_with_progress, open_dashboard};
pub use progress::{LoadProgressEvent, LoadStage};
pub use sink::RenderSink;
pub use source::{FileSource, PayloadSource, ReaderSource, StaticSource};
pub use view::{RenderOptions, RenderSummary, ViewController, ViewMode};
