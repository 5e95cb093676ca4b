#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    Fetching,
    Decoding,
    Ready,
}

impl LoadStage {
    pub fn label(self) -> &'static str {
        match self {
            LoadStage::Fetching => "fetching",
            LoadStage::Decoding => "decoding",
            LoadStage::Ready => "ready",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadProgressEvent {
    pub stage: LoadStage,
    pub origin: String,
    pub elapsed_wall_s: f64,
    /// Payload size once fetched.
    pub payload_bytes: Option<usize>,
    /// Reading count once decoded.
    pub readings: Option<usize>,
}
