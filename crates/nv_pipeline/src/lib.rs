use std::time::Duration;
use nv_inference::InferenceConfig;
use nv_narration::NarrationConfig;
use nv_sources::SourceConfig;

pub mod aggregator;
pub mod pipeline;
pub mod summary;

pub use aggregator::aggregate;
pub use pipeline::{Pipeline, Stage};
pub use summary::{compose, script};

/// Per-article analyses allowed in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub source: SourceConfig,
    pub inference: InferenceConfig,
    pub narration: NarrationConfig,
    pub concurrency: usize,
    /// Upper bound on every call to an external capability.
    pub timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            inference: InferenceConfig::default(),
            narration: NarrationConfig::default(),
            concurrency: DEFAULT_CONCURRENCY,
            timeout: Duration::from_secs(30),
        }
    }
}

impl PipelineConfig {
    /// Applies one timeout to every stage and the HTTP clients behind them.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.source.timeout = timeout;
        self.inference.timeout = timeout;
        self.narration.timeout = timeout;
        self
    }
}

pub mod prelude {
    pub use super::{Pipeline, PipelineConfig, Stage};
    pub use nv_core::{AnalysisResult, Error, Result};
}
