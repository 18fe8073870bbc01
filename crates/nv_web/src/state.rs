use std::path::PathBuf;
use std::sync::Arc;
use nv_pipeline::Pipeline;

pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    /// Directory the pipeline writes narrations into, served under `/audio`.
    pub audio_dir: PathBuf,
}

impl AppState {
    pub fn new(pipeline: Arc<Pipeline>, audio_dir: impl Into<PathBuf>) -> Self {
        Self {
            pipeline,
            audio_dir: audio_dir.into(),
        }
    }

    /// URL under which an audio file written by the pipeline is served.
    pub fn audio_url(&self, path: &std::path::Path) -> Option<String> {
        let relative = path.strip_prefix(&self.audio_dir).ok()?;
        let name = relative.to_str()?;
        Some(format!("/audio/{}", name.replace('\\', "/")))
    }
}
