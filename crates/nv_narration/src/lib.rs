use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use nv_core::{Error, Result, SpeechSynthesizer, Translator};

pub mod chunk;
pub mod narrator;
pub mod translate;
pub mod tts;

pub use narrator::{default_message, Narrator};
pub use translate::{GoogleTranslate, PassthroughTranslator};
pub use tts::{GoogleTts, SilentSynthesizer};

pub const DEFAULT_LANGUAGE: &str = "hi";

/// Where synthesized speech is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioOutput {
    /// A single file, overwritten by every narration.
    File(PathBuf),
    /// A directory receiving one uniquely named file per narration.
    Directory(PathBuf),
}

impl Default for AudioOutput {
    fn default() -> Self {
        AudioOutput::File(PathBuf::from("output.mp3"))
    }
}

#[derive(Debug, Clone)]
pub struct NarrationConfig {
    /// `google` or `offline`
    pub translator: String,
    /// `google` or `offline`
    pub synthesizer: String,
    pub target_language: String,
    pub output: AudioOutput,
    pub timeout: Duration,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            translator: "google".to_string(),
            synthesizer: "google".to_string(),
            target_language: DEFAULT_LANGUAGE.to_string(),
            output: AudioOutput::default(),
            timeout: Duration::from_secs(30),
        }
    }
}

pub fn create_translator(config: &NarrationConfig) -> Result<Arc<dyn Translator>> {
    match config.translator.as_str() {
        "google" => Ok(Arc::new(GoogleTranslate::new(config)?)),
        "offline" => Ok(Arc::new(PassthroughTranslator)),
        other => Err(Error::Config(format!(
            "Unknown translator: {}. Available translators: google, offline",
            other
        ))),
    }
}

pub fn create_synthesizer(config: &NarrationConfig) -> Result<Arc<dyn SpeechSynthesizer>> {
    match config.synthesizer.as_str() {
        "google" => Ok(Arc::new(GoogleTts::new(config)?)),
        "offline" => Ok(Arc::new(SilentSynthesizer)),
        other => Err(Error::Config(format!(
            "Unknown speech synthesizer: {}. Available synthesizers: google, offline",
            other
        ))),
    }
}

pub fn create_narrator(config: &NarrationConfig) -> Result<Narrator> {
    Ok(Narrator::new(create_translator(config)?, create_synthesizer(config)?, config.output.clone())
        .with_timeout(config.timeout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factories() {
        let config = NarrationConfig {
            translator: "offline".to_string(),
            synthesizer: "offline".to_string(),
            ..NarrationConfig::default()
        };
        assert_eq!(create_translator(&config).unwrap().name(), "Passthrough");
        assert_eq!(create_synthesizer(&config).unwrap().name(), "Silent");
        assert!(create_narrator(&config).is_ok());

        let defaults = NarrationConfig::default();
        assert_eq!(create_translator(&defaults).unwrap().name(), "GoogleTranslate");
        assert_eq!(defaults.target_language, "hi");

        let config = NarrationConfig {
            synthesizer: "parrot".to_string(),
            ..NarrationConfig::default()
        };
        assert!(matches!(create_synthesizer(&config), Err(Error::Config(_))));
    }
}
