use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;
use nv_core::{AudioArtifact, Error, Result, SpeechSynthesizer, Translator};
use crate::AudioOutput;

/// Spoken stand-in for an empty summary.
pub fn default_message(lang: &str) -> &'static str {
    match lang {
        "hi" => "कोई सारांश उपलब्ध नहीं है।",
        _ => "No summary available.",
    }
}

/// Turns a summary into an audio file in the listener's language.
pub struct Narrator {
    translator: Arc<dyn Translator>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    output: AudioOutput,
    timeout: Duration,
}

impl fmt::Debug for Narrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Narrator")
            .field("translator", &self.translator.name())
            .field("synthesizer", &self.synthesizer.name())
            .field("output", &self.output)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Narrator {
    pub fn new(
        translator: Arc<dyn Translator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        output: AudioOutput,
    ) -> Self {
        Self {
            translator,
            synthesizer,
            output,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn output(&self) -> &AudioOutput {
        &self.output
    }

    /// Narrates `text` in `lang`.
    pub async fn narrate(&self, text: &str, lang: &str) -> Result<AudioArtifact> {
        self.narrate_as("summary", text, lang).await
    }

    /// Narrates `text` in `lang`, naming the file after `label` when writing
    /// into a directory. Blank text is replaced by [`default_message`].
    ///
    /// Translation and synthesis failures, including timeouts, are reported
    /// as [`Error::NarrationUnavailable`].
    pub async fn narrate_as(&self, label: &str, text: &str, lang: &str) -> Result<AudioArtifact> {
        let text = if text.trim().is_empty() {
            default_message(lang)
        } else {
            text
        };

        info!("🌐 Translating summary to {} with {}", lang, self.translator.name());
        let translated = tokio::time::timeout(self.timeout, self.translator.translate(text, None, lang))
            .await
            .map_err(|_| unavailable(format!("{} timed out after {:?}", self.translator.name(), self.timeout)))?
            .map_err(|e| unavailable(format!("{} failed: {}", self.translator.name(), e)))?;
        if translated.trim().is_empty() {
            return Err(unavailable(format!("{} returned no text", self.translator.name())));
        }

        info!("🔊 Synthesizing speech with {}", self.synthesizer.name());
        let audio = tokio::time::timeout(self.timeout, self.synthesizer.synthesize(&translated, lang))
            .await
            .map_err(|_| unavailable(format!("{} timed out after {:?}", self.synthesizer.name(), self.timeout)))?
            .map_err(|e| unavailable(format!("{} failed: {}", self.synthesizer.name(), e)))?;

        let path = self.output_path(label);
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &audio).await?;
        info!("💾 Wrote {} bytes of audio to {}", audio.len(), path.display());

        Ok(AudioArtifact {
            path,
            language: lang.to_string(),
            bytes: audio.len(),
        })
    }

    fn output_path(&self, label: &str) -> PathBuf {
        match &self.output {
            AudioOutput::File(path) => path.clone(),
            AudioOutput::Directory(dir) => dir.join(format!("{}-{}.mp3", slugify(label), Uuid::new_v4())),
        }
    }
}

fn unavailable(message: String) -> Error {
    Error::NarrationUnavailable(message)
}

/// Lowercase ASCII alphanumerics joined by single dashes.
fn slugify(label: &str) -> String {
    let slug = label
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "summary".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use async_trait::async_trait;
    use anyhow::anyhow;
    use crate::{PassthroughTranslator, SilentSynthesizer};

    #[derive(Debug, Default)]
    struct RecordingSynthesizer {
        spoken: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl SpeechSynthesizer for RecordingSynthesizer {
        fn name(&self) -> &str {
            "recording"
        }

        async fn synthesize(&self, text: &str, _lang: &str) -> Result<Vec<u8>> {
            self.spoken.lock().unwrap().push(text.to_string());
            Ok(vec![1, 2, 3])
        }
    }

    #[derive(Debug)]
    struct FailingTranslator;

    #[async_trait]
    impl Translator for FailingTranslator {
        fn name(&self) -> &str {
            "failing"
        }

        async fn translate(&self, _text: &str, _source: Option<&str>, _target: &str) -> Result<String> {
            Err(Error::External(anyhow!("429 Too Many Requests")))
        }
    }

    #[derive(Debug)]
    struct SlowSynthesizer;

    #[async_trait]
    impl SpeechSynthesizer for SlowSynthesizer {
        fn name(&self) -> &str {
            "slow"
        }

        async fn synthesize(&self, _text: &str, _lang: &str) -> Result<Vec<u8>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_blank_text_speaks_default_message() {
        let dir = tempfile::tempdir().unwrap();
        let synthesizer = Arc::new(RecordingSynthesizer::default());
        let narrator = Narrator::new(
            Arc::new(PassthroughTranslator),
            synthesizer.clone(),
            AudioOutput::File(dir.path().join("output.mp3")),
        );

        narrator.narrate("", "hi").await.unwrap();
        narrator.narrate("  \n ", "en").await.unwrap();

        let spoken = synthesizer.spoken.lock().unwrap();
        assert_eq!(*spoken, vec!["कोई सारांश उपलब्ध नहीं है।", "No summary available."]);
    }

    #[tokio::test]
    async fn test_file_output_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.mp3");
        let narrator = Narrator::new(
            Arc::new(PassthroughTranslator),
            Arc::new(SilentSynthesizer),
            AudioOutput::File(path.clone()),
        );

        let first = narrator.narrate("Overall sentiment is neutral.", "hi").await.unwrap();
        let second = narrator.narrate("Overall sentiment is neutral.", "hi").await.unwrap();
        assert_eq!(first.path, path);
        assert_eq!(second.path, path);
        assert_eq!(second.language, "hi");
        assert_eq!(std::fs::metadata(&path).unwrap().len() as usize, second.bytes);
    }

    #[tokio::test]
    async fn test_directory_output_is_unique() {
        let dir = tempfile::tempdir().unwrap();
        let narrator = Narrator::new(
            Arc::new(PassthroughTranslator),
            Arc::new(SilentSynthesizer),
            AudioOutput::Directory(dir.path().join("audio")),
        );

        let first = narrator.narrate_as("Acme Corp", "Positive.", "hi").await.unwrap();
        let second = narrator.narrate_as("Acme Corp", "Positive.", "hi").await.unwrap();
        assert_ne!(first.path, second.path);
        assert!(first.path.exists());
        let name = first.path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("acme-corp-"));
        assert!(name.ends_with(".mp3"));
    }

    #[tokio::test]
    async fn test_translation_failure_is_narration_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.mp3");
        let narrator = Narrator::new(
            Arc::new(FailingTranslator),
            Arc::new(SilentSynthesizer),
            AudioOutput::File(path.clone()),
        );

        let err = narrator.narrate("Overall sentiment is positive.", "hi").await.unwrap_err();
        assert!(matches!(err, Error::NarrationUnavailable(_)));
        assert!(err.to_string().contains("429"));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_synthesis_timeout_is_narration_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let narrator = Narrator::new(
            Arc::new(PassthroughTranslator),
            Arc::new(SlowSynthesizer),
            AudioOutput::File(dir.path().join("output.mp3")),
        )
        .with_timeout(Duration::from_millis(50));

        let err = narrator.narrate("Overall sentiment is positive.", "hi").await.unwrap_err();
        assert!(matches!(err, Error::NarrationUnavailable(_)));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Acme Corp."), "acme-corp");
        assert_eq!(slugify("टाटा"), "summary");
    }
}
