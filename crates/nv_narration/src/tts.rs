use std::fmt;
use async_trait::async_trait;
use reqwest::Client;
use url::Url;
use nv_core::{Error, Result, SpeechSynthesizer};
use crate::chunk::split_text;
use crate::NarrationConfig;

pub const GOOGLE_TTS_URL: &str = "https://translate.google.com/translate_tts";

/// Longest text the speech endpoint accepts per request.
pub const MAX_TTS_CHARS: usize = 100;

/// Google Translate's text-to-speech endpoint. Long text is spoken in
/// consecutive requests and the mp3 fragments are concatenated.
#[derive(Clone)]
pub struct GoogleTts {
    client: Client,
    endpoint: Url,
}

impl fmt::Debug for GoogleTts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleTts")
            .field("client", &"<reqwest::Client>")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl GoogleTts {
    pub fn new(config: &NarrationConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let endpoint =
            Url::parse(GOOGLE_TTS_URL).map_err(|e| Error::Config(format!("Invalid TTS URL: {}", e)))?;
        Ok(Self { client, endpoint })
    }

    fn request_url(&self, chunk: &str, lang: &str, index: usize, total: usize) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("ie", "UTF-8")
            .append_pair("q", chunk)
            .append_pair("tl", lang)
            .append_pair("client", "tw-ob")
            .append_pair("total", &total.to_string())
            .append_pair("idx", &index.to_string())
            .append_pair("textlen", &chunk.chars().count().to_string());
        url
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    fn name(&self) -> &str {
        "GoogleTTS"
    }

    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>> {
        let chunks = split_text(text, MAX_TTS_CHARS);
        if chunks.is_empty() {
            return Err(Error::NarrationUnavailable("Nothing to speak".to_string()));
        }

        let mut audio = Vec::new();
        for (index, chunk) in chunks.iter().enumerate() {
            let url = self.request_url(chunk, lang, index, chunks.len());
            tracing::debug!("Synthesizing chunk {}/{}", index + 1, chunks.len());
            let bytes = self
                .client
                .get(url)
                .header(reqwest::header::REFERER, "http://translate.google.com/")
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await?;
            audio.extend_from_slice(&bytes);
        }
        Ok(audio)
    }
}

/// One silent MPEG-1 Layer III frame: 32 kbit/s, 44.1 kHz, mono.
const SILENT_FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x10, 0xC0];
const SILENT_FRAME_LEN: usize = 104;
const FRAMES_PER_CHUNK: usize = 10;

/// Offline synthesizer producing a valid but silent mp3, a few frames per
/// chunk of text.
#[derive(Debug, Default, Clone)]
pub struct SilentSynthesizer;

impl SilentSynthesizer {
    fn frame() -> Vec<u8> {
        let mut frame = vec![0u8; SILENT_FRAME_LEN];
        frame[..SILENT_FRAME_HEADER.len()].copy_from_slice(&SILENT_FRAME_HEADER);
        frame
    }
}

#[async_trait]
impl SpeechSynthesizer for SilentSynthesizer {
    fn name(&self) -> &str {
        "Silent"
    }

    async fn synthesize(&self, text: &str, _lang: &str) -> Result<Vec<u8>> {
        let chunks = split_text(text, MAX_TTS_CHARS).len().max(1);
        Ok(Self::frame().repeat(chunks * FRAMES_PER_CHUNK))
    }
}
