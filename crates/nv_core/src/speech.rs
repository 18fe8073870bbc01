use async_trait::async_trait;
use std::fmt;
use crate::Result;

#[async_trait]
pub trait Translator: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Translate `text` into `target`. A `source` of `None` asks the backend
    /// to detect the source language.
    async fn translate(&self, text: &str, source: Option<&str>, target: &str) -> Result<String>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Render `text` as mp3 audio spoken in `lang`
    async fn synthesize(&self, text: &str, lang: &str) -> Result<Vec<u8>>;
}
