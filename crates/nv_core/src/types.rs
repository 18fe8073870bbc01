use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// Stand-in for an article whose source omitted the description.
pub const NO_SUMMARY: &str = "No summary available";

/// Stand-in for an article whose source omitted the body. Matched exactly.
pub const NO_CONTENT: &str = "No content available";

/// Upper bound on the number of articles analysed per request.
pub const MAX_ARTICLES: usize = 10;

/// An article as returned by a search backend, before any fallbacks apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Maps a classifier label onto the three-way enum. Anything that is not
    /// a positive or negative label is neutral.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("POSITIVE") {
            Sentiment::Positive
        } else if label.eq_ignore_ascii_case("NEGATIVE") {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key phrase and its relevance. Serialized as a `[phrase, score]` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "(String, f32)", into = "(String, f32)")]
pub struct Topic {
    pub phrase: String,
    pub relevance: f32,
}

impl Topic {
    pub fn new(phrase: impl Into<String>, relevance: f32) -> Self {
        Self {
            phrase: phrase.into(),
            relevance,
        }
    }
}

impl From<(String, f32)> for Topic {
    fn from((phrase, relevance): (String, f32)) -> Self {
        Self { phrase, relevance }
    }
}

impl From<Topic> for (String, f32) {
    fn from(topic: Topic) -> Self {
        (topic.phrase, topic.relevance)
    }
}

/// Sentiment label plus the classifier's confidence in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: Sentiment,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<Topic>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}

impl Article {
    pub fn new(title: impl Into<String>, summary: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            content: content.into(),
            topics: None,
            sentiment: None,
        }
    }

    /// Builds an article from a search result, substituting the sentinels
    /// for a missing or empty description and content.
    pub fn from_raw(raw: RawArticle) -> Self {
        let present = |field: Option<String>| field.filter(|value| !value.is_empty());
        Self::new(
            raw.title.unwrap_or_default(),
            present(raw.description).unwrap_or_else(|| NO_SUMMARY.to_string()),
            present(raw.content).unwrap_or_else(|| NO_CONTENT.to_string()),
        )
    }

    /// False only when the content is the "no content" sentinel.
    pub fn has_content(&self) -> bool {
        self.content != NO_CONTENT
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    #[serde(rename = "Positive")]
    pub positive: usize,
    #[serde(rename = "Negative")]
    pub negative: usize,
    #[serde(rename = "Neutral")]
    pub neutral: usize,
}

impl SentimentDistribution {
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageNote {
    #[serde(rename = "Comparison")]
    pub comparison: String,
    #[serde(rename = "Impact")]
    pub impact: String,
}

impl CoverageNote {
    pub fn new(comparison: impl Into<String>, impact: impl Into<String>) -> Self {
        Self {
            comparison: comparison.into(),
            impact: impact.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparativeReport {
    #[serde(rename = "Sentiment Distribution")]
    pub sentiment_distribution: SentimentDistribution,
    #[serde(rename = "Unique Topics")]
    pub unique_topics: BTreeSet<String>,
    #[serde(rename = "Coverage Differences")]
    pub coverage_notes: Vec<CoverageNote>,
}

/// A synthesized speech file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    pub path: PathBuf,
    pub language: String,
    pub bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Articles")]
    pub articles: Vec<Article>,
    #[serde(rename = "Comparative Sentiment Score")]
    pub comparison: ComparativeReport,
    #[serde(rename = "Final Sentiment Summary")]
    pub summary_text: String,
    #[serde(rename = "Audio File")]
    pub audio_file: PathBuf,
}
