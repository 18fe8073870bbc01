use std::collections::HashSet;
use async_trait::async_trait;
use lazy_static::lazy_static;
use nv_core::{RawClassification, Result, SentimentModel};

lazy_static! {
    static ref POSITIVE: HashSet<&'static str> = [
        "achievement", "advance", "advances", "beat", "beats", "best", "boom", "boost", "boosts", "breakthrough",
        "gain", "gains", "good", "great", "grow", "grows", "growth", "improve", "improved", "improves",
        "innovation", "innovative", "launch", "launches", "lead", "leading", "milestone", "optimism", "optimistic",
        "outperform", "positive", "profit", "profits", "profitable", "rally", "record", "recover", "recovery",
        "rise", "rises", "soar", "soars", "strong", "stronger", "success", "successful", "surge", "surges",
        "upgrade", "win", "wins",
    ]
    .iter()
    .copied()
    .collect();

    static ref NEGATIVE: HashSet<&'static str> = [
        "bad", "bankruptcy", "concern", "concerns", "crash", "crisis", "cut", "cuts", "decline", "declines",
        "delay", "delays", "downgrade", "drop", "drops", "fail", "fails", "failure", "fall", "falls",
        "fined", "fraud", "investigation", "lawsuit", "layoffs", "loss", "losses", "miss", "misses",
        "negative", "plunge", "plunges", "probe", "recall", "recalls", "risk", "risks", "scandal", "slump",
        "weak", "weaker", "worse", "worst",
    ]
    .iter()
    .copied()
    .collect();
}

/// Offline word-list classifier. A text with at least as many positive as
/// negative cue words is POSITIVE, mirroring a binary model that never
/// answers neutral.
#[derive(Debug, Default, Clone)]
pub struct LexiconSentiment;

impl LexiconSentiment {
    pub fn new() -> Self {
        Self
    }

    fn counts(text: &str) -> (usize, usize) {
        let lowered = text.to_lowercase();
        lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .fold((0, 0), |(pos, neg), word| {
                (
                    pos + POSITIVE.contains(word) as usize,
                    neg + NEGATIVE.contains(word) as usize,
                )
            })
    }
}

#[async_trait]
impl SentimentModel for LexiconSentiment {
    fn name(&self) -> &str {
        "Lexicon"
    }

    async fn classify(&self, text: &str) -> Result<RawClassification> {
        let (positive, negative) = Self::counts(text);
        let total = positive + negative;
        let (label, hits) = if negative > positive {
            ("NEGATIVE", negative)
        } else {
            ("POSITIVE", positive)
        };
        let score = if total == 0 || positive == negative {
            0.5
        } else {
            hits as f32 / total as f32
        };
        Ok(RawClassification {
            label: label.to_string(),
            score,
        })
    }
}
