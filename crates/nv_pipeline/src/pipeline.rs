use std::fmt;
use std::sync::Arc;
use futures::future::join_all;
use tokio::sync::Semaphore;
use tracing::info;
use nv_core::{AnalysisResult, Article, Result};
use nv_inference::{create_keyphrase_model, create_sentiment_model, SentimentClassifier, TopicExtractor};
use nv_narration::{create_narrator, Narrator};
use nv_sources::{create_search_backend, ArticleSource};
use crate::{aggregate, compose, script, PipelineConfig, DEFAULT_CONCURRENCY};

/// Stages of one analysis, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    ExtractingTopics,
    ClassifyingSentiment,
    Aggregating,
    Composing,
    Narrating,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetching => "fetching articles",
            Stage::ExtractingTopics => "extracting topics",
            Stage::ClassifyingSentiment => "classifying sentiment",
            Stage::Aggregating => "aggregating",
            Stage::Composing => "composing summary",
            Stage::Narrating => "narrating",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// News analysis for one entity: fetch, analyse each article, compare,
/// summarise and narrate.
#[derive(Debug)]
pub struct Pipeline {
    source: ArticleSource,
    topics: TopicExtractor,
    sentiment: SentimentClassifier,
    narrator: Narrator,
    language: String,
    concurrency: usize,
}

impl Pipeline {
    pub fn new(
        source: ArticleSource,
        topics: TopicExtractor,
        sentiment: SentimentClassifier,
        narrator: Narrator,
    ) -> Self {
        Self {
            source,
            topics,
            sentiment,
            narrator,
            language: nv_narration::DEFAULT_LANGUAGE.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let source = ArticleSource::new(create_search_backend(&config.source)?).with_timeout(config.timeout);

        let options = nv_core::KeyphraseOptions {
            top_n: config.inference.top_n,
            ..nv_core::KeyphraseOptions::default()
        };
        let topics = TopicExtractor::new(create_keyphrase_model(&config.inference)?)
            .with_options(options)
            .with_timeout(config.timeout);
        let sentiment =
            SentimentClassifier::new(create_sentiment_model(&config.inference)?).with_timeout(config.timeout);
        let narrator = create_narrator(&config.narration)?.with_timeout(config.timeout);

        Ok(Self::new(source, topics, sentiment, narrator)
            .with_language(&config.narration.target_language)
            .with_concurrency(config.concurrency))
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn narrator(&self) -> &Narrator {
        &self.narrator
    }

    fn enter(&self, entity: &str, stage: Stage) {
        info!("🔄 [{}] {}", entity, stage);
    }

    /// Runs the full analysis for `entity`.
    ///
    /// Only a failed fetch or a failed narration is an error. An entity
    /// without coverage gives an empty report, and a failing topic or
    /// sentiment model only affects the article it failed on.
    pub async fn run(&self, entity: &str) -> Result<AnalysisResult> {
        self.enter(entity, Stage::Fetching);
        let mut articles = self.source.fetch(entity).await?;

        self.enter(entity, Stage::ExtractingTopics);
        let topics = self.for_each_article(&articles, |article| self.topics.extract(&article.content)).await;
        for (article, topics) in articles.iter_mut().zip(topics) {
            article.topics = Some(topics);
        }

        self.enter(entity, Stage::ClassifyingSentiment);
        let labels = self
            .for_each_article(&articles, |article| self.sentiment.classify(&article.content))
            .await;
        for (article, classification) in articles.iter_mut().zip(labels) {
            article.sentiment = Some(classification.label);
        }

        self.enter(entity, Stage::Aggregating);
        let comparison = aggregate(&articles);

        self.enter(entity, Stage::Composing);
        let distribution = comparison.sentiment_distribution;
        let summary_text = compose(distribution.positive, distribution.negative).to_string();
        let narration = script(&summary_text, &articles);

        self.enter(entity, Stage::Narrating);
        let artifact = self.narrator.narrate_as(entity, &narration, &self.language).await?;

        self.enter(entity, Stage::Done);
        info!(
            "✅ [{}] {} articles: {} positive, {} negative, {} neutral",
            entity,
            articles.len(),
            distribution.positive,
            distribution.negative,
            distribution.neutral
        );

        Ok(AnalysisResult {
            company: entity.to_string(),
            articles,
            comparison,
            summary_text,
            audio_file: artifact.path,
        })
    }

    /// Runs `task` for every article with bounded concurrency. Results come
    /// back in article order.
    async fn for_each_article<'a, F, Fut, T>(&self, articles: &'a [Article], task: F) -> Vec<T>
    where
        F: Fn(&'a Article) -> Fut,
        Fut: std::future::Future<Output = T>,
    {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        join_all(articles.iter().map(|article| {
            let semaphore = semaphore.clone();
            let work = task(article);
            async move {
                let _permit = semaphore.acquire().await;
                work.await
            }
        }))
        .await
    }
}
