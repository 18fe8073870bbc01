use std::collections::{BTreeMap, BTreeSet};
use nv_core::{Article, ComparativeReport, CoverageNote, Sentiment, SentimentDistribution};

/// Most shared topics named in an overlap note.
const MAX_SHARED_TOPICS: usize = 5;

/// Builds the comparative report over a batch of analysed articles.
pub fn aggregate(articles: &[Article]) -> ComparativeReport {
    let distribution = distribution(articles);

    let unique_topics: BTreeSet<String> = articles
        .iter()
        .flat_map(|article| article.topics.iter().flatten())
        .map(|topic| topic.phrase.clone())
        .collect();

    ComparativeReport {
        sentiment_distribution: distribution,
        unique_topics,
        coverage_notes: coverage_notes(articles, &distribution),
    }
}

/// Unlabelled articles count as neutral.
fn distribution(articles: &[Article]) -> SentimentDistribution {
    let count = |label: Sentiment| {
        articles
            .iter()
            .filter(|article| article.sentiment == Some(label))
            .count()
    };
    let positive = count(Sentiment::Positive);
    let negative = count(Sentiment::Negative);
    SentimentDistribution {
        positive,
        negative,
        neutral: articles.len() - positive - negative,
    }
}

fn topic_set(article: &Article) -> BTreeSet<&str> {
    article
        .topics
        .iter()
        .flatten()
        .map(|topic| topic.phrase.as_str())
        .collect()
}

fn coverage_notes(articles: &[Article], distribution: &SentimentDistribution) -> Vec<CoverageNote> {
    let total = distribution.total();
    if total == 0 {
        return Vec::new();
    }

    let mut notes = Vec::new();
    let SentimentDistribution { positive, negative, neutral } = *distribution;

    if positive > 0 && negative > 0 {
        notes.push(CoverageNote::new(
            "Positive articles highlight company achievements, while Negative articles focus on concerns.",
            "Mixed reviews may influence investor sentiment.",
        ));
    } else if positive == total {
        notes.push(CoverageNote::new(
            "All articles present the company favourably.",
            "Consistently positive coverage may strengthen market confidence.",
        ));
    } else if negative == total {
        notes.push(CoverageNote::new(
            "All articles focus on concerns about the company.",
            "Uniformly negative coverage may weigh on investor confidence.",
        ));
    } else if neutral * 2 >= total {
        notes.push(CoverageNote::new(
            "Most articles take a neutral stance or carry no content.",
            "Coverage offers little signal about market perception.",
        ));
    } else {
        let leaning = if positive > 0 { "positive" } else { "negative" };
        notes.push(CoverageNote::new(
            format!("Coverage leans {}, with the remaining articles neutral.", leaning),
            format!("A mildly {} perception is likely.", leaning),
        ));
    }

    let mut occurrences: BTreeMap<&str, usize> = BTreeMap::new();
    for article in articles {
        for phrase in topic_set(article) {
            *occurrences.entry(phrase).or_default() += 1;
        }
    }
    let shared: Vec<&str> = occurrences
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(phrase, _)| phrase)
        .take(MAX_SHARED_TOPICS)
        .collect();
    if !shared.is_empty() {
        notes.push(CoverageNote::new(
            format!("Several articles cover the same themes: {}.", shared.join(", ")),
            "Recurring themes are likely to shape the public narrative.",
        ));
    }

    if positive > 0 && negative > 0 {
        let topics_of = |label: Sentiment| {
            articles
                .iter()
                .filter(|article| article.sentiment == Some(label))
                .flat_map(topic_set)
                .collect::<BTreeSet<&str>>()
        };
        let favourable = topics_of(Sentiment::Positive);
        let critical = topics_of(Sentiment::Negative);
        if !favourable.is_empty() && !critical.is_empty() && favourable.is_disjoint(&critical) {
            notes.push(CoverageNote::new(
                "Positive and negative articles discuss entirely different themes.",
                "Investors may weigh the reported strengths and concerns independently.",
            ));
        }
    }

    notes
}
