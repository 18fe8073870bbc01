use nv_core::Article;

pub const POSITIVE_VERDICT: &str = "Overall sentiment is positive, indicating positive market perception.";
pub const NEGATIVE_VERDICT: &str = "Overall sentiment is negative, which may influence investor confidence.";
pub const NEUTRAL_VERDICT: &str = "Overall sentiment is neutral with mixed opinions.";

/// One-sentence verdict from the positive and negative article counts.
/// Ties, including no articles at all, are neutral.
pub fn compose(positive: usize, negative: usize) -> &'static str {
    if positive > negative {
        POSITIVE_VERDICT
    } else if negative > positive {
        NEGATIVE_VERDICT
    } else {
        NEUTRAL_VERDICT
    }
}

/// Text handed to the narrator: the verdict, then `title: LABEL` for every
/// article that had content. Empty when no article had content.
pub fn script(verdict: &str, articles: &[Article]) -> String {
    let lines: Vec<String> = articles
        .iter()
        .filter(|article| article.has_content())
        .map(|article| {
            let label = article.sentiment.map(|s| s.as_str()).unwrap_or("NEUTRAL");
            format!("{}: {}", article.title, label)
        })
        .collect();

    if lines.is_empty() {
        return String::new();
    }
    let mut script = String::from(verdict);
    for line in lines {
        script.push('\n');
        script.push_str(&line);
    }
    script
}
