//! crates/trendlens_core/src/insight.rs
//!
//! Deterministic derivation of trend insights, content metrics, and the
//! overall score for a submitted URL. The same URL always produces the same
//! output for a given catalog version: every function here is a pure
//! function of the URL, keyed off a simple checksum of its characters.

use crate::domain::{
    ContentAnalysis, ContentType, Level, Recommendation, RecommendationKind, Sentiment,
    TrendCategory, TrendInsight,
};

const SENTIMENTS: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

const CONTENT_TYPES: [ContentType; 5] = [
    ContentType::Article,
    ContentType::Blog,
    ContentType::News,
    ContentType::Product,
    ContentType::Landing,
];

const TOPIC_CATALOG: [&str; 10] = [
    "Technology",
    "Business",
    "Marketing",
    "Design",
    "Innovation",
    "Productivity",
    "Leadership",
    "Strategy",
    "Growth",
    "Digital Transformation",
];

const KEY_PHRASE_CATALOG: [&str; 5] = [
    "digital marketing",
    "content strategy",
    "user engagement",
    "brand awareness",
    "market trends",
];

/// Checksum of the URL used to key every derivation below: the sum of the
/// character code points.
pub fn url_hash(url: &str) -> u64 {
    url.chars().map(|c| c as u64).sum()
}

/// Builds the human-readable label for a completed analysis:
/// `"Analysis for " + host-without-www + path-if-not-root`. Falls back to
/// the raw input when it does not parse (submission already validated it,
/// so this path is defensive only).
pub fn extract_title(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or(url);
            let domain = host.strip_prefix("www.").unwrap_or(host);
            let path = parsed.path();
            if path == "/" {
                format!("Analysis for {}", domain)
            } else {
                format!("Analysis for {}{}", domain, path)
            }
        }
        Err(_) => format!("Analysis for {}", url),
    }
}

/// The canonical trend catalog. Which entries a URL matches is decided by
/// the checksum filter in [`select_trends`].
fn trend_catalog() -> Vec<TrendInsight> {
    vec![
        TrendInsight {
            id: "1".to_string(),
            trend: "AI-Powered Content Creation".to_string(),
            relevance: 85,
            category: TrendCategory::Technology,
            description: "Growing trend in automated content generation and AI writing tools"
                .to_string(),
            potential_reach: 2_500_000,
            confidence_level: 78,
        },
        TrendInsight {
            id: "2".to_string(),
            trend: "Sustainable Living".to_string(),
            relevance: 72,
            category: TrendCategory::Lifestyle,
            description: "Increasing interest in eco-friendly products and sustainable practices"
                .to_string(),
            potential_reach: 1_800_000,
            confidence_level: 81,
        },
        TrendInsight {
            id: "3".to_string(),
            trend: "Remote Work Solutions".to_string(),
            relevance: 68,
            category: TrendCategory::Business,
            description: "Tools and strategies for distributed teams and digital workspaces"
                .to_string(),
            potential_reach: 3_200_000,
            confidence_level: 75,
        },
        TrendInsight {
            id: "4".to_string(),
            trend: "Health & Wellness Tech".to_string(),
            relevance: 79,
            category: TrendCategory::Health,
            description: "Wearable devices, fitness apps, and digital health monitoring"
                .to_string(),
            potential_reach: 2_100_000,
            confidence_level: 83,
        },
    ]
}

/// Selects the trends matched to a URL: catalog index `i` survives when
/// `(hash + i) % 3 != 0`, and at most the first 3 survivors are kept.
pub fn select_trends(url: &str) -> Vec<TrendInsight> {
    let hash = url_hash(url);
    trend_catalog()
        .into_iter()
        .enumerate()
        .filter(|(index, _)| (hash + *index as u64) % 3 != 0)
        .map(|(_, trend)| trend)
        .take(3)
        .collect()
}

/// Derives the content statistics for a URL.
pub fn derive_content(url: &str) -> ContentAnalysis {
    let hash = url_hash(url);
    let word_count = 800 + (hash % 1200) as u32;
    let catalog_take = 3 + (hash % 3) as usize;

    ContentAnalysis {
        word_count,
        reading_time: word_count.div_ceil(200),
        sentiment: SENTIMENTS[(hash % 3) as usize],
        topics: TOPIC_CATALOG
            .iter()
            .take(catalog_take)
            .map(|t| t.to_string())
            .collect(),
        key_phrases: KEY_PHRASE_CATALOG
            .iter()
            .take(catalog_take)
            .map(|p| p.to_string())
            .collect(),
        language: "en".to_string(),
        content_type: CONTENT_TYPES[(hash % 5) as usize],
    }
}

/// The fixed recommendation set attached to every completed analysis. The
/// entries do not vary with the URL; a real analyzer would tailor them.
pub fn recommendations() -> Vec<Recommendation> {
    vec![
        Recommendation {
            id: "1".to_string(),
            kind: RecommendationKind::Content,
            title: "Optimize Content Structure".to_string(),
            description:
                "Add more subheadings and bullet points to improve readability and engagement"
                    .to_string(),
            impact: Level::Medium,
            effort: Level::Low,
        },
        Recommendation {
            id: "2".to_string(),
            kind: RecommendationKind::Seo,
            title: "Improve Meta Descriptions".to_string(),
            description:
                "Write compelling meta descriptions to increase click-through rates from search results"
                    .to_string(),
            impact: Level::High,
            effort: Level::Low,
        },
        Recommendation {
            id: "3".to_string(),
            kind: RecommendationKind::Engagement,
            title: "Add Interactive Elements".to_string(),
            description:
                "Include polls, quizzes, or interactive content to boost user engagement"
                    .to_string(),
            impact: Level::High,
            effort: Level::Medium,
        },
        Recommendation {
            id: "4".to_string(),
            kind: RecommendationKind::Monetization,
            title: "Optimize Ad Placement".to_string(),
            description: "Strategic ad positioning could increase revenue by 25-40%".to_string(),
            impact: Level::High,
            effort: Level::Medium,
        },
    ]
}

/// Weighs trend relevance, content quality, and sentiment into a 0-100
/// score. An empty trend selection counts as average relevance 0 rather
/// than dividing by zero.
pub fn overall_score(trends: &[TrendInsight], content: &ContentAnalysis) -> u8 {
    let avg_relevance = if trends.is_empty() {
        0.0
    } else {
        trends.iter().map(|t| t.relevance as f64).sum::<f64>() / trends.len() as f64
    };
    let content_score =
        (content.word_count as f64 / 10.0 + content.topics.len() as f64 * 10.0).min(100.0);
    let sentiment_bonus = match content.sentiment {
        Sentiment::Positive => 10.0,
        Sentiment::Neutral => 5.0,
        Sentiment::Negative => 0.0,
    };

    (avg_relevance * 0.4 + content_score * 0.4 + sentiment_bonus * 0.2).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.com/post";

    #[test]
    fn derivation_is_deterministic() {
        assert_eq!(url_hash(URL), url_hash(URL));
        let first = derive_content(URL);
        let second = derive_content(URL);
        assert_eq!(first.word_count, second.word_count);
        assert_eq!(first.topics, second.topics);
        assert_eq!(first.sentiment, second.sentiment);

        let trends_a = select_trends(URL);
        let trends_b = select_trends(URL);
        assert_eq!(trends_a.len(), trends_b.len());
        assert_eq!(
            overall_score(&trends_a, &first),
            overall_score(&trends_b, &second)
        );
    }

    #[test]
    fn title_uses_host_and_path() {
        assert_eq!(extract_title(URL), "Analysis for example.com/post");
        assert_eq!(
            extract_title("https://www.example.com/"),
            "Analysis for example.com"
        );
        assert_eq!(extract_title("https://blog.io"), "Analysis for blog.io");
    }

    #[test]
    fn title_falls_back_to_raw_input() {
        assert_eq!(extract_title("not-a-url"), "Analysis for not-a-url");
    }

    #[test]
    fn known_url_derivation() {
        // Checksum of "https://example.com/post" is 2329.
        assert_eq!(url_hash(URL), 2329);

        let content = derive_content(URL);
        assert_eq!(content.word_count, 1929);
        assert_eq!(content.reading_time, 10);
        assert_eq!(content.sentiment, Sentiment::Neutral);
        assert_eq!(content.topics.len(), 4);
        assert_eq!(content.key_phrases.len(), 4);
        assert_eq!(content.content_type, ContentType::Landing);

        let trends = select_trends(URL);
        assert_eq!(trends.len(), 3);
        assert_eq!(
            trends.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            vec!["1", "2", "4"]
        );

        assert_eq!(overall_score(&trends, &content), 72);
    }

    #[test]
    fn trend_selection_stays_within_bounds() {
        for url in [
            "https://a.com",
            "https://ab.com",
            "https://abc.com",
            "https://news.example.org/tech/article-42",
        ] {
            let trends = select_trends(url);
            assert!((2..=3).contains(&trends.len()), "url {}", url);
        }
    }

    #[test]
    fn score_stays_within_bounds() {
        for url in [
            "https://a.com",
            "https://ab.com",
            "https://abc.com",
            "https://example.com/very/long/path/with/segments",
        ] {
            let trends = select_trends(url);
            let content = derive_content(url);
            assert!(overall_score(&trends, &content) <= 100);
        }
    }

    #[test]
    fn empty_trend_selection_scores_without_panicking() {
        let content = derive_content(URL);
        let score = overall_score(&[], &content);
        // Only the content and sentiment terms contribute.
        assert_eq!(score, 41);
    }

    #[test]
    fn recommendations_are_the_fixed_set() {
        let recs = recommendations();
        assert_eq!(recs.len(), 4);
        assert_eq!(recs[0].kind, RecommendationKind::Content);
        assert_eq!(recs[3].kind, RecommendationKind::Monetization);
    }
}
