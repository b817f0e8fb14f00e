//! services/api/src/analysis/store.rs
//!
//! In-memory store of analysis records, the sole source of truth for
//! analysis state. Records live for the lifetime of the process; callers
//! only ever receive clones and never mutate stored records directly.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::Mutex;
use trendlens_core::domain::{AnalysisStatus, ContentAnalysis, WebsiteAnalysis};

struct StoredAnalysis {
    /// Insertion sequence, used to keep ids collision-free under rapid
    /// submissions and to break ordering ties between equal timestamps.
    seq: u64,
    record: WebsiteAnalysis,
}

/// Maps analysis ids to their records. Constructed once at the composition
/// root and shared through the [`AnalysisService`](super::AnalysisService);
/// nothing else mutates it.
#[derive(Default)]
pub struct AnalysisStore {
    records: Mutex<HashMap<String, StoredAnalysis>>,
    next_seq: AtomicU64,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fresh record in the `Analyzing` state and returns it.
    /// The id combines the submission timestamp with the insertion sequence
    /// so that rapid submissions never collide.
    pub async fn create(&self, url: &str) -> WebsiteAnalysis {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let analyzed_at = Utc::now();
        let record = WebsiteAnalysis {
            id: format!("analysis_{}_{}", analyzed_at.timestamp_millis(), seq),
            url: url.to_string(),
            title: "Analyzing...".to_string(),
            analyzed_at,
            status: AnalysisStatus::Analyzing,
            trends: Vec::new(),
            content_analysis: ContentAnalysis::pending(),
            recommendations: Vec::new(),
            score: 0,
        };

        let mut records = self.records.lock().await;
        records.insert(record.id.clone(), StoredAnalysis { seq, record: record.clone() });
        record
    }

    pub async fn get(&self, id: &str) -> Option<WebsiteAnalysis> {
        let records = self.records.lock().await;
        records.get(id).map(|stored| stored.record.clone())
    }

    /// All records sorted by submission time, most recent first. Equal
    /// timestamps keep their insertion order.
    pub async fn list_all(&self) -> Vec<WebsiteAnalysis> {
        let records = self.records.lock().await;
        let mut entries: Vec<(u64, WebsiteAnalysis)> = records
            .values()
            .map(|stored| (stored.seq, stored.record.clone()))
            .collect();
        entries.sort_by(|(seq_a, a), (seq_b, b)| {
            b.analyzed_at
                .cmp(&a.analyzed_at)
                .then(seq_a.cmp(seq_b))
        });
        entries.into_iter().map(|(_, record)| record).collect()
    }

    /// Overwrites a record with its terminal form. Returns `false` without
    /// inserting when the id is gone (deleted mid-flight) or the record has
    /// already left the `Analyzing` state; a terminal record is never
    /// rewound and a deleted one is never resurrected.
    pub(crate) async fn replace(&self, id: &str, record: WebsiteAnalysis) -> bool {
        let mut records = self.records.lock().await;
        match records.get_mut(id) {
            Some(stored) if stored.record.status == AnalysisStatus::Analyzing => {
                stored.record = record;
                true
            }
            _ => false,
        }
    }

    /// Removes a record, reporting whether one existed.
    pub async fn remove(&self, id: &str) -> bool {
        let mut records = self.records.lock().await;
        records.remove(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn create_returns_pending_record() {
        let store = AnalysisStore::new();
        let record = store.create("https://example.com").await;

        assert_eq!(record.status, AnalysisStatus::Analyzing);
        assert_eq!(record.title, "Analyzing...");
        assert!(record.trends.is_empty());
        assert!(record.recommendations.is_empty());
        assert_eq!(record.content_analysis.word_count, 0);

        let fetched = store.get(&record.id).await.unwrap();
        assert_eq!(fetched.status, AnalysisStatus::Analyzing);
        assert_eq!(fetched.url, "https://example.com");
    }

    #[tokio::test]
    async fn rapid_creates_get_distinct_ids() {
        let store = AnalysisStore::new();
        let mut ids = std::collections::HashSet::new();
        for _ in 0..100 {
            let record = store.create("https://example.com").await;
            assert!(ids.insert(record.id));
        }
    }

    #[tokio::test]
    async fn list_all_orders_most_recent_first() {
        let store = AnalysisStore::new();
        let first = store.create("https://a.com").await;
        let second = store.create("https://b.com").await;
        let third = store.create("https://c.com").await;

        let ids: Vec<String> = store.list_all().await.into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn list_all_breaks_timestamp_ties_by_insertion_order() {
        let store = AnalysisStore::new();
        let shared_instant = Utc::now() - Duration::seconds(60);
        {
            let mut records = store.records.lock().await;
            for (seq, id) in ["earlier", "later"].iter().enumerate() {
                let record = WebsiteAnalysis {
                    id: id.to_string(),
                    url: format!("https://{}.com", id),
                    title: "Analyzing...".to_string(),
                    analyzed_at: shared_instant,
                    status: AnalysisStatus::Analyzing,
                    trends: Vec::new(),
                    content_analysis: ContentAnalysis::pending(),
                    recommendations: Vec::new(),
                    score: 0,
                };
                records.insert(record.id.clone(), StoredAnalysis { seq: seq as u64, record });
            }
        }
        let newer = store.create("https://newest.com").await;

        let ids: Vec<String> = store.list_all().await.into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![newer.id, "earlier".to_string(), "later".to_string()]);
    }

    #[tokio::test]
    async fn replace_refuses_missing_and_terminal_records() {
        let store = AnalysisStore::new();
        let record = store.create("https://example.com").await;

        let mut completed = record.clone();
        completed.status = AnalysisStatus::Completed;
        assert!(store.replace(&record.id, completed.clone()).await);

        // Already terminal: a second replace must not rewind or rewrite.
        let mut rewound = record.clone();
        rewound.status = AnalysisStatus::Analyzing;
        assert!(!store.replace(&record.id, rewound).await);
        assert_eq!(
            store.get(&record.id).await.unwrap().status,
            AnalysisStatus::Completed
        );

        assert!(!store.replace("analysis_0_999", completed).await);
        assert!(store.get("analysis_0_999").await.is_none());
    }

    #[tokio::test]
    async fn remove_reports_existence() {
        let store = AnalysisStore::new();
        let record = store.create("https://example.com").await;

        assert!(store.remove(&record.id).await);
        assert!(store.get(&record.id).await.is_none());
        assert!(!store.remove(&record.id).await);
    }
}
