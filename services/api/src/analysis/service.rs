//! services/api/src/analysis/service.rs
//!
//! Drives an analysis record from `Analyzing` to a terminal state. Each
//! submission schedules a one-shot deferred completion; the pending task is
//! tracked in an arena keyed by analysis id so a delete or shutdown can
//! cancel it instead of letting a stale completion fire into the void.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use trendlens_core::domain::{AnalysisStatus, WebsiteAnalysis};
use trendlens_core::insight;

use super::store::AnalysisStore;

/// Errors surfaced synchronously to the submitter.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("'{0}' is not a valid absolute URL")]
    InvalidUrl(String),
}

/// One scheduled completion awaiting its delay.
struct PendingCompletion {
    token: CancellationToken,
    status_tx: watch::Sender<AnalysisStatus>,
}

/// The analysis lifecycle service. Cheap to clone; all clones share the
/// same store and pending-task arena.
#[derive(Clone)]
pub struct AnalysisService {
    store: Arc<AnalysisStore>,
    pending: Arc<Mutex<HashMap<String, PendingCompletion>>>,
    delay: Duration,
}

impl AnalysisService {
    /// `delay` is how long the simulated analysis takes before the record
    /// turns terminal.
    pub fn new(delay: Duration) -> Self {
        Self {
            store: Arc::new(AnalysisStore::new()),
            pending: Arc::new(Mutex::new(HashMap::new())),
            delay,
        }
    }

    /// Validates the URL, creates the pending record, and schedules its
    /// completion. The `Analyzing` record is returned immediately; the
    /// store is left untouched when validation fails.
    pub async fn submit(&self, url: &str) -> Result<WebsiteAnalysis, AnalysisError> {
        let parsed =
            url::Url::parse(url).map_err(|_| AnalysisError::InvalidUrl(url.to_string()))?;
        if !parsed.has_host() {
            return Err(AnalysisError::InvalidUrl(url.to_string()));
        }

        let record = self.store.create(url).await;
        info!(id = %record.id, url, "analysis submitted");

        let token = CancellationToken::new();
        let (status_tx, _status_rx) = watch::channel(AnalysisStatus::Analyzing);
        {
            let mut pending = self.pending.lock().await;
            pending.insert(
                record.id.clone(),
                PendingCompletion { token: token.clone(), status_tx },
            );
        }

        let store = self.store.clone();
        let pending = self.pending.clone();
        let delay = self.delay;
        let id = record.id.clone();
        let url = url.to_string();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    info!(id = %id, "scheduled analysis completion cancelled");
                    pending.lock().await.remove(&id);
                }
                _ = tokio::time::sleep(delay) => {
                    complete(&store, &pending, &id, &url).await;
                }
            }
        });

        Ok(record)
    }

    pub async fn get(&self, id: &str) -> Option<WebsiteAnalysis> {
        self.store.get(id).await
    }

    pub async fn list_all(&self) -> Vec<WebsiteAnalysis> {
        self.store.list_all().await
    }

    /// Removes a record and cancels its scheduled completion, if any.
    /// Returns whether a record existed.
    pub async fn delete(&self, id: &str) -> bool {
        if let Some(entry) = self.pending.lock().await.remove(id) {
            entry.token.cancel();
        }
        let existed = self.store.remove(id).await;
        if existed {
            info!(id, "analysis deleted");
        }
        existed
    }

    /// Subscribes to the status of a still-pending analysis. Returns `None`
    /// once the record is terminal (or gone); callers then read the store
    /// directly. This is the push-based alternative to polling `get`.
    pub async fn watch(&self, id: &str) -> Option<watch::Receiver<AnalysisStatus>> {
        let pending = self.pending.lock().await;
        pending.get(id).map(|entry| entry.status_tx.subscribe())
    }

    /// Cancels every scheduled completion. Records already terminal are
    /// left as they are; pending ones simply stay `Analyzing`.
    pub async fn shutdown(&self) {
        let mut pending = self.pending.lock().await;
        if !pending.is_empty() {
            info!(count = pending.len(), "cancelling pending analyses");
        }
        for (_, entry) in pending.drain() {
            entry.token.cancel();
        }
    }
}

/// Finishes one analysis: derives the terminal record from the URL and
/// swaps it into the store. The submission timestamp is preserved; history
/// ordering reflects when a site was submitted, not when analysis finished.
async fn complete(
    store: &AnalysisStore,
    pending: &Mutex<HashMap<String, PendingCompletion>>,
    id: &str,
    url: &str,
) {
    let Some(current) = store.get(id).await else {
        // Deleted after the delay elapsed but before we ran.
        pending.lock().await.remove(id);
        return;
    };

    let trends = insight::select_trends(url);
    let content_analysis = insight::derive_content(url);
    let score = insight::overall_score(&trends, &content_analysis);
    let completed = WebsiteAnalysis {
        id: id.to_string(),
        url: url.to_string(),
        title: insight::extract_title(url),
        analyzed_at: current.analyzed_at,
        status: AnalysisStatus::Completed,
        trends,
        content_analysis,
        recommendations: insight::recommendations(),
        score,
    };

    let applied = store.replace(id, completed).await;
    if applied {
        info!(id, score, "analysis completed");
    } else {
        warn!(id, "analysis record vanished before completion could apply");
    }

    if let Some(entry) = pending.lock().await.remove(id) {
        if applied {
            entry.status_tx.send_replace(AnalysisStatus::Completed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendlens_core::domain::Sentiment;

    const DELAY: Duration = Duration::from_millis(3000);
    const URL: &str = "https://example.com/post";

    fn service() -> AnalysisService {
        AnalysisService::new(DELAY)
    }

    #[tokio::test(start_paused = true)]
    async fn submit_returns_analyzing_record_immediately() {
        let service = service();
        let record = service.submit(URL).await.unwrap();

        assert_eq!(record.status, AnalysisStatus::Analyzing);
        assert_eq!(record.title, "Analyzing...");
        assert!(record.trends.is_empty());
        assert_eq!(record.score, 0);

        let fetched = service.get(&record.id).await.unwrap();
        assert_eq!(fetched.status, AnalysisStatus::Analyzing);
    }

    #[tokio::test(start_paused = true)]
    async fn analysis_completes_after_the_delay() {
        let service = service();
        let record = service.submit(URL).await.unwrap();

        tokio::time::sleep(DELAY + Duration::from_millis(100)).await;

        let completed = service.get(&record.id).await.unwrap();
        assert_eq!(completed.status, AnalysisStatus::Completed);
        assert_eq!(completed.title, "Analysis for example.com/post");
        assert_eq!(completed.analyzed_at, record.analyzed_at);
        assert!((2..=3).contains(&completed.trends.len()));
        assert_eq!(completed.recommendations.len(), 4);
        assert!(completed.score <= 100);
    }

    #[tokio::test(start_paused = true)]
    async fn watch_resolves_when_analysis_turns_terminal() {
        let service = service();
        let record = service.submit(URL).await.unwrap();

        let mut status_rx = service.watch(&record.id).await.unwrap();
        assert_eq!(*status_rx.borrow(), AnalysisStatus::Analyzing);

        status_rx.changed().await.unwrap();
        assert_eq!(*status_rx.borrow_and_update(), AnalysisStatus::Completed);

        // The pending entry is gone once terminal; consumers read the store.
        assert!(service.watch(&record.id).await.is_none());
        assert_eq!(
            service.get(&record.id).await.unwrap().status,
            AnalysisStatus::Completed
        );
    }

    #[tokio::test(start_paused = true)]
    async fn delete_cancels_the_scheduled_completion() {
        let service = service();
        let record = service.submit(URL).await.unwrap();

        assert!(service.delete(&record.id).await);
        assert!(service.get(&record.id).await.is_none());

        // Let the original delay elapse: the record must stay gone.
        tokio::time::sleep(DELAY * 2).await;
        assert!(service.get(&record.id).await.is_none());
        assert!(service.watch(&record.id).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn delete_reports_unknown_ids() {
        let service = service();
        assert!(!service.delete("analysis_0_0").await);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_urls_are_rejected_without_touching_the_store() {
        let service = service();

        for bad in ["not-a-url", "", "/relative/path", "data:text/plain,hi"] {
            let err = service.submit(bad).await.unwrap_err();
            assert!(matches!(err, AnalysisError::InvalidUrl(_)), "input {:?}", bad);
        }
        assert!(service.list_all().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn same_url_always_derives_the_same_result() {
        let first = service();
        let second = service();
        let a = first.submit(URL).await.unwrap();
        let b = second.submit(URL).await.unwrap();

        tokio::time::sleep(DELAY + Duration::from_millis(100)).await;

        let a = first.get(&a.id).await.unwrap();
        let b = second.get(&b.id).await.unwrap();
        assert_eq!(a.score, b.score);
        assert_eq!(a.trends.len(), b.trends.len());
        assert_eq!(a.content_analysis.word_count, b.content_analysis.word_count);
        assert_eq!(a.content_analysis.sentiment, b.content_analysis.sentiment);
        assert_eq!(a.content_analysis.sentiment, Sentiment::Neutral);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_everything_pending() {
        let service = service();
        let first = service.submit("https://a.com").await.unwrap();
        let second = service.submit("https://b.com").await.unwrap();

        service.shutdown().await;
        tokio::time::sleep(DELAY * 2).await;

        // Records survive but never turn terminal.
        assert_eq!(
            service.get(&first.id).await.unwrap().status,
            AnalysisStatus::Analyzing
        );
        assert_eq!(
            service.get(&second.id).await.unwrap().status,
            AnalysisStatus::Analyzing
        );
    }

    #[tokio::test(start_paused = true)]
    async fn history_lists_most_recent_submission_first() {
        let service = service();
        let first = service.submit("https://a.com").await.unwrap();
        let second = service.submit("https://b.com").await.unwrap();

        let ids: Vec<String> = service.list_all().await.into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
