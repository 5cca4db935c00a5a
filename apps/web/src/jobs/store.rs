use std::sync::{Arc, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::filters::Filters;
use crate::jobs::client::JobsClient;
use crate::jobs::models::JobPosting;
use crate::jobs::target::JobsTarget;
use crate::notify::Notifier;

/// Owns the fetched postings and the loading flag.
///
/// Load cycle: `idle -> loading -> loaded`. A failed fetch loads an empty list, so
/// "failed" and "loaded nothing" look the same to callers.
pub struct Jobs {
    filters: Arc<Filters>,
    client: JobsClient,
    target: Mutex<JobsTarget>,
    fetch_delay: Duration,
    state: RwLock<JobsState>,
    notifier: Notifier,
}

#[derive(Debug, Default)]
struct JobsState {
    postings: Vec<JobPosting>,
    loading: bool,
    // Bumped when a load starts. Only the newest load may publish its result.
    generation: u64,
}

impl Jobs {
    pub fn new(
        filters: Arc<Filters>,
        client: JobsClient,
        target: JobsTarget,
        fetch_delay: Duration,
        notifier: Notifier,
    ) -> Self {
        Self {
            filters,
            client,
            target: Mutex::new(target),
            fetch_delay,
            state: RwLock::new(JobsState::default()),
            notifier,
        }
    }

    pub fn filters(&self) -> &Arc<Filters> {
        &self.filters
    }

    pub fn is_loading(&self) -> bool {
        self.read_state().loading
    }

    pub fn postings(&self) -> Vec<JobPosting> {
        self.read_state().postings.clone()
    }

    /// Starts a load in the background. The loading flag is raised before this returns.
    pub fn spawn_load(self: &Arc<Self>) -> JoinHandle<()> {
        let generation = self.begin_load();
        let jobs = Arc::clone(self);
        tokio::spawn(async move { jobs.complete_load(generation).await })
    }

    /// Raises the loading flag, fetches, replaces the postings and lowers the flag.
    pub async fn load_jobs(&self) {
        let generation = self.begin_load();
        self.complete_load(generation).await;
    }

    /// Waits out the artificial delay, then fetches the current target.
    /// Any failure is logged and yields an empty list.
    pub async fn get_jobs(&self) -> Vec<JobPosting> {
        tokio::time::sleep(self.fetch_delay).await;

        let url = self.lock_target().current().clone();
        match self.client.fetch(&url).await {
            Ok(postings) => postings.into_iter().map(JobPosting::with_keywords).collect(),
            Err(e) => {
                warn!(%url, "Jobs failed to load: {e}");
                Vec::new()
            }
        }
    }

    /// Postings carrying every active filter, in fetched order.
    /// With no active filter this is a copy of all postings.
    pub fn get_filtered_jobs(&self) -> Vec<JobPosting> {
        let active = self.filters.get();
        let state = self.read_state();
        if active.is_empty() {
            return state.postings.clone();
        }
        state
            .postings
            .iter()
            .filter(|posting| posting.matches(&active))
            .cloned()
            .collect()
    }

    fn begin_load(&self) -> u64 {
        let generation = {
            let mut state = self.write_state();
            state.generation += 1;
            state.loading = true;
            state.generation
        };
        debug!(generation, "Jobs load started");
        self.notifier.notify();
        generation
    }

    async fn complete_load(&self, generation: u64) {
        let postings = self.get_jobs().await;

        {
            let mut target = self.lock_target();
            if target.is_diagnostic() {
                info!("Diagnostic failing load done, restoring the listings target");
                target.reset();
            }
        }

        let count = postings.len();
        {
            let mut state = self.write_state();
            if state.generation != generation {
                debug!(
                    generation,
                    latest = state.generation,
                    "Dropping result of superseded jobs load"
                );
                return;
            }
            state.postings = postings;
            state.loading = false;
        }

        info!(count, "Jobs load finished");
        self.notifier.notify();
    }

    fn lock_target(&self) -> MutexGuard<'_, JobsTarget> {
        self.target.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn read_state(&self) -> RwLockReadGuard<'_, JobsState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, JobsState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
impl Jobs {
    pub fn set_postings(&self, postings: Vec<JobPosting>) {
        let mut state = self.write_state();
        state.postings = postings;
        state.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use super::*;
    use crate::jobs::test_support::{closed_port_url, fixture_postings, serve_fixtures};
    use crate::storage::{KeyValueStore, MemoryStore};

    fn jobs_at(page_url: &Url, fetch_delay: Duration, filters: &[&str]) -> Jobs {
        let notifier = Notifier::new();
        let store = Arc::new(MemoryStore::new());
        store
            .set(
                crate::filters::STORAGE_KEY,
                &serde_json::to_string(filters).unwrap(),
            )
            .unwrap();
        let filters = Arc::new(Filters::load(store, notifier.clone()));
        Jobs::new(
            filters,
            JobsClient::new(Duration::from_secs(5)).unwrap(),
            JobsTarget::from_page_url(page_url).unwrap(),
            fetch_delay,
            notifier,
        )
    }

    fn offline_jobs(filters: &[&str]) -> Jobs {
        let page = Url::parse("http://127.0.0.1:9/").unwrap();
        let jobs = jobs_at(&page, Duration::ZERO, filters);
        jobs.set_postings(fixture_postings());
        jobs
    }

    fn companies(postings: &[JobPosting]) -> Vec<&str> {
        postings.iter().map(|p| p.company.as_str()).collect()
    }

    #[test]
    fn test_starts_idle_and_empty() {
        let jobs = jobs_at(&Url::parse("http://127.0.0.1:9/").unwrap(), Duration::ZERO, &[]);
        assert!(!jobs.is_loading());
        assert!(jobs.postings().is_empty());
    }

    #[test]
    fn test_no_filters_returns_all_in_order() {
        let jobs = offline_jobs(&[]);
        assert_eq!(
            companies(&jobs.get_filtered_jobs()),
            vec!["Photosnap", "Manage", "Account", "MyHome"]
        );
    }

    #[test]
    fn test_unfiltered_result_is_detached_copy() {
        let jobs = offline_jobs(&[]);
        let mut view = jobs.get_filtered_jobs();
        view.clear();
        assert_eq!(jobs.get_filtered_jobs().len(), 4);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let jobs = offline_jobs(&["Frontend", "CSS"]);
        assert_eq!(
            companies(&jobs.get_filtered_jobs()),
            vec!["Photosnap", "MyHome"]
        );
    }

    #[test]
    fn test_filtered_view_follows_toggles() {
        let jobs = offline_jobs(&["Frontend", "CSS"]);
        jobs.filters().toggle("Senior");
        assert_eq!(companies(&jobs.get_filtered_jobs()), vec!["Photosnap"]);

        jobs.filters().clear();
        jobs.filters().toggle("React");
        assert_eq!(companies(&jobs.get_filtered_jobs()), vec!["Manage", "Account"]);
    }

    #[test]
    fn test_unmatched_filter_yields_nothing() {
        let jobs = offline_jobs(&["Haskell"]);
        assert!(jobs.get_filtered_jobs().is_empty());
    }

    #[tokio::test]
    async fn test_load_jobs_attaches_keywords() {
        let base = serve_fixtures().await;
        let jobs = jobs_at(&base, Duration::ZERO, &[]);

        jobs.load_jobs().await;

        assert!(!jobs.is_loading());
        let postings = jobs.postings();
        assert_eq!(postings.len(), 4);
        assert_eq!(
            postings[0].keywords,
            vec!["Frontend", "Senior", "HTML", "CSS", "JavaScript"]
        );
    }

    #[tokio::test]
    async fn test_load_jobs_notifies_start_and_finish() {
        let base = serve_fixtures().await;
        let jobs = jobs_at(&base, Duration::ZERO, &[]);
        let before = jobs.notifier.revision();

        jobs.load_jobs().await;

        assert_eq!(jobs.notifier.revision(), before + 2);
    }

    #[tokio::test]
    async fn test_not_found_status_loads_empty() {
        let base = serve_fixtures().await;
        let jobs = jobs_at(&base.join("?error").unwrap(), Duration::ZERO, &[]);
        jobs.load_jobs().await;
        assert!(!jobs.is_loading());
        assert!(jobs.postings().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_loads_empty() {
        let base = serve_fixtures().await;
        let jobs = jobs_at(&base.join("malformed/").unwrap(), Duration::ZERO, &[]);
        jobs.load_jobs().await;
        assert!(!jobs.is_loading());
        assert!(jobs.postings().is_empty());
    }

    #[tokio::test]
    async fn test_network_fault_loads_empty() {
        let url = closed_port_url().await;
        let jobs = jobs_at(&url, Duration::ZERO, &[]);
        jobs.load_jobs().await;
        assert!(!jobs.is_loading());
        assert!(jobs.postings().is_empty());
    }

    #[tokio::test]
    async fn test_failure_replaces_previous_postings() {
        let url = closed_port_url().await;
        let jobs = jobs_at(&url, Duration::ZERO, &[]);
        jobs.set_postings(fixture_postings());
        jobs.load_jobs().await;
        assert!(jobs.postings().is_empty());
    }

    #[tokio::test]
    async fn test_error_flag_fails_first_load_only() {
        let base = serve_fixtures().await;
        let jobs = jobs_at(&base.join("?error").unwrap(), Duration::ZERO, &[]);

        jobs.load_jobs().await;
        assert!(jobs.postings().is_empty());

        jobs.load_jobs().await;
        assert_eq!(jobs.postings().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_spans_artificial_delay() {
        let url = closed_port_url().await;
        let jobs = Arc::new(jobs_at(&url, Duration::from_millis(3000), &[]));

        let handle = jobs.spawn_load();
        assert!(jobs.is_loading(), "flag is raised before the task runs");

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(jobs.is_loading());

        handle.await.unwrap();
        assert!(!jobs.is_loading());
    }

    #[tokio::test]
    async fn test_superseded_load_does_not_publish() {
        let base = serve_fixtures().await;
        let jobs = jobs_at(&base, Duration::ZERO, &[]);

        let first = jobs.begin_load();
        let second = jobs.begin_load();

        jobs.complete_load(first).await;
        assert!(jobs.is_loading(), "older load must not lower the flag");
        assert!(jobs.postings().is_empty());

        jobs.complete_load(second).await;
        assert!(!jobs.is_loading());
        assert_eq!(jobs.postings().len(), 4);
    }
}
