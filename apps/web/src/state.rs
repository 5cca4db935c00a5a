use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::filters::Filters;
use crate::jobs::{Jobs, JobsClient, JobsTarget};
use crate::notify::Notifier;
use crate::storage::KeyValueStore;
use crate::view::{el, Action, Node};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub notifier: Notifier,
    pub filters: Arc<Filters>,
    /// Holds its own handle on `filters` to read the active set.
    pub jobs: Arc<Jobs>,
}

impl AppState {
    /// Builds filters first, then jobs, and starts the initial jobs load.
    /// Must be called inside a Tokio runtime.
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let notifier = Notifier::new();

        let filters = Arc::new(Filters::load(store, notifier.clone()));
        info!(active = ?filters.get(), "Filters loaded");

        let client = JobsClient::new(config.fetch_timeout).context("building jobs HTTP client")?;
        let target = JobsTarget::from_page_url(&config.page_url)
            .with_context(|| format!("resolving jobs target from {}", config.page_url))?;
        if target.is_diagnostic() {
            info!("Page URL carries the error flag, first jobs load will fail");
        }
        info!(target = %target.current(), "Jobs target resolved");

        let jobs = Arc::new(Jobs::new(
            Arc::clone(&filters),
            client,
            target,
            config.fetch_delay,
            notifier.clone(),
        ));
        jobs.spawn_load();

        Ok(Self {
            config,
            notifier,
            filters,
            jobs,
        })
    }

    pub fn dispatch(&self, action: Action) {
        match action {
            Action::Toggle(keyword) => {
                let removing = self.filters.contains(&keyword);
                self.filters.toggle(&keyword);
                info!(keyword = %keyword, removing, "Filter toggled");
            }
            Action::Clear => self.filters.clear(),
            Action::Reload => {
                // Not awaited: the page re-renders when the load reports completion.
                self.jobs.spawn_load();
            }
        }
    }

    /// Full page body: header, active filters, job listings.
    pub fn render(&self) -> Node {
        el("div")
            .class("page")
            .child(
                el("header")
                    .class("page__header")
                    .child(el("h1").text("Job listings")),
            )
            .child(
                el("main")
                    .class("page__main")
                    .child(self.filters.render())
                    .child(self.jobs.render()),
            )
            .into()
    }
}
