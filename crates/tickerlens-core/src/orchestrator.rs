//! Commit handling: identity, chart, then filings and news in order.
//!
//! Every run takes a generation number from a shared counter. A newer commit
//! bumps the counter and aborts the previous task; a run that is already
//! past an await point checks its generation before each write, so it can
//! never overwrite the panels of the run that replaced it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use time::OffsetDateTime;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

use crate::data_source::{FilingsRequest, NewsRequest, PanelSource};
use crate::filings::FilingPanel;
use crate::news::NewsPanel;
use crate::surface::RenderSurface;
use crate::{SymbolIndex, WidgetConfig};

pub type SharedSurface = Arc<Mutex<RenderSurface>>;

pub(crate) fn lock(surface: &Mutex<RenderSurface>) -> MutexGuard<'_, RenderSurface> {
    surface.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Completed,
    Superseded,
}

#[derive(Clone)]
struct RunContext {
    index: Arc<SymbolIndex>,
    source: Arc<dyn PanelSource>,
    surface: SharedSurface,
    generation: Arc<AtomicU64>,
    filings_top: u8,
    news_limit: u8,
    clock: fn() -> OffsetDateTime,
}

impl RunContext {
    /// Apply `write` only while `generation` is the latest commit.
    fn write(&self, generation: u64, write: impl FnOnce(&mut RenderSurface)) -> bool {
        let mut surface = lock(&self.surface);
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        write(&mut surface);
        true
    }

    async fn run(&self, query: String, generation: u64) -> RunOutcome {
        info!(%query, generation, "search committed");

        let identity = self
            .index
            .lookup(&query)
            .map(|record| record.display_name())
            .unwrap_or_else(|| query.clone());

        let started = self.write(generation, |surface| {
            surface.activate_search();
            surface.set_identity(identity);
            surface.mount_chart(&query);
            surface.clear_filings();
            surface.dispose_news();
        });
        if !started {
            return self.superseded(&query, generation);
        }

        let filings = self
            .source
            .filings(FilingsRequest::new(query.as_str(), self.filings_top))
            .await;
        let panel = match filings {
            Ok(records) => {
                debug!(%query, count = records.len(), "filings loaded");
                FilingPanel::from_filings(query.as_str(), &records)
            }
            Err(error) => {
                warn!(%query, code = error.code(), %error, "filings panel failed");
                FilingPanel::failed(query.as_str(), &error)
            }
        };
        if !self.write(generation, |surface| surface.set_filings(panel)) {
            return self.superseded(&query, generation);
        }

        let news = self
            .source
            .news(NewsRequest::new(query.as_str(), self.news_limit))
            .await;
        if let Err(error) = &news {
            warn!(%query, code = error.code(), %error, "news panel failed");
        }
        let panel = NewsPanel::from_outcome(&query, news, (self.clock)());
        if !self.write(generation, |surface| surface.set_news(panel)) {
            return self.superseded(&query, generation);
        }

        if !self.write(generation, |surface| surface.typeahead.clear_input()) {
            return self.superseded(&query, generation);
        }
        RunOutcome::Completed
    }

    fn superseded(&self, query: &str, generation: u64) -> RunOutcome {
        debug!(%query, generation, "search superseded");
        RunOutcome::Superseded
    }
}

/// Top-level controller for committed searches.
pub struct SearchOrchestrator {
    context: Arc<RunContext>,
    pending: Mutex<Option<AbortHandle>>,
}

impl SearchOrchestrator {
    pub fn new(
        index: Arc<SymbolIndex>,
        source: Arc<dyn PanelSource>,
        surface: SharedSurface,
        config: &WidgetConfig,
    ) -> Self {
        Self {
            context: Arc::new(RunContext {
                index,
                source,
                surface,
                generation: Arc::new(AtomicU64::new(0)),
                filings_top: config.filings_top,
                news_limit: config.news_limit,
                clock: OffsetDateTime::now_utc,
            }),
            pending: Mutex::new(None),
        }
    }

    /// Replace the wall clock used for relative news times.
    pub fn with_clock(mut self, clock: fn() -> OffsetDateTime) -> Self {
        let mut context = (*self.context).clone();
        context.clock = clock;
        self.context = Arc::new(context);
        self
    }

    pub fn surface(&self) -> &SharedSurface {
        &self.context.surface
    }

    pub fn index(&self) -> &Arc<SymbolIndex> {
        &self.context.index
    }

    /// Generation of the most recent commit.
    pub fn generation(&self) -> u64 {
        self.context.generation.load(Ordering::SeqCst)
    }

    /// Start a run in the background, superseding any run in flight.
    pub fn on_commit(&self, query: impl Into<String>) -> JoinHandle<RunOutcome> {
        let query = query.into();
        let generation = self.begin();
        let context = self.context.clone();
        let handle = tokio::spawn(async move { context.run(query, generation).await });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        *pending = Some(handle.abort_handle());
        handle
    }

    /// Run a commit to completion on the caller's task.
    pub async fn run(&self, query: impl Into<String>) -> RunOutcome {
        let generation = self.begin();
        self.context.run(query.into(), generation).await
    }

    fn begin(&self) -> u64 {
        let generation = self.context.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(previous) = previous {
            previous.abort();
        }
        generation
    }
}
