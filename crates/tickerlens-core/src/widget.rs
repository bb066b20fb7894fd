//! Host-facing facade: routes page events to the typeahead and orchestrator.

use std::sync::Arc;

use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::data_source::PanelSource;
use crate::orchestrator::{lock, RunOutcome, SearchOrchestrator, SharedSurface};
use crate::suggest::{CommitEvent, Debouncer, SuggestionEngine};
use crate::surface::SurfaceView;
use crate::symbol_index::DirectoryLoader;
use crate::{HttpApiSource, ReqwestHttpClient, SymbolIndex, WidgetConfig};

pub struct LookupWidget {
    engine: SuggestionEngine,
    orchestrator: SearchOrchestrator,
    debouncer: Debouncer,
}

impl LookupWidget {
    pub fn new(index: Arc<SymbolIndex>, source: Arc<dyn PanelSource>, config: &WidgetConfig) -> Self {
        let surface = SharedSurface::default();
        Self {
            engine: SuggestionEngine::with_limit(index.clone(), config.suggestion_limit),
            orchestrator: SearchOrchestrator::new(index, source, surface, config),
            debouncer: Debouncer::new(config.debounce()),
        }
    }

    /// Production wiring: reqwest transport, directory loaded once (an
    /// unreachable directory leaves suggestions empty).
    pub async fn connect(config: &WidgetConfig) -> Self {
        let client = Arc::new(ReqwestHttpClient::new(&config.user_agent));
        let index = DirectoryLoader::from_config(client.clone(), config)
            .load_or_empty(&config.directory)
            .await;
        let source = HttpApiSource::from_config(client, config);
        Self::new(Arc::new(index), Arc::new(source), config)
    }

    pub fn with_clock(mut self, clock: fn() -> OffsetDateTime) -> Self {
        self.orchestrator = self.orchestrator.with_clock(clock);
        self
    }

    pub fn engine(&self) -> &SuggestionEngine {
        &self.engine
    }

    pub fn orchestrator(&self) -> &SearchOrchestrator {
        &self.orchestrator
    }

    pub fn surface(&self) -> &SharedSurface {
        self.orchestrator.surface()
    }

    pub fn view(&self) -> SurfaceView {
        lock(self.surface()).view()
    }

    /// A keystroke: the box takes `text` now, suggestions follow after the
    /// debounce window if nothing else is typed.
    pub fn input(&mut self, text: &str) {
        lock(self.surface()).typeahead.set_input(text);

        let engine = self.engine.clone();
        let surface = self.surface().clone();
        let text = text.to_owned();
        self.debouncer.schedule(async move {
            let suggestions = engine.suggest(&text);
            if !lock(&surface).typeahead.apply(&text, suggestions) {
                debug!(input = %text, "dropping stale suggestions");
            }
        });
    }

    /// Compute suggestions for the current input without waiting.
    pub fn suggest_now(&mut self) {
        self.debouncer.cancel();
        let mut surface = lock(self.surface());
        let suggestions = self.engine.suggest(surface.typeahead.input());
        surface.typeahead.show(suggestions);
    }

    /// Click on suggestion `index`.
    pub fn select(&mut self, index: usize) -> Option<JoinHandle<RunOutcome>> {
        let commit = lock(self.surface()).typeahead.select(index);
        self.commit(commit)
    }

    /// Submit the form with whatever is in the input box.
    pub fn submit(&mut self) -> Option<JoinHandle<RunOutcome>> {
        let commit = lock(self.surface()).typeahead.submit();
        self.commit(commit)
    }

    pub fn click_outside(&mut self) {
        lock(self.surface()).typeahead.click_outside();
    }

    pub fn select_filing_type(&self, form: &str) -> bool {
        lock(self.surface()).select_filing_type(form)
    }

    pub fn toggle_filings(&self) -> Option<bool> {
        lock(self.surface()).toggle_filings()
    }

    pub fn image_failed(&self, index: usize) -> bool {
        lock(self.surface()).news_image_failed(index)
    }

    fn commit(&mut self, commit: Option<CommitEvent>) -> Option<JoinHandle<RunOutcome>> {
        let commit = commit?;
        self.debouncer.cancel();
        Some(self.orchestrator.on_commit(commit.symbol))
    }
}
