//! Prefix-matched typeahead over the symbol index.
//!
//! [`SuggestionEngine`] is the pure matcher, [`Debouncer`] coalesces
//! keystrokes into one computation per quiet window, and [`Typeahead`]
//! holds the input box and suggestion panel state.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::{SymbolIndex, SymbolRecord};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

/// Ordered, bounded list of matching records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SuggestionList(Vec<SymbolRecord>);

impl SuggestionList {
    pub fn records(&self) -> &[SymbolRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SymbolRecord> {
        self.0.get(index)
    }

    /// Display labels, `"{symbol} — {name}"`.
    pub fn labels(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|record| format!("{} — {}", record.symbol, record.name))
            .collect()
    }
}

impl From<Vec<SymbolRecord>> for SuggestionList {
    fn from(records: Vec<SymbolRecord>) -> Self {
        Self(records)
    }
}

/// Trim and uppercase raw input.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    index: Arc<SymbolIndex>,
    limit: usize,
}

impl SuggestionEngine {
    pub fn new(index: Arc<SymbolIndex>) -> Self {
        Self::with_limit(index, DEFAULT_SUGGESTION_LIMIT)
    }

    pub fn with_limit(index: Arc<SymbolIndex>, limit: usize) -> Self {
        Self { index, limit }
    }

    pub fn index(&self) -> &Arc<SymbolIndex> {
        &self.index
    }

    /// Records whose symbol or uppercased name starts with the normalized
    /// input, first `limit` in index order.
    pub fn suggest(&self, raw: &str) -> SuggestionList {
        let query = normalize_query(raw);
        if query.is_empty() || self.index.is_empty() {
            return SuggestionList::default();
        }

        let matches = self
            .index
            .records()
            .iter()
            .filter(|record| {
                record.symbol.as_str().starts_with(&query)
                    || record.name.to_uppercase().starts_with(&query)
            })
            .take(self.limit)
            .cloned()
            .collect::<Vec<_>>();

        debug!(%query, count = matches.len(), "suggestions computed");
        SuggestionList(matches)
    }
}

/// Single-slot cancellable timer.
///
/// Each [`schedule`](Debouncer::schedule) aborts whatever is still pending
/// and arms a new task that runs after the quiet window, so at most one
/// computation is ever pending and the latest event wins.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let window = self.window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            task.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A finalized symbol choice that starts the render pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitEvent {
    pub symbol: String,
}

/// Input box plus suggestion panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Typeahead {
    input: String,
    suggestions: SuggestionList,
    open: bool,
}

impl Typeahead {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &SuggestionList {
        &self.suggestions
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Replace the list; an empty list hides the panel.
    pub fn show(&mut self, suggestions: SuggestionList) {
        self.open = !suggestions.is_empty();
        self.suggestions = suggestions;
    }

    /// Apply a debounced result computed for `input`. Results for an input
    /// that is no longer in the box are dropped.
    pub fn apply(&mut self, input: &str, suggestions: SuggestionList) -> bool {
        if self.input != input {
            return false;
        }
        self.show(suggestions);
        true
    }

    pub fn close(&mut self) {
        self.show(SuggestionList::default());
    }

    /// Click on the suggestion at `index`.
    pub fn select(&mut self, index: usize) -> Option<CommitEvent> {
        if !self.open {
            return None;
        }
        let symbol = self.suggestions.get(index)?.symbol.to_string();
        self.close();
        Some(CommitEvent { symbol })
    }

    /// Submit the raw input. Blank input commits nothing.
    pub fn submit(&mut self) -> Option<CommitEvent> {
        let symbol = normalize_query(&self.input);
        if symbol.is_empty() {
            return None;
        }
        self.close();
        Some(CommitEvent { symbol })
    }

    /// Click anywhere outside the input and suggestion region.
    pub fn click_outside(&mut self) {
        self.close();
    }
}
