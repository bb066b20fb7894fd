//! Page state shared by the typeahead and the search runs.
//!
//! The surface owns one instance of every visual component. Hosts read it
//! through [`RenderSurface::view`]; nothing here touches a real page.

use serde::Serialize;
use tracing::debug;

use crate::chart::{ChartSlot, MountedChart};
use crate::filings::{FilingPanel, FilingPanelView};
use crate::news::NewsPanel;
use crate::suggest::Typeahead;
use crate::FormType;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderSurface {
    search_active: bool,
    identity: Option<String>,
    chart: ChartSlot,
    filings: Option<FilingPanel>,
    news: Option<NewsPanel>,
    news_disposals: u64,
    pub typeahead: Typeahead,
}

impl RenderSurface {
    pub fn new(chart: ChartSlot) -> Self {
        Self {
            chart,
            ..Self::default()
        }
    }

    pub fn is_search_active(&self) -> bool {
        self.search_active
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn chart(&self) -> &ChartSlot {
        &self.chart
    }

    pub fn filings(&self) -> Option<&FilingPanel> {
        self.filings.as_ref()
    }

    pub fn news(&self) -> Option<&NewsPanel> {
        self.news.as_ref()
    }

    pub fn news_disposals(&self) -> u64 {
        self.news_disposals
    }

    /// Switch the page into its results layout. Idempotent.
    pub fn activate_search(&mut self) {
        self.search_active = true;
    }

    pub fn set_identity(&mut self, identity: impl Into<String>) {
        self.identity = Some(identity.into());
    }

    pub fn mount_chart(&mut self, symbol: &str) -> &MountedChart {
        self.chart.replace(symbol)
    }

    pub fn set_filings(&mut self, panel: FilingPanel) {
        self.filings = Some(panel);
    }

    pub fn clear_filings(&mut self) {
        if let Some(old) = self.filings.take() {
            debug!(ticker = old.ticker(), "filings panel cleared");
        }
    }

    /// Dispose the current news panel, then install `panel`.
    pub fn set_news(&mut self, panel: NewsPanel) {
        self.dispose_news();
        self.news = Some(panel);
    }

    pub fn dispose_news(&mut self) {
        if let Some(old) = self.news.take() {
            self.news_disposals += 1;
            debug!(ticker = old.ticker(), "news panel disposed");
        }
    }

    /// Click on a filing type button.
    pub fn select_filing_type(&mut self, form: &str) -> bool {
        let form = FormType::new(form);
        self.filings
            .as_mut()
            .and_then(FilingPanel::selector_mut)
            .is_some_and(|selector| selector.select(&form))
    }

    /// Click on the filings disclosure toggle. `None` when no selector exists.
    pub fn toggle_filings(&mut self) -> Option<bool> {
        self.filings
            .as_mut()
            .and_then(FilingPanel::selector_mut)
            .map(|selector| selector.toggle())
    }

    pub fn news_image_failed(&mut self, index: usize) -> bool {
        self.news
            .as_mut()
            .is_some_and(|panel| panel.image_failed(index))
    }

    pub fn view(&self) -> SurfaceView {
        SurfaceView {
            search_active: self.search_active,
            input: self.typeahead.input().to_owned(),
            suggestions_open: self.typeahead.is_open(),
            suggestions: self.typeahead.suggestions().labels(),
            identity: self.identity.clone(),
            chart: self.chart.current().cloned(),
            filings: self.filings.as_ref().map(FilingPanel::view),
            news: self.news.clone(),
        }
    }
}

/// Serializable snapshot of everything visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurfaceView {
    pub search_active: bool,
    pub input: String,
    pub suggestions_open: bool,
    pub suggestions: Vec<String>,
    pub identity: Option<String>,
    pub chart: Option<MountedChart>,
    pub filings: Option<FilingPanelView>,
    pub news: Option<NewsPanel>,
}
