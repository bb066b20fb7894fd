//! Filing grouping and the filings panel.
//!
//! The panel is explicit state (groups, display ordering, active type,
//! dropdown flag) and [`FilingPanel::view`] is a pure projection of it.

use std::collections::HashMap;

use serde::Serialize;

use crate::{FetchError, FilingRecord, FormType};

/// Preferred display order of form types.
pub const FILING_TYPE_CATALOG: [&str; 5] = ["8-K", "10-Q", "10-K", "6-K", "20-F"];

/// Filings grouped by canonical form type, keys in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilingGroups {
    order: Vec<FormType>,
    groups: HashMap<FormType, Vec<FilingRecord>>,
}

impl FilingGroups {
    pub fn get(&self, form: &FormType) -> &[FilingRecord] {
        self.groups.get(form).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, form: &FormType) -> bool {
        self.groups.get(form).is_some_and(|filings| !filings.is_empty())
    }

    /// Form types in the order they were first seen.
    pub fn first_seen(&self) -> &[FormType] {
        &self.order
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Register a type with no filings, e.g. a selector added by the host.
    pub fn insert_empty(&mut self, form: FormType) {
        if !self.groups.contains_key(&form) {
            self.order.push(form.clone());
            self.groups.insert(form, Vec::new());
        }
    }
}

pub struct FilingClassifier;

impl FilingClassifier {
    /// Group by uppercased `form`, preserving order within each group.
    pub fn group(filings: &[FilingRecord]) -> FilingGroups {
        let mut groups = FilingGroups::default();
        for filing in filings {
            let form = filing.form_type();
            match groups.groups.get_mut(&form) {
                Some(bucket) => bucket.push(filing.clone()),
                None => {
                    groups.order.push(form.clone());
                    groups.groups.insert(form, vec![filing.clone()]);
                }
            }
        }
        groups
    }

    /// Catalog types present in the data (catalog order), then every other
    /// type in first-seen order.
    pub fn display_order(groups: &FilingGroups) -> Vec<FormType> {
        let mut ordering = FILING_TYPE_CATALOG
            .iter()
            .map(|form| FormType::new(form))
            .filter(|form| groups.contains(form))
            .collect::<Vec<_>>();
        ordering.extend(
            groups
                .first_seen()
                .iter()
                .filter(|form| !FILING_TYPE_CATALOG.contains(&form.as_str()))
                .cloned(),
        );
        ordering
    }
}

/// Filings panel for one ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilingPanel {
    Loaded(FilingSelector),
    Failed { ticker: String, detail: String },
}

impl FilingPanel {
    pub fn from_filings(ticker: impl Into<String>, filings: &[FilingRecord]) -> Self {
        Self::Loaded(FilingSelector::new(ticker, FilingClassifier::group(filings)))
    }

    pub fn failed(ticker: impl Into<String>, error: &FetchError) -> Self {
        let ticker = ticker.into();
        let detail = match error {
            FetchError::Status { status } => format!("HTTP {status} for {ticker}"),
            other => format!("{other} ({ticker})"),
        };
        Self::Failed { ticker, detail }
    }

    pub fn ticker(&self) -> &str {
        match self {
            Self::Loaded(selector) => &selector.ticker,
            Self::Failed { ticker, .. } => ticker,
        }
    }

    pub fn selector(&self) -> Option<&FilingSelector> {
        match self {
            Self::Loaded(selector) => Some(selector),
            Self::Failed { .. } => None,
        }
    }

    pub fn selector_mut(&mut self) -> Option<&mut FilingSelector> {
        match self {
            Self::Loaded(selector) => Some(selector),
            Self::Failed { .. } => None,
        }
    }

    pub fn view(&self) -> FilingPanelView {
        match self {
            Self::Loaded(selector) => selector.view(),
            Self::Failed { detail, .. } => FilingPanelView::Error {
                message: format!("Failed to load SEC docs: {detail}"),
            },
        }
    }
}

/// Selector state: which type is active and whether the dropdown is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingSelector {
    ticker: String,
    groups: FilingGroups,
    ordering: Vec<FormType>,
    active: Option<FormType>,
    expanded: bool,
}

impl FilingSelector {
    pub fn new(ticker: impl Into<String>, groups: FilingGroups) -> Self {
        let ordering = FilingClassifier::display_order(&groups);
        let active = ordering.first().cloned();
        Self {
            ticker: ticker.into(),
            groups,
            ordering,
            active,
            expanded: false,
        }
    }

    pub fn ordering(&self) -> &[FormType] {
        &self.ordering
    }

    pub fn active(&self) -> Option<&FormType> {
        self.active.as_ref()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Show or hide the dropdown. Purely visual.
    pub fn toggle(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }

    /// Activate `form` if it has a selector. Returns whether it changed.
    pub fn select(&mut self, form: &FormType) -> bool {
        if !self.ordering.contains(form) || self.active.as_ref() == Some(form) {
            return false;
        }
        self.active = Some(form.clone());
        true
    }

    /// Add a selector for a type that has no filings yet.
    pub fn add_type(&mut self, form: FormType) {
        if !self.ordering.contains(&form) {
            self.groups.insert_empty(form.clone());
            self.ordering.push(form);
            if self.active.is_none() {
                self.active = self.ordering.first().cloned();
            }
        }
    }

    pub fn buttons(&self) -> Vec<TypeButton> {
        self.ordering
            .iter()
            .map(|form| TypeButton {
                label: form.to_string(),
                active: self.active.as_ref() == Some(form),
            })
            .collect()
    }

    /// Document sub-panel for the active type; this is the only part that
    /// changes on a type switch.
    pub fn documents(&self) -> DocumentList {
        let Some(active) = &self.active else {
            return DocumentList::Links(Vec::new());
        };
        let filings = self.groups.get(active);
        if filings.is_empty() {
            return DocumentList::Placeholder(format!("No {active} documents available"));
        }
        DocumentList::Links(
            filings
                .iter()
                .map(|filing| DocumentLink {
                    label: format!("{} — {}", filing.form, filing.report_date),
                    url: filing.url.clone(),
                })
                .collect(),
        )
    }

    pub fn view(&self) -> FilingPanelView {
        FilingPanelView::Selector {
            expanded: self.expanded,
            buttons: self.buttons(),
            documents: self.documents(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeButton {
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentLink {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "items")]
pub enum DocumentList {
    Links(Vec<DocumentLink>),
    Placeholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum FilingPanelView {
    Selector {
        expanded: bool,
        buttons: Vec<TypeButton>,
        documents: DocumentList,
    },
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filing(form: &str, date: &str) -> FilingRecord {
        FilingRecord::new(form, date, format!("https://sec.test/{form}/{date}"))
    }

    fn labels(selector: &FilingSelector) -> Vec<String> {
        selector.buttons().into_iter().map(|b| b.label).collect()
    }

    #[test]
    fn padded_form_is_its_own_group() {
        let groups = FilingClassifier::group(&[
            filing("8-K", "2026-08-01"),
            filing(" 8-k", "2026-07-01"),
        ]);

        assert_eq!(groups.first_seen(), &[FormType::new("8-K"), FormType::new(" 8-K")]);
    }

    #[test]
    fn grouping_uppercases_and_keeps_intra_group_order() {
        let filings = vec![
            filing("10-q", "2026-06-30"),
            filing("8-K", "2026-08-01"),
            filing("10-Q", "2026-03-31"),
        ];
        let groups = FilingClassifier::group(&filings);

        let q = groups.get(&FormType::new("10-Q"));
        assert_eq!(q.len(), 2);
        assert_eq!(q[0].report_date, "2026-06-30");
        assert_eq!(q[1].report_date, "2026-03-31");
        assert_eq!(groups.first_seen(), &[FormType::new("10-Q"), FormType::new("8-K")]);
    }

    #[test]
    fn grouping_is_stable_across_runs() {
        let filings = vec![
            filing("4", "2026-01-02"),
            filing("10-K", "2025-12-31"),
            filing("4", "2026-01-01"),
        ];
        assert_eq!(FilingClassifier::group(&filings), FilingClassifier::group(&filings));
    }

    #[test]
    fn catalog_types_come_first_then_extras_in_first_seen_order() {
        let filings = vec![
            filing("10-K", "2025-12-31"),
            filing("XBRL", "2025-12-31"),
            filing("8-K", "2026-02-01"),
            filing("DEF 14A", "2026-03-01"),
        ];
        let ordering = FilingClassifier::display_order(&FilingClassifier::group(&filings));
        let ordering = ordering.iter().map(FormType::as_str).collect::<Vec<_>>();
        assert_eq!(ordering, vec!["8-K", "10-K", "XBRL", "DEF 14A"]);
    }

    #[test]
    fn first_type_starts_active() {
        let panel = FilingPanel::from_filings(
            "AAPL",
            &[filing("10-Q", "2026-06-30"), filing("8-K", "2026-08-01")],
        );
        let selector = panel.selector().expect("loaded");

        assert_eq!(selector.active().map(FormType::as_str), Some("8-K"));
        let active = selector.buttons().into_iter().filter(|b| b.active).count();
        assert_eq!(active, 1);
    }

    #[test]
    fn empty_filings_render_no_selectors() {
        let panel = FilingPanel::from_filings("AAPL", &[]);
        let selector = panel.selector().expect("loaded");

        assert!(selector.buttons().is_empty());
        assert!(selector.active().is_none());
        assert_eq!(selector.documents(), DocumentList::Links(Vec::new()));
    }

    #[test]
    fn selecting_a_type_switches_only_documents_and_active_flag() {
        let mut panel = FilingPanel::from_filings(
            "AAPL",
            &[filing("8-K", "2026-08-01"), filing("10-K", "2025-12-31")],
        );
        let selector = panel.selector_mut().expect("loaded");
        let before = labels(selector);

        assert!(selector.select(&FormType::new("10-K")));

        assert_eq!(labels(selector), before);
        let buttons = selector.buttons();
        assert!(!buttons[0].active);
        assert!(buttons[1].active);
        assert_eq!(
            selector.documents(),
            DocumentList::Links(vec![DocumentLink {
                label: String::from("10-K — 2025-12-31"),
                url: String::from("https://sec.test/10-K/2025-12-31"),
            }])
        );
    }

    #[test]
    fn unknown_type_selection_is_ignored() {
        let mut panel = FilingPanel::from_filings("AAPL", &[filing("8-K", "2026-08-01")]);
        let selector = panel.selector_mut().expect("loaded");
        assert!(!selector.select(&FormType::new("20-F")));
        assert_eq!(selector.active().map(FormType::as_str), Some("8-K"));
    }

    #[test]
    fn type_without_filings_shows_placeholder() {
        let mut panel = FilingPanel::from_filings("AAPL", &[filing("8-K", "2026-08-01")]);
        let selector = panel.selector_mut().expect("loaded");
        selector.add_type(FormType::new("20-F"));
        selector.select(&FormType::new("20-F"));

        assert_eq!(
            selector.documents(),
            DocumentList::Placeholder(String::from("No 20-F documents available"))
        );
    }

    #[test]
    fn toggle_is_independent_of_selection() {
        let mut panel = FilingPanel::from_filings("AAPL", &[filing("8-K", "2026-08-01")]);
        let selector = panel.selector_mut().expect("loaded");
        assert!(!selector.is_expanded());
        assert!(selector.toggle());
        assert!(!selector.toggle());
        assert_eq!(selector.active().map(FormType::as_str), Some("8-K"));
    }

    #[test]
    fn failure_view_mentions_ticker_and_status() {
        let panel = FilingPanel::failed("ZZZZ", &FetchError::Status { status: 404 });
        assert_eq!(
            panel.view(),
            FilingPanelView::Error {
                message: String::from("Failed to load SEC docs: HTTP 404 for ZZZZ"),
            }
        );
    }
}
