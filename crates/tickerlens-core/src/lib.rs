//! # Tickerlens Core
//!
//! Symbol typeahead and multi-panel search for a single-page stock lookup
//! widget.
//!
//! ## Overview
//!
//! - **Symbol index** loaded once from a ticker directory (URL or file)
//! - **Debounced prefix suggestions** over the index
//! - **Search orchestration**: identity line, chart mount, then the SEC
//!   filings panel and the news panel, in that order
//! - **Pure view projections** of every panel, testable without a page
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | HTTP-backed panel source |
//! | [`chart`] | Chart widget options and the single chart slot |
//! | [`config`] | Widget configuration |
//! | [`data_source`] | Panel source trait, requests, response schemas |
//! | [`domain`] | Tickers, directory records, filings, news, timestamps |
//! | [`error`] | Core error types |
//! | [`filings`] | Filing grouping and the filings panel |
//! | [`http_client`] | HTTP client abstraction |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`news`] | News formatting and the news panel |
//! | [`orchestrator`] | Commit handling with last-commit-wins runs |
//! | [`suggest`] | Suggestion engine, debouncer, typeahead state |
//! | [`surface`] | Shared page state and its serializable view |
//! | [`symbol_index`] | Symbol index and directory loader |
//! | [`widget`] | Facade routing page events |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tickerlens_core::{LookupWidget, WidgetConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = WidgetConfig::default();
//!     let mut widget = LookupWidget::connect(&config).await;
//!
//!     widget.input("aapl");
//!     if let Some(run) = widget.submit() {
//!         let _ = run.await;
//!     }
//!     println!("{:?}", widget.view().identity);
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! keystrokes ──▶ Debouncer ──▶ SuggestionEngine ──▶ Typeahead
//!                                   │                   │ commit
//!                              SymbolIndex              ▼
//!                                   ▲          SearchOrchestrator
//!                                   │          │   identity, chart
//!                            DirectoryLoader   │   filings ──▶ FilingPanel
//!                                              │   news    ──▶ NewsPanel
//!                                              ▼
//!                                        RenderSurface
//! ```

pub mod adapters;
pub mod chart;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod filings;
pub mod http_client;
pub mod logging;
pub mod news;
pub mod orchestrator;
pub mod suggest;
pub mod surface;
pub mod symbol_index;
pub mod widget;

// Adapter implementations
pub use adapters::HttpApiSource;

// Chart
pub use chart::{ChartConfig, ChartSlot, MountedChart};

// Configuration
pub use config::{DirectoryLocation, WidgetConfig, SEC_COMPANY_TICKERS_URL};

// Data source trait and types
pub use data_source::{Endpoint, FilingsRequest, NewsRequest, PanelSource};

// Domain models
pub use domain::{FilingRecord, FormType, NewsRecord, Published, SymbolRecord, Ticker};

// Error types
pub use error::{ConfigError, FetchError, LoadError, SchemaError, ValidationError};

// Panels
pub use filings::{
    DocumentLink, DocumentList, FilingClassifier, FilingGroups, FilingPanel, FilingPanelView,
    FilingSelector, TypeButton, FILING_TYPE_CATALOG,
};
pub use news::{NewsCard, NewsFormatter, NewsPanel, NEWS_IMAGE_PLACEHOLDER};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use logging::{init_tracing, LogFormat};

// Search
pub use orchestrator::{RunOutcome, SearchOrchestrator, SharedSurface};
pub use suggest::{CommitEvent, Debouncer, SuggestionEngine, SuggestionList, Typeahead};
pub use surface::{RenderSurface, SurfaceView};
pub use symbol_index::{DirectoryLoader, SymbolIndex};
pub use widget::LookupWidget;
