//! News formatting and the news panel.

use serde::Serialize;
use time::OffsetDateTime;
use tracing::debug;

use crate::{FetchError, NewsRecord, Published};

pub const NEWS_IMAGE_PLACEHOLDER: &str = "https://via.placeholder.com/150x100.png?text=News";

const SUMMARY_MAX_CHARS: usize = 200;
const UNKNOWN_SOURCE: &str = "Unknown Source";

/// Relative label for `published` as seen at `now`.
///
/// Future timestamps read as "just now".
pub fn time_ago(now: OffsetDateTime, published: OffsetDateTime) -> String {
    let seconds = (now - published).whole_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;

    if hours > 23 {
        return format!("{} days ago", hours / 24);
    }
    if hours > 0 {
        return format!("{hours} hour{} ago", plural(hours));
    }
    if minutes > 0 {
        return format!("{minutes} minute{} ago", plural(minutes));
    }
    String::from("just now")
}

fn plural(n: i64) -> &'static str {
    if n > 1 {
        "s"
    } else {
        ""
    }
}

/// Strip tags, collapse whitespace and cap the length at 200 characters.
pub fn clean_summary(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut in_tag = false;
    for ch in raw.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > SUMMARY_MAX_CHARS {
        let head = collapsed
            .chars()
            .take(SUMMARY_MAX_CHARS - 3)
            .collect::<String>();
        return format!("{head}...");
    }
    collapsed
}

/// Publisher name; feeds that omit it usually end the title with `" - Source"`.
pub fn resolve_source(source: &str, title: &str) -> String {
    let source = source.trim();
    if !source.is_empty() {
        return source.to_owned();
    }
    match title.rsplit_once(" - ") {
        Some((_, tail)) if !tail.trim().is_empty() => tail.trim().to_owned(),
        _ => String::from(UNKNOWN_SOURCE),
    }
}

/// Display-ready news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewsCard {
    pub title: String,
    pub summary: String,
    pub source: String,
    pub link: String,
    pub image_src: String,
    pub time_ago: String,
}

impl NewsCard {
    /// The image failed to load at render time: fall back to the placeholder.
    pub fn image_failed(&mut self) {
        self.image_src = String::from(NEWS_IMAGE_PLACEHOLDER);
    }
}

pub struct NewsFormatter;

impl NewsFormatter {
    pub fn format(record: &NewsRecord, now: OffsetDateTime) -> NewsCard {
        let image_src = record
            .image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(NEWS_IMAGE_PLACEHOLDER)
            .to_owned();

        let time_ago = match Published::parse(&record.published) {
            Ok(published) => time_ago(now, published.into_inner()),
            Err(error) => {
                debug!(%error, "unparseable publish time");
                String::from("just now")
            }
        };

        NewsCard {
            title: record.title.clone(),
            summary: clean_summary(&record.summary),
            source: resolve_source(&record.source, &record.title),
            link: record.link.clone(),
            image_src,
            time_ago,
        }
    }

    pub fn format_all(records: &[NewsRecord], now: OffsetDateTime) -> Vec<NewsCard> {
        records
            .iter()
            .map(|record| Self::format(record, now))
            .collect()
    }
}

/// The single news panel instance for a ticker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum NewsPanel {
    Items { ticker: String, cards: Vec<NewsCard> },
    Empty { ticker: String, message: String },
    Failed { ticker: String, message: String },
}

impl NewsPanel {
    pub const HEADER: &'static str = "Stock Market News";

    /// Build the panel from a fetch outcome.
    ///
    /// A non-2xx status reads as "no news", like an empty list; transport
    /// and schema failures render an inline error.
    pub fn from_outcome(
        ticker: &str,
        outcome: Result<Vec<NewsRecord>, FetchError>,
        now: OffsetDateTime,
    ) -> Self {
        match outcome {
            Ok(records) if !records.is_empty() => Self::Items {
                ticker: ticker.to_owned(),
                cards: NewsFormatter::format_all(&records, now),
            },
            Ok(_) | Err(FetchError::Status { .. }) => Self::Empty {
                ticker: ticker.to_owned(),
                message: format!("No news available for {ticker}"),
            },
            Err(error) => Self::Failed {
                ticker: ticker.to_owned(),
                message: format!("Failed to load news: {error}"),
            },
        }
    }

    pub fn ticker(&self) -> &str {
        match self {
            Self::Items { ticker, .. } | Self::Empty { ticker, .. } | Self::Failed { ticker, .. } => {
                ticker
            }
        }
    }

    pub fn cards(&self) -> &[NewsCard] {
        match self {
            Self::Items { cards, .. } => cards,
            _ => &[],
        }
    }

    pub fn image_failed(&mut self, index: usize) -> bool {
        match self {
            Self::Items { cards, .. } => match cards.get_mut(index) {
                Some(card) => {
                    card.image_failed();
                    true
                }
                None => false,
            },
            _ => false,
        }
    }
}
