use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Ticker;

/// One searchable entry of the ticker directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub symbol: Ticker,
    pub name: String,
}

impl SymbolRecord {
    pub fn new(symbol: Ticker, name: impl Into<String>) -> Self {
        Self {
            symbol,
            name: name.into(),
        }
    }

    /// `"{name} ({symbol})"`, the identity line shown after a commit.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.name, self.symbol)
    }
}

/// Canonical (uppercased) filing form type such as `10-K` or `DEF 14A`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FormType(String);

impl FormType {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FormType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FormType {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for FormType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<FormType> for String {
    fn from(value: FormType) -> Self {
        value.0
    }
}

/// One regulatory filing as returned by the filings endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingRecord {
    pub form: String,
    pub report_date: String,
    pub url: String,
}

impl FilingRecord {
    pub fn new(
        form: impl Into<String>,
        report_date: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            form: form.into(),
            report_date: report_date.into(),
            url: url.into(),
        }
    }

    pub fn form_type(&self) -> FormType {
        FormType::new(&self.form)
    }
}

/// One raw news item as returned by the news endpoint.
///
/// `published` stays a raw string here; the formatter parses it and
/// degrades an unparseable value to "just now".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsRecord {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub source: String,
    pub link: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub published: String,
}
