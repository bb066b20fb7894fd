//! # Domain Models
//!
//! Value types shared by the index, the panels and the data sources.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Ticker`] | Normalized, validated ticker symbol |
//! | [`SymbolRecord`] | Directory entry: ticker plus company name |
//! | [`FormType`] | Uppercased filing form type |
//! | [`FilingRecord`] | One filing link from the filings endpoint |
//! | [`NewsRecord`] | One raw news item from the news endpoint |
//! | [`Published`] | UTC publication instant (RFC3339 or RFC2822 input) |

mod records;
mod ticker;
mod timestamp;

pub use records::{FilingRecord, FormType, NewsRecord, SymbolRecord};
pub use ticker::Ticker;
pub use timestamp::Published;
