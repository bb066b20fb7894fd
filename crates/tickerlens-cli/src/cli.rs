//! CLI argument definitions for tickerlens.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `suggest` | Print typeahead suggestions for an input |
//! | `search` | Run one committed search and print the page |
//! | `session` | Drive the widget line by line from stdin |
//! | `refresh-tickers` | Download the ticker directory to a local file |
//!
//! # Global Options
//!
//! | Option | Env | Default |
//! |--------|-----|---------|
//! | `--api-base-url` | `TICKERLENS_API_BASE_URL` | `http://127.0.0.1:8000` |
//! | `--tickers` | `TICKERLENS_TICKERS` | `{api-base-url}/static/data/company_tickers.json` |
//! | `--timeout-ms` | `TICKERLENS_TIMEOUT_MS` | `10000` |
//! | `--debounce-ms` | `TICKERLENS_DEBOUNCE_MS` | `150` |
//! | `--suggestion-limit` | `TICKERLENS_SUGGESTION_LIMIT` | `10` |
//! | `--filings-top` | `TICKERLENS_FILINGS_TOP` | `4` |
//! | `--news-limit` | `TICKERLENS_NEWS_LIMIT` | `10` |
//! | `--log-level` | `TICKERLENS_LOG` | `warn` |
//!
//! # Examples
//!
//! ```bash
//! tickerlens suggest app
//! tickerlens search AAPL --format text
//! tickerlens --tickers data/company_tickers.json session
//! tickerlens refresh-tickers --dest data/company_tickers.json
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tickerlens_core::SEC_COMPANY_TICKERS_URL;

/// Tickerlens - stock symbol lookup with SEC filings and news
#[derive(Debug, Parser)]
#[command(
    name = "tickerlens",
    author,
    version,
    about = "Stock symbol lookup with SEC filings and news",
    long_about = "Tickerlens drives the symbol lookup widget from the terminal: typeahead \
suggestions over the SEC ticker directory, and committed searches that load the chart \
binding, SEC filings and recent news for a symbol.\n\
\n\
Use 'tickerlens <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Base URL of the API serving the filings and news endpoints.
    #[arg(
        long,
        global = true,
        env = "TICKERLENS_API_BASE_URL",
        default_value = "http://127.0.0.1:8000"
    )]
    pub api_base_url: String,

    /// Ticker directory: an http(s) URL or a local file path.
    #[arg(long, global = true, env = "TICKERLENS_TICKERS")]
    pub tickers: Option<String>,

    /// Per-request HTTP timeout in milliseconds.
    #[arg(long, global = true, env = "TICKERLENS_TIMEOUT_MS", default_value_t = 10_000)]
    pub timeout_ms: u64,

    /// Quiet window before suggestions are computed.
    #[arg(long, global = true, env = "TICKERLENS_DEBOUNCE_MS", default_value_t = 150)]
    pub debounce_ms: u64,

    /// Maximum number of suggestions.
    #[arg(long, global = true, env = "TICKERLENS_SUGGESTION_LIMIT", default_value_t = 10)]
    pub suggestion_limit: usize,

    /// Filings returned per form type (1-10).
    #[arg(long, global = true, env = "TICKERLENS_FILINGS_TOP", default_value_t = 4)]
    pub filings_top: u8,

    /// News items requested (1-20).
    #[arg(long, global = true, env = "TICKERLENS_NEWS_LIMIT", default_value_t = 10)]
    pub news_limit: u8,

    /// User-Agent sent with every request.
    #[arg(long, global = true, env = "TICKERLENS_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Extra request header, `name: value`. Repeatable.
    #[arg(long = "header", global = true, env = "TICKERLENS_HEADERS", value_delimiter = ';')]
    pub headers: Vec<String>,

    /// Default log filter when RUST_LOG is unset.
    #[arg(long, global = true, env = "TICKERLENS_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log line format on stderr.
    #[arg(long, global = true, value_enum, env = "TICKERLENS_LOG_FORMAT", default_value_t = LogFormatArg::Text)]
    pub log_format: LogFormatArg,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object (one per line in `session`).
    Json,
    /// Human-readable page rendering.
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Text,
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print typeahead suggestions for a partial symbol or company name.
    ///
    /// # Examples
    ///
    ///   tickerlens suggest app
    ///   tickerlens suggest "micro" --format text
    Suggest(SuggestArgs),

    /// Commit a search and print the resulting page.
    ///
    /// Loads the identity line, the chart binding, the SEC filings panel
    /// and the news panel. Exits with code 3 when a panel failed.
    ///
    /// # Examples
    ///
    ///   tickerlens search AAPL
    ///   tickerlens search msft --format text
    Search(SearchArgs),

    /// Interactive session over stdin.
    ///
    /// Each plain line replaces the input box. Commands:
    ///   :N           click suggestion N (0-based)
    ///   :submit      submit the input box
    ///   :outside     click outside the suggestion list
    ///   :filing TYPE switch the active filing type
    ///   :toggle      open or close the filings dropdown
    ///   :image N     report that news image N failed to load
    ///   :quit        leave the session
    Session,

    /// Download the ticker directory and store it locally.
    ///
    /// # Examples
    ///
    ///   tickerlens refresh-tickers --dest app/static/data/company_tickers.json
    RefreshTickers(RefreshTickersArgs),
}

#[derive(Debug, Args)]
pub struct SuggestArgs {
    /// Partial input as typed.
    pub input: String,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Symbol to commit (trimmed and uppercased).
    pub query: String,
}

#[derive(Debug, Args)]
pub struct RefreshTickersArgs {
    /// Destination file.
    #[arg(long)]
    pub dest: PathBuf,

    /// Directory source URL.
    #[arg(long, default_value = SEC_COMPANY_TICKERS_URL)]
    pub source: String,
}
