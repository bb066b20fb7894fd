mod refresh_tickers;
mod search;
mod session;
mod suggest;

use serde::Serialize;
use tickerlens_core::{DirectoryLocation, FilingPanelView, NewsPanel, SurfaceView, WidgetConfig};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub use refresh_tickers::RefreshOutput;
pub use suggest::SuggestOutput;

/// What a command produced, rendered by [`crate::output`].
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
    Suggestions(SuggestOutput),
    Page(SurfaceView),
    Refreshed(RefreshOutput),
    /// The session already streamed its output.
    SessionEnded,
}

impl CommandOutput {
    /// Whether a rendered panel carries an inline error.
    pub fn has_panel_errors(&self) -> bool {
        match self {
            Self::Page(view) => page_has_errors(view),
            _ => false,
        }
    }
}

pub fn page_has_errors(view: &SurfaceView) -> bool {
    matches!(view.filings, Some(FilingPanelView::Error { .. }))
        || matches!(view.news, Some(NewsPanel::Failed { .. }))
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    let config = widget_config(cli)?;

    match &cli.command {
        Command::Suggest(args) => suggest::run(args, &config).await,
        Command::Search(args) => search::run(args, &config).await,
        Command::Session => session::run(&config, cli.format, cli.pretty).await,
        Command::RefreshTickers(args) => refresh_tickers::run(args, &config).await,
    }
}

/// Build and validate the widget configuration from global options.
pub fn widget_config(cli: &Cli) -> Result<WidgetConfig, CliError> {
    let mut config = WidgetConfig {
        api_base_url: cli.api_base_url.trim().to_owned(),
        debounce_ms: cli.debounce_ms,
        suggestion_limit: cli.suggestion_limit,
        filings_top: cli.filings_top,
        news_limit: cli.news_limit,
        http_timeout_ms: cli.timeout_ms,
        ..WidgetConfig::default()
    };
    config.directory = match &cli.tickers {
        Some(location) => DirectoryLocation::parse(location),
        None => DirectoryLocation::Url(format!(
            "{}/static/data/company_tickers.json",
            config.base_url()
        )),
    };
    if let Some(user_agent) = &cli.user_agent {
        config.user_agent = user_agent.clone();
    }
    for header in &cli.headers {
        config.push_header(header)?;
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("arguments should parse")
    }

    #[test]
    fn directory_defaults_to_api_static_path() {
        let cli = parse(&["tickerlens", "--api-base-url", "https://lens.test/", "session"]);
        let config = widget_config(&cli).expect("valid config");

        assert_eq!(
            config.directory,
            DirectoryLocation::Url(String::from(
                "https://lens.test/static/data/company_tickers.json"
            ))
        );
    }

    #[test]
    fn local_directory_path_is_accepted() {
        let cli = parse(&["tickerlens", "--tickers", "data/tickers.json", "session"]);
        let config = widget_config(&cli).expect("valid config");

        assert!(matches!(config.directory, DirectoryLocation::File(_)));
    }

    #[test]
    fn out_of_range_limits_are_rejected() {
        let cli = parse(&["tickerlens", "--filings-top", "0", "session"]);
        let err = widget_config(&cli).expect_err("top must be at least 1");

        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn malformed_header_is_rejected() {
        let cli = parse(&["tickerlens", "--header", "no-colon", "session"]);
        assert!(widget_config(&cli).is_err());
    }
}
