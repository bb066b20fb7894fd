use std::fmt::Write as _;

use serde::Serialize;
use tickerlens_core::{DocumentList, FilingPanelView, NewsPanel, SurfaceView};

use crate::cli::OutputFormat;
use crate::commands::{CommandOutput, RefreshOutput, SuggestOutput};
use crate::error::CliError;

pub fn render(output: &CommandOutput, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    if matches!(output, CommandOutput::SessionEnded) {
        return Ok(());
    }
    match format {
        OutputFormat::Json => println!("{}", to_json(output, pretty)?),
        OutputFormat::Text => print!("{}", render_text(output)),
    }
    Ok(())
}

/// One snapshot per session event: a JSON line, or a text page followed by
/// a separator.
pub fn render_session_view(
    view: &SurfaceView,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => println!("{}", to_json(view, pretty)?),
        OutputFormat::Text => println!("{}---", page_text(view)),
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, CliError> {
    let payload = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(payload)
}

fn render_text(output: &CommandOutput) -> String {
    match output {
        CommandOutput::Suggestions(suggestions) => suggestions_text(suggestions),
        CommandOutput::Page(view) => page_text(view),
        CommandOutput::Refreshed(refresh) => refresh_text(refresh),
        CommandOutput::SessionEnded => String::new(),
    }
}

fn suggestions_text(output: &SuggestOutput) -> String {
    if output.suggestions.is_empty() {
        return format!("no suggestions for '{}'\n", output.input);
    }
    let mut text = String::new();
    for (index, label) in output.suggestions.labels().iter().enumerate() {
        let _ = writeln!(text, "{index:>2}  {label}");
    }
    text
}

fn refresh_text(output: &RefreshOutput) -> String {
    format!(
        "stored {} tickers from {} at {}\n",
        output.count,
        output.source,
        output.dest.display()
    )
}

pub fn page_text(view: &SurfaceView) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "> {}", view.input);
    if view.suggestions_open {
        for (index, label) in view.suggestions.iter().enumerate() {
            let _ = writeln!(text, "  {index:>2}  {label}");
        }
    }
    if !view.search_active {
        return text;
    }

    if let Some(identity) = &view.identity {
        let _ = writeln!(text, "\n{identity}");
    }
    if let Some(chart) = &view.chart {
        let config = &chart.config;
        let _ = writeln!(
            text,
            "chart #{}: {} ({}, {}, {})",
            chart.instance, config.symbol, config.interval, config.timezone, config.theme
        );
    }

    match &view.filings {
        Some(FilingPanelView::Selector {
            expanded,
            buttons,
            documents,
        }) => {
            let marker = if *expanded { "v" } else { ">" };
            let _ = writeln!(text, "\nSEC Documents {marker}");
            let labels = buttons
                .iter()
                .map(|button| {
                    if button.active {
                        format!("[{}]", button.label)
                    } else {
                        button.label.clone()
                    }
                })
                .collect::<Vec<_>>();
            if !labels.is_empty() {
                let _ = writeln!(text, "  {}", labels.join(" "));
            }
            match documents {
                DocumentList::Links(links) => {
                    for link in links {
                        let _ = writeln!(text, "  {}  {}", link.label, link.url);
                    }
                }
                DocumentList::Placeholder(message) => {
                    let _ = writeln!(text, "  {message}");
                }
            }
        }
        Some(FilingPanelView::Error { message }) => {
            let _ = writeln!(text, "\n{message}");
        }
        None => {}
    }

    if let Some(news) = &view.news {
        let _ = writeln!(text, "\n{}", NewsPanel::HEADER);
        match news {
            NewsPanel::Items { cards, .. } => {
                for card in cards {
                    let _ = writeln!(text, "  {} ({}, {})", card.title, card.source, card.time_ago);
                    if !card.summary.is_empty() {
                        let _ = writeln!(text, "    {}", card.summary);
                    }
                    let _ = writeln!(text, "    {}", card.link);
                }
            }
            NewsPanel::Empty { message, .. } | NewsPanel::Failed { message, .. } => {
                let _ = writeln!(text, "  {message}");
            }
        }
    }
    text
}
