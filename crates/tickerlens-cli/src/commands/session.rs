use tickerlens_core::{LookupWidget, RunOutcome, WidgetConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

use super::CommandOutput;

/// One line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionInput {
    Type(String),
    Pick(usize),
    Submit,
    Outside,
    Filing(String),
    Toggle,
    ImageFailed(usize),
    Quit,
}

fn parse_line(line: &str) -> Result<SessionInput, String> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(SessionInput::Type(line.to_owned()));
    };
    let (name, rest) = match command.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (command.trim(), ""),
    };

    match name {
        "submit" => Ok(SessionInput::Submit),
        "outside" => Ok(SessionInput::Outside),
        "toggle" => Ok(SessionInput::Toggle),
        "quit" | "q" => Ok(SessionInput::Quit),
        "filing" if !rest.is_empty() => Ok(SessionInput::Filing(rest.to_owned())),
        "image" => rest
            .parse()
            .map(SessionInput::ImageFailed)
            .map_err(|_| format!("':image' needs a card index, got '{rest}'")),
        _ => name
            .parse()
            .map(SessionInput::Pick)
            .map_err(|_| format!("unknown session command ':{command}'")),
    }
}

pub async fn run(
    config: &WidgetConfig,
    format: OutputFormat,
    pretty: bool,
) -> Result<CommandOutput, CliError> {
    let mut widget = LookupWidget::connect(config).await;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let input = match parse_line(&line) {
            Ok(input) => input,
            Err(message) => {
                warn!(%message, "ignoring session line");
                continue;
            }
        };
        debug!(?input, "session event");

        match input {
            SessionInput::Quit => break,
            SessionInput::Type(text) => {
                widget.input(&text);
                widget.suggest_now();
            }
            SessionInput::Pick(index) => {
                let run = widget.select(index);
                finish(run).await?;
            }
            SessionInput::Submit => {
                let run = widget.submit();
                finish(run).await?;
            }
            SessionInput::Outside => widget.click_outside(),
            SessionInput::Filing(form) => {
                if !widget.select_filing_type(&form) {
                    debug!(%form, "filing type not selectable");
                }
            }
            SessionInput::Toggle => {
                widget.toggle_filings();
            }
            SessionInput::ImageFailed(index) => {
                widget.image_failed(index);
            }
        }

        output::render_session_view(&widget.view(), format, pretty)?;
    }

    Ok(CommandOutput::SessionEnded)
}

async fn finish(run: Option<JoinHandle<RunOutcome>>) -> Result<(), CliError> {
    if let Some(run) = run {
        let outcome = run
            .await
            .map_err(|error| CliError::Command(format!("search task failed: {error}")))?;
        debug!(?outcome, "search finished");
    }
    Ok(())
}
