use tickerlens_core::{LookupWidget, RunOutcome, WidgetConfig};
use tracing::debug;

use crate::cli::SearchArgs;
use crate::error::CliError;

use super::CommandOutput;

pub async fn run(args: &SearchArgs, config: &WidgetConfig) -> Result<CommandOutput, CliError> {
    let mut widget = LookupWidget::connect(config).await;

    widget.input(&args.query);
    let run = widget
        .submit()
        .ok_or_else(|| CliError::Command(String::from("query must not be empty")))?;

    let outcome = run
        .await
        .map_err(|error| CliError::Command(format!("search task failed: {error}")))?;
    debug!(?outcome, "search finished");
    if outcome == RunOutcome::Superseded {
        return Err(CliError::Command(String::from("search was superseded")));
    }

    Ok(CommandOutput::Page(widget.view()))
}
