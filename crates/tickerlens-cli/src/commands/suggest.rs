use serde::Serialize;
use tickerlens_core::{LookupWidget, SuggestionList, WidgetConfig};

use crate::cli::SuggestArgs;
use crate::error::CliError;

use super::CommandOutput;

#[derive(Debug, Serialize)]
pub struct SuggestOutput {
    pub input: String,
    pub index_size: usize,
    pub suggestions: SuggestionList,
}

pub async fn run(args: &SuggestArgs, config: &WidgetConfig) -> Result<CommandOutput, CliError> {
    let widget = LookupWidget::connect(config).await;
    let engine = widget.engine();

    Ok(CommandOutput::Suggestions(SuggestOutput {
        input: args.input.clone(),
        index_size: engine.index().len(),
        suggestions: engine.suggest(&args.input),
    }))
}
