use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tickerlens_core::{DirectoryLoader, ReqwestHttpClient, WidgetConfig};

use crate::cli::RefreshTickersArgs;
use crate::error::CliError;

use super::CommandOutput;

#[derive(Debug, Serialize)]
pub struct RefreshOutput {
    pub source: String,
    pub dest: PathBuf,
    pub count: usize,
}

pub async fn run(args: &RefreshTickersArgs, config: &WidgetConfig) -> Result<CommandOutput, CliError> {
    let client = Arc::new(ReqwestHttpClient::new(&config.user_agent));
    let loader = DirectoryLoader::from_config(client, config);

    let count = loader.refresh(&args.source, &args.dest).await?;

    Ok(CommandOutput::Refreshed(RefreshOutput {
        source: args.source.clone(),
        dest: args.dest.clone(),
        count,
    }))
}
