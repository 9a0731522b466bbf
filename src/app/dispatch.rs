use crate::channels::chunker::batch_messages;
use crate::channels::telegram::TelegramChannel;
use crate::channels::traits::Channel;
use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::links::extract_links;
use crate::messages::Messages;
use crate::router::Router;
use crate::rows::{RowResult, process_rows};
use crate::spreadsheet::{read_first_column, write_result_document};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(&path),
        None => Config::load_or_init(),
    }
}

pub async fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(cli.config)?;

    match cli.command {
        Commands::Run => run_bot(config).await,
        Commands::Extract { text, limit } => {
            config.validate(false)?;
            let links = extract_links(&text, limit.unwrap_or(config.limits.max_links_per_row));
            if links.is_empty() {
                eprintln!("{}", config.messages().no_valid_links());
            }
            for link in links {
                println!("{link}");
            }
            Ok(())
        }
        Commands::Process {
            input,
            output,
            budget,
        } => {
            config.validate(false)?;
            let messages = config.messages();
            let summary = process_file(
                &input,
                &output,
                config.limits.max_links_per_row,
                budget.unwrap_or(config.limits.message_budget),
                &messages,
            )
            .with_context(|| format!("process {}", input.display()))?;

            if summary.rows == 0 {
                println!("{}", messages.no_rows_with_links());
                return Ok(());
            }
            println!("{}", summary.chunks.join("\n\n────────\n\n"));
            println!();
            println!("Wrote {} rows to {}", summary.rows, output.display());
            Ok(())
        }
    }
}

async fn run_bot(config: Config) -> Result<()> {
    config.validate(true)?;

    let channel: Arc<dyn Channel> = Arc::new(TelegramChannel::from_config(&config.telegram));
    let router = Arc::new(Router::from_config(&config));

    if channel.health_check().await {
        info!("Telegram token verified");
    } else {
        tracing::warn!("Telegram getMe failed; check the bot token and network access");
    }

    info!(
        locale = config.resolve_locale().as_str(),
        max_links = config.limits.max_links_per_row,
        budget = config.limits.message_budget,
        "linkcap bot started"
    );

    crate::app::runtime::serve(channel, router, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    })
    .await;

    Ok(())
}

/// Outcome of the offline spreadsheet pipeline.
#[derive(Debug)]
pub struct ProcessSummary {
    pub rows: usize,
    pub chunks: Vec<String>,
}

/// Same pipeline the bot runs for uploads, against local paths. The output
/// workbook is only written when at least one row produced a result.
pub fn process_file(
    input: &Path,
    output: &Path,
    limit: usize,
    budget: usize,
    messages: &Messages,
) -> crate::error::Result<ProcessSummary> {
    let rows = read_first_column(input)?;
    let reports = process_rows(rows, limit, messages);

    let displays: Vec<&str> = reports.iter().map(|r| r.display.as_str()).collect();
    let chunks = batch_messages(&displays, budget);

    let results: Vec<RowResult> = reports.into_iter().map(|r| r.result).collect();
    if !results.is_empty() {
        write_result_document(&results, output)?;
    }

    Ok(ProcessSummary {
        rows: results.len(),
        chunks,
    })
}
