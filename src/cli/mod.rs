use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `linkcap` - caps link lists from text and xlsx uploads.
#[derive(Parser, Debug)]
#[command(name = "linkcap")]
#[command(version = "0.1.0")]
#[command(about = "A Telegram bot that keeps the first links of every row.", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.linkcap/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to Telegram and serve requests until Ctrl-C
    Run,

    /// Print the links the bot would keep for a line of text
    Extract {
        /// Comma-separated link candidates
        text: String,

        /// Links to keep (default: limits.max_links_per_row)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Run the spreadsheet pipeline on a local .xlsx file
    Process {
        /// Input workbook; column A of the active sheet is read
        input: PathBuf,

        /// Where to write the result workbook
        #[arg(short, long, default_value = "processed_links.xlsx")]
        output: PathBuf,

        /// Character budget per summary chunk (default: limits.message_budget)
        #[arg(short, long)]
        budget: Option<usize>,
    },
}
