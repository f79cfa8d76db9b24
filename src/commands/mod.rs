pub mod entry;
pub mod export;
pub mod init;
pub mod report;
pub mod sum;
pub mod template;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage time entries")]
    Entry(entry::EntryArgs),
    #[command(about = "Manage entry templates")]
    Template(template::TemplateArgs),
    #[command(about = "Prepare an earnings report for a date range")]
    Report(report::ReportArgs),
    #[command(about = "Get a monthly earnings summary")]
    Sum(sum::SumArgs),
    #[command(about = "Export entries, reports, or summaries")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Entry(args) => entry::cmd(args),
            Commands::Template(args) => template::cmd(args),
            Commands::Report(args) => report::cmd(args),
            Commands::Sum(args) => sum::cmd(args),
            Commands::Export(args) => export::cmd(args),
        }
    }
}
