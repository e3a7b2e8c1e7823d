mod commands;
mod error;

use crate::commands::{
    handle_row, handle_say, handle_stats, handle_table, RowSubcommand, SayArgs, StatsArgs,
    TableSubcommand,
};
use crate::error::CliError;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use time::macros::format_description;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vsql")]
pub struct Cli {
    #[arg(
        long = "config-path",
        short = 'c',
        help = "path to config file",
        global = true
    )]
    pub config_path: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Manage table definitions
    #[command(subcommand)]
    Table(TableSubcommand),
    /// Manage rows through the validated form path
    #[command(subcommand)]
    Row(RowSubcommand),
    /// Run a natural-language command against a table
    Say(SayArgs),
    /// Summary statistics and chart buckets for one column
    Stats(StatsArgs),
}

fn run_cmd(func: Result<(), CliError>) {
    if let Err(e) = func {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let time_format =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:2]");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_timer(fmt::time::LocalTime::new(time_format))
                .with_target(false)
                .with_level(true)
                .with_thread_names(false)
                .with_line_number(false)
                .with_file(false)
                .with_span_events(fmt::format::FmtSpan::NONE)
                .compact(),
        )
        .with(filter)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Cmd::Table(args) => run_cmd(handle_table(&args, cli.config_path.clone())),
        Cmd::Row(args) => run_cmd(handle_row(&args, cli.config_path.clone())),
        Cmd::Say(args) => run_cmd(handle_say(&args, cli.config_path.clone())),
        Cmd::Stats(args) => run_cmd(handle_stats(&args, cli.config_path.clone())),
    }
}
