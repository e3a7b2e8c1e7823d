use crate::commands::open;
use crate::error::CliError;
use analysis::{column_stats, histogram};
use clap::Args;
use std::path::PathBuf;
use store::TableStore;

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Table to summarize
    pub table: String,

    /// Column to summarize
    pub column: String,
}

pub fn handle_stats(args: &StatsArgs, config_path: Option<PathBuf>) -> Result<(), CliError> {
    let ctx = open(config_path)?;
    let table = ctx.table(&args.table)?;
    let column = table.column(&args.column).ok_or_else(|| {
        CliError::invalid_argument(format!(
            "table '{}' has no column '{}'",
            table.name, args.column
        ))
    })?;

    let rows = ctx.engine.store().list_rows(table.id)?;

    if column.column_type.is_numeric() {
        let stats = column_stats(&rows, &column.name);
        println!("mean:   {}", stats.mean);
        println!("median: {}", stats.median);
        println!("mode:   {}", stats.mode);
        println!("min:    {}", stats.min);
        println!("max:    {}", stats.max);
        println!();
    }

    for bucket in histogram(&rows, column) {
        println!("{}: {}", bucket.label, bucket.count);
    }
    Ok(())
}
