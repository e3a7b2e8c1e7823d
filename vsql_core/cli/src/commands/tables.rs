use crate::commands::open;
use crate::error::CliError;
use clap::{Args, Subcommand};
use common::types::{ColumnDefinition, ColumnType};
use log::info;
use std::path::PathBuf;
use store::TableStore;

#[derive(Debug, Args)]
pub struct TableCreateArgs {
    /// Name of the new table
    pub name: String,

    /// Optional description
    #[arg(long)]
    pub description: Option<String>,

    /// Column spec, repeatable: NAME:TYPE or NAME:TYPE:required
    #[arg(long = "column", value_name = "SPEC")]
    pub columns: Vec<String>,
}

#[derive(Debug, Args)]
pub struct TableShowArgs {
    /// Name of the table to show
    pub name: String,
}

#[derive(Debug, Args)]
pub struct TableDropArgs {
    /// Name of the table to drop (rows are removed with it)
    pub name: String,
}

#[derive(Debug, Subcommand)]
pub enum TableSubcommand {
    /// Define a new table
    Create(TableCreateArgs),
    /// List all tables
    List,
    /// Print one table's schema
    Show(TableShowArgs),
    /// Drop a table and all of its rows
    Drop(TableDropArgs),
}

pub fn handle_table(args: &TableSubcommand, config_path: Option<PathBuf>) -> Result<(), CliError> {
    let ctx = open(config_path)?;

    match args {
        TableSubcommand::Create(create) => {
            let schema = create
                .columns
                .iter()
                .map(|spec| parse_column(spec))
                .collect::<Result<Vec<_>, _>>()?;
            let table =
                ctx.engine
                    .store()
                    .create_table(&create.name, create.description.clone(), schema)?;
            ctx.flush()?;
            info!("created table '{}' ({})", table.name, table.id);
        }
        TableSubcommand::List => {
            for table in ctx.engine.store().list_tables() {
                println!("{}  ({} columns)", table.name, table.schema.len());
            }
        }
        TableSubcommand::Show(show) => {
            let table = ctx.table(&show.name)?;
            println!("{}  {}", table.name, table.id);
            if let Some(description) = &table.description {
                println!("{description}");
            }
            for column in &table.schema {
                let required = if column.required { "  required" } else { "" };
                println!("  {}: {}{required}", column.name, column.column_type);
            }
        }
        TableSubcommand::Drop(drop) => {
            let table = ctx.table(&drop.name)?;
            ctx.engine.store().delete_table(table.id)?;
            ctx.flush()?;
            info!("dropped table '{}'", drop.name);
        }
    }
    Ok(())
}

fn parse_column(spec: &str) -> Result<ColumnDefinition, CliError> {
    let mut parts = spec.splitn(3, ':');
    let name = parts
        .next()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| CliError::invalid_argument(format!("empty column spec '{spec}'")))?;
    let type_name = parts.next().ok_or_else(|| {
        CliError::invalid_argument(format!("column spec '{spec}' is missing a type"))
    })?;
    let column_type: ColumnType = type_name
        .parse()
        .map_err(CliError::invalid_argument)?;

    let mut column = ColumnDefinition::new(name, column_type);
    match parts.next() {
        Some("required") => column = column.required(),
        Some(flag) => {
            return Err(CliError::invalid_argument(format!(
                "unknown column flag '{flag}' in '{spec}'"
            )))
        }
        None => {}
    }
    Ok(column)
}
