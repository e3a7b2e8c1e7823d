use crate::commands::open;
use crate::error::CliError;
use clap::{Args, Subcommand};
use common::types::{Entity, FieldMap, TableDefinition};
use log::info;
use serde_json::Value as Json;
use std::path::PathBuf;
use store::TableStore;
use uuid::Uuid;

#[derive(Debug, Args)]
pub struct RowAddArgs {
    /// Table to insert into
    pub table: String,

    /// Field value, repeatable: NAME=VALUE
    #[arg(long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,
}

#[derive(Debug, Args)]
pub struct RowListArgs {
    /// Table whose rows to list
    pub table: String,
}

#[derive(Debug, Args)]
pub struct RowDeleteArgs {
    /// Id of the row to delete
    pub id: Uuid,
}

#[derive(Debug, Subcommand)]
pub enum RowSubcommand {
    /// Validate and insert a row from NAME=VALUE pairs
    Add(RowAddArgs),
    /// List a table's rows, newest first
    List(RowListArgs),
    /// Delete one row by id
    Delete(RowDeleteArgs),
}

pub fn handle_row(args: &RowSubcommand, config_path: Option<PathBuf>) -> Result<(), CliError> {
    let ctx = open(config_path)?;

    match args {
        RowSubcommand::Add(add) => {
            let table = ctx.table(&add.table)?;
            let raw = parse_fields(&add.fields)?;
            let row = ctx.engine.create_row(table.id, &raw)?;
            ctx.flush()?;
            info!("inserted row {} into '{}'", row.id, table.name);
            print_row(&table, &row);
        }
        RowSubcommand::List(list) => {
            let table = ctx.table(&list.table)?;
            for row in ctx.engine.store().list_rows(table.id)? {
                print_row(&table, &row);
            }
        }
        RowSubcommand::Delete(delete) => {
            ctx.engine.delete_row(delete.id)?;
            ctx.flush()?;
            info!("deleted row {}", delete.id);
        }
    }
    Ok(())
}

/// Values arrive as text; validation coerces them to the column types.
fn parse_fields(fields: &[String]) -> Result<FieldMap, CliError> {
    let mut raw = FieldMap::new();
    for field in fields {
        let (name, value) = field.split_once('=').ok_or_else(|| {
            CliError::invalid_argument(format!("field '{field}' is not NAME=VALUE"))
        })?;
        raw.insert(name.to_string(), Json::String(value.to_string()));
    }
    Ok(raw)
}

fn print_row(table: &TableDefinition, row: &Entity) {
    let fields: Vec<String> = table
        .schema
        .iter()
        .map(|column| {
            let value = match row.field(&column.name) {
                Some(Json::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => "-".to_string(),
            };
            format!("{}={value}", column.name)
        })
        .collect();
    println!("{}  {}", row.id, fields.join("  "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_fields_on_the_first_equals() {
        let raw = parse_fields(&["name=Ada".to_string(), "note=a=b".to_string()]).unwrap();
        assert_eq!(raw.get("name"), Some(&json!("Ada")));
        assert_eq!(raw.get("note"), Some(&json!("a=b")));
    }

    #[test]
    fn rejects_a_bare_name() {
        assert!(parse_fields(&["name".to_string()]).is_err());
    }
}
