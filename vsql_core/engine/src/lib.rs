//! Command pipeline: snapshot the table, interpret the utterance, apply the
//! result to the store.

pub mod error;

pub use error::EngineError;

use common::types::{Entity, FieldMap};
use interpreter::{interpret, CommandOutcome, Operation};
use log::{debug, info};
use store::TableStore;
use uuid::Uuid;
use validator::validate;

pub struct CommandEngine<S: TableStore> {
    store: S,
}

impl<S: TableStore> CommandEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one transcribed (or typed) utterance against a table.
    ///
    /// The schema and rows are snapshotted once, before interpretation;
    /// everything the interpreter decides is relative to that snapshot. A
    /// recognized insert persists the extracted payload as-is, including any
    /// null placeholders for required fields the utterance never mentioned.
    /// A recognized delete removes the single designated row. Soft misses
    /// pass through untouched for the caller to display.
    pub fn submit_utterance(
        &self,
        table_id: Uuid,
        text: &str,
    ) -> Result<CommandOutcome, EngineError> {
        let table = self.store.get_table(table_id)?;
        let rows = self.store.list_rows(table_id)?;
        debug!(
            "interpreting against '{}' ({} rows): {text}",
            table.name,
            rows.len()
        );

        let outcome = interpret(text, &table.schema, &rows);

        match outcome.operation {
            Operation::Insert => {
                if let Some(data) = &outcome.extracted_data {
                    let row = self.store.insert_row(table_id, data.clone())?;
                    info!("command inserted row {} into '{}'", row.id, table.name);
                }
            }
            Operation::Delete => {
                if let Some(&row_id) = outcome.matched_row_ids.first() {
                    self.store.delete_row(row_id)?;
                    info!("command deleted row {} from '{}'", row_id, table.name);
                }
            }
            Operation::Unrecognized => {}
        }

        Ok(outcome)
    }

    /// Manual form path: strict validation, then insert.
    pub fn create_row(&self, table_id: Uuid, raw: &FieldMap) -> Result<Entity, EngineError> {
        let table = self.store.get_table(table_id)?;
        let rows = self.store.list_rows(table_id)?;
        let validated = validate(&table.schema, raw, &rows)?;
        Ok(self.store.insert_row(table_id, validated)?)
    }

    /// Merge updates over the row's current data and re-validate the whole
    /// row against the table's current schema.
    pub fn update_row(&self, row_id: Uuid, updates: &FieldMap) -> Result<Entity, EngineError> {
        let row = self.store.get_row(row_id)?;
        let table = self.store.get_table(row.table_id)?;
        let rows = self.store.list_rows(row.table_id)?;

        let mut merged = row.data.clone();
        merged.extend(updates.iter().map(|(k, v)| (k.clone(), v.clone())));

        let validated = validate(&table.schema, &merged, &rows)?;
        Ok(self.store.update_row(row_id, validated)?)
    }

    pub fn delete_row(&self, row_id: Uuid) -> Result<(), EngineError> {
        Ok(self.store.delete_row(row_id)?)
    }
}
