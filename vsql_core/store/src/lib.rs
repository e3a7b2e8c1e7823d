//! Storage collaborator for table definitions and their rows.
//!
//! The core components only ever see snapshots ([`TableStore::get_table`],
//! [`TableStore::list_rows`]); all mutation goes through this trait. The
//! shipped [`MemoryStore`] keeps everything behind one `RwLock` with optional
//! JSON-file durability, which also makes it the single writer the id
//! generation contract asks for.

pub mod error;

pub use error::StoreError;

use chrono::Utc;
use common::types::{ColumnDefinition, Entity, FieldMap, TableDefinition};
use log::debug;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

pub trait TableStore {
    fn create_table(
        &self,
        name: &str,
        description: Option<String>,
        schema: Vec<ColumnDefinition>,
    ) -> StoreResult<TableDefinition>;
    /// All table definitions, newest first.
    fn list_tables(&self) -> Vec<TableDefinition>;
    fn get_table(&self, id: Uuid) -> StoreResult<TableDefinition>;
    fn get_table_by_name(&self, name: &str) -> StoreResult<TableDefinition>;
    /// Wholesale update; a new schema replaces the old one, no column-level
    /// diffing.
    fn update_table(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
        schema: Option<Vec<ColumnDefinition>>,
    ) -> StoreResult<TableDefinition>;
    /// Removes the table and cascades to its rows.
    fn delete_table(&self, id: Uuid) -> StoreResult<()>;

    fn insert_row(&self, table_id: Uuid, data: FieldMap) -> StoreResult<Entity>;
    /// All rows of a table, newest first.
    fn list_rows(&self, table_id: Uuid) -> StoreResult<Vec<Entity>>;
    fn get_row(&self, id: Uuid) -> StoreResult<Entity>;
    fn update_row(&self, id: Uuid, data: FieldMap) -> StoreResult<Entity>;
    fn delete_row(&self, id: Uuid) -> StoreResult<()>;
    /// Rows whose data matches every filter by string equality.
    fn query_rows(&self, table_id: Uuid, filters: &FieldMap) -> StoreResult<Vec<Entity>>;
}

/// internal flat state (easy to serde)
#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct State {
    tables: HashMap<Uuid, TableDefinition>,
    entities: HashMap<Uuid, Entity>,
}

#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<State>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(State::default())),
        }
    }

    /* ---------- optional durability ---------- */
    pub fn load_from(path: &Path) -> StoreResult<Self> {
        let json = std::fs::read_to_string(path).unwrap_or_else(|_| "{}".into());
        let state: State = serde_json::from_str(&json)?;
        debug!(
            "loaded {} tables and {} rows from {}",
            state.tables.len(),
            state.entities.len(),
            path.display()
        );
        Ok(Self {
            inner: Arc::new(RwLock::new(state)),
        })
    }

    pub fn flush_to(&self, path: &Path) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(&*self.inner.read())?;
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(tmp, path)?;
        Ok(())
    }
}

impl TableStore for MemoryStore {
    fn create_table(
        &self,
        name: &str,
        description: Option<String>,
        schema: Vec<ColumnDefinition>,
    ) -> StoreResult<TableDefinition> {
        let mut g = self.inner.write();
        if g.tables.values().any(|t| t.name == name) {
            return Err(StoreError::duplicate(name));
        }
        let table = TableDefinition::new(name, description, schema);
        g.tables.insert(table.id, table.clone());
        Ok(table)
    }

    fn list_tables(&self) -> Vec<TableDefinition> {
        let g = self.inner.read();
        let mut tables: Vec<TableDefinition> = g.tables.values().cloned().collect();
        tables.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tables
    }

    fn get_table(&self, id: Uuid) -> StoreResult<TableDefinition> {
        self.inner
            .read()
            .tables
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("table {id}")))
    }

    fn get_table_by_name(&self, name: &str) -> StoreResult<TableDefinition> {
        self.inner
            .read()
            .tables
            .values()
            .find(|t| t.name == name)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("table '{name}'")))
    }

    fn update_table(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
        schema: Option<Vec<ColumnDefinition>>,
    ) -> StoreResult<TableDefinition> {
        let mut g = self.inner.write();
        let table = g
            .tables
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(format!("table {id}")))?;
        if let Some(name) = name {
            table.name = name;
        }
        if let Some(description) = description {
            table.description = Some(description);
        }
        if let Some(schema) = schema {
            table.schema = schema;
        }
        table.updated_at = Utc::now();
        Ok(table.clone())
    }

    fn delete_table(&self, id: Uuid) -> StoreResult<()> {
        let mut g = self.inner.write();
        g.tables
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(format!("table {id}")))?;
        g.entities.retain(|_, row| row.table_id != id);
        Ok(())
    }

    fn insert_row(&self, table_id: Uuid, data: FieldMap) -> StoreResult<Entity> {
        let mut g = self.inner.write();
        if !g.tables.contains_key(&table_id) {
            return Err(StoreError::not_found(format!("table {table_id}")));
        }
        let row = Entity::new(table_id, data);
        g.entities.insert(row.id, row.clone());
        Ok(row)
    }

    fn list_rows(&self, table_id: Uuid) -> StoreResult<Vec<Entity>> {
        let g = self.inner.read();
        if !g.tables.contains_key(&table_id) {
            return Err(StoreError::not_found(format!("table {table_id}")));
        }
        let mut rows: Vec<Entity> = g
            .entities
            .values()
            .filter(|row| row.table_id == table_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    fn get_row(&self, id: Uuid) -> StoreResult<Entity> {
        self.inner
            .read()
            .entities
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("row {id}")))
    }

    fn update_row(&self, id: Uuid, data: FieldMap) -> StoreResult<Entity> {
        let mut g = self.inner.write();
        let row = g
            .entities
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(format!("row {id}")))?;
        row.data = data;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    fn delete_row(&self, id: Uuid) -> StoreResult<()> {
        let mut g = self.inner.write();
        g.entities
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(format!("row {id}")))?;
        Ok(())
    }

    fn query_rows(&self, table_id: Uuid, filters: &FieldMap) -> StoreResult<Vec<Entity>> {
        let rows = self.list_rows(table_id)?;
        Ok(rows
            .into_iter()
            .filter(|row| {
                filters
                    .iter()
                    .all(|(field, wanted)| match row.field(field) {
                        Some(value) => value_text(value) == value_text(wanted),
                        None => false,
                    })
            })
            .collect())
    }
}

// Equality the way a text-typed JSON query would see it.
fn value_text(value: &Json) -> String {
    match value {
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}
