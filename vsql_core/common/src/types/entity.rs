use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::collections::HashMap;
use uuid::Uuid;

/// Field name to value mapping held by a row. Only keys with non-null values
/// survive validation; absent optional fields are missing keys, not nulls.
pub type FieldMap = HashMap<String, Json>;

/// A stored row belonging to a [`TableDefinition`](crate::types::TableDefinition).
///
/// `id` is the storage identifier and is distinct from any user-schema `id`
/// column, which lives inside `data` like every other field.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entity {
    pub id: Uuid,
    pub table_id: Uuid,
    pub data: FieldMap,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity {
    pub fn new(table_id: Uuid, data: FieldMap) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            table_id,
            data,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Json> {
        self.data.get(name)
    }
}
