//! Shared fixtures for vsql_core tests.

use common::types::{ColumnDefinition, ColumnType, Entity, FieldMap};
use serde_json::{json, Value as Json};
use uuid::Uuid;

/// The schema most examples in the UI use: a people table with a generated
/// integer id.
pub fn people_schema() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::new("id", ColumnType::Integer).required(),
        ColumnDefinition::new("name", ColumnType::String).required(),
        ColumnDefinition::new("age", ColumnType::Integer),
        ColumnDefinition::new("email", ColumnType::String),
    ]
}

/// People schema extended with the payroll columns the fallback heuristics
/// know about.
pub fn employees_schema() -> Vec<ColumnDefinition> {
    let mut schema = people_schema();
    schema.push(ColumnDefinition::new("salary", ColumnType::Float));
    schema.push(ColumnDefinition::new("birthdate", ColumnType::Date));
    schema
}

/// Row carrying only an `id` field, in whatever JSON representation the test
/// wants to exercise.
pub fn row_with_id(id: Json) -> Entity {
    let mut data = FieldMap::new();
    data.insert("id".to_string(), id);
    Entity::new(Uuid::new_v4(), data)
}

pub fn person_row(id: i64, name: &str, age: i64, email: &str) -> Entity {
    let mut data = FieldMap::new();
    data.insert("id".to_string(), json!(id));
    data.insert("name".to_string(), json!(name));
    data.insert("age".to_string(), json!(age));
    data.insert("email".to_string(), json!(email));
    Entity::new(Uuid::new_v4(), data)
}

/// Same person data pinned to a known table, for store and engine tests.
pub fn person_row_in(table_id: Uuid, id: i64, name: &str, age: i64, email: &str) -> Entity {
    let mut row = person_row(id, name, age, email);
    row.table_id = table_id;
    row
}
