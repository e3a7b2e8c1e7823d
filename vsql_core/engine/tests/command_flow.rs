use common::types::FieldMap;
use engine::{CommandEngine, EngineError};
use interpreter::Operation;
use matches::assert_matches;
use serde_json::{json, Value as Json};
use store::{MemoryStore, TableStore};
use test_utils::people_schema;
use validator::ValidationError;

fn people_engine() -> (CommandEngine<MemoryStore>, uuid::Uuid) {
    let store = MemoryStore::new();
    let table = store
        .create_table("people", None, people_schema())
        .expect("create table");
    (CommandEngine::new(store), table.id)
}

fn raw(pairs: &[(&str, Json)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn spoken_insert_persists_a_coerced_row_with_generated_id() {
    let (engine, table_id) = people_engine();
    let outcome = engine
        .submit_utterance(
            table_id,
            "Add a new person with name John Smith, age 35, and email john@example.com",
        )
        .expect("submit");

    assert_eq!(outcome.operation, Operation::Insert);

    let rows = engine.store().list_rows(table_id).expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].data.get("name"), Some(&json!("John Smith")));
    assert_eq!(rows[0].data.get("age"), Some(&json!(35)));
    assert_eq!(rows[0].data.get("id"), Some(&json!(1)));
}

#[test]
fn consecutive_spoken_inserts_continue_the_id_sequence() {
    let (engine, table_id) = people_engine();
    engine
        .submit_utterance(table_id, "Add name Grace")
        .expect("first");
    engine
        .submit_utterance(table_id, "Add name Alan")
        .expect("second");

    let rows = engine.store().list_rows(table_id).expect("rows");
    let mut ids: Vec<&Json> = rows.iter().filter_map(|r| r.data.get("id")).collect();
    ids.sort_by_key(|v| v.as_i64());
    assert_eq!(ids, vec![&json!(1), &json!(2)]);
}

#[test]
fn spoken_delete_removes_exactly_the_designated_row() {
    let (engine, table_id) = people_engine();
    engine
        .create_row(
            table_id,
            &raw(&[("name", json!("Jane Smith")), ("age", json!(30))]),
        )
        .expect("seed jane");
    engine
        .create_row(
            table_id,
            &raw(&[("name", json!("Bob Jones")), ("age", json!(50))]),
        )
        .expect("seed bob");

    let outcome = engine
        .submit_utterance(table_id, "Delete the record for Jane")
        .expect("submit");
    assert_eq!(outcome.operation, Operation::Delete);
    assert_eq!(outcome.matched_row_ids.len(), 1);

    let rows = engine.store().list_rows(table_id).expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].data.get("name"), Some(&json!("Bob Jones")));
}

#[test]
fn unrecognized_utterance_changes_nothing() {
    let (engine, table_id) = people_engine();
    engine
        .create_row(table_id, &raw(&[("name", json!("Ada"))]))
        .expect("seed");

    let outcome = engine
        .submit_utterance(table_id, "What is the weather today")
        .expect("submit");
    assert_eq!(outcome.operation, Operation::Unrecognized);
    assert_eq!(engine.store().list_rows(table_id).expect("rows").len(), 1);
}

#[test]
fn insert_miss_attempts_no_storage_call() {
    let (engine, table_id) = people_engine();
    let outcome = engine
        .submit_utterance(table_id, "Add something")
        .expect("submit");
    assert!(outcome.extracted_data.is_none());
    assert!(engine.store().list_rows(table_id).expect("rows").is_empty());
}

#[test]
fn manual_create_rejects_missing_required_fields() {
    let (engine, table_id) = people_engine();
    let err = engine
        .create_row(table_id, &raw(&[("age", json!(30))]))
        .expect_err("should fail");
    match err {
        EngineError::Validation(ValidationError::MissingRequiredFields { fields }) => {
            assert_eq!(fields, vec!["name".to_string()]);
        }
        other => panic!("expected MissingRequiredFields, got {:?}", other),
    }
    assert!(engine.store().list_rows(table_id).expect("rows").is_empty());
}

#[test]
fn manual_create_rejects_unparseable_numbers() {
    let (engine, table_id) = people_engine();
    let err = engine
        .create_row(
            table_id,
            &raw(&[("name", json!("Ada")), ("age", json!("thirty"))]),
        )
        .expect_err("should fail");
    assert_matches!(
        err,
        EngineError::Validation(ValidationError::TypeMismatch { .. })
    );
}

#[test]
fn update_merges_and_recoerces() {
    let (engine, table_id) = people_engine();
    let row = engine
        .create_row(
            table_id,
            &raw(&[("name", json!("Ada")), ("age", json!(36))]),
        )
        .expect("seed");

    let updated = engine
        .update_row(row.id, &raw(&[("age", json!("37"))]))
        .expect("update");
    assert_eq!(updated.data.get("age"), Some(&json!(37)));
    assert_eq!(updated.data.get("name"), Some(&json!("Ada")));
    assert_eq!(updated.data.get("id"), row.data.get("id"));
}

#[test]
fn unknown_table_is_a_store_error() {
    let (engine, _) = people_engine();
    let err = engine
        .submit_utterance(uuid::Uuid::new_v4(), "Add name Ada")
        .expect_err("should fail");
    assert_matches!(err, EngineError::Store(store::StoreError::NotFound { .. }));
}
