//! Best-effort natural-language command interpretation.
//!
//! [`interpret`] classifies a transcript as an insert, a delete or neither,
//! then extracts field values or a delete target by running the pattern
//! tables in [`rules`] against it. This is string matching, not parsing:
//! ambiguous utterances may match the wrong column or the wrong row, and the
//! result is always a [`CommandOutcome`], never an error.

pub mod outcome;
pub mod rules;

pub use outcome::{CommandOutcome, Operation};

use common::types::{ColumnDefinition, ColumnType, Entity, FieldMap};
use log::debug;
use serde_json::Value as Json;
use validator::{coerce_loose, next_generated_id};

pub const NO_DATA_MESSAGE: &str =
    "I couldn't extract any data from your command. Please try again.";
pub const NO_TARGET_MESSAGE: &str =
    "I couldn't determine which record to delete. Please try again.";

/// Interpret one utterance against a table's schema and a snapshot of its
/// rows. Insert keywords take priority over delete keywords; anything else
/// yields the fixed help message.
pub fn interpret(
    utterance: &str,
    schema: &[ColumnDefinition],
    existing_rows: &[Entity],
) -> CommandOutcome {
    let lowered = utterance.to_lowercase();

    if rules::INSERT_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        interpret_insert(utterance, schema, existing_rows)
    } else if rules::DELETE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        interpret_delete(utterance, schema, existing_rows)
    } else {
        CommandOutcome::unrecognized(rules::HELP_MESSAGE)
    }
}

fn interpret_insert(
    utterance: &str,
    schema: &[ColumnDefinition],
    existing_rows: &[Entity],
) -> CommandOutcome {
    let mut data = FieldMap::new();

    for column in schema {
        for pattern in rules::column_value_patterns(&column.name) {
            if let Some(caps) = pattern.captures(utterance) {
                let raw = caps[1].trim();
                debug!("matched column '{}' = '{}'", column.name, raw);
                data.insert(column.name.clone(), coerce_loose(column.column_type, raw));
                break;
            }
        }
    }

    if data.is_empty() {
        debug!("no direct column matches, trying fallback heuristics");
        for rule in rules::FALLBACK_RULES.iter() {
            let Some(column) = schema.iter().find(|c| c.name == rule.field) else {
                continue;
            };
            for pattern in &rule.patterns {
                if let Some(caps) = pattern.captures(utterance) {
                    let raw = caps[1].trim();
                    debug!("fallback matched '{}' = '{}'", rule.field, raw);
                    data.insert(column.name.clone(), coerce_loose(column.column_type, raw));
                    break;
                }
            }
        }
    }

    if data.is_empty() {
        return CommandOutcome::insert_miss(NO_DATA_MESSAGE);
    }

    // Required fields the utterance never mentioned: generate the integer id,
    // write everything else as an explicit null placeholder. The command
    // still creates a partial record rather than failing outright.
    for column in schema {
        if !column.required || data.contains_key(&column.name) {
            continue;
        }
        if column.name == "id" && column.column_type == ColumnType::Integer {
            data.insert("id".to_string(), Json::from(next_generated_id(existing_rows)));
        } else {
            debug!("required field '{}' missing, storing null", column.name);
            data.insert(column.name.clone(), Json::Null);
        }
    }

    let fields = schema
        .iter()
        .filter(|c| data.contains_key(&c.name))
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    CommandOutcome::insert(data, format!("Added new record with {fields}"))
}

fn interpret_delete(
    utterance: &str,
    schema: &[ColumnDefinition],
    existing_rows: &[Entity],
) -> CommandOutcome {
    let mut target_field = None;
    let mut target_value = None;

    for column in schema {
        let Some(pattern) = rules::delete_target_pattern(&column.name) else {
            continue;
        };
        if let Some(caps) = pattern.captures(utterance) {
            target_field = Some(column.name.clone());
            target_value = Some(caps[1].trim().to_string());
            break;
        }
    }

    if target_value.is_none() {
        if let Some(caps) = rules::DELETE_TARGET_FALLBACK.captures(utterance) {
            target_value = Some(caps[1].trim().to_string());
        }
    }

    let Some(value) = target_value else {
        return CommandOutcome::delete_miss(NO_TARGET_MESSAGE);
    };
    let field = target_field.unwrap_or_else(|| "name".to_string());
    debug!("delete target: {field} containing '{value}'");

    let needle = value.to_lowercase();
    let matched = existing_rows
        .iter()
        .find(|row| field_text(row, &field).to_lowercase().contains(&needle));

    match matched {
        Some(row) => CommandOutcome::delete(
            field.clone(),
            value.clone(),
            vec![row.id],
            format!("Deleted record with {field} containing \"{value}\""),
        ),
        None => CommandOutcome::delete(
            field.clone(),
            value.clone(),
            Vec::new(),
            format!("No records found with {field} containing \"{value}\""),
        ),
    }
}

fn field_text(row: &Entity, field: &str) -> String {
    match row.field(field) {
        Some(Json::String(s)) => s.clone(),
        Some(Json::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_utils::{employees_schema, people_schema, person_row};

    fn contact_schema() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("name", ColumnType::String),
            ColumnDefinition::new("age", ColumnType::Integer),
            ColumnDefinition::new("email", ColumnType::String),
        ]
    }

    #[test]
    fn insert_extracts_each_mentioned_column() {
        let outcome = interpret(
            "Add a new person with name John Smith, age 35, and email john@example.com",
            &contact_schema(),
            &[],
        );
        assert_eq!(outcome.operation, Operation::Insert);
        let data = outcome.extracted_data.expect("extracted data");
        assert_eq!(data.get("name"), Some(&json!("John Smith")));
        assert_eq!(data.get("age"), Some(&json!(35)));
        assert_eq!(data.get("email"), Some(&json!("john@example.com")));
    }

    #[test]
    fn insert_generates_required_id_and_null_placeholders() {
        let outcome = interpret("Insert age 41", &people_schema(), &[]);
        let data = outcome.extracted_data.expect("extracted data");
        assert_eq!(data.get("age"), Some(&json!(41)));
        assert_eq!(data.get("id"), Some(&json!(1)));
        // name is required but unmentioned: stored as an explicit null
        assert_eq!(data.get("name"), Some(&Json::Null));
    }

    #[test]
    fn insert_id_generation_continues_the_sequence() {
        let rows = vec![
            person_row(3, "Grace", 45, "grace@example.com"),
            person_row(1, "Alan", 41, "alan@example.com"),
            person_row(4, "Ada", 36, "ada@example.com"),
        ];
        let outcome = interpret("Add name Edsger", &people_schema(), &rows);
        let data = outcome.extracted_data.expect("extracted data");
        assert_eq!(data.get("id"), Some(&json!(5)));
    }

    #[test]
    fn insert_with_nothing_extractable_reports_a_miss() {
        let outcome = interpret("Add something", &contact_schema(), &[]);
        assert_eq!(outcome.operation, Operation::Insert);
        assert!(outcome.extracted_data.is_none());
        assert_eq!(outcome.message, NO_DATA_MESSAGE);
    }

    #[test]
    fn fallback_heuristics_fire_only_when_direct_pass_finds_nothing() {
        let outcome = interpret(
            "Add a person who is 35 years old and makes $72000",
            &employees_schema(),
            &[],
        );
        let data = outcome.extracted_data.expect("extracted data");
        assert_eq!(data.get("age"), Some(&json!(35)));
        assert_eq!(data.get("salary"), Some(&json!(72000.0)));
    }

    #[test]
    fn fallback_birthdate_keeps_embedded_commas() {
        let outcome = interpret("Add someone born on March 5, 1990", &employees_schema(), &[]);
        let data = outcome.extracted_data.expect("extracted data");
        assert_eq!(data.get("birthdate"), Some(&json!("March 5, 1990")));
    }

    #[test]
    fn fallback_skips_fields_not_in_schema() {
        let schema = vec![ColumnDefinition::new("title", ColumnType::String)];
        let outcome = interpret("Add someone who is 35 years old", &schema, &[]);
        assert!(outcome.extracted_data.is_none());
    }

    #[test]
    fn insert_keywords_win_over_delete_keywords() {
        let outcome = interpret("Add name Mark and delete nothing", &contact_schema(), &[]);
        assert_eq!(outcome.operation, Operation::Insert);
    }

    #[test]
    fn unrecognized_utterance_gets_the_help_message() {
        let outcome = interpret(
            "What is the weather today",
            &contact_schema(),
            &[person_row(1, "Jane", 30, "jane@example.com")],
        );
        assert_eq!(outcome.operation, Operation::Unrecognized);
        assert_eq!(outcome.message, rules::HELP_MESSAGE);
        assert!(outcome.extracted_data.is_none());
    }

    #[test]
    fn delete_designates_only_the_first_substring_match() {
        let rows = vec![
            person_row(1, "Jane Smith", 30, "jane@example.com"),
            person_row(2, "Jane Smithson", 31, "janes@example.com"),
        ];
        let outcome = interpret("Delete the record for Jane Smith", &contact_schema(), &rows);
        assert_eq!(outcome.operation, Operation::Delete);
        assert_eq!(outcome.target_field.as_deref(), Some("name"));
        assert_eq!(outcome.target_value.as_deref(), Some("Jane Smith"));
        assert_eq!(outcome.matched_row_ids, vec![rows[0].id]);
    }

    #[test]
    fn delete_can_target_an_explicit_column() {
        let rows = vec![
            person_row(1, "Jane", 30, "jane@example.com"),
            person_row(2, "John", 31, "john@example.com"),
        ];
        let outcome = interpret("Remove email john@example.com", &contact_schema(), &rows);
        assert_eq!(outcome.target_field.as_deref(), Some("email"));
        assert_eq!(outcome.matched_row_ids, vec![rows[1].id]);
    }

    #[test]
    fn delete_match_is_case_insensitive() {
        let rows = vec![person_row(1, "Jane Smith", 30, "jane@example.com")];
        let outcome = interpret("delete JANE", &contact_schema(), &rows);
        assert_eq!(outcome.matched_row_ids, vec![rows[0].id]);
    }

    #[test]
    fn delete_with_no_matching_rows_reports_none_found() {
        let rows = vec![person_row(1, "Jane", 30, "jane@example.com")];
        let outcome = interpret("Delete Bob", &contact_schema(), &rows);
        assert_eq!(outcome.operation, Operation::Delete);
        assert!(outcome.matched_row_ids.is_empty());
        assert!(outcome.message.starts_with("No records found"));
    }

    #[test]
    fn delete_with_no_discernible_target_reports_a_miss() {
        let outcome = interpret("Delete", &contact_schema(), &[]);
        assert_eq!(outcome.operation, Operation::Delete);
        assert!(outcome.target_value.is_none());
        assert_eq!(outcome.message, NO_TARGET_MESSAGE);
    }
}
