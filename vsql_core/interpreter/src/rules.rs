//! Declarative pattern tables for utterance extraction.
//!
//! Column patterns are built per call because column names are user data;
//! the fallback heuristics are fixed and compiled once. Order inside every
//! table is priority order and the first match wins.

use once_cell::sync::Lazy;
use regex::Regex;

pub const INSERT_KEYWORDS: &[&str] = &["add", "create", "insert"];
pub const DELETE_KEYWORDS: &[&str] = &["delete", "remove"];

pub const HELP_MESSAGE: &str = "I couldn't understand your command. Try saying something like \
    'Add a new person with name John, age 30, and email john@example.com' or \
    'Delete the record for John'.";

// A captured value runs until a comma, the word "and", or end of input.
const VALUE: &str = r"([\w@.\s]+?)\s*(?:,|\band\b|$)";

/// Insert-side patterns for one column: `<col> is/of/: <value>`, `<col>
/// <value>`, `with <col> <value>`.
pub fn column_value_patterns(column: &str) -> Vec<Regex> {
    let col = regex::escape(column);
    [
        format!(r"(?i)\b{col}\s+(?:is|of|:)?\s*{VALUE}"),
        format!(r"(?i)\b{col}\s+{VALUE}"),
        format!(r"(?i)\bwith\s+{col}\s+{VALUE}"),
    ]
    .iter()
    .filter_map(|pattern| Regex::new(pattern).ok())
    .collect()
}

/// Delete-side pattern for one column: `<col> <value>`.
pub fn delete_target_pattern(column: &str) -> Option<Regex> {
    let col = regex::escape(column);
    Regex::new(&format!(r"(?i)\b{col}\s+{VALUE}")).ok()
}

/// Fallback when no column name appears in a delete utterance: take the words
/// after the verb as a name-field target, skipping filler like "the record
/// for" so "Delete the record for Jane" targets "Jane".
pub static DELETE_TARGET_FALLBACK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:delete|remove)\b(?:\s+(?:the|a|an|this|that|record|row|entry|for|of))*\s+([\w\s]+?)\s*(?:,|\band\b|$)",
    )
    .expect("delete fallback pattern")
});

/// A named heuristic applied when the per-column pass extracted nothing.
/// Only consulted when the field actually exists in the schema.
pub struct FallbackRule {
    pub field: &'static str,
    pub patterns: Vec<Regex>,
}

/// Secondary extraction pass for common personal-record fields.
pub static FALLBACK_RULES: Lazy<Vec<FallbackRule>> = Lazy::new(|| {
    let rule = |field: &'static str, patterns: &[&str]| FallbackRule {
        field,
        patterns: patterns
            .iter()
            .filter_map(|p| Regex::new(p).ok())
            .collect(),
    };

    vec![
        rule(
            "name",
            &[
                r"(?i)\bname\s+(?:is|:)?\s*([\w\s]+?)\s*(?:,|\band\b|$)",
                r"(?i)\bwith\s+([\w\s]+?)\s*(?:,|\bwho\b|$)",
            ],
        ),
        rule(
            "age",
            &[
                r"(?i)\bage\s+(?:is|:)?\s*(\d+)",
                r"(?i)(\d+)\s+years\s+old",
            ],
        ),
        rule("email", &[r"(?i)\bemail\s+(?:is|:)?\s*([\w@.]+)"]),
        rule(
            "salary",
            &[
                r"(?i)\bsalary\s+(?:is|:)?\s*\$?(\d+)",
                r"(?i)\bmakes\s+\$?(\d+)",
            ],
        ),
        // Greedy captures here: dates often carry their own commas.
        rule(
            "birthdate",
            &[
                r"(?i)\bbirth\s?date\s+(?:is|:)?\s*([\w\s,]+)(?:,|\band\b|$)",
                r"(?i)\bborn\s+(?:on\s+)?([\w\s,]+)(?:,|\band\b|$)",
            ],
        ),
    ]
});
