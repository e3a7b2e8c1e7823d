use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Value types a user can pick for an ad-hoc column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Integer,
    Float,
    Date,
    Boolean,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Date => "date",
            Self::Boolean => "boolean",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" => Ok(Self::String),
            "integer" | "int" => Ok(Self::Integer),
            "float" => Ok(Self::Float),
            "date" => Ok(Self::Date),
            "boolean" | "bool" => Ok(Self::Boolean),
            other => Err(format!(
                "unknown column type '{other}', expected one of string, integer, float, date, boolean"
            )),
        }
    }
}

/// One column of a user-defined table. Immutable once part of a persisted
/// schema version; edits replace the whole schema.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Json>,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            required: false,
            default: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: Json) -> Self {
        self.default = Some(value);
        self
    }
}

/// A user-defined table: a named, ordered column schema. Column order affects
/// display only, not semantics.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableDefinition {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: Vec<ColumnDefinition>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TableDefinition {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        schema: Vec<ColumnDefinition>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
            schema,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.schema.iter().find(|c| c.name == name)
    }
}
