//! Schema intermediate representation.
//!
//! A `Schema` is a plain value tree. It is only ever produced through
//! [`Schema::from_value`] (or checked with [`Schema::validate`]), so renderers
//! can assume every invariant below holds.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tables: Vec<Table>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub columns: Vec<Column>,
    #[serde(default)]
    pub indexes: Vec<Index>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: String,
    #[serde(default = "default_true")]
    pub nullable: bool,
    #[serde(default)]
    pub primary_key: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(
        default,
        deserialize_with = "scalar_literal",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
    #[serde(rename = "type", alias = "kind")]
    pub kind: RelationshipKind,
    /// Emitted verbatim after `ON DELETE`. An explicit `null` disables the clause.
    #[serde(default = "default_on_delete")]
    pub on_delete: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

fn default_true() -> bool {
    true
}

fn default_on_delete() -> Option<String> {
    Some("CASCADE".to_string())
}

/// Accept a string, bool or number and keep its literal text; `null` is absent.
fn scalar_literal<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!(
            "invalid default: expected a string, bool or number, found {}",
            other
        ))),
    }
}

impl Column {
    /// Primary keys are never nullable, whatever the flag says.
    pub fn is_nullable(&self) -> bool {
        self.nullable && !self.primary_key
    }

    /// The default value, treating an empty string as absent.
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref().filter(|d| !d.is_empty())
    }
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

impl Schema {
    /// Coerce an untyped value into a validated schema.
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        let schema: Schema =
            serde_json::from_value(value).map_err(|e| ValidationError::Shape(e.to_string()))?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Check every structural invariant, reporting the first violation found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut table_names = HashSet::new();
        for table in &self.tables {
            if table.name.trim().is_empty() {
                return Err(ValidationError::EmptyTableName);
            }
            if !table_names.insert(table.name.as_str()) {
                return Err(ValidationError::DuplicateTable(table.name.clone()));
            }
            validate_table(table)?;
        }

        for (position, rel) in self.relationships.iter().enumerate() {
            for (table, column) in [
                (&rel.from_table, &rel.from_column),
                (&rel.to_table, &rel.to_column),
            ] {
                let Some(target) = self.table(table) else {
                    return Err(ValidationError::UnknownRelationshipTable {
                        position,
                        table: table.clone(),
                    });
                };
                if target.column(column).is_none() {
                    return Err(ValidationError::UnknownRelationshipColumn {
                        position,
                        table: table.clone(),
                        column: column.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

fn validate_table(table: &Table) -> Result<(), ValidationError> {
    if table.columns.is_empty() {
        return Err(ValidationError::NoColumns(table.name.clone()));
    }

    let mut column_names = HashSet::new();
    for column in &table.columns {
        if column.name.trim().is_empty() {
            return Err(ValidationError::EmptyColumnName(table.name.clone()));
        }
        if !column_names.insert(column.name.as_str()) {
            return Err(ValidationError::DuplicateColumn {
                table: table.name.clone(),
                column: column.name.clone(),
            });
        }
    }

    let mut index_names = HashSet::new();
    for index in &table.indexes {
        if !index_names.insert(index.name.as_str()) {
            return Err(ValidationError::DuplicateIndex {
                table: table.name.clone(),
                index: index.name.clone(),
            });
        }
        if index.columns.is_empty() {
            return Err(ValidationError::EmptyIndex {
                table: table.name.clone(),
                index: index.name.clone(),
            });
        }
        if let Some(missing) = index.columns.iter().find(|c| !column_names.contains(c.as_str())) {
            return Err(ValidationError::UnknownIndexColumn {
                table: table.name.clone(),
                index: index.name.clone(),
                column: missing.clone(),
            });
        }
    }

    Ok(())
}
