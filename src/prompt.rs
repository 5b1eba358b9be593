//! Instruction template sent to the language model.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    #[default]
    Standard,
    Enterprise,
}

impl Complexity {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Some(Self::Simple),
            "standard" => Some(Self::Standard),
            "enterprise" => Some(Self::Enterprise),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Standard => "standard",
            Self::Enterprise => "enterprise",
        }
    }
}

/// A system/user message pair for one model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

const SYSTEM_PROMPT: &str = r#"You are a senior database architect. Design a normalized relational schema for the application the user describes.

Respond with a single JSON object and nothing else, using exactly this shape:

{
  "name": "schema name",
  "description": "one sentence summary",
  "tables": [
    {
      "name": "snake_case_table",
      "description": "what the table stores",
      "columns": [
        {
          "name": "snake_case_column",
          "type": "SQL type such as SERIAL, UUID, INT, VARCHAR(255), TEXT, BOOLEAN, TIMESTAMP, DECIMAL(10,2)",
          "nullable": true,
          "primary_key": false,
          "unique": false,
          "default": "optional SQL literal or expression",
          "description": "optional"
        }
      ],
      "indexes": [
        {"name": "idx_table_column", "columns": ["column"], "unique": false}
      ]
    }
  ],
  "relationships": [
    {
      "from_table": "child_table",
      "from_column": "parent_id",
      "to_table": "parent_table",
      "to_column": "id",
      "type": "one_to_one | one_to_many | many_to_one | many_to_many",
      "on_delete": "CASCADE"
    }
  ],
  "suggestions": ["optional design notes"]
}

Rules:
- Every table has a primary key column.
- Table, column and index names are unique and snake_case.
- Indexes and relationships only reference columns that exist.
- Use plural table names."#;

impl Prompt {
    /// Build the fixed instruction template for `description`.
    pub fn schema_request(description: &str, complexity: Complexity) -> Self {
        let user = format!(
            "Generate a {} database schema for the following application:\n\n\
             {}\n\n\
             Remember to:\n\
             - Use proper normalization\n\
             - Include all necessary tables and relationships\n\
             - Add appropriate indexes\n\
             - Follow naming conventions\n",
            complexity.as_str(),
            description.trim()
        );

        Self {
            system: SYSTEM_PROMPT.to_string(),
            user,
        }
    }
}
