//! Request-level operations: generate, export, examples and health.
//!
//! Every operation returns a tagged response value; failures become
//! `status: "error"` payloads instead of escaping to the caller.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::client::ModelClient;
use crate::config::Settings;
use crate::error::SchemaError;
use crate::extract::extract;
use crate::ir::Schema;
use crate::prompt::{Complexity, Prompt};

const MIN_DESCRIPTION_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportResponse {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub version: String,
    pub provider: String,
    pub configured: bool,
}

const EXAMPLES: &[(&str, &str)] = &[
    (
        "E-Commerce Platform",
        "An online store with users, products, categories, shopping cart, orders, payments, and reviews",
    ),
    (
        "Project Management Tool",
        "A SaaS for teams with workspaces, projects, tasks, comments, file attachments, and time tracking",
    ),
    (
        "Social Media App",
        "A platform with user profiles, posts, likes, comments, followers, direct messages, and notifications",
    ),
    (
        "Learning Management System",
        "An LMS with courses, lessons, quizzes, student progress, certificates, and instructor analytics",
    ),
    (
        "Restaurant Booking",
        "A reservation system with restaurants, tables, bookings, menu items, reviews, and loyalty points",
    ),
];

/// Example application descriptions.
pub fn examples() -> Vec<Example> {
    EXAMPLES
        .iter()
        .map(|(title, description)| Example {
            title: title.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// Validate an untyped schema value and render it in `format`.
pub fn export(schema: Value, format: &str) -> ExportResponse {
    info!(format, "exporting schema");

    let result = Schema::from_value(schema)
        .map_err(SchemaError::from)
        .and_then(|schema| crate::format::render(&schema, format));

    match result {
        Ok(code) => ExportResponse {
            status: Status::Success,
            code: Some(code),
            format: format.to_string(),
            error: None,
        },
        Err(e) => {
            warn!(format, error = %e, "export failed");
            ExportResponse {
                status: Status::Error,
                code: None,
                format: format.to_string(),
                error: Some(e.to_string()),
            }
        }
    }
}

pub struct SchemaService<C> {
    client: C,
    settings: Settings,
}

impl<C: ModelClient> SchemaService<C> {
    pub fn new(client: C, settings: Settings) -> Self {
        Self { client, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Ask the model for a schema and recover the IR from its answer.
    pub fn generate(&self, description: &str, complexity: Complexity) -> GenerateResponse {
        match self.generate_schema(description, complexity) {
            Ok(schema) => GenerateResponse {
                status: Status::Success,
                schema: Some(schema),
                error: None,
            },
            Err(e) => {
                warn!(error = %e, "schema generation failed");
                GenerateResponse {
                    status: Status::Error,
                    schema: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    pub fn generate_schema(
        &self,
        description: &str,
        complexity: Complexity,
    ) -> Result<Schema, SchemaError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(SchemaError::InvalidRequest(
                "Description cannot be empty".to_string(),
            ));
        }
        if description.chars().count() < MIN_DESCRIPTION_LEN {
            return Err(SchemaError::InvalidRequest(
                "Description too short. Please provide more detail.".to_string(),
            ));
        }

        info!(
            provider = self.client.name(),
            complexity = complexity.as_str(),
            "generating schema"
        );

        let prompt = Prompt::schema_request(description, complexity);
        let text = self
            .client
            .complete(&prompt)
            .map_err(|e| SchemaError::UpstreamUnavailable(e.to_string()))?;

        let schema = extract(&text)?;
        info!(
            tables = schema.tables.len(),
            relationships = schema.relationships.len(),
            "schema recovered"
        );
        Ok(schema)
    }

    pub fn export(&self, schema: Value, format: &str) -> ExportResponse {
        export(schema, format)
    }

    pub fn examples(&self) -> Vec<Example> {
        examples()
    }

    pub fn health(&self) -> Health {
        Health {
            status: "healthy".to_string(),
            version: self.settings.app_version.clone(),
            provider: self.settings.llm_provider.clone(),
            configured: self.settings.is_configured(),
        }
    }
}
