//! Export target formats.

use crate::error::SchemaError;
use crate::ir::Schema;
use crate::render;

/// Export target variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// PostgreSQL DDL
    PostgreSQL,
    /// MySQL DDL (same statements as PostgreSQL)
    MySQL,
    /// Prisma schema file
    Prisma,
    /// Drizzle ORM schema. Accepted, but there is no renderer for it yet.
    Drizzle,
}

impl Format {
    /// Parse format from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Some(Self::PostgreSQL),
            "mysql" => Some(Self::MySQL),
            "prisma" => Some(Self::Prisma),
            "drizzle" => Some(Self::Drizzle),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PostgreSQL => "postgresql",
            Self::MySQL => "mysql",
            Self::Prisma => "prisma",
            Self::Drizzle => "drizzle",
        }
    }

    /// Render `schema` in this format.
    pub fn render(self, schema: &Schema) -> Result<String, SchemaError> {
        match self {
            Self::PostgreSQL | Self::MySQL => Ok(render::ddl::render(schema)),
            Self::Prisma => Ok(render::model::render(schema)),
            Self::Drizzle => Err(SchemaError::UnsupportedFormat(self.as_str().to_string())),
        }
    }
}

/// Parse `format` and render `schema` with the matching renderer.
pub fn render(schema: &Schema, format: &str) -> Result<String, SchemaError> {
    Format::from_str(format)
        .ok_or_else(|| SchemaError::UnsupportedFormat(format.to_string()))?
        .render(schema)
}
