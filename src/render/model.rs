//! Prisma-style model schema renderer.

use crate::ir::{Column, Schema, Table};

/// Model-file scalar and the attributes implied by a SQL base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMapping {
    pub scalar: &'static str,
    pub attributes: &'static [&'static str],
}

impl TypeMapping {
    const fn plain(scalar: &'static str) -> Self {
        Self {
            scalar,
            attributes: &[],
        }
    }

    fn implies(&self, prefix: &str) -> bool {
        self.attributes.iter().any(|a| a.starts_with(prefix))
    }
}

/// Map a SQL type token to its model-file type.
///
/// Only the base token counts: `VARCHAR(255)` maps like `varchar`.
/// Unknown types fall back to `String`.
///
/// `SERIAL` and `UUID` always carry `@id` and a generated `@default`, whether
/// or not the column is the primary key. A `UUID` foreign key column is
/// therefore rendered as an identity too; declare such columns as `TEXT` or
/// `VARCHAR` to get a plain `String` field.
pub fn map_type(sql_type: &str) -> TypeMapping {
    let base = sql_type.split('(').next().unwrap_or(sql_type).trim().to_uppercase();

    match base.as_str() {
        "INT" => TypeMapping::plain("Int"),
        "SERIAL" => TypeMapping {
            scalar: "Int",
            attributes: &["@id", "@default(autoincrement())"],
        },
        "UUID" => TypeMapping {
            scalar: "String",
            attributes: &["@id", "@default(uuid())"],
        },
        "VARCHAR" | "TEXT" => TypeMapping::plain("String"),
        "BOOLEAN" => TypeMapping::plain("Boolean"),
        "TIMESTAMP" => TypeMapping::plain("DateTime"),
        "DECIMAL" => TypeMapping::plain("Decimal"),
        _ => TypeMapping::plain("String"),
    }
}

/// `order_items` -> `OrderItems`
pub fn model_name(table_name: &str) -> String {
    table_name
        .split('_')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// Render one `model` block per table, separated by blank lines.
pub fn render(schema: &Schema) -> String {
    schema
        .tables
        .iter()
        .map(render_model)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_model(table: &Table) -> String {
    let mut output = format!("model {} {{\n", model_name(&table.name));
    for column in &table.columns {
        output.push_str(&render_field(column));
        output.push('\n');
    }
    output.push_str("}\n");
    output
}

fn render_field(column: &Column) -> String {
    let mapping = map_type(&column.typ);

    let mut typ = mapping.scalar.to_string();
    if column.nullable && !column.primary_key {
        typ.push('?');
    }

    let mut line = format!("  {} {}", column.name, typ);
    for attribute in mapping.attributes {
        line.push(' ');
        line.push_str(attribute);
    }
    if column.primary_key && !mapping.implies("@id") {
        line.push_str(" @id");
    }
    if column.unique && !mapping.implies("@unique") {
        line.push_str(" @unique");
    }
    if let Some(default) = column.default_value() {
        if !mapping.implies("@default") {
            line.push_str(&format!(" @default({})", default));
        }
    }

    line
}
