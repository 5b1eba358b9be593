//! SQL DDL renderer (PostgreSQL family).
//!
//! Output order is fixed: all `CREATE TABLE` statements, then one foreign key
//! per relationship, then indexes grouped by table. Identifiers and default
//! expressions are emitted verbatim; callers are trusted.

use std::collections::HashSet;

use crate::ir::{Column, Index, Relationship, Schema, Table};

/// Render a schema as DDL statements separated by blank lines.
pub fn render(schema: &Schema) -> String {
    let mut statements = Vec::new();

    for table in &schema.tables {
        statements.push(render_table(table));
    }

    let mut names = ConstraintNames::default();
    for rel in &schema.relationships {
        let name = names.assign(rel);
        statements.push(render_foreign_key(rel, &name));
    }

    for table in &schema.tables {
        for index in &table.indexes {
            statements.push(render_index(table, index));
        }
    }

    statements.join("\n")
}

fn render_table(table: &Table) -> String {
    let columns: Vec<String> = table.columns.iter().map(render_column).collect();
    format!("CREATE TABLE {} (\n{}\n);\n", table.name, columns.join(",\n"))
}

fn render_column(column: &Column) -> String {
    let mut line = format!("    {} {}", column.name, column.typ);

    // Modifier order: PRIMARY KEY, NOT NULL, UNIQUE, DEFAULT
    if column.primary_key {
        line.push_str(" PRIMARY KEY");
    }
    if !column.nullable && !column.primary_key {
        line.push_str(" NOT NULL");
    }
    if column.unique {
        line.push_str(" UNIQUE");
    }
    if let Some(default) = column.default_value() {
        line.push_str(&format!(" DEFAULT {}", default));
    }

    line
}

fn render_foreign_key(rel: &Relationship, name: &str) -> String {
    let mut stmt = format!(
        "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {}({})",
        rel.from_table, name, rel.from_column, rel.to_table, rel.to_column
    );
    if let Some(action) = rel.on_delete.as_deref().filter(|a| !a.is_empty()) {
        stmt.push_str(&format!(" ON DELETE {}", action));
    }
    stmt.push_str(";\n");
    stmt
}

fn render_index(table: &Table, index: &Index) -> String {
    let unique = if index.unique { "UNIQUE " } else { "" };
    format!(
        "CREATE {}INDEX {} ON {} ({});\n",
        unique,
        index.name,
        table.name,
        index.columns.join(", ")
    )
}

/// Hands out `fk_<from>_<to>` constraint names, suffixing `_2`, `_3`, ...
/// when a name has already been used.
#[derive(Default)]
struct ConstraintNames {
    used: HashSet<String>,
}

impl ConstraintNames {
    fn assign(&mut self, rel: &Relationship) -> String {
        let base = format!("fk_{}_{}", rel.from_table, rel.to_table);
        let mut name = base.clone();
        let mut ordinal = 2;
        while self.used.contains(&name) {
            name = format!("{}_{}", base, ordinal);
            ordinal += 1;
        }
        self.used.insert(name.clone());
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn users() -> serde_json::Value {
        json!({
            "name": "users",
            "columns": [
                {"name": "id", "type": "SERIAL", "primary_key": true},
                {"name": "email", "type": "VARCHAR(255)", "nullable": false, "unique": true}
            ]
        })
    }

    fn schema(value: serde_json::Value) -> Schema {
        Schema::from_value(value).unwrap()
    }

    #[test]
    fn test_users_table() {
        let schema = schema(json!({"name": "app", "tables": [users()]}));
        assert_eq!(
            render(&schema),
            "CREATE TABLE users (\n    id SERIAL PRIMARY KEY,\n    email VARCHAR(255) NOT NULL UNIQUE\n);\n"
        );
    }

    #[test]
    fn test_full_statement_order() {
        let schema = schema(json!({
            "name": "blog",
            "tables": [
                users(),
                {
                    "name": "posts",
                    "columns": [
                        {"name": "id", "type": "SERIAL", "primary_key": true},
                        {"name": "user_id", "type": "INT", "nullable": false},
                        {"name": "published", "type": "BOOLEAN", "nullable": false, "default": "false"},
                        {"name": "created_at", "type": "TIMESTAMP", "default": "NOW()"}
                    ],
                    "indexes": [
                        {"name": "idx_posts_user", "columns": ["user_id", "created_at"]},
                        {"name": "uq_posts_id_user", "columns": ["id", "user_id"], "unique": true}
                    ]
                }
            ],
            "relationships": [
                {"from_table": "posts", "from_column": "user_id", "to_table": "users", "to_column": "id", "type": "many_to_one"}
            ]
        }));

        let expected = "\
CREATE TABLE users (
    id SERIAL PRIMARY KEY,
    email VARCHAR(255) NOT NULL UNIQUE
);

CREATE TABLE posts (
    id SERIAL PRIMARY KEY,
    user_id INT NOT NULL,
    published BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMP DEFAULT NOW()
);

ALTER TABLE posts ADD CONSTRAINT fk_posts_users FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE;

CREATE INDEX idx_posts_user ON posts (user_id, created_at);

CREATE UNIQUE INDEX uq_posts_id_user ON posts (id, user_id);
";
        assert_eq!(render(&schema), expected);
    }

    #[test]
    fn test_statement_counts() {
        let schema = schema(json!({
            "name": "app",
            "tables": [
                users(),
                {
                    "name": "sessions",
                    "columns": [
                        {"name": "id", "type": "UUID", "primary_key": true},
                        {"name": "user_id", "type": "INT"}
                    ],
                    "indexes": [{"name": "idx_sessions_user", "columns": ["user_id"]}]
                }
            ],
            "relationships": [
                {"from_table": "sessions", "from_column": "user_id", "to_table": "users", "to_column": "id", "type": "many_to_one"}
            ]
        }));
        let ddl = render(&schema);
        assert_eq!(ddl.matches("CREATE TABLE").count(), 2);
        assert_eq!(ddl.matches("ALTER TABLE").count(), 1);
        assert_eq!(ddl.matches("INDEX").count(), 1);
    }

    #[test]
    fn test_colliding_constraint_names() {
        let schema = schema(json!({
            "name": "app",
            "tables": [
                users(),
                {
                    "name": "messages",
                    "columns": [
                        {"name": "id", "type": "SERIAL", "primary_key": true},
                        {"name": "sender_id", "type": "INT"},
                        {"name": "recipient_id", "type": "INT"}
                    ]
                }
            ],
            "relationships": [
                {"from_table": "messages", "from_column": "sender_id", "to_table": "users", "to_column": "id", "type": "many_to_one"},
                {"from_table": "messages", "from_column": "recipient_id", "to_table": "users", "to_column": "id", "type": "many_to_one", "on_delete": "SET NULL"}
            ]
        }));
        let ddl = render(&schema);
        assert!(ddl.contains(
            "ADD CONSTRAINT fk_messages_users FOREIGN KEY (sender_id) REFERENCES users(id) ON DELETE CASCADE;"
        ));
        assert!(ddl.contains(
            "ADD CONSTRAINT fk_messages_users_2 FOREIGN KEY (recipient_id) REFERENCES users(id) ON DELETE SET NULL;"
        ));
    }

    #[test]
    fn test_suffix_skips_taken_names() {
        let rel = |from: &str, to: &str| Relationship {
            from_table: from.to_string(),
            from_column: "id".to_string(),
            to_table: to.to_string(),
            to_column: "id".to_string(),
            kind: crate::ir::RelationshipKind::ManyToOne,
            on_delete: None,
        };
        let mut names = ConstraintNames::default();
        assert_eq!(names.assign(&rel("a", "b_2")), "fk_a_b_2");
        assert_eq!(names.assign(&rel("a", "b")), "fk_a_b");
        assert_eq!(names.assign(&rel("a", "b")), "fk_a_b_3");
    }

    #[test]
    fn test_contradictory_modifiers() {
        let schema = schema(json!({
            "name": "app",
            "tables": [{
                "name": "tokens",
                "columns": [{"name": "id", "type": "UUID", "primary_key": true, "nullable": true, "unique": true, "default": "gen_random_uuid()"}]
            }]
        }));
        assert!(render(&schema).contains("    id UUID PRIMARY KEY UNIQUE DEFAULT gen_random_uuid()\n"));
    }

    #[test]
    fn test_no_on_delete_clause() {
        let schema = schema(json!({
            "name": "app",
            "tables": [
                users(),
                {"name": "posts", "columns": [{"name": "user_id", "type": "INT"}]}
            ],
            "relationships": [
                {"from_table": "posts", "from_column": "user_id", "to_table": "users", "to_column": "id", "type": "many_to_one", "on_delete": null}
            ]
        }));
        assert!(render(&schema).contains("REFERENCES users(id);\n"));
    }

    #[test]
    fn test_deterministic() {
        let schema = schema(json!({"name": "app", "tables": [users()]}));
        assert_eq!(render(&schema), render(&schema));
    }
}
