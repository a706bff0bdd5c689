//! Flat CREATE TABLE statement generation

use std::fmt::Write;

use tablesmith_types::model::{EnumType, Table};

use crate::assemble;
use crate::options::GenerateOptions;
use crate::profile;
use crate::registry::DialectGenerator;
use crate::relations::Relationship;
use crate::state::GenState;

pub struct SqlGenerator;

impl DialectGenerator for SqlGenerator {
    fn generate_model(
        &self,
        table: &Table,
        state: &mut GenState,
        _relations: &[&Relationship],
        opts: &GenerateOptions,
    ) -> String {
        let composite_pk = table.primary_key.len() > 1;
        let mut lines = Vec::new();

        for column in &table.columns {
            let mut assembled = assemble::assemble(column, table, &profile::SQL, state, opts);
            if composite_pk {
                // A multi-column key moves to a single table-level constraint
                assembled.clauses.retain(|c| c != "PRIMARY KEY");
            }
            lines.push(format!(
                "  \"{}\" {}",
                column.name,
                assembled.joined(&profile::SQL.clauses)
            ));
        }

        if composite_pk {
            let quoted: Vec<String> = table
                .primary_key
                .iter()
                .map(|pk| format!("\"{pk}\""))
                .collect();
            lines.push(format!("  PRIMARY KEY ({})", quoted.join(", ")));
        }

        for check in &table.checks {
            lines.push(format!("  CHECK ({})", check.statement));
        }

        let mut model = String::from("\n\n");
        let _ = writeln!(model, "CREATE TABLE {} (", qualified_name(table));
        model.push_str(&lines.join(",\n"));
        model.push_str("\n);\n");

        for index in &table.indexes {
            let columns: Vec<String> = index.columns.iter().map(|c| format!("\"{c}\"")).collect();
            let unique = if index.unique { "UNIQUE " } else { "" };
            let _ = writeln!(
                model,
                "CREATE {unique}INDEX \"{}\" ON {} ({});",
                index.name,
                qualified_name(table),
                columns.join(", ")
            );
        }

        model
    }

    fn create_header(&self, tables: &[Table], _state: &GenState, opts: &GenerateOptions) -> String {
        if !opts.schema_global {
            return String::new();
        }
        let mut schemas: Vec<&str> = tables
            .iter()
            .filter_map(|t| t.schema.as_deref())
            .collect();
        schemas.sort_unstable();
        schemas.dedup();

        let mut header = String::new();
        for schema in schemas {
            let _ = writeln!(header, "CREATE SCHEMA IF NOT EXISTS \"{schema}\";");
        }
        header
    }

    fn render_template(&self) -> Option<&'static str> {
        Some("-- Auto-generated schema statements from a parsed schema\n\n{header}\n{models}")
    }

    fn generate_enums(&self, enums: &[EnumType], _state: &mut GenState) -> Option<String> {
        let mut out = String::new();
        for e in enums {
            let values: Vec<String> = e.members.iter().map(|m| format!("'{}'", m.value)).collect();
            let _ = write!(
                out,
                "\n\nCREATE TYPE {} AS ENUM ({});\n",
                e.name,
                values.join(", ")
            );
        }
        Some(out)
    }
}

/// `"schema"."table"` when the table is qualified, else `"table"`
fn qualified_name(table: &Table) -> String {
    match &table.schema {
        Some(schema) => format!("\"{schema}\".\"{}\"", table.name),
        None => format!("\"{}\"", table.name),
    }
}
