//! Validation model generation
//!
//! Emits serde + schemars structs. Defaults become serde provider
//! functions grouped in a per-table module; generated (computed) columns
//! are marked read-only so they validate but never round-trip.

use std::fmt::Write;

use tablesmith_types::TypeFamily;
use tablesmith_types::model::{Column, EnumKind, EnumType, Size, Table};

use crate::assemble;
use crate::generators::{RustDefault, rust_default_expr};
use crate::naming::{self, sanitize_identifier, snake_name};
use crate::options::GenerateOptions;
use crate::profile;
use crate::registry::DialectGenerator;
use crate::relations::Relationship;
use crate::state::{GenState, Marker};

pub struct ValidatorGenerator;

struct ProviderFn {
    name: String,
    return_type: String,
    body: String,
}

impl DialectGenerator for ValidatorGenerator {
    fn generate_model(
        &self,
        table: &Table,
        state: &mut GenState,
        _relations: &[&Relationship],
        opts: &GenerateOptions,
    ) -> String {
        let class_name = naming::class_name(&table.name, opts);
        let defaults_mod = format!("{}_defaults", snake_name(&table.name));
        let mut providers: Vec<ProviderFn> = Vec::new();

        let mut model = String::from("\n\n");
        model.push_str("#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]\n");
        let _ = writeln!(model, "pub struct {class_name} {{");

        for column in &table.columns {
            model.push_str(&field_lines(
                column,
                table,
                &defaults_mod,
                &mut providers,
                state,
                opts,
            ));
        }
        model.push_str("}\n");

        if !providers.is_empty() {
            model.push('\n');
            let _ = writeln!(model, "mod {defaults_mod} {{");
            model.push_str("    use super::*;\n");
            for provider in &providers {
                out_provider(&mut model, provider);
            }
            model.push_str("}\n");
        }

        model
    }

    fn create_header(&self, _tables: &[Table], state: &GenState, _opts: &GenerateOptions) -> String {
        let mut header = String::new();

        let mut chrono = Vec::new();
        if state.is_marked(Marker::Date) {
            chrono.push("NaiveDate");
        }
        if state.is_marked(Marker::DateTime) {
            chrono.push("NaiveDateTime");
        }
        if state.is_marked(Marker::Time) {
            chrono.push("NaiveTime");
        }
        if state.is_marked(Marker::NowFunc) {
            chrono.push("Utc");
        }
        match chrono.as_slice() {
            [] => {}
            [only] => {
                let _ = writeln!(header, "use chrono::{only};");
            }
            many => {
                let _ = writeln!(header, "use chrono::{{{}}};", many.join(", "));
            }
        }

        if state.is_marked(Marker::Decimal) {
            header.push_str("use rust_decimal::Decimal;\n");
        }
        header.push_str("use schemars::JsonSchema;\n");
        header.push_str("use serde::{Deserialize, Serialize};\n");
        if state.is_marked(Marker::Json) {
            header.push_str("use serde_json::Value;\n");
        }
        if state.is_marked(Marker::Uuid) {
            header.push_str("use uuid::Uuid;\n");
        }

        header
    }

    fn render_template(&self) -> Option<&'static str> {
        Some("//! Auto-generated validation models from a parsed schema\n\n{header}\n{models}")
    }

    fn generate_enums(&self, enums: &[EnumType], _state: &mut GenState) -> Option<String> {
        let mut out = String::new();
        for e in enums {
            out.push_str("\n\n");
            out.push_str(
                "#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]\n",
            );
            if e.kind == EnumKind::Numeric {
                out.push_str("#[repr(i64)]\n");
            }
            let _ = writeln!(out, "pub enum {} {{", e.class_name);
            for member in &e.members {
                match e.kind {
                    EnumKind::Text => {
                        let _ = writeln!(out, "    #[serde(rename = \"{}\")]", member.value);
                        let _ = writeln!(out, "    {},", member.name);
                    }
                    EnumKind::Numeric => {
                        let _ = writeln!(out, "    {} = {},", member.name, member.value);
                    }
                }
            }
            out.push_str("}\n");
        }
        Some(out)
    }
}

fn field_lines(
    column: &Column,
    table: &Table,
    defaults_mod: &str,
    providers: &mut Vec<ProviderFn>,
    state: &mut GenState,
    opts: &GenerateOptions,
) -> String {
    let assembled = assemble::assemble(column, table, &profile::VALIDATOR, state, opts);
    let resolved = &assembled.resolved;
    let field_name = sanitize_identifier(&column.name);
    let ty = if column.nullable {
        format!("Option<{}>", resolved.field)
    } else {
        resolved.field.clone()
    };

    let mut lines = String::new();

    if field_name != column.name {
        let _ = writeln!(lines, "    #[serde(rename = \"{}\")]", column.name);
    }

    if let (Some(Size::Scalar(max)), TypeFamily::String | TypeFamily::Text) =
        (column.size, resolved.family)
    {
        if !resolved.custom && !resolved.array {
            let _ = writeln!(lines, "    #[schemars(length(max = {max}))]");
        }
    }

    if column.generated_as.is_some() {
        lines.push_str("    #[schemars(read_only)]\n");
    }

    let default_expr = column
        .default
        .as_deref()
        .filter(|_| !opts.defaults_off)
        .and_then(|raw| rust_default_expr(raw, resolved));
    match default_expr {
        Some(expr) => {
            if matches!(expr, RustDefault::Now) {
                state.mark(Marker::NowFunc);
            }
            let _ = writeln!(
                lines,
                "    #[serde(default = \"{defaults_mod}::{field_name}\")]"
            );
            providers.push(provider_fn(&field_name, &ty, column.nullable, &expr));
        }
        None if column.nullable => {
            lines.push_str("    #[serde(default)]\n");
        }
        None => {}
    }

    let _ = writeln!(lines, "    pub {field_name}: {ty},");
    lines
}

fn provider_fn(field_name: &str, ty: &str, nullable: bool, default: &RustDefault) -> ProviderFn {
    let expr = match default {
        RustDefault::Now => assemble::now_expr(&profile::VALIDATOR.clauses).to_string(),
        RustDefault::Expr(expr) => expr.clone(),
    };
    let expr = if nullable {
        format!("Some({expr})")
    } else {
        expr
    };
    ProviderFn {
        name: field_name.to_string(),
        return_type: ty.to_string(),
        body: expr,
    }
}

fn out_provider(model: &mut String, provider: &ProviderFn) {
    let _ = writeln!(
        model,
        "\n    pub(super) fn {}() -> {} {{\n        {}\n    }}",
        provider.name, provider.return_type, provider.body
    );
}
