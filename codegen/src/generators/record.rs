//! Plain value-object record generation
//!
//! Emits one plain struct per table with `Option`-wrapped nullable fields.
//! When any column carries a default, a `new` constructor is emitted that
//! takes the required fields and fills in defaults and `None`s; fields are
//! never reordered.

use std::fmt::Write;

use tablesmith_types::model::{Column, EnumKind, EnumType, Table};

use crate::assemble;
use crate::generators::{RustDefault, rust_default_expr};
use crate::naming::{self, sanitize_identifier};
use crate::options::GenerateOptions;
use crate::profile;
use crate::registry::DialectGenerator;
use crate::relations::Relationship;
use crate::resolver::ResolvedType;
use crate::state::{GenState, Marker};

pub struct RecordGenerator;

/// How one field participates in the generated constructor
enum FieldInit {
    Required,
    Default(RustDefault),
    None,
}

struct RecordField {
    name: String,
    ty: String,
    nullable: bool,
    init: FieldInit,
}

impl DialectGenerator for RecordGenerator {
    fn generate_model(
        &self,
        table: &Table,
        state: &mut GenState,
        _relations: &[&Relationship],
        opts: &GenerateOptions,
    ) -> String {
        let class_name = naming::class_name(&table.name, opts);
        let fields: Vec<RecordField> = table
            .columns
            .iter()
            .map(|column| record_field(column, table, state, opts))
            .collect();

        let mut model = String::from("\n\n");
        model.push_str("#[derive(Debug, Clone, PartialEq)]\n");
        let _ = writeln!(model, "pub struct {class_name} {{");
        for field in &fields {
            let _ = writeln!(model, "    pub {}: {},", field.name, field.ty);
        }
        model.push_str("}\n");

        let has_defaults = fields
            .iter()
            .any(|f| matches!(f.init, FieldInit::Default(_)));
        if has_defaults && !opts.defaults_off {
            model.push('\n');
            model.push_str(&render_constructor(&class_name, &fields));
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
        if state.is_marked(Marker::Json) {
            header.push_str("use serde_json::Value;\n");
        }
        if state.is_marked(Marker::Uuid) {
            header.push_str("use uuid::Uuid;\n");
        }

        header
    }

    fn render_template(&self) -> Option<&'static str> {
        Some("//! Auto-generated value records from a parsed schema\n\n{header}\n{models}")
    }

    fn generate_enums(&self, enums: &[EnumType], _state: &mut GenState) -> Option<String> {
        let mut out = String::new();
        for e in enums {
            out.push_str("\n\n");
            out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq)]\n");
            if e.kind == EnumKind::Numeric {
                out.push_str("#[repr(i64)]\n");
            }
            let _ = writeln!(out, "pub enum {} {{", e.class_name);
            for member in &e.members {
                match e.kind {
                    EnumKind::Text => {
                        let _ = writeln!(out, "    {},", member.name);
                    }
                    EnumKind::Numeric => {
                        let _ = writeln!(out, "    {} = {},", member.name, member.value);
                    }
                }
            }
            out.push_str("}\n");

            if e.kind == EnumKind::Text {
                out.push('\n');
                let _ = writeln!(out, "impl {} {{", e.class_name);
                out.push_str("    pub fn as_str(&self) -> &'static str {\n");
                out.push_str("        match self {\n");
                for member in &e.members {
                    let _ = writeln!(
                        out,
                        "            {}::{} => \"{}\",",
                        e.class_name, member.name, member.value
                    );
                }
                out.push_str("        }\n    }\n}\n");
            }
        }
        Some(out)
    }
}

fn record_field(
    column: &Column,
    table: &Table,
    state: &mut GenState,
    opts: &GenerateOptions,
) -> RecordField {
    let assembled = assemble::assemble(column, table, &profile::RECORD, state, opts);
    let resolved = &assembled.resolved;
    let ty = option_wrap(resolved, column.nullable);

    let init = match column.default.as_deref().filter(|_| !opts.defaults_off) {
        Some(raw) => match rust_default_expr(raw, resolved) {
            Some(expr) => {
                if matches!(expr, RustDefault::Now) {
                    state.mark(Marker::NowFunc);
                }
                FieldInit::Default(expr)
            }
            None if column.nullable => FieldInit::None,
            None => FieldInit::Required,
        },
        None if column.nullable => FieldInit::None,
        None => FieldInit::Required,
    };

    RecordField {
        name: sanitize_identifier(&column.name),
        ty,
        nullable: column.nullable,
        init,
    }
}

fn option_wrap(resolved: &ResolvedType, nullable: bool) -> String {
    if nullable {
        format!("Option<{}>", resolved.field)
    } else {
        resolved.field.clone()
    }
}

fn render_constructor(class_name: &str, fields: &[RecordField]) -> String {
    let params: Vec<String> = fields
        .iter()
        .filter(|f| matches!(f.init, FieldInit::Required))
        .map(|f| format!("{}: {}", f.name, f.ty))
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "impl {class_name} {{");
    let _ = writeln!(out, "    pub fn new({}) -> Self {{", params.join(", "));
    out.push_str("        Self {\n");
    for field in fields {
        match &field.init {
            FieldInit::Required => {
                let _ = writeln!(out, "            {},", field.name);
            }
            FieldInit::Default(default) => {
                let expr = match default {
                    RustDefault::Now => assemble::now_expr(&profile::RECORD.clauses).to_string(),
                    RustDefault::Expr(expr) => expr.clone(),
                };
                let expr = if field.nullable {
                    format!("Some({expr})")
                } else {
                    expr
                };
                let _ = writeln!(out, "            {}: {expr},", field.name);
            }
            FieldInit::None => {
                let _ = writeln!(out, "            {}: None,", field.name);
            }
        }
    }
    out.push_str("        }\n    }\n}\n");
    out
}
