//! Declarative ORM model generation
//!
//! Emits one attribute-macro struct per table, in the lowercase attribute
//! syntax: the column's declaration type first, then the constraint
//! clauses in assembly order.

use std::fmt::Write;

use tablesmith_types::model::{EnumKind, EnumType, Table};

use crate::assemble;
use crate::naming::{self, sanitize_identifier};
use crate::options::GenerateOptions;
use crate::profile;
use crate::registry::DialectGenerator;
use crate::relations::{RelationKind, Relationship};
use crate::state::{GenState, Marker};

pub struct OrmGenerator;

impl DialectGenerator for OrmGenerator {
    fn generate_model(
        &self,
        table: &Table,
        state: &mut GenState,
        relations: &[&Relationship],
        opts: &GenerateOptions,
    ) -> String {
        let class_name = naming::class_name(&table.name, opts);
        let mut model = String::from("\n\n");

        match (&table.schema, opts.schema_global) {
            (Some(schema), false) => {
                let _ = writeln!(
                    model,
                    "#[Model(table = \"{}\", schema = \"{schema}\")]",
                    table.name
                );
            }
            _ => {
                let _ = writeln!(model, "#[Model(table = \"{}\")]", table.name);
            }
        }

        for index in &table.indexes {
            let attr = if index.unique { "unique_index" } else { "index" };
            let _ = writeln!(
                model,
                "#[{attr}(name = \"{}\", columns({}))]",
                index.name,
                index.columns.join(", ")
            );
        }

        let _ = writeln!(model, "pub struct {class_name} {{");

        for column in &table.columns {
            let assembled = assemble::assemble(column, table, &profile::ORM, state, opts);
            let _ = writeln!(
                model,
                "    #[column({})]",
                assembled.joined(&profile::ORM.clauses)
            );
            let _ = writeln!(
                model,
                "    pub {}: {},",
                sanitize_identifier(&column.name),
                assembled.resolved.field
            );
        }

        for relation in relations {
            state.mark(Marker::Relations);
            model.push_str(&render_relation(relation, opts));
        }

        model.push_str("}\n");
        model
    }

    fn create_header(&self, _tables: &[Table], state: &GenState, _opts: &GenerateOptions) -> String {
        let mut header = String::from("use tablesmith::prelude::*;\n");

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
        if state.is_marked(Marker::NowFunc) {
            header.push_str("use tablesmith::funcs::now;\n");
        }
        if state.is_marked(Marker::Relations) {
            header.push_str("use tablesmith::relation::{ManyToOne, OneToMany};\n");
        }
        if state.is_marked(Marker::Uuid) {
            header.push_str("use uuid::Uuid;\n");
        }

        header
    }

    fn render_template(&self) -> Option<&'static str> {
        Some("//! Auto-generated model definitions from a parsed schema\n\n{header}\n{models}")
    }

    fn generate_enums(&self, enums: &[EnumType], _state: &mut GenState) -> Option<String> {
        let mut out = String::new();
        for e in enums {
            out.push_str("\n\n");
            out.push_str("#[derive(ModelEnum, Clone, Copy, PartialEq, Eq, Debug)]\n");
            if e.kind == EnumKind::Numeric {
                out.push_str("#[repr(i64)]\n");
            }
            let _ = writeln!(out, "pub enum {} {{", e.class_name);
            for member in &e.members {
                match e.kind {
                    EnumKind::Text => {
                        let _ = writeln!(out, "    #[value(\"{}\")]", member.value);
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

fn render_relation(relation: &Relationship, opts: &GenerateOptions) -> String {
    let related_class = naming::class_name(&relation.target_table, opts);
    let attr_name = sanitize_identifier(&relation.attr_name());
    let back_populates = relation.back_populates();
    match relation.kind {
        RelationKind::ManyToOne => format!(
            "    #[many_to_one(model = \"{related_class}\", back_populates = \"{back_populates}\")]\n    pub {attr_name}: ManyToOne<{related_class}>,\n"
        ),
        RelationKind::OneToMany => format!(
            "    #[one_to_many(model = \"{related_class}\", back_populates = \"{back_populates}\")]\n    pub {attr_name}: OneToMany<{related_class}>,\n"
        ),
    }
}
