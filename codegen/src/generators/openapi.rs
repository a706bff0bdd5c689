//! OpenAPI 3 schema document generation
//!
//! Unlike the source-text dialects, the whole document is produced in
//! `create_header` from the full table set; per-table bodies are empty.
//! Enum types become named component schemas referenced with `$ref`.

use heck::ToPascalCase;
use serde_json::{Map, Value, json};

use tablesmith_types::TypeFamily;
use tablesmith_types::model::{Column, Size, Table};

use crate::options::GenerateOptions;
use crate::registry::DialectGenerator;
use crate::relations::Relationship;
use crate::state::GenState;

pub struct OpenApiGenerator;

impl DialectGenerator for OpenApiGenerator {
    fn generate_model(
        &self,
        _table: &Table,
        _state: &mut GenState,
        _relations: &[&Relationship],
        _opts: &GenerateOptions,
    ) -> String {
        // The document is assembled once, in create_header
        String::new()
    }

    fn create_header(&self, tables: &[Table], state: &GenState, opts: &GenerateOptions) -> String {
        let mut schemas = Map::new();

        for (_, custom) in state.custom_types() {
            let values: Vec<Value> = custom
                .members
                .iter()
                .map(|m| Value::String(m.value.clone()))
                .collect();
            schemas.insert(
                custom.class_name.clone(),
                json!({"type": "string", "enum": values}),
            );
        }

        for table in tables {
            let name = table.name.to_pascal_case();
            schemas.insert(name, table_schema(table, state, opts));
        }

        let document = json!({"components": {"schemas": Value::Object(schemas)}});
        serde_json::to_string_pretty(&document).unwrap_or_default()
    }
}

fn table_schema(table: &Table, state: &GenState, opts: &GenerateOptions) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for column in &table.columns {
        let mut property = column_schema(column, state);

        if let Some(raw) = column.default.as_deref().filter(|_| !opts.defaults_off) {
            apply_default(&mut property, raw);
        }

        if !column.nullable && column.default.is_none() {
            required.push(Value::String(column.name.clone()));
        }
        properties.insert(column.name.clone(), property);
    }

    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("object".into()));
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".into(), Value::Array(required));
    }
    Value::Object(schema)
}

fn column_schema(column: &Column, state: &GenState) -> Value {
    let array = column.type_token.contains('[');
    let scalar = column.type_token.split('[').next().unwrap_or_default();
    let bare = scalar.rsplit('.').next().unwrap_or(scalar).trim();

    let base = if let Some(custom) = state.custom_type(bare) {
        json!({"$ref": format!("#/components/schemas/{}", custom.class_name)})
    } else {
        scalar_schema(bare, column.size)
    };

    if array {
        json!({"type": "array", "items": base})
    } else {
        base
    }
}

fn scalar_schema(bare: &str, size: Option<Size>) -> Value {
    match TypeFamily::classify(bare) {
        TypeFamily::String | TypeFamily::Text => match size {
            Some(Size::Scalar(max)) => json!({"type": "string", "maxLength": max}),
            _ => json!({"type": "string"}),
        },
        TypeFamily::Integer => json!({"type": "integer"}),
        TypeFamily::BigInteger => json!({"type": "integer", "format": "int64"}),
        TypeFamily::Float => json!({"type": "number", "format": "float"}),
        TypeFamily::Numeric => json!({"type": "number"}),
        TypeFamily::Boolean => json!({"type": "boolean"}),
        TypeFamily::DateTime => json!({"type": "string", "format": "date-time"}),
        TypeFamily::Date => json!({"type": "string", "format": "date"}),
        TypeFamily::Time => json!({"type": "string", "format": "time"}),
        TypeFamily::Uuid => json!({"type": "string", "format": "uuid"}),
        TypeFamily::Json => json!({"type": "object"}),
        TypeFamily::Binary => json!({"type": "string", "format": "binary"}),
        TypeFamily::Unknown => json!({"type": "string"}),
    }
}

/// Parse a raw default into the property's own type; unparsable values and
/// NULL are skipped.
fn apply_default(property: &mut Value, raw: &str) {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("null") {
        return;
    }
    let Some(object) = property.as_object_mut() else {
        return;
    };
    let default = match object.get("type").and_then(Value::as_str) {
        Some("integer") => trimmed.parse::<i64>().ok().map(Value::from),
        Some("number") => trimmed.parse::<f64>().ok().map(Value::from),
        Some("boolean") => match trimmed.to_lowercase().as_str() {
            "true" | "1" => Some(Value::Bool(true)),
            "false" | "0" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    };
    if let Some(default) = default {
        object.insert("default".into(), default);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tablesmith_types::model::{EnumKind, EnumMember, EnumType};

    fn column(name: &str, type_token: &str) -> Column {
        Column {
            name: name.into(),
            type_token: type_token.into(),
            size: None,
            nullable: true,
            unique: false,
            default: None,
            reference: None,
            generated_as: None,
            properties: BTreeMap::new(),
        }
    }

    fn users() -> Table {
        let mut id = column("id", "serial");
        id.nullable = false;
        let mut name = column("name", "varchar");
        name.size = Some(Size::Scalar(160));
        name.nullable = false;
        let mut count = column("count", "integer");
        count.default = Some("0".into());
        Table {
            name: "users".into(),
            schema: None,
            columns: vec![id, name, count, column("tags", "varchar[]")],
            primary_key: vec!["id".into()],
            indexes: Vec::new(),
            checks: Vec::new(),
            alter_columns: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    #[test]
    fn test_document_shape() {
        let generator = OpenApiGenerator;
        let state = GenState::new();
        let doc = generator.create_header(&[users()], &state, &GenerateOptions::default());
        let parsed: Value = serde_json::from_str(&doc).unwrap();

        let users = &parsed["components"]["schemas"]["Users"];
        assert_eq!(users["type"], "object");
        assert_eq!(users["properties"]["id"]["type"], "integer");
        assert_eq!(users["properties"]["name"]["maxLength"], 160);
        assert_eq!(users["properties"]["count"]["default"], 0);
        assert_eq!(users["properties"]["tags"]["type"], "array");
        assert_eq!(users["properties"]["tags"]["items"]["type"], "string");
        assert_eq!(users["required"], json!(["id", "name"]));
    }

    #[test]
    fn test_enum_ref() {
        let generator = OpenApiGenerator;
        let mut state = GenState::new();
        state.register_enums(&[EnumType {
            name: "mood".into(),
            class_name: "Mood".into(),
            kind: EnumKind::Text,
            members: vec![
                EnumMember {
                    name: "Happy".into(),
                    value: "happy".into(),
                },
                EnumMember {
                    name: "Sad".into(),
                    value: "sad".into(),
                },
            ],
        }]);

        let mut table = users();
        table.columns.push(column("mood", "mood"));
        let doc = generator.create_header(&[table], &state, &GenerateOptions::default());
        let parsed: Value = serde_json::from_str(&doc).unwrap();

        assert_eq!(
            parsed["components"]["schemas"]["Mood"]["enum"],
            json!(["happy", "sad"])
        );
        assert_eq!(
            parsed["components"]["schemas"]["Users"]["properties"]["mood"]["$ref"],
            "#/components/schemas/Mood"
        );
    }
}
