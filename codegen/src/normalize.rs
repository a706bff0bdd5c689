//! Normalization of raw parser output into the entity model
//!
//! Runs exactly once, before any generator: case-folding to snake_case,
//! quote stripping, reference attachment from table-level constraints and
//! ALTER blocks, enum value sorting. Internal inconsistencies (a reference
//! without a target table, a primary-key name that matches no column) fail
//! loudly here rather than corrupting generated text later.

use heck::ToPascalCase;
use serde_json::Value;

use tablesmith_types::model::{
    AlterColumn, Check, Column, EnumKind, EnumMember, EnumType, Index, Reference, Schema, Size,
    Table,
};

use crate::error::Error;
use crate::input::{
    RawColumn, RawEnumType, RawReference, RawSchema, RawSize, RawTable,
};
use crate::naming::{is_valid_identifier, ordinal_member_name, snake_name};

/// Strip double quotes and a surrounding bracket pair, as the parser keeps
/// the quoting style of the DDL source.
fn clean_value(s: &str) -> String {
    let s = s.replace('"', "");
    match s.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')) {
        Some(inner) => inner.to_string(),
        None => s,
    }
}

/// Clean and case-fold an identifier-style name
fn normal_name(s: &str) -> String {
    snake_name(&clean_value(s))
}

/// Render a JSON default into its raw text form
fn default_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Build the full entity model from raw parser output
pub fn normalize_schema(raw: &RawSchema) -> Result<Schema, Error> {
    let tables = raw
        .tables
        .iter()
        .map(normalize_table)
        .collect::<Result<Vec<_>, _>>()?;
    let enums = raw.types.iter().map(normalize_enum).collect::<Vec<_>>();
    Ok(Schema { tables, enums })
}

fn normalize_table(raw: &RawTable) -> Result<Table, Error> {
    let table_name = normal_name(&raw.name);

    let mut columns = raw
        .columns
        .iter()
        .map(|c| normalize_column(&table_name, c))
        .collect::<Result<Vec<_>, _>>()?;

    // Table-level REFERENCES constraints: split compound constraints into
    // one reference per column, then attach each to the matching column.
    if let Some(constraints) = &raw.constraints {
        for cref in &constraints.references {
            let table = cref.table.as_deref().map(normal_name).ok_or_else(|| {
                Error::Normalize(format!(
                    "reference constraint on table `{table_name}` has no target table"
                ))
            })?;
            let local_names = constraint_local_names(cref.name.as_ref());
            if local_names.is_empty() {
                return Err(Error::Normalize(format!(
                    "reference constraint on table `{table_name}` names no local columns"
                )));
            }
            for (i, local) in local_names.iter().enumerate() {
                let local = normal_name(local);
                let Some(column) = columns.iter_mut().find(|c| c.name == local) else {
                    return Err(Error::Normalize(format!(
                        "reference constraint on table `{table_name}` names unknown column `{local}`"
                    )));
                };
                let target = cref
                    .columns
                    .get(i)
                    .map(|c| normal_name(c))
                    .unwrap_or_else(|| column.name.clone());
                column.reference = Some(Reference {
                    table: table.clone(),
                    column: target,
                    on_delete: cref.on_delete.clone(),
                    on_update: cref.on_update.clone(),
                    schema: cref.schema.as_deref().map(normal_name),
                });
            }
        }

        // Single-column unique constraints collapse onto the column itself
        for unique in &constraints.uniques {
            if let [only] = unique.columns.as_slice() {
                let only = normal_name(only);
                if let Some(column) = columns.iter_mut().find(|c| c.name == only) {
                    column.unique = true;
                }
            }
        }
    }

    // Merge unnamed ALTER-added foreign keys into columns that do not
    // already carry an inline reference.
    let mut alter_columns = Vec::new();
    if let Some(alter) = &raw.alter {
        for ac in &alter.columns {
            let name = normal_name(&ac.name);
            let reference = ac
                .references
                .as_ref()
                .map(|r| normalize_reference(&table_name, &name, r))
                .transpose()?;
            if ac.constraint_name.is_none() {
                if let Some(reference) = &reference {
                    if let Some(column) = columns
                        .iter_mut()
                        .find(|c| c.name == name && c.reference.is_none())
                    {
                        column.reference = Some(reference.clone());
                    }
                }
            }
            alter_columns.push(AlterColumn {
                name,
                constraint_name: ac.constraint_name.clone(),
                reference,
            });
        }
    }

    let primary_key: Vec<String> = raw.primary_key.iter().map(|pk| normal_name(pk)).collect();
    for pk in &primary_key {
        if !columns.iter().any(|c| &c.name == pk) {
            return Err(Error::Normalize(format!(
                "primary key `{pk}` on table `{table_name}` matches no column"
            )));
        }
    }

    let indexes = raw
        .indexes
        .iter()
        .map(|idx| Index {
            name: clean_value(&idx.index_name),
            columns: idx.columns.iter().map(|c| normal_name(c)).collect(),
            unique: idx.unique,
        })
        .collect();

    let checks = raw
        .checks
        .iter()
        .map(|check| Check {
            name: check.constraint_name.clone(),
            statement: match &check.statement {
                Value::String(s) => clean_value(s),
                other => other.to_string(),
            },
        })
        .collect();

    Ok(Table {
        name: table_name,
        schema: raw.table_schema.as_deref().map(|s| clean_value(s)),
        columns,
        primary_key,
        indexes,
        checks,
        alter_columns,
        properties: raw.properties.clone().into_iter().collect(),
    })
}

/// Local column names of a table-level constraint: a comma-separated string
/// or a list, depending on the parser.
fn constraint_local_names(name: Option<&Value>) -> Vec<String> {
    match name {
        Some(Value::String(s)) => s.split(',').map(|part| part.trim().to_string()).collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn normalize_column(table_name: &str, raw: &RawColumn) -> Result<Column, Error> {
    let name = normal_name(&raw.name);

    // The size parameter travels separately; a parenthesized segment left
    // in the token is dropped.
    let mut type_token = clean_value(&raw.type_token).to_lowercase();
    if let Some(open) = type_token.find('(') {
        let suffix: String = type_token[open..]
            .chars()
            .skip_while(|c| *c != ')')
            .skip(1)
            .collect();
        type_token.truncate(open);
        type_token.push_str(&suffix);
    }
    let type_token = type_token.trim().to_string();

    let reference = raw
        .references
        .as_ref()
        .map(|r| normalize_reference(table_name, &name, r))
        .transpose()?;

    Ok(Column {
        name,
        type_token,
        size: raw.size.as_ref().and_then(normalize_size),
        nullable: raw.nullable,
        unique: raw.unique,
        default: raw.default.as_ref().and_then(default_text),
        reference,
        generated_as: raw.generated.as_ref().map(|g| g.expression.clone()),
        properties: raw.properties.clone().into_iter().collect(),
    })
}

fn normalize_reference(
    table_name: &str,
    column_name: &str,
    raw: &RawReference,
) -> Result<Reference, Error> {
    let table = raw.table.as_deref().map(normal_name).ok_or_else(|| {
        Error::Normalize(format!(
            "column `{table_name}.{column_name}` has a reference without a target table"
        ))
    })?;
    // The target column defaults to the referencing column's own name.
    let column = raw
        .column
        .as_deref()
        .map(normal_name)
        .unwrap_or_else(|| column_name.to_string());
    Ok(Reference {
        table,
        column,
        on_delete: raw.on_delete.clone(),
        on_update: raw.on_update.clone(),
        schema: raw.schema.as_deref().map(normal_name),
    })
}

fn normalize_size(raw: &RawSize) -> Option<Size> {
    match raw {
        RawSize::Int(n) => Some(Size::Scalar(*n)),
        RawSize::Str(s) => s.trim().parse().ok().map(Size::Scalar),
        RawSize::Pair(p, s) => Some(Size::Precision(*p, *s)),
    }
}

fn normalize_enum(raw: &RawEnumType) -> EnumType {
    let name = clean_value(&raw.name).to_lowercase();
    let class_name = name.to_pascal_case();

    let mut values: Vec<String> = raw
        .properties
        .values
        .iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(clean_value(s).replace('\'', "")),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect();
    // Emitted enum values are always lexicographically sorted regardless of
    // input order.
    values.sort();

    let kind = if !values.is_empty() && values.iter().all(|v| v.chars().all(|c| c.is_ascii_digit()))
    {
        EnumKind::Numeric
    } else {
        EnumKind::Text
    };

    let members = values
        .iter()
        .enumerate()
        .map(|(i, value)| EnumMember {
            name: member_name(kind, i, value),
            value: value.clone(),
        })
        .collect();

    EnumType {
        name,
        class_name,
        kind,
        members,
    }
}

/// Identifier-safe member name. Numeric members are not valid identifiers
/// and take their name from the fixed ordinal table instead.
fn member_name(kind: EnumKind, position: usize, value: &str) -> String {
    match kind {
        EnumKind::Numeric => ordinal_member_name(position).to_pascal_case(),
        EnumKind::Text => {
            let name = value.to_pascal_case();
            if is_valid_identifier(&name) {
                name
            } else {
                format!("V{name}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::load_raw_schema;

    fn normalize_doc(doc: &str) -> Result<Schema, Error> {
        normalize_schema(&load_raw_schema(Some(doc), None).unwrap())
    }

    #[test]
    fn test_names_are_folded() {
        let schema = normalize_doc(
            r#"{"tables": [{
                "table_name": "\"UserOrders\"",
                "columns": [{"name": "\"OrderID\"", "type": "Integer", "nullable": false}],
                "primary_key": ["OrderID"]
            }]}"#,
        )
        .unwrap();
        let table = &schema.tables[0];
        assert_eq!(table.name, "user_orders");
        assert_eq!(table.columns[0].name, "order_id");
        assert_eq!(table.columns[0].type_token, "integer");
        assert_eq!(table.primary_key, vec!["order_id".to_string()]);
    }

    #[test]
    fn test_reference_defaults_to_own_column() {
        let schema = normalize_doc(
            r#"{"tables": [
                {"table_name": "users", "columns": [{"name": "id", "type": "serial"}], "primary_key": []},
                {"table_name": "posts", "columns": [
                    {"name": "user_id", "type": "integer", "references": {"table": "users"}}
                ], "primary_key": []}
            ]}"#,
        )
        .unwrap();
        let reference = schema.tables[1].columns[0].reference.as_ref().unwrap();
        assert_eq!(reference.table, "users");
        assert_eq!(reference.column, "user_id");
    }

    #[test]
    fn test_reference_without_table_fails() {
        let err = normalize_doc(
            r#"{"tables": [{"table_name": "posts", "columns": [
                {"name": "user_id", "type": "integer", "references": {"column": "id"}}
            ], "primary_key": []}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Normalize(_)));
    }

    #[test]
    fn test_unknown_primary_key_fails() {
        let err = normalize_doc(
            r#"{"tables": [{"table_name": "posts", "columns": [
                {"name": "id", "type": "serial"}
            ], "primary_key": ["missing"]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Normalize(_)));
    }

    #[test]
    fn test_alter_reference_is_merged() {
        let schema = normalize_doc(
            r#"{"tables": [{"table_name": "posts",
                "columns": [{"name": "author_id", "type": "integer"}],
                "primary_key": [],
                "alter": {"columns": [{
                    "name": "author_id",
                    "constraint_name": null,
                    "references": {"table": "users", "column": "id"}
                }]}
            }]}"#,
        )
        .unwrap();
        let reference = schema.tables[0].columns[0].reference.as_ref().unwrap();
        assert_eq!(reference.table, "users");
        assert_eq!(reference.column, "id");
        assert_eq!(schema.tables[0].alter_columns.len(), 1);
    }

    #[test]
    fn test_compound_constraint_is_split() {
        let schema = normalize_doc(
            r#"{"tables": [{"table_name": "line_items",
                "columns": [
                    {"name": "order_id", "type": "integer"},
                    {"name": "product_id", "type": "integer"}
                ],
                "primary_key": [],
                "constraints": {"references": [{
                    "name": "order_id,product_id",
                    "columns": ["id", "id"],
                    "table": "orders"
                }]}
            }]}"#,
        )
        .unwrap();
        let columns = &schema.tables[0].columns;
        assert_eq!(columns[0].reference.as_ref().unwrap().column, "id");
        assert_eq!(columns[1].reference.as_ref().unwrap().table, "orders");
    }

    #[test]
    fn test_enum_values_sorted() {
        let schema = normalize_doc(
            r#"{"types": [{
                "type_name": "material_type",
                "base_type": "ENUM",
                "properties": {"values": ["'video'", "'article'"]}
            }]}"#,
        )
        .unwrap();
        let e = &schema.enums[0];
        assert_eq!(e.class_name, "MaterialType");
        assert_eq!(e.kind, EnumKind::Text);
        let values: Vec<_> = e.members.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, ["article", "video"]);
        assert_eq!(e.members[0].name, "Article");
    }

    #[test]
    fn test_numeric_enum_member_names() {
        let schema = normalize_doc(
            r#"{"types": [{
                "type_name": "levels",
                "base_type": "ENUM",
                "properties": {"values": ["5", "1"]}
            }]}"#,
        )
        .unwrap();
        let e = &schema.enums[0];
        assert_eq!(e.kind, EnumKind::Numeric);
        assert_eq!(e.members[0].name, "Zero");
        assert_eq!(e.members[0].value, "1");
        assert_eq!(e.members[1].name, "One");
        assert_eq!(e.members[1].value, "5");
    }
}
