//! Naming helpers for generated identifiers

use heck::{ToPascalCase, ToSnakeCase};

use crate::options::GenerateOptions;

/// Rust keywords that cannot be used as bare field names in generated source
const RESERVED: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
];

/// Fixed names for numeric enum members that are not valid identifiers
const ORDINAL_WORDS: &[&str] = &["zero", "one", "two", "three", "four", "five", "six"];

/// Fold a raw name to snake_case
///
/// `heck` already folds all-caps tokens like `ID` to `id`, which matches the
/// normalization convention for identifier-style names.
#[must_use]
pub fn snake_name(name: &str) -> String {
    name.to_snake_case()
}

/// Singular form of a table name, honoring an exceptions list.
///
/// A table whose name ends with one of the exception endings is left alone.
#[must_use]
pub fn singular_name(table_name: &str, exceptions: &[String]) -> String {
    if exceptions.iter().any(|e| table_name.ends_with(e.as_str())) {
        return table_name.to_string();
    }
    if let Some(stem) = table_name.strip_suffix("ies") {
        return format!("{stem}y");
    }
    if let Some(stem) = table_name.strip_suffix("s") {
        return stem.to_string();
    }
    table_name.to_string()
}

/// PascalCase class name for a table, honoring the singular naming policy
#[must_use]
pub fn create_class_name(table_name: &str, singular: bool, exceptions: &[String]) -> String {
    let base = if singular {
        singular_name(table_name, exceptions)
    } else {
        table_name.to_string()
    };
    base.replace('-', "_").to_pascal_case()
}

/// Full class name including the configured prefix and suffix
#[must_use]
pub fn class_name(table_name: &str, opts: &GenerateOptions) -> String {
    format!(
        "{}{}{}",
        opts.table_prefix,
        create_class_name(table_name, opts.singular, &opts.naming_exceptions),
        opts.table_suffix
    )
}

/// Whether a name can be used verbatim as a generated identifier
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return false;
    }
    !RESERVED.contains(&name)
}

/// Repair a column name into a usable field identifier.
///
/// Non-alphanumeric characters become underscores; names that still start
/// with a digit or collide with a keyword get an `f_` prefix.
#[must_use]
pub fn sanitize_identifier(name: &str) -> String {
    let mut repaired: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if repaired.is_empty()
        || repaired.chars().next().is_some_and(|c| c.is_ascii_digit())
        || RESERVED.contains(&repaired.as_str())
    {
        repaired = format!("f_{repaired}");
    }
    repaired
}

/// Name for a numeric enum member at the given sorted position
#[must_use]
pub fn ordinal_member_name(position: usize) -> String {
    match ORDINAL_WORDS.get(position) {
        Some(word) => (*word).to_string(),
        None => format!("n{position}"),
    }
}

/// Attribute name for the many-side of a relationship: strip a trailing
/// id-style suffix from the foreign-key column, falling back to the parent
/// table's name.
#[must_use]
pub fn relation_attr_name(fk_column: &str, parent_table: &str) -> String {
    match fk_column.strip_suffix("_id") {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => parent_table.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_class_name() {
        assert_eq!(create_class_name("users", false, &[]), "Users");
        assert_eq!(
            create_class_name("material_attachments", false, &[]),
            "MaterialAttachments"
        );
        assert_eq!(create_class_name("order-items", false, &[]), "OrderItems");
    }

    #[test]
    fn test_singular() {
        assert_eq!(create_class_name("users", true, &[]), "User");
        assert_eq!(create_class_name("categories", true, &[]), "Category");
        assert_eq!(
            create_class_name("species", true, &["species".to_string()]),
            "Species"
        );
    }

    #[test]
    fn test_identifier_checks() {
        assert!(is_valid_identifier("user_id"));
        assert!(!is_valid_identifier("1st"));
        assert!(!is_valid_identifier("type"));
        assert!(!is_valid_identifier(""));

        assert_eq!(sanitize_identifier("1st_place"), "f_1st_place");
        assert_eq!(sanitize_identifier("order date"), "order_date");
        assert_eq!(sanitize_identifier("type"), "f_type");
    }

    #[test]
    fn test_ordinal_member_name() {
        assert_eq!(ordinal_member_name(0), "zero");
        assert_eq!(ordinal_member_name(6), "six");
        assert_eq!(ordinal_member_name(7), "n7");
    }

    #[test]
    fn test_relation_attr_name() {
        assert_eq!(relation_attr_name("user_id", "users"), "user");
        assert_eq!(relation_attr_name("owner", "users"), "users");
        assert_eq!(relation_attr_name("_id", "users"), "users");
    }
}
