//! Shared type resolver
//!
//! Maps a source type token (with size and array markers) to the dialect's
//! declaration text and, for Rust-emitting dialects, a field type. Unknown
//! tokens resolve to a deterministic placeholder — one bad type must not
//! abort the run.

use tablesmith_types::TypeFamily;
use tablesmith_types::model::Size;

use crate::profile::TypeProfile;
use crate::state::{GenState, Marker};

/// Result of resolving one column type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Declaration text (attribute grammar or SQL type)
    pub decl: String,
    /// Rust field type, empty for non-Rust dialects
    pub field: String,
    /// Family of the scalar type, after custom-type lookup
    pub family: TypeFamily,
    /// Whether the token carried an array suffix
    pub array: bool,
    /// Whether the token resolved through the custom-type (enum) table
    pub custom: bool,
}

impl ResolvedType {
    /// Whether the column holds a date or time value; controls current-time
    /// default substitution.
    #[must_use]
    pub fn is_temporal(&self) -> bool {
        matches!(
            self.family,
            TypeFamily::DateTime | TypeFamily::Date | TypeFamily::Time
        )
    }
}

/// Resolve a type token against a dialect profile.
///
/// Markers for extension types and arrays are recorded on `state` exactly
/// once per run (set semantics).
pub fn resolve(
    token: &str,
    size: Option<Size>,
    profile: &TypeProfile,
    state: &mut GenState,
) -> ResolvedType {
    // Array suffixes first: `integer[]` and `integer[][]` both collapse to
    // one wrap level.
    let array = token.contains('[');
    let scalar_token = token.split('[').next().unwrap_or_default().trim();

    // Schema qualifiers (`public.mood`) are dropped for lookup.
    let bare = scalar_token
        .rsplit('.')
        .next()
        .unwrap_or(scalar_token)
        .to_lowercase();

    let mut resolved = resolve_scalar(&bare, size, profile, state);

    if array {
        state.mark(Marker::Array);
        resolved.decl = profile.array_template.replace("{inner}", &resolved.decl);
        if !resolved.field.is_empty() {
            resolved.field = format!("Vec<{}>", resolved.field);
        }
        resolved.array = true;
    }

    resolved
}

fn resolve_scalar(
    bare: &str,
    size: Option<Size>,
    profile: &TypeProfile,
    state: &mut GenState,
) -> ResolvedType {
    // The custom-type table (known enums) short-circuits normal mapping.
    if let Some(custom) = state.custom_type(bare) {
        let class_name = custom.class_name.clone();
        return ResolvedType {
            decl: profile
                .enum_template
                .replace("{name}", &class_name)
                .replace("{base}", bare),
            field: class_name,
            family: TypeFamily::Unknown,
            array: false,
            custom: true,
        };
    }

    let family = TypeFamily::classify(bare);

    let decl_base = profile
        .overrides
        .iter()
        .find(|(token, _)| *token == bare)
        .map(|(_, text)| *text)
        .or_else(|| {
            profile
                .families
                .iter()
                .find(|(f, _)| *f == family)
                .map(|(_, text)| *text)
        });

    // Unknown family: deterministic placeholder. The declaration keeps the
    // cleaned token so the source of the problem stays visible; the field
    // type falls back to the string family.
    let decl_base = match decl_base {
        Some(text) => text.to_string(),
        None => {
            log::warn!("unknown column type `{bare}`, substituting placeholder");
            bare.to_string()
        }
    };

    for (ext_family, marker) in profile.extensions {
        if *ext_family == family {
            state.mark(*marker);
        }
    }

    let decl = apply_size(&decl_base, size, profile);

    let field = if profile.field_types.is_empty() {
        String::new()
    } else {
        let placeholder_family = if family == TypeFamily::Unknown {
            TypeFamily::String
        } else {
            family
        };
        profile
            .field_types
            .iter()
            .find(|(f, _)| *f == placeholder_family)
            .map(|(_, text)| (*text).to_string())
            .unwrap_or_else(|| "String".to_string())
    };

    ResolvedType {
        decl,
        field,
        family,
        array: false,
        custom: false,
    }
}

/// Apply the size parameter, or empty call parentheses where the dialect
/// requires them and the type is not a no-parens singleton.
fn apply_size(decl: &str, size: Option<Size>, profile: &TypeProfile) -> String {
    match size {
        Some(Size::Scalar(n)) => format!("{decl}({n})"),
        Some(Size::Precision(p, s)) => format!("{decl}({p},{s})"),
        None => {
            if profile.call_parens && !decl.contains('(') && !profile.no_parens.contains(&decl) {
                format!("{decl}()")
            } else {
                decl.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile;
    use tablesmith_types::model::{EnumKind, EnumMember, EnumType};

    fn state_with_enum() -> GenState {
        let mut state = GenState::new();
        state.register_enums(&[EnumType {
            name: "mood".into(),
            class_name: "Mood".into(),
            kind: EnumKind::Text,
            members: vec![EnumMember {
                name: "Happy".into(),
                value: "happy".into(),
            }],
        }]);
        state
    }

    #[test]
    fn test_resolve_with_size() {
        let mut state = GenState::new();
        let resolved = resolve("varchar", Some(Size::Scalar(255)), &profile::ORM.types, &mut state);
        assert_eq!(resolved.decl, "varchar(255)");
        assert_eq!(resolved.field, "String");
    }

    #[test]
    fn test_resolve_precision() {
        let mut state = GenState::new();
        let resolved = resolve(
            "numeric",
            Some(Size::Precision(10, 2)),
            &profile::ORM.types,
            &mut state,
        );
        assert_eq!(resolved.decl, "numeric(10,2)");
        assert_eq!(resolved.field, "Decimal");
        assert!(state.is_marked(Marker::Decimal));
    }

    #[test]
    fn test_empty_parens_unless_no_parens() {
        let mut state = GenState::new();
        let varchar = resolve("varchar", None, &profile::ORM.types, &mut state);
        assert_eq!(varchar.decl, "varchar()");

        let uuid = resolve("uuid", None, &profile::ORM.types, &mut state);
        assert_eq!(uuid.decl, "uuid");
        assert!(state.is_marked(Marker::Uuid));
    }

    #[test]
    fn test_sql_never_appends_parens() {
        let mut state = GenState::new();
        let varchar = resolve("varchar", None, &profile::SQL.types, &mut state);
        assert_eq!(varchar.decl, "varchar");
    }

    #[test]
    fn test_synonyms_resolve_identically() {
        let mut state = GenState::new();
        let a = resolve("int", None, &profile::SQL.types, &mut state);
        let b = resolve("int4", None, &profile::SQL.types, &mut state);
        let c = resolve("integer", None, &profile::SQL.types, &mut state);
        assert_eq!(a.decl, b.decl);
        assert_eq!(b.decl, c.decl);
    }

    #[test]
    fn test_array_collapses_to_one_wrap() {
        let mut state = GenState::new();
        let one = resolve("integer[]", None, &profile::ORM.types, &mut state);
        let two = resolve("integer[][]", None, &profile::ORM.types, &mut state);
        assert_eq!(one.decl, "array(integer())");
        assert_eq!(one.field, "Vec<i32>");
        assert_eq!(two.decl, one.decl);
        assert!(state.is_marked(Marker::Array));
    }

    #[test]
    fn test_custom_type_short_circuits() {
        let mut state = state_with_enum();
        let resolved = resolve("mood", None, &profile::ORM.types, &mut state);
        assert!(resolved.custom);
        assert_eq!(resolved.decl, "enum(Mood)");
        assert_eq!(resolved.field, "Mood");

        // Schema qualifier is stripped before lookup
        let qualified = resolve("public.mood", None, &profile::ORM.types, &mut state);
        assert_eq!(qualified.decl, "enum(Mood)");
    }

    #[test]
    fn test_unknown_type_never_fails() {
        let mut state = GenState::new();
        let resolved = resolve("geometry", None, &profile::ORM.types, &mut state);
        assert_eq!(resolved.decl, "geometry()");
        assert_eq!(resolved.field, "String");
        assert_eq!(resolved.family, TypeFamily::Unknown);
    }
}
