//! Run-scoped generation state
//!
//! A [`GenState`] value is the only mutable state in the pipeline. It is
//! created fresh for every run and threaded explicitly through each
//! `generate_model` call; `create_header` reads the accumulated markers
//! after the last table. Reusing a dirty state across unrelated runs leaks
//! markers from one document into the next and is not supported.

use std::collections::{BTreeMap, BTreeSet};

use tablesmith_types::model::{EnumKind, EnumMember, EnumType};

/// Import/extension marker triggered by type resolution or relationship
/// rendering. Markers are recorded at most once per run; the variant order
/// is the order header lines are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Marker {
    /// A column resolved to an array wrapper
    Array,
    /// chrono::NaiveDate
    Date,
    /// chrono::NaiveDateTime
    DateTime,
    /// chrono::NaiveTime
    Time,
    /// rust_decimal::Decimal
    Decimal,
    /// serde_json::Value
    Json,
    /// uuid::Uuid
    Uuid,
    /// A default resolved to the dialect's current-time expression
    NowFunc,
    /// Relationship declarations were rendered
    Relations,
}

/// A custom type entry, populated from the schema's enumerated types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomType {
    pub class_name: String,
    pub kind: EnumKind,
    pub members: Vec<EnumMember>,
}

/// Mutable accumulator for one generation run
#[derive(Debug, Clone, Default)]
pub struct GenState {
    markers: BTreeSet<Marker>,
    custom_types: BTreeMap<String, CustomType>,
}

impl GenState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a marker; recording the same marker again is a no-op
    pub fn mark(&mut self, marker: Marker) {
        self.markers.insert(marker);
    }

    #[must_use]
    pub fn is_marked(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }

    /// Markers in emission order
    pub fn markers(&self) -> impl Iterator<Item = Marker> + '_ {
        self.markers.iter().copied()
    }

    /// Populate the custom-type table from the schema's enum types.
    ///
    /// Runs once, before any table body is generated, so that columns typed
    /// by an enum resolve to the generated enum class.
    pub fn register_enums(&mut self, enums: &[EnumType]) {
        for e in enums {
            self.custom_types.insert(
                e.name.to_lowercase(),
                CustomType {
                    class_name: e.class_name.clone(),
                    kind: e.kind,
                    members: e.members.clone(),
                },
            );
        }
    }

    /// Look up a custom type by its base name
    #[must_use]
    pub fn custom_type(&self, base_name: &str) -> Option<&CustomType> {
        self.custom_types.get(base_name)
    }

    /// All custom types in name order
    pub fn custom_types(&self) -> impl Iterator<Item = (&str, &CustomType)> {
        self.custom_types.iter().map(|(k, v)| (k.as_str(), v))
    }
}
