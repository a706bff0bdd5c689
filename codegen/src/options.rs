//! Generation options recognized by every dialect generator

/// Caller-facing configuration for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Derive singular class names from plural table names
    pub singular: bool,
    /// Table-name endings exempt from the singular transformation
    pub naming_exceptions: Vec<String>,
    /// When `true` the schema qualifier is declared once globally; when
    /// `false` each table carries its own qualifier
    pub schema_global: bool,
    /// Suppress default values entirely
    pub defaults_off: bool,
    /// Infer bidirectional relationship declarations from foreign keys
    pub relationships: bool,
    /// Prefix prepended to every generated class name
    pub table_prefix: String,
    /// Suffix appended to every generated class name
    pub table_suffix: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            singular: false,
            naming_exceptions: Vec::new(),
            schema_global: true,
            defaults_off: false,
            relationships: false,
            table_prefix: String::new(),
            table_suffix: String::new(),
        }
    }
}
