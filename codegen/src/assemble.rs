//! Shared column assembler
//!
//! Builds one column declaration by applying a fixed, ordered sequence of
//! attribute decisions. The order is an output-determinism contract: type
//! (with autoincrement), reference, not-null, default, primary key, unique.
//! Every step is toggled per dialect through the clause profile.

use tablesmith_types::model::{Column, Table};
use tablesmith_types::{Dialect, TypeFamily};

use crate::naming;
use crate::options::GenerateOptions;
use crate::profile::{ClauseProfile, DialectProfile, QuoteStyle};
use crate::resolver::{self, ResolvedType};
use crate::state::{GenState, Marker};

/// A rendered default value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// The dialect's current-time expression
    Now,
    /// A literal, quoted if needed
    Literal(String),
}

/// One assembled column: the ordered clause list plus the resolved type
#[derive(Debug, Clone)]
pub struct AssembledColumn {
    pub resolved: ResolvedType,
    /// Clauses in assembly order, already formatted per the profile
    pub clauses: Vec<String>,
}

impl AssembledColumn {
    /// Clauses joined with the profile separator
    #[must_use]
    pub fn joined(&self, clauses: &ClauseProfile) -> String {
        self.clauses.join(clauses.separator)
    }
}

/// Assemble the clause list for one column.
///
/// `table` supplies the primary-key set and, indirectly, the alter-merged
/// references already attached during normalization.
pub fn assemble(
    column: &Column,
    table: &Table,
    profile: &DialectProfile,
    state: &mut GenState,
    opts: &GenerateOptions,
) -> AssembledColumn {
    let clauses_cfg = &profile.clauses;
    let resolved = resolver::resolve(&column.type_token, column.size, &profile.types, state);
    let is_pk = table.is_primary_key(&column.name);

    let mut clauses = vec![resolved.decl.clone()];

    // 1b. auto-increment for serial-style integer pseudo-types
    if let Some(template) = clauses_cfg.autoincrement {
        if TypeFamily::is_auto_increment(&column.type_token) {
            clauses.push(template.to_string());
        }
    }

    // 2. reference clause; cascade actions only when explicitly present
    if let (Some(template), Some(reference)) = (clauses_cfg.reference, &column.reference) {
        let ref_table = match profile.dialect {
            Dialect::Orm => {
                naming::create_class_name(&reference.table, opts.singular, &opts.naming_exceptions)
            }
            _ => reference.table.clone(),
        };
        clauses.push(
            template
                .replace("{table}", &ref_table)
                .replace("{column}", &reference.column),
        );
        if let (Some(action_template), Some(action)) =
            (clauses_cfg.on_delete, reference.on_delete.as_deref())
        {
            clauses.push(action_template.replace("{action}", &cascade_action(action, clauses_cfg)));
        }
        if let (Some(action_template), Some(action)) =
            (clauses_cfg.on_update, reference.on_update.as_deref())
        {
            clauses.push(action_template.replace("{action}", &cascade_action(action, clauses_cfg)));
        }
    }

    // 3. not-null; primary-key columns are implicitly non-null and must not
    //    double-emit this clause
    if let Some(template) = clauses_cfg.not_null {
        if !column.nullable && !is_pk {
            clauses.push(template.to_string());
        }
    }

    // 4. default, with current-time substitution before interpolation
    if !opts.defaults_off {
        if let Some(raw) = column.default.as_deref() {
            match render_default(raw, resolved.is_temporal(), clauses_cfg) {
                DefaultValue::Now => {
                    if let Some(template) = clauses_cfg.default_fn {
                        state.mark(Marker::NowFunc);
                        clauses.push(template.to_string());
                    } else if let Some(template) = clauses_cfg.default {
                        state.mark(Marker::NowFunc);
                        clauses.push(template.replace("{value}", clauses_cfg.now_expr));
                    }
                }
                DefaultValue::Literal(value) => {
                    if let Some(template) = clauses_cfg.default {
                        clauses.push(template.replace("{value}", &value));
                    }
                }
            }
        }
    }

    // 5. primary key
    if let Some(template) = clauses_cfg.primary_key {
        if is_pk {
            clauses.push(template.to_string());
        }
    }

    // 6. unique
    if let Some(template) = clauses_cfg.unique {
        if column.unique {
            clauses.push(template.to_string());
        }
    }

    AssembledColumn { resolved, clauses }
}

fn cascade_action(action: &str, clauses: &ClauseProfile) -> String {
    let action = action.trim();
    if clauses.action_lowercase {
        action.to_lowercase().replace(' ', "_")
    } else {
        action.to_uppercase()
    }
}

/// Detect the current-time spellings, case-insensitively
#[must_use]
pub fn is_now_call(raw: &str) -> bool {
    let folded = raw.trim().to_lowercase();
    folded == "now()"
        || folded == "now"
        || folded.starts_with("current_timestamp")
        || folded == "current timestamp"
        || folded.starts_with("getdate")
}

/// Render a raw default into the dialect's representation.
///
/// Current-time function calls on temporal columns become [`DefaultValue::Now`];
/// everything else is a literal, quoted when it is neither numeric nor
/// boolean nor already quoted. The substitution happens once, before
/// interpolation, so repeated renders are stable.
#[must_use]
pub fn render_default(raw: &str, temporal: bool, clauses: &ClauseProfile) -> DefaultValue {
    let trimmed = raw.trim();
    if temporal && is_now_call(trimmed) {
        return DefaultValue::Now;
    }
    if trimmed.parse::<i64>().is_ok()
        || trimmed.parse::<f64>().is_ok()
        || trimmed.eq_ignore_ascii_case("true")
        || trimmed.eq_ignore_ascii_case("false")
    {
        return DefaultValue::Literal(trimmed.to_string());
    }
    match clauses.quote {
        QuoteStyle::Sql => {
            if trimmed.contains('\'') {
                DefaultValue::Literal(trimmed.to_string())
            } else {
                DefaultValue::Literal(format!("'{trimmed}'"))
            }
        }
        QuoteStyle::Rust => {
            let inner = trimmed
                .strip_prefix('\'')
                .and_then(|s| s.strip_suffix('\''))
                .unwrap_or(trimmed);
            DefaultValue::Literal(format!("\"{}\"", inner.replace('"', "\\\"")))
        }
    }
}

/// The dialect's current-time expression, for generators that emit defaults
/// outside the clause list (record constructors, validator providers).
#[must_use]
pub fn now_expr(clauses: &ClauseProfile) -> &'static str {
    clauses.now_expr
}
