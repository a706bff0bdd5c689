//! Final template rendering
//!
//! Pure merge of the header and the accumulated model bodies through an
//! optional two-slot template. No other computation happens here beyond
//! whitespace tidying.

/// Merge header and body into the final document.
///
/// With a template, `{header}` and `{models}` are substituted; without one,
/// the parts are concatenated with a blank-line separator. Runs of blank
/// lines collapse to one, leading blanks are dropped, and the document
/// always ends with a single newline.
#[must_use]
pub fn render(template: Option<&str>, header: &str, models: &str) -> String {
    let mut merged = match template {
        Some(t) => t.replace("{header}", header).replace("{models}", models),
        None => format!("{header}\n{models}"),
    };
    while merged.contains("\n\n\n") {
        merged = merged.replace("\n\n\n", "\n\n");
    }
    let mut out = merged.trim_start_matches('\n').trim_end().to_string();
    out.push('\n');
    out
}
