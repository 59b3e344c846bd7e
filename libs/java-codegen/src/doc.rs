//! Documentation synthesis
//!
//! Turns descriptor documentation fragments into the line arrays the skeletons
//! consume. Continuation indentation is applied by the template engine's
//! `indent` filter; this module only decides content and indent columns.

use crate::ir::InstanceField;

/// Fixed right margin for reflowed prose.
pub const PROSE_WIDTH: usize = 113;

/// Join free-text lines into a single sentence: collapse whitespace runs,
/// drop `[@TODO...` fragments left in upstream schema text.
pub fn normalize_description(lines: &[String]) -> String {
    let joined = lines.join(" ");
    let cut = match joined.find("[@TODO") {
        Some(pos) => &joined[..pos],
        None => &joined,
    };
    cut.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize and re-wrap description lines at the given margin.
pub fn wrap_description(lines: &[String], width: usize) -> Vec<String> {
    let text = normalize_description(lines);
    if text.is_empty() {
        return Vec::new();
    }
    textwrap::wrap(&text, width)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Prose lines for a `@return`/`@param` tag. Pre-rendered `param_doc` is
/// authoritative and emitted verbatim; otherwise the description is wrapped.
/// An empty result means the skeleton emits a bare tag.
pub fn tag_doc(field: &InstanceField, description: &[String]) -> Vec<String> {
    match &field.param_doc {
        Some(lines) => lines.clone(),
        None => wrap_description(description, PROSE_WIDTH),
    }
}

/// Continuation column for `@return` tags: width of `"@return "` plus the
/// type name.
pub fn return_indent(return_type: &str) -> usize {
    "@return ".len() + return_type.len()
}

/// Continuation column for `@param` tags, keyed off the parameter name.
pub fn param_indent(last: &str) -> usize {
    "@param ".len() + last.len()
}

/// Javadoc body lines (with their `*` prefix) for a struct member or enum
/// value. Empty when there is nothing to say, in which case no comment block
/// is emitted at all.
pub fn member_doc(
    deprecated: bool,
    description: &[String],
    since: Option<&str>,
    see: Option<&str>,
    since_prefix: &str,
) -> Vec<String> {
    let prose = wrap_description(description, PROSE_WIDTH);
    if prose.is_empty() && since.is_none() && see.is_none() && !deprecated {
        return Vec::new();
    }

    let mut lines = Vec::new();
    if deprecated {
        lines.push("* @deprecated".to_string());
    }
    for line in &prose {
        lines.push(format!("* {line}"));
    }
    if !prose.is_empty() && (since.is_some() || see.is_some()) {
        lines.push("*".to_string());
    }
    if let Some(since) = since {
        lines.push(format!("* @since {since_prefix} {since}"));
    }
    if let Some(see) = see {
        lines.push(format!("* @see {see}"));
    }
    lines
}
