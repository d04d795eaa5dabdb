//! Handlebars helpers for DOT-safe output.

use handlebars::{Context, Handlebars, Helper, HelperResult, Output, RenderContext};

/// `{{dot_id name}}`: a name usable as a DOT node or port id
pub(super) fn dot_id_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    out.write(&escape_dot_id(param))?;
    Ok(())
}

/// `{{html name}}`: a name usable inside an HTML-like label
pub(super) fn html_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let param = h.param(0).and_then(|v| v.value().as_str()).unwrap_or("");
    out.write(&escape_html(param))?;
    Ok(())
}

/// Escape a string for use in DOT HTML labels
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Words the DOT grammar reserves, matched case-insensitively
const DOT_KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

/// Escape a string for use as a DOT node ID.
///
/// Bare output is limited to non-keyword identifiers and numerals; anything
/// else is quoted.
pub fn escape_dot_id(s: &str) -> String {
    if is_bare_id(s) || is_numeral(s) {
        s.to_string()
    } else {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

/// `[A-Za-z_\x80-]` followed by `[A-Za-z0-9_\x80-]*`, not a keyword
fn is_bare_id(s: &str) -> bool {
    let word_char = |c: char| c.is_ascii_alphanumeric() || c == '_' || !c.is_ascii();
    match s.chars().next() {
        Some(first) if !first.is_ascii_digit() && word_char(first) => {
            s.chars().all(word_char)
                && !DOT_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(s))
        }
        _ => false,
    }
}

/// `-?(.[0-9]+|[0-9]+(.[0-9]*)?)`
fn is_numeral(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());

    all_digits(int)
        && frac.map_or(true, all_digits)
        && (!int.is_empty() || frac.is_some_and(|f| !f.is_empty()))
}
