//! Lexical helpers: Perl literal encoding and identifier derivation.
//!
//! Everything here is a pure function of its input. Literals are always
//! double-quoted, so the interpolation sigils `$` and `@` are escaped along
//! with quotes and backslashes; stored-variable references are the only way
//! a live `$name` reaches the output (see [`xlate_argument`]).

use regex::Regex;
use std::fmt::Write;
use std::sync::OnceLock;

/// Encode `value` as a Perl double-quoted string literal.
#[must_use]
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '@' => out.push_str("\\@"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{a0}' => out.push_str("\\xa0"),
            c if c.is_control() || !c.is_ascii() => push_codepoint(&mut out, c),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// `\x{..}` escape; the generated script has no `use utf8`.
fn push_codepoint(out: &mut String, c: char) {
    let _ = write!(out, "\\x{{{:x}}}", u32::from(c));
}

/// The non-breaking space as a Perl literal.
#[must_use]
pub const fn non_breaking_space() -> &'static str {
    "\"\\xa0\""
}

/// Upper-case the first character, leave the rest alone.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower snake case: words split on non-alphanumerics and lower→upper
/// transitions, joined with `_`.
#[must_use]
pub fn underscore(text: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in text.chars() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_ascii_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        current.push(c.to_ascii_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }

    words.join("_")
}

/// Derive a class/package identifier from a free-text test title.
///
/// `"my test! case"` becomes `MyTestCase`; separators at either end or in
/// runs produce no empty segments.
#[must_use]
pub fn class_name(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|fragment| !fragment.is_empty())
        .map(capitalize)
        .collect()
}

/// Derive a test entry-point name: `test_` plus the snake-cased title.
#[must_use]
pub fn method_name(title: &str) -> String {
    format!("test_{}", underscore(title))
}

/// Render values as a Perl array reference literal.
#[must_use]
pub fn array_literal<S: AsRef<str>>(values: &[S]) -> String {
    let items: Vec<String> = values.iter().map(|v| string_literal(v.as_ref())).collect();
    format!("[{}]", items.join(", "))
}

/// Convert a free-text pattern into a `/…/` regex literal.
///
/// Forward slashes and `@` are escaped unless the pattern already escapes
/// them. Non-ASCII characters become `\x{..}`. A pattern spanning lines has
/// its newlines written as `\n` and gains the `m` flag.
#[must_use]
pub fn regex_literal(pattern: &str) -> String {
    let mut body = String::with_capacity(pattern.len() + 2);
    let mut multiline = false;
    let mut escaped = false;
    for c in pattern.chars() {
        match c {
            '\n' => {
                body.push_str(if escaped { "n" } else { "\\n" });
                multiline = true;
            }
            c if !c.is_ascii() => {
                if escaped {
                    body.pop();
                }
                push_codepoint(&mut body, c);
            }
            c if escaped => body.push(c),
            '/' | '@' => {
                body.push('\\');
                body.push(c);
            }
            c => body.push(c),
        }
        escaped = c == '\\' && !escaped;
    }
    if escaped {
        body.push('\\');
    }

    if multiline {
        format!("/{body}/m")
    } else {
        format!("/{body}/")
    }
}

/// `$name` for a stored variable.
#[must_use]
pub fn perl_var(name: &str) -> String {
    format!("${name}")
}

/// `join(",", expr)` for accessors returning lists.
#[must_use]
pub fn join_expression(expression: &str) -> String {
    format!("join(\",\", {expression})")
}

fn stored_var_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{(\w+)\}").expect("stored variable pattern is valid"))
}

/// Translate a recorded argument into a Perl expression.
///
/// Plain text becomes a string literal. `${name}` references to stored
/// variables become live `$name` terms joined to the surrounding text with
/// the `.` concatenation operator.
#[must_use]
pub fn xlate_argument(value: &str) -> String {
    let re = stored_var_pattern();
    if !re.is_match(value) {
        return string_literal(value);
    }

    let mut parts = Vec::new();
    let mut last = 0;
    for caps in re.captures_iter(value) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            parts.push(string_literal(&value[last..whole.start()]));
        }
        parts.push(perl_var(name.as_str()));
        last = whole.end();
    }
    if last < value.len() {
        parts.push(string_literal(&value[last..]));
    }

    parts.join(" . ")
}
