//! Suite emitter: one aggregator script that loads each test in order.

use crate::lexical::string_literal;
use crate::model::{TestCaseRef, TestSuite};

/// Fixed prologue of every suite script.
pub const SUITE_PRELUDE: &str = concat!(
    "use File::Basename qw(dirname);\n",
    "use File::Spec;\n",
    "\n",
    "# output T/F as Green/Red\n",
    "$ENV{HARNESS_COLOR} = 1;\n",
    "\n",
);

/// Drop a trailing `.ext` from a file name. Dots inside directory names are
/// left alone.
#[must_use]
pub fn strip_extension(filename: &str) -> &str {
    let name_start = filename
        .rfind(|c| c == '/' || c == '\\')
        .map_or(0, |i| i + 1);
    let name = &filename[name_start..];
    match name.rfind('.') {
        Some(dot) if dot > 0 => {
            let ext = &name[dot + 1..];
            if !ext.is_empty() && ext.chars().all(|c| c.is_alphanumeric() || c == '_') {
                &filename[..name_start + dot]
            } else {
                filename
            }
        }
        _ => filename,
    }
}

/// The `require` line for one test.
///
/// Saved tests are loaded relative to the suite script, without extension;
/// unsaved ones by title.
#[must_use]
pub fn require_line(test: &TestCaseRef) -> String {
    match &test.filename {
        Some(filename) => format!(
            "require File::Spec->catfile(dirname(__FILE__), {});",
            string_literal(strip_extension(filename))
        ),
        None => format!("require {};", string_literal(&test.title)),
    }
}

/// Render the aggregator script for `suite`.
#[must_use]
pub fn format_suite(suite: &TestSuite) -> String {
    let mut out = String::from(SUITE_PRELUDE);
    for test in &suite.tests {
        out.push_str(&require_line(test));
        out.push('\n');
    }
    tracing::debug!(title = %suite.title, tests = suite.tests.len(), "formatted suite");
    out
}
