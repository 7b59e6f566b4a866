//! Statement emitters.
//!
//! Each function wraps an expression or a pre-rendered statement into
//! complete Perl text. Indentation of nested bodies is supplied by the caller
//! (see [`crate::options::Indent`]); nothing here tracks nesting depth.

use crate::hir::{Braces, Expr};
use crate::lexical::xlate_argument;

/// Attempts made by a polling wait before it gives up.
pub const WAIT_ATTEMPTS: u32 = 60;

/// Seconds slept between polling attempts.
pub const WAIT_INTERVAL_SECS: u32 = 1;

/// Appended to an assertion to mark it as a verification.
pub const VERIFY_MARKER: &str = "# verify";

/// Append the statement terminator.
#[must_use]
pub fn terminate(text: &str) -> String {
    format!("{text};")
}

/// Render `expr` as a statement, or `None` when it renders to nothing.
///
/// `None` means "skip this line"; callers must not emit a bare `;`.
#[must_use]
pub fn statement(expr: &Expr) -> Option<String> {
    let text = expr.code(Braces::Omit);
    if text.is_empty() {
        return None;
    }
    Some(terminate(&text))
}

/// `var = expr`, without a declaration.
#[must_use]
pub fn assign(var_name: &str, expr: &Expr) -> String {
    format!("{var_name} = {expr}")
}

/// `my var = expr`, the first assignment to a stored variable.
#[must_use]
pub fn declare(var_name: &str, expr: &Expr) -> String {
    format!("my {}", assign(var_name, expr))
}

/// `if (expr) { body }` with a caller-rendered body.
pub fn if_block(expr: &Expr, body: impl FnOnce() -> String) -> String {
    let mut body = body();
    if !body.is_empty() && !body.ends_with('\n') {
        body.push('\n');
    }
    format!("if ({}) {{\n{body}}}", expr.code(Braces::Omit))
}

/// Prefix every non-empty line of `text` with `indent`.
#[must_use]
pub fn indent_block(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Run `try_text` trapped; run `catch_text` if it died or ended false.
///
/// The value of an `eval` block is the value of its last statement, so a
/// `Test::More` check that returns false reaches the catch body the same
/// way a thrown error does.
#[must_use]
pub fn try_catch(try_text: &str, catch_text: &str, indent: &str) -> String {
    format!(
        "eval {{\n{}\n}} or do {{\n{}\n}};",
        indent_block(try_text, indent),
        indent_block(catch_text, indent)
    )
}

/// Bounded polling loop: up to 60 attempts, 1 second apart.
///
/// Negative expressions poll on their inverse and stop once it is false or
/// can no longer be evaluated. The loop never raises on exhaustion.
#[must_use]
pub fn wait_for(expr: &Expr) -> String {
    if expr.is_negative() {
        format!(
            "for (1..{WAIT_ATTEMPTS}) {{ my $ret = 1; eval {{ $ret = {} }}; last if $@ || !$ret; sleep {WAIT_INTERVAL_SECS} }}",
            expr.invert().code(Braces::Keep)
        )
    } else {
        format!(
            "for (1..{WAIT_ATTEMPTS}) {{ my $ret = 0; eval {{ $ret = {} }}; last if !$@ && $ret; sleep {WAIT_INTERVAL_SECS} }}",
            expr.code(Braces::Keep)
        )
    }
}

/// Exact decimal seconds for a millisecond count.
///
/// Integer arithmetic only: `2500` is `2.5`, `1499` is `1.499`, `2000` is `2`.
#[must_use]
pub fn format_seconds(milliseconds: u64) -> String {
    let whole = milliseconds / 1000;
    let frac = milliseconds % 1000;
    if frac == 0 {
        return whole.to_string();
    }
    let digits = format!("{frac:03}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

/// `sleep <seconds>;`
#[must_use]
pub fn pause(milliseconds: u64) -> String {
    terminate(&format!("sleep {}", format_seconds(milliseconds)))
}

/// `note <message>;`
#[must_use]
pub fn echo(message: &str) -> String {
    terminate(&format!("note {}", xlate_argument(message)))
}

/// Line comment for every non-empty line of `text`.
#[must_use]
pub fn comment(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("# {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Mark an assertion statement as a verification.
#[must_use]
pub fn verify(statement: &str) -> String {
    format!("{statement} {VERIFY_MARKER}")
}

/// `ok(expr);`
#[must_use]
pub fn assert_true(expr: &Expr) -> String {
    Expr::boolean(expr.clone()).assert()
}

/// `ok(!expr);`
#[must_use]
pub fn assert_false(expr: &Expr) -> String {
    Expr::negate(Expr::boolean(expr.clone())).assert()
}

#[must_use]
pub fn verify_true(expr: &Expr) -> String {
    verify(&assert_true(expr))
}

#[must_use]
pub fn verify_false(expr: &Expr) -> String {
    verify(&assert_false(expr))
}

/// Check that `line` dies when run.
#[must_use]
pub fn assert_or_verify_failure(line: &str, is_assert: bool) -> String {
    let check = format!("eval {{ {line} }};\n{}", terminate("ok($@)"));
    if is_assert {
        check
    } else {
        verify(&check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statement_skips_empty_expression() {
        assert_eq!(statement(&Expr::term("")), None);
        assert_eq!(
            statement(&Expr::term("$driver->refresh")),
            Some("$driver->refresh;".to_string())
        );
    }

    #[test]
    fn statement_omits_outer_parens() {
        let e = Expr::equals(Expr::term("1"), Expr::term("$n"));
        assert_eq!(statement(&e), Some("$n eq 1;".to_string()));
    }

    #[test]
    fn assign_has_no_declaration() {
        let e = Expr::term("$driver->get_title");
        assert_eq!(assign("$title", &e), "$title = $driver->get_title");
        assert_eq!(declare("$title", &e), "my $title = $driver->get_title");
    }

    #[test]
    fn if_block_wraps_body() {
        let out = if_block(&Expr::term("$ok"), || "    note \"yes\";".to_string());
        assert_eq!(out, "if ($ok) {\n    note \"yes\";\n}");
    }

    #[test]
    fn try_catch_uses_eval_or_do() {
        let out = try_catch("is($a, 1);", "fail(\"boom\");", "    ");
        assert_eq!(
            out,
            "eval {\n    is($a, 1);\n} or do {\n    fail(\"boom\");\n};"
        );
    }

    #[test]
    fn wait_for_positive_bounds() {
        let out = wait_for(&Expr::boolean(Expr::term("$el->is_displayed")));
        assert!(out.starts_with("for (1..60) {"));
        assert!(out.contains("$ret = $el->is_displayed"));
        assert!(out.contains("last if !$@ && $ret;"));
        assert!(out.contains("sleep 1 }"));
    }

    #[test]
    fn wait_for_negative_inverts_condition() {
        let e = Expr::not_equals(Expr::term("\"Home\""), Expr::term("$driver->get_title"));
        let out = wait_for(&e);
        assert!(out.starts_with("for (1..60) {"));
        assert!(out.contains(r#"$ret = ($driver->get_title eq "Home")"#));
        assert!(out.contains("last if $@ || !$ret;"));
        assert!(!out.starts_with('!'));
    }

    #[test]
    fn pause_uses_exact_fractional_seconds() {
        assert_eq!(pause(2500), "sleep 2.5;");
        assert_eq!(pause(1499), "sleep 1.499;");
        assert_eq!(pause(2000), "sleep 2;");
        assert_eq!(pause(5), "sleep 0.005;");
        assert_eq!(pause(0), "sleep 0;");
    }

    #[test]
    fn echo_escapes_message() {
        assert_eq!(echo("cost $5"), r#"note "cost \$5";"#);
    }

    #[test]
    fn comment_prefixes_every_line() {
        assert_eq!(comment("one\ntwo"), "# one\n# two");
        assert_eq!(comment("a\n\nb"), "# a\n\n# b");
    }

    #[test]
    fn true_false_helpers() {
        let e = Expr::term("$x");
        assert_eq!(assert_true(&e), "ok($x);");
        assert_eq!(assert_false(&e), "ok(!$x);");
        assert_eq!(verify_true(&e), "ok($x); # verify");
        assert_eq!(verify_false(&e), "ok(!$x); # verify");
    }

    #[test]
    fn expected_failure_check() {
        let out = assert_or_verify_failure("$driver->click;", true);
        assert_eq!(out, "eval { $driver->click; };\nok($@);");
        assert!(assert_or_verify_failure("x;", false).ends_with(VERIFY_MARKER));
    }
}
