//! Test-case formatter: recorded commands to a complete Perl test script.
//!
//! Output layout is header, one block per entry in recorded order, footer.
//! A command whose emitter yields no statement is skipped; an unsupported
//! verb or unusable operand stops the whole test case.

use crate::emit;
use crate::error::{GenError, Result};
use crate::hir::Expr;
use crate::lexical::{perl_var, xlate_argument};
use crate::model::{Command, Entry, TestCase};
use crate::options::FormatOptions;
use crate::webdriver::{Driver, Element, Locator, LocatorStrategy, Utils};
use std::collections::HashSet;

/// Check families sharing one accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    /// `assert…`: hard check
    Assert,
    /// `verify…`: soft check
    Verify,
    /// `waitFor…`: polling wait
    WaitFor,
    /// `store…`: save the value in a variable
    Store,
}

impl CheckKind {
    const PREFIXES: [(&'static str, Self); 4] = [
        ("assert", Self::Assert),
        ("verify", Self::Verify),
        ("waitFor", Self::WaitFor),
        ("store", Self::Store),
    ];

    /// Split `assertTitle` into (`Assert`, `Title`).
    #[must_use]
    pub fn split(verb: &str) -> Option<(Self, &str)> {
        Self::PREFIXES.iter().find_map(|(prefix, kind)| {
            verb.strip_prefix(prefix)
                .filter(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
                .map(|rest| (*kind, rest))
        })
    }
}

/// What an accessor reads from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Accessor {
    /// A string value; `locator` says whether the target was a locator
    /// (pattern then comes from the value operand).
    Value { actual: Expr, locator: bool },
    /// A truth value; the target is always a locator.
    Boolean(Expr),
}

/// Stored-variable names seen so far in one test case.
#[derive(Debug, Default)]
struct Scope {
    declared: HashSet<String>,
}

impl Scope {
    fn store(&mut self, verb: &str, name: &str, expr: &Expr) -> Result<String> {
        let name = name.trim();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(GenError::invalid_command(
                verb,
                format!("'{name}' is not a valid variable name"),
            ));
        }
        let var = perl_var(name);
        let text = if self.declared.insert(name.to_string()) {
            emit::declare(&var, expr)
        } else {
            emit::assign(&var, expr)
        };
        Ok(emit::terminate(&text))
    }
}

/// Build the check expression for a Selenese pattern against `actual`.
///
/// `regexp:`/`regexpi:` give a regex match, `glob:` or a bare pattern with
/// wildcards an anchored regex, `exact:` or anything else plain equality.
#[must_use]
pub fn pattern_check(pattern: &str, actual: Expr) -> Expr {
    if let Some(re) = pattern.strip_prefix("regexp:") {
        return Expr::regexp_match(actual, re);
    }
    if let Some(re) = pattern.strip_prefix("regexpi:") {
        return Expr::regexp_match(actual, format!("(?i){re}"));
    }
    if let Some(text) = pattern.strip_prefix("exact:") {
        return Expr::equals(Expr::term(xlate_argument(text)), actual);
    }
    if let Some(glob) = pattern.strip_prefix("glob:") {
        return Expr::regexp_match(actual, glob_to_regex(glob));
    }
    if pattern.contains(&['*', '?'][..]) {
        return Expr::regexp_match(actual, glob_to_regex(pattern));
    }
    Expr::equals(Expr::term(xlate_argument(pattern)), actual)
}

/// Anchored regex for a `*`/`?` glob.
#[must_use]
pub fn glob_to_regex(glob: &str) -> String {
    let mut out = String::from("^");
    let mut literal = String::new();
    for c in glob.chars() {
        match c {
            '*' | '?' => {
                out.push_str(&regex::escape(&literal));
                literal.clear();
                out.push_str(if c == '*' { ".*" } else { "." });
            }
            c => literal.push(c),
        }
    }
    out.push_str(&regex::escape(&literal));
    out.push('$');
    out
}

/// Leading whole milliseconds of an operand; fractions are truncated.
fn parse_millis(verb: &str, text: &str) -> Result<u64> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits
        .parse()
        .map_err(|_| GenError::invalid_command(verb, format!("'{text}' is not a duration in milliseconds")))
}

/// Formats test cases with one set of options.
#[derive(Debug)]
pub struct TestCaseFormatter<'a> {
    options: &'a FormatOptions,
    driver: Driver,
}

impl<'a> TestCaseFormatter<'a> {
    /// Create a formatter bound to `options`.
    #[must_use]
    pub fn new(options: &'a FormatOptions) -> Self {
        Self {
            options,
            driver: Driver::new(options.receiver.clone()),
        }
    }

    /// Render a complete test script.
    pub fn format(&self, test: &TestCase) -> Result<String> {
        let indent = self.options.base_indent();
        let mut scope = Scope::default();
        let mut out = self.options.render_header();

        tracing::debug!(title = %test.title, entries = test.commands.len(), "formatting test case");

        for entry in &test.commands {
            match entry {
                Entry::Comment { comment } => {
                    push_block(&mut out, &emit::comment(comment), &indent);
                }
                Entry::Command(command) => {
                    if self.options.show_selenese {
                        push_block(&mut out, &emit::comment(&command.selenese()), &indent);
                    }
                    match self.command(command, &mut scope)? {
                        Some(code) => push_block(&mut out, &code, &indent),
                        None => tracing::debug!(verb = %command.command, "no statement emitted"),
                    }
                }
            }
        }

        out.push_str(&self.options.render_footer());
        Ok(out)
    }

    /// Code for a single command, or `None` when it emits nothing.
    pub fn format_command(&self, command: &Command) -> Result<Option<String>> {
        self.command(command, &mut Scope::default())
    }

    fn command(&self, command: &Command, scope: &mut Scope) -> Result<Option<String>> {
        let verb = command.command.as_str();
        let target = command.target.as_str();
        let value = command.value.as_str();
        tracing::trace!(verb, target, value, "command");

        let code = match verb {
            "open" => self.driver.get(&xlate_argument(target)),
            "click" | "clickAndWait" => self.element(verb, target)?.click(),
            "type" => {
                let element = self.element(verb, target)?;
                format!(
                    "{}\n{}",
                    emit::terminate(&element.clear()),
                    element.send_keys(value)
                )
            }
            "sendKeys" => self.element(verb, target)?.send_keys(value),
            "submit" | "submitAndWait" => self.element(verb, target)?.submit(),
            "goBack" | "goBackAndWait" => self.driver.back(),
            "refresh" | "refreshAndWait" => self.driver.refresh(),
            "close" => self.driver.close(),
            "selectFrame" => self.driver.frame(target),
            "setTimeout" => self
                .driver
                .set_implicit_wait_timeout(parse_millis(verb, target)?),
            "pause" => return Ok(Some(emit::pause(parse_millis(verb, target)?))),
            "echo" => return Ok(Some(emit::echo(target))),
            "store" => {
                let expr = Expr::term(xlate_argument(target));
                return scope.store(verb, value, &expr).map(Some);
            }
            // The driver already blocks until the page has loaded.
            "waitForPageToLoad" => String::new(),
            _ => return self.check(command, scope).map(Some),
        };

        Ok(emit::statement(&Expr::term(code)))
    }

    fn check(&self, command: &Command, scope: &mut Scope) -> Result<String> {
        let verb = command.command.as_str();
        let unsupported = || GenError::UnsupportedCommand {
            verb: verb.to_string(),
        };
        let (kind, name) = CheckKind::split(verb).ok_or_else(unsupported)?;
        let (accessor, negated) = self.accessor(verb, name, &command.target)?;

        let expr = match &accessor {
            Accessor::Value { actual, locator } => {
                let operand = if *locator { &command.value } else { &command.target };
                if kind == CheckKind::Store {
                    return scope.store(verb, operand, actual);
                }
                let check = pattern_check(operand, actual.clone());
                if negated {
                    check.invert()
                } else {
                    check
                }
            }
            Accessor::Boolean(present) => {
                let check = Expr::boolean(present.clone());
                if negated {
                    Expr::negate(check)
                } else {
                    check
                }
            }
        };

        Ok(match kind {
            CheckKind::Assert => expr.assert(),
            CheckKind::Verify => expr.verify(),
            CheckKind::WaitFor => emit::wait_for(&expr),
            CheckKind::Store => scope.store(verb, &command.value, &expr)?,
        })
    }

    /// Resolve an accessor name such as `NotText` or `ElementNotPresent`.
    fn accessor(&self, verb: &str, name: &str, target: &str) -> Result<(Accessor, bool)> {
        let (base, negated) = match name {
            "ElementNotPresent" => ("ElementPresent", true),
            other => match other.strip_prefix("Not") {
                Some(rest) => (rest, true),
                None => (other, false),
            },
        };

        let value = |actual: String, locator: bool| Accessor::Value {
            actual: Expr::term(actual),
            locator,
        };

        let accessor = match base {
            "Title" => value(self.driver.get_title(), false),
            "Location" => value(self.driver.get_current_url(), false),
            "Text" => value(self.element(verb, target)?.get_text(), true),
            "Value" => value(self.element(verb, target)?.get_attribute("value"), true),
            "Attribute" => {
                let (locator, attribute) = target.rsplit_once('@').ok_or_else(|| {
                    GenError::invalid_command(verb, format!("'{target}' has no '@attribute' part"))
                })?;
                value(self.element(verb, locator)?.get_attribute(attribute), true)
            }
            "XpathCount" => {
                let xpath = target.strip_prefix("xpath=").unwrap_or(target);
                let list = self
                    .driver
                    .elements(&Locator::new(LocatorStrategy::Xpath, xpath));
                value(list.get_size(), true)
            }
            "ElementPresent" => {
                let locator = self.locator(verb, target)?;
                Accessor::Boolean(Expr::term(Utils::is_element_present(
                    &self.driver,
                    locator.strategy.tag(),
                    &locator.value,
                )?))
            }
            "Visible" => Accessor::Boolean(Expr::term(self.element(verb, target)?.is_displayed())),
            "Checked" => Accessor::Boolean(Expr::term(self.element(verb, target)?.is_selected())),
            _ => {
                return Err(GenError::UnsupportedCommand {
                    verb: verb.to_string(),
                })
            }
        };

        Ok((accessor, negated))
    }

    fn locator(&self, verb: &str, target: &str) -> Result<Locator> {
        if target.is_empty() {
            return Err(GenError::invalid_command(verb, "missing locator"));
        }
        Locator::parse(target)
    }

    fn element(&self, verb: &str, target: &str) -> Result<Element> {
        Ok(self.driver.element(&self.locator(verb, target)?))
    }
}

fn push_block(out: &mut String, code: &str, indent: &str) {
    out.push_str(&emit::indent_block(code, indent));
    out.push('\n');
}
