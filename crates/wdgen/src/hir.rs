//! Expression model for generated checks.
//!
//! A closed sum type: every comparison the generator can emit is one variant
//! of [`Expr`], and every variant renders three ways:
//!
//! 1. **Bare text** via [`Expr::code`] / `Display`
//! 2. **Assertion** via [`Expr::assert`], a complete `Test::More` statement
//! 3. **Verification** via [`Expr::verify`], always `verify(assert())`
//!
//! Operand order in assertions follows the generated-script convention:
//! `is(actual, expected)` and `like(qr/pattern/, actual)`.

use crate::emit;
use crate::lexical::regex_literal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a compound expression keeps its enclosing parentheses.
///
/// Operands of `!` and of the polling loop need them; a top-level statement
/// or a call argument does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Braces {
    /// Wrap compound forms in `( … )`
    Keep,
    /// Render compound forms bare
    Omit,
}

/// A Perl expression the generator knows how to check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// Opaque Perl expression text (a driver call, literal, variable…).
    ///
    /// Must be a primary or postfix expression; compound conditions are
    /// built from the other variants so precedence stays correct.
    Term(String),
    /// `actual eq expected`
    Equals {
        /// Expected value
        expected: Box<Expr>,
        /// Value read from the page
        actual: Box<Expr>,
    },
    /// `actual ne expected`
    NotEquals {
        /// Value it must differ from
        expected: Box<Expr>,
        /// Value read from the page
        actual: Box<Expr>,
    },
    /// `expression =~ /pattern/`
    RegexpMatch {
        /// Value read from the page
        expression: Box<Expr>,
        /// Free-text regular expression
        pattern: String,
    },
    /// `expression !~ /pattern/`
    RegexpNotMatch {
        /// Value read from the page
        expression: Box<Expr>,
        /// Free-text regular expression
        pattern: String,
    },
    /// An expression used for its truth value
    Bool(Box<Expr>),
    /// Logical negation
    Not(Box<Expr>),
}

impl Expr {
    /// Opaque expression text.
    #[must_use]
    pub fn term(text: impl Into<String>) -> Self {
        Self::Term(text.into())
    }

    /// Equality check.
    #[must_use]
    pub fn equals(expected: Expr, actual: Expr) -> Self {
        Self::Equals {
            expected: Box::new(expected),
            actual: Box::new(actual),
        }
    }

    /// Inequality check.
    #[must_use]
    pub fn not_equals(expected: Expr, actual: Expr) -> Self {
        Self::NotEquals {
            expected: Box::new(expected),
            actual: Box::new(actual),
        }
    }

    /// Regex match.
    #[must_use]
    pub fn regexp_match(expression: Expr, pattern: impl Into<String>) -> Self {
        Self::RegexpMatch {
            expression: Box::new(expression),
            pattern: pattern.into(),
        }
    }

    /// Negated regex match.
    #[must_use]
    pub fn regexp_not_match(expression: Expr, pattern: impl Into<String>) -> Self {
        Self::RegexpNotMatch {
            expression: Box::new(expression),
            pattern: pattern.into(),
        }
    }

    /// Boolean expression.
    #[must_use]
    pub fn boolean(expression: Expr) -> Self {
        Self::Bool(Box::new(expression))
    }

    /// Negated wrapper.
    #[must_use]
    pub fn negate(expression: Expr) -> Self {
        Self::Not(Box::new(expression))
    }

    /// True for the negative forms (`ne`, `!~`, `!`).
    ///
    /// Polling waits loop on the inverted form of a negative expression.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        matches!(
            self,
            Self::NotEquals { .. } | Self::RegexpNotMatch { .. } | Self::Not(_)
        )
    }

    /// The logical opposite, preferring the dedicated negative variant.
    #[must_use]
    pub fn invert(&self) -> Self {
        match self {
            Self::Equals { expected, actual } => Self::NotEquals {
                expected: expected.clone(),
                actual: actual.clone(),
            },
            Self::NotEquals { expected, actual } => Self::Equals {
                expected: expected.clone(),
                actual: actual.clone(),
            },
            Self::RegexpMatch {
                expression,
                pattern,
            } => Self::RegexpNotMatch {
                expression: expression.clone(),
                pattern: pattern.clone(),
            },
            Self::RegexpNotMatch {
                expression,
                pattern,
            } => Self::RegexpMatch {
                expression: expression.clone(),
                pattern: pattern.clone(),
            },
            Self::Not(inner) => (**inner).clone(),
            Self::Term(_) | Self::Bool(_) => Self::Not(Box::new(self.clone())),
        }
    }

    /// Render the expression text.
    #[must_use]
    pub fn code(&self, braces: Braces) -> String {
        let text = match self {
            Self::Term(text) => return text.clone(),
            Self::Bool(inner) => return inner.code(braces),
            Self::Not(inner) => return format!("!{}", inner.code(Braces::Keep)),
            Self::Equals { expected, actual } => format!(
                "{} eq {}",
                actual.code(Braces::Keep),
                expected.code(Braces::Keep)
            ),
            Self::NotEquals { expected, actual } => format!(
                "{} ne {}",
                actual.code(Braces::Keep),
                expected.code(Braces::Keep)
            ),
            Self::RegexpMatch {
                expression,
                pattern,
            } => format!(
                "{} =~ {}",
                expression.code(Braces::Keep),
                regex_literal(pattern)
            ),
            Self::RegexpNotMatch {
                expression,
                pattern,
            } => format!(
                "{} !~ {}",
                expression.code(Braces::Keep),
                regex_literal(pattern)
            ),
        };

        match braces {
            Braces::Keep => format!("({text})"),
            Braces::Omit => text,
        }
    }

    /// A `Test::More` statement that fails the test when the check is false.
    #[must_use]
    pub fn assert(&self) -> String {
        match self {
            Self::Term(_) | Self::Bool(_) => {
                emit::terminate(&format!("ok({})", self.code(Braces::Omit)))
            }
            Self::Equals { expected, actual } => emit::terminate(&format!(
                "is({}, {})",
                actual.code(Braces::Omit),
                expected.code(Braces::Omit)
            )),
            Self::NotEquals { expected, actual } => emit::terminate(&format!(
                "isnt({}, {})",
                actual.code(Braces::Omit),
                expected.code(Braces::Omit)
            )),
            Self::RegexpMatch {
                expression,
                pattern,
            } => emit::terminate(&format!(
                "like(qr{}, {})",
                regex_literal(pattern),
                expression.code(Braces::Omit)
            )),
            Self::RegexpNotMatch {
                expression,
                pattern,
            } => emit::terminate(&format!(
                "unlike(qr{}, {})",
                regex_literal(pattern),
                expression.code(Braces::Omit)
            )),
            Self::Not(inner) => match inner.as_ref() {
                Self::Term(_) | Self::Bool(_) => {
                    emit::terminate(&format!("ok({})", self.code(Braces::Omit)))
                }
                other => other.invert().assert(),
            },
        }
    }

    /// The soft form of [`Expr::assert`].
    #[must_use]
    pub fn verify(&self) -> String {
        emit::verify(&self.assert())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code(Braces::Omit))
    }
}
