//! `${name}` placeholder substitution for header and footer text.
//!
//! Substitution is literal: option values are inserted verbatim, with no
//! escaping. Unknown placeholders are rejected when options are loaded, so a
//! validated template never leaves a `${name}` token behind. Other `${`
//! forms, such as Perl dereferences, pass through untouched.

use crate::error::{GenError, Result};
use crate::options::FormatOptions;
use regex::Regex;
use std::sync::OnceLock;

/// Option values that may appear in header/footer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `${receiver}`
    Receiver,
    /// `${rcHost}`
    RcHost,
    /// `${rcPort}`
    RcPort,
    /// `${environment}`
    Environment,
}

impl Placeholder {
    pub const ALL: [Self; 4] = [Self::Receiver, Self::RcHost, Self::RcPort, Self::Environment];

    /// Name as written between the braces.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Receiver => "receiver",
            Self::RcHost => "rcHost",
            Self::RcPort => "rcPort",
            Self::Environment => "environment",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    fn value(self, options: &FormatOptions) -> &str {
        match self {
            Self::Receiver => &options.receiver,
            Self::RcHost => &options.rc_host,
            Self::RcPort => &options.rc_port,
            Self::Environment => &options.environment,
        }
    }
}

fn placeholder_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([A-Za-z_]\w*)\}").expect("placeholder pattern is valid"))
}

/// Names of every `${…}` token in `text`, in order of appearance.
#[must_use]
pub fn placeholders(text: &str) -> Vec<&str> {
    placeholder_pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Reject any placeholder in `text` that is not a known option.
pub fn validate(text: &str, option: &str) -> Result<()> {
    for name in placeholders(text) {
        if Placeholder::from_name(name).is_none() {
            return Err(GenError::UnknownPlaceholder {
                placeholder: name.to_string(),
                option: option.to_string(),
            });
        }
    }
    Ok(())
}

/// Replace known placeholders with option values.
///
/// Tokens that are not options are left untouched; [`validate`] is what
/// keeps them out of loaded configuration.
#[must_use]
pub fn substitute(text: &str, options: &FormatOptions) -> String {
    placeholder_pattern()
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let name = caps.get(1).map_or("", |m| m.as_str());
            match Placeholder::from_name(name) {
                Some(p) => p.value(options).to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_placeholders_in_order() {
        assert_eq!(
            placeholders("my ${receiver} = x(${rcHost}, ${rcPort});"),
            vec!["receiver", "rcHost", "rcPort"]
        );
        assert!(placeholders("no tokens").is_empty());
    }

    #[test]
    fn validate_rejects_unknown() {
        assert!(validate("${receiver}->quit();", "footer").is_ok());
        let err = validate("${baseUrl}", "header").unwrap_err();
        assert!(err.to_string().contains("baseUrl"));
        assert!(err.to_string().contains("header"));
    }

    #[test]
    fn substitute_is_literal() {
        let options = FormatOptions {
            rc_host: "grid \"1\"".to_string(),
            ..FormatOptions::default()
        };
        assert_eq!(
            substitute("${receiver} @ ${rcHost}:${rcPort} on ${environment}", &options),
            "$driver @ grid \"1\":4444 on firefox"
        );
    }

    #[test]
    fn perl_dereferences_are_not_placeholders() {
        let header = "my $n = ${$ref};\nmy $s = \"${\\ join(',', @xs)}\";\nmy ${receiver} = 1;\n";
        assert_eq!(placeholders(header), vec!["receiver"]);
        assert!(validate(header, "header").is_ok());
    }

    #[test]
    fn substitute_leaves_unknown_tokens() {
        let options = FormatOptions::default();
        assert_eq!(substitute("${nope}", &options), "${nope}");
    }
}
