//! Formatter options.
//!
//! Loaded once (defaults, or a YAML/JSON file) and then shared read-only by
//! every emitter that needs it. Keys use the recorder's camelCase names.

use crate::error::{GenError, Result};
use crate::template;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

/// Default script header. `${…}` tokens are option placeholders.
pub const DEFAULT_HEADER: &str = concat!(
    "use strict;\n",
    "use warnings;\n",
    "use Time::HiRes qw(sleep);\n",
    "use Selenium::Remote::Driver;\n",
    "use Test::More;\n",
    "\n",
    "my ${receiver} = Selenium::Remote::Driver->new( remote_server_addr => \"${rcHost}\",\n",
    "                                               port => ${rcPort},\n",
    "                                               browser_name => \"${environment}\");\n",
    "\n",
);

/// Default script footer.
pub const DEFAULT_FOOTER: &str = "${receiver}->quit();\ndone_testing();\n";

/// Width of one nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Indent {
    /// One tab character
    Tab,
    /// A number of spaces (0–8)
    Spaces(u8),
    /// No indentation
    #[default]
    None,
}

impl Indent {
    /// Largest supported space count.
    pub const MAX_SPACES: u8 = 8;

    /// Text for one level.
    #[must_use]
    pub fn unit(self) -> String {
        match self {
            Self::Tab => "\t".to_string(),
            Self::Spaces(n) => " ".repeat(usize::from(n)),
            Self::None => String::new(),
        }
    }

    /// Text for `levels` levels.
    #[must_use]
    pub fn indents(self, levels: usize) -> String {
        self.unit().repeat(levels)
    }
}

impl TryFrom<String> for Indent {
    type Error = GenError;

    fn try_from(value: String) -> Result<Self> {
        if value == "tab" {
            return Ok(Self::Tab);
        }
        match value.parse::<u8>() {
            Ok(0) => Ok(Self::None),
            Ok(n) if n <= Self::MAX_SPACES => Ok(Self::Spaces(n)),
            _ => Err(GenError::InvalidOption {
                option: "indent".to_string(),
                reason: format!("expected 'tab' or 0-8 spaces, got '{value}'"),
            }),
        }
    }
}

impl From<Indent> for String {
    fn from(indent: Indent) -> Self {
        indent.to_string()
    }
}

impl fmt::Display for Indent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tab => f.write_str("tab"),
            Self::Spaces(n) => write!(f, "{n}"),
            Self::None => f.write_str("0"),
        }
    }
}

/// Options consumed by the test-case and suite formatters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatOptions {
    /// Variable bound to the driver instance
    pub receiver: String,
    /// Remote server host
    pub rc_host: String,
    /// Remote server port
    #[serde(deserialize_with = "crate::model::scalar_string")]
    pub rc_port: String,
    /// Browser name
    pub environment: String,
    /// Script header, with placeholders
    pub header: String,
    /// Script footer, with placeholders
    pub footer: String,
    /// Width of one nesting level
    pub indent: Indent,
    /// Base nesting depth of the script body
    #[serde(deserialize_with = "level_count")]
    pub initial_indents: usize,
    /// Emit each recorded command as a comment above its code
    #[serde(deserialize_with = "flag")]
    pub show_selenese: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            receiver: "$driver".to_string(),
            rc_host: "localhost".to_string(),
            rc_port: "4444".to_string(),
            environment: "firefox".to_string(),
            header: DEFAULT_HEADER.to_string(),
            footer: DEFAULT_FOOTER.to_string(),
            indent: Indent::None,
            initial_indents: 0,
            show_selenese: false,
        }
    }
}

impl FormatOptions {
    /// Create default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the receiver variable.
    #[must_use]
    pub fn with_receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = receiver.into();
        self
    }

    /// Set the indentation unit.
    #[must_use]
    pub const fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    /// Set the base nesting depth.
    #[must_use]
    pub const fn with_initial_indents(mut self, levels: usize) -> Self {
        self.initial_indents = levels;
        self
    }

    /// Toggle recorded-command comments.
    #[must_use]
    pub const fn with_show_selenese(mut self, show: bool) -> Self {
        self.show_selenese = show;
        self
    }

    /// Check placeholders and required values.
    pub fn validate(&self) -> Result<()> {
        template::validate(&self.header, "header")?;
        template::validate(&self.footer, "footer")?;
        if self.receiver.trim().is_empty() {
            return Err(GenError::InvalidOption {
                option: "receiver".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Parse YAML options and validate them.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let options: Self = serde_yaml_ng::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// Parse JSON options and validate them.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let options = if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&text)?
        } else {
            Self::from_yaml_str(&text)?
        };
        tracing::debug!(path = %path.display(), receiver = %options.receiver, "loaded format options");
        Ok(options)
    }

    /// Header with placeholders filled in.
    #[must_use]
    pub fn render_header(&self) -> String {
        template::substitute(&self.header, self)
    }

    /// Footer with placeholders filled in.
    #[must_use]
    pub fn render_footer(&self) -> String {
        template::substitute(&self.footer, self)
    }

    /// Indentation for the script body.
    #[must_use]
    pub fn base_indent(&self) -> String {
        self.indent.indents(self.initial_indents)
    }
}

/// Option values may be written as strings (`"2"`, `'false'`) or as bare
/// scalars.
fn level_count<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let text = crate::model::scalar_string(deserializer)?;
    text.trim().parse().map_err(|_| {
        D::Error::custom(format!("initialIndents: expected a level count, got '{text}'"))
    })
}

fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let text = crate::model::scalar_string(deserializer)?;
    match text.trim() {
        "true" => Ok(true),
        "false" | "" => Ok(false),
        _ => Err(D::Error::custom(format!(
            "showSelenese: expected true or false, got '{text}'"
        ))),
    }
}
