//! Recorded test cases and suites, as handed over by the recorder.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One recorded step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Verb, e.g. `click` or `assertTitle`
    pub command: String,
    /// First operand (usually a locator)
    #[serde(default, deserialize_with = "scalar_string")]
    pub target: String,
    /// Second operand
    #[serde(default, deserialize_with = "scalar_string")]
    pub value: String,
}

impl Command {
    /// Create a command.
    #[must_use]
    pub fn new(
        command: impl Into<String>,
        target: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            command: command.into(),
            target: target.into(),
            value: value.into(),
        }
    }

    /// `command | target | value`, as shown by the recorder.
    #[must_use]
    pub fn selenese(&self) -> String {
        format!("{} | {} | {}", self.command, self.target, self.value)
    }
}

/// A step or a free-text note between steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    /// Recorded command
    Command(Command),
    /// Free-text note
    Comment {
        /// Note text, possibly multi-line
        comment: String,
    },
}

/// A single recorded test.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestCase {
    /// Display title
    pub title: String,
    /// Backing file, once saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Steps in recorded order
    #[serde(default)]
    pub commands: Vec<Entry>,
}

impl TestCase {
    /// Create an empty, unsaved test case.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Append a command.
    #[must_use]
    pub fn command(
        mut self,
        command: impl Into<String>,
        target: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.commands
            .push(Entry::Command(Command::new(command, target, value)));
        self
    }

    /// Append a note.
    #[must_use]
    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.commands.push(Entry::Comment {
            comment: text.into(),
        });
        self
    }

    /// Load a test case from a `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self> {
        load_document(path)
    }
}

/// A test as referenced from a suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseRef {
    /// Display title
    pub title: String,
    /// Backing file, once saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Steps, when the suite file embeds the test
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Entry>,
}

impl TestCaseRef {
    /// Reference to an unsaved test.
    #[must_use]
    pub fn unsaved(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            filename: None,
            commands: Vec::new(),
        }
    }

    /// Reference to a saved test.
    #[must_use]
    pub fn saved(title: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            filename: Some(filename.into()),
            commands: Vec::new(),
        }
    }

    /// The embedded steps as a standalone test case.
    #[must_use]
    pub fn to_test_case(&self) -> TestCase {
        TestCase {
            title: self.title.clone(),
            filename: self.filename.clone(),
            commands: self.commands.clone(),
        }
    }
}

/// An ordered collection of tests.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestSuite {
    /// Suite title
    #[serde(default)]
    pub title: String,
    /// Tests in run order
    #[serde(default)]
    pub tests: Vec<TestCaseRef>,
}

impl TestSuite {
    /// Load a suite from a `.json`, `.yaml` or `.yml` file.
    pub fn load(path: &Path) -> Result<Self> {
        load_document(path)
    }
}

/// Accept `30000` as well as `"30000"` for operands written by hand.
pub(crate) fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
        Flag(bool),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(x) => x.to_string(),
        Scalar::Flag(b) => b.to_string(),
    })
}

fn load_document<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)?;
    if path.extension().is_some_and(|ext| ext == "json") {
        Ok(serde_json::from_str(&text)?)
    } else {
        Ok(serde_yaml_ng::from_str(&text)?)
    }
}
