//! `Selenium::Remote::Driver` call emitter.
//!
//! Three handle kinds carry a Perl expression string: the driver itself, a
//! found element, and a found element list. Every method returns a new
//! expression built from the handle's reference; handles are never mutated.

use crate::error::{GenError, Result};
use crate::lexical::xlate_argument;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an element is located on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorStrategy {
    /// XPath expression
    Xpath,
    /// CSS selector
    Css,
    /// `id` attribute
    Id,
    /// Link text
    Link,
    /// `name` attribute
    Name,
    /// Tag name
    TagName,
}

impl LocatorStrategy {
    /// All supported strategies.
    pub const ALL: [Self; 6] = [
        Self::Xpath,
        Self::Css,
        Self::Id,
        Self::Link,
        Self::Name,
        Self::TagName,
    ];

    /// The tag passed to the driver.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Xpath => "xpath",
            Self::Css => "css",
            Self::Id => "id",
            Self::Link => "link",
            Self::Name => "name",
            Self::TagName => "tag_name",
        }
    }

    /// Resolve a strategy tag. The locator is only used for the error.
    pub fn from_tag(tag: &str, locator: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.tag() == tag)
            .ok_or_else(|| GenError::unknown_strategy(tag, locator))
    }
}

impl fmt::Display for LocatorStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A strategy paired with its locator text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    /// Strategy
    pub strategy: LocatorStrategy,
    /// Raw locator text as recorded
    pub value: String,
}

impl Locator {
    /// Create a locator.
    #[must_use]
    pub fn new(strategy: LocatorStrategy, value: impl Into<String>) -> Self {
        Self {
            strategy,
            value: value.into(),
        }
    }

    /// Parse a recorded `strategy=value` target.
    ///
    /// A bare `//…` is XPath and a target without `=` is an id. Any other
    /// `prefix=` must name a supported strategy.
    pub fn parse(target: &str) -> Result<Self> {
        if target.starts_with("//") || target.starts_with("(//") {
            return Ok(Self::new(LocatorStrategy::Xpath, target));
        }
        match target.split_once('=') {
            Some((prefix, value))
                if !prefix.is_empty()
                    && prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
            {
                let strategy = LocatorStrategy::from_tag(prefix, value)?;
                Ok(Self::new(strategy, value))
            }
            _ => Ok(Self::new(LocatorStrategy::Id, target)),
        }
    }

    /// Driver call arguments for this locator.
    #[must_use]
    pub fn search_context(&self) -> String {
        format!("{}, \"{}\"", xlate_argument(&self.value), self.strategy.tag())
    }
}

/// `"<locator>", "<strategy>"` call arguments.
///
/// Interpolation sigils in the locator are escaped by literal encoding. An
/// unknown strategy tag is an error naming both the tag and the locator.
pub fn search_context(strategy: &str, locator: &str) -> Result<String> {
    let strategy = LocatorStrategy::from_tag(strategy, locator)?;
    Ok(Locator::new(strategy, locator).search_context())
}

/// The driver instance, referenced by the configured receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    reference: String,
}

impl Driver {
    /// Wrap the receiver variable, e.g. `$driver`.
    #[must_use]
    pub fn new(receiver: impl Into<String>) -> Self {
        Self {
            reference: receiver.into(),
        }
    }

    /// The expression this handle denotes.
    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    #[must_use]
    pub fn back(&self) -> String {
        format!("{}->go_back", self.reference)
    }

    #[must_use]
    pub fn close(&self) -> String {
        format!("{}->close", self.reference)
    }

    /// Navigate; `url` is already a Perl expression.
    #[must_use]
    pub fn get(&self, url: &str) -> String {
        format!("{}->get({url})", self.reference)
    }

    #[must_use]
    pub fn get_title(&self) -> String {
        format!("{}->get_title", self.reference)
    }

    #[must_use]
    pub fn get_current_url(&self) -> String {
        format!("{}->get_current_url", self.reference)
    }

    #[must_use]
    pub fn refresh(&self) -> String {
        format!("{}->refresh", self.reference)
    }

    /// Switch into a frame by id, name or index.
    #[must_use]
    pub fn frame(&self, locator: &str) -> String {
        format!("{}->switch_to_frame({})", self.reference, xlate_argument(locator))
    }

    /// Implicit wait applied to element lookups.
    #[must_use]
    pub fn set_implicit_wait_timeout(&self, milliseconds: u64) -> String {
        format!("{}->set_implicit_wait_timeout({milliseconds})", self.reference)
    }

    /// Find one element; the generated call dies when nothing matches.
    pub fn find_element(&self, strategy: &str, locator: &str) -> Result<Element> {
        Ok(Element::new(format!(
            "{}->find_element({})",
            self.reference,
            search_context(strategy, locator)?
        )))
    }

    /// Find every matching element.
    pub fn find_elements(&self, strategy: &str, locator: &str) -> Result<ElementList> {
        Ok(ElementList::new(format!(
            "{}->find_elements({})",
            self.reference,
            search_context(strategy, locator)?
        )))
    }

    /// [`Driver::find_element`] for an already parsed locator.
    #[must_use]
    pub fn element(&self, locator: &Locator) -> Element {
        Element::new(format!(
            "{}->find_element({})",
            self.reference,
            locator.search_context()
        ))
    }

    /// [`Driver::find_elements`] for an already parsed locator.
    #[must_use]
    pub fn elements(&self, locator: &Locator) -> ElementList {
        ElementList::new(format!(
            "{}->find_elements({})",
            self.reference,
            locator.search_context()
        ))
    }
}

/// A found element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    reference: String,
}

impl Element {
    /// Wrap an expression that evaluates to an element.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    #[must_use]
    pub fn clear(&self) -> String {
        format!("{}->clear", self.reference)
    }

    #[must_use]
    pub fn click(&self) -> String {
        format!("{}->click", self.reference)
    }

    #[must_use]
    pub fn get_attribute(&self, attribute_name: &str) -> String {
        format!(
            "{}->get_attribute({})",
            self.reference,
            xlate_argument(attribute_name)
        )
    }

    #[must_use]
    pub fn get_text(&self) -> String {
        format!("{}->get_text", self.reference)
    }

    #[must_use]
    pub fn is_displayed(&self) -> String {
        format!("{}->is_displayed", self.reference)
    }

    #[must_use]
    pub fn is_selected(&self) -> String {
        format!("{}->is_selected", self.reference)
    }

    #[must_use]
    pub fn send_keys(&self, text: &str) -> String {
        format!("{}->send_keys({})", self.reference, xlate_argument(text))
    }

    #[must_use]
    pub fn submit(&self) -> String {
        format!("{}->submit", self.reference)
    }
}

/// A found element list. `find_elements` yields an array reference in
/// scalar context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementList {
    reference: String,
}

impl ElementList {
    /// Wrap an expression that evaluates to an array reference of elements.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    #[must_use]
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// The element at `index`, as an [`Element`] handle.
    #[must_use]
    pub fn get_item(&self, index: usize) -> Element {
        Element::new(format!("{}->[{index}]", self.reference))
    }

    #[must_use]
    pub fn get_size(&self) -> String {
        format!("scalar(@{{ {} }})", self.reference)
    }

    #[must_use]
    pub fn is_empty(&self) -> String {
        format!("!@{{ {} }}", self.reference)
    }
}

/// Lookups that must not die when the element is absent.
#[derive(Debug)]
pub struct Utils;

impl Utils {
    /// Presence test built on `find_elements`: the match count, which is
    /// false when the element is absent instead of an error.
    pub fn is_element_present(driver: &Driver, how: &str, what: &str) -> Result<String> {
        Ok(driver.find_elements(how, what)?.get_size())
    }
}
