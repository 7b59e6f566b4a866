//! wdgen: Selenium IDE recordings to Perl WebDriver test scripts.
//!
//! A recorded test case (a list of `command | target | value` steps) is
//! turned into a `Test::More` script driving `Selenium::Remote::Driver`.
//! A suite of such cases becomes an aggregator script that `require`s
//! each one in order.
//!
//! ```
//! use wdgen::prelude::*;
//!
//! let test = TestCase::new("Login")
//!     .command("open", "/login", "")
//!     .command("assertTitle", "Sign in", "");
//! let script = format_test_case(&test, &FormatOptions::default()).unwrap();
//! assert!(script.contains(r#"is($driver->get_title, "Sign in");"#));
//! ```

#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)]

pub mod emit;
pub mod error;
pub mod formatter;
pub mod hir;
pub mod lexical;
pub mod manifest;
pub mod model;
pub mod options;
pub mod suite;
pub mod template;
pub mod webdriver;

pub use error::{GenError, Result};

/// Common imports.
pub mod prelude {
    pub use crate::emit::{VERIFY_MARKER, WAIT_ATTEMPTS, WAIT_INTERVAL_SECS};
    pub use crate::error::{GenError, Result};
    pub use crate::formatter::{CheckKind, TestCaseFormatter};
    pub use crate::hir::{Braces, Expr};
    pub use crate::manifest::{verify, write_with_manifest, FileManifest, GenerationMetadata};
    pub use crate::model::{Command, Entry, TestCase, TestCaseRef, TestSuite};
    pub use crate::options::{FormatOptions, Indent};
    pub use crate::suite::format_suite;
    pub use crate::webdriver::{Driver, Element, ElementList, Locator, LocatorStrategy, Utils};
    pub use crate::format_test_case;
}

/// Format one test case with `options`.
pub fn format_test_case(test: &model::TestCase, options: &options::FormatOptions) -> Result<String> {
    options.validate()?;
    formatter::TestCaseFormatter::new(options).format(test)
}
