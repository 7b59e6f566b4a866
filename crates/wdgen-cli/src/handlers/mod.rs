//! Command handlers - extracted from main.rs for testability
//!
//! Each handler takes parsed arguments and a reporter; generated text goes
//! to stdout or a file, status lines to stderr.

pub mod case;
pub mod options;
pub mod suite;
pub mod verify;

pub use case::{execute_case, regenerate_command};
pub use options::{execute_options, render_default_options};
pub use suite::{embedded_filename, execute_suite};
pub use verify::execute_verify;

use crate::error::CliResult;
use std::io::Write;
use std::path::Path;
use wdgen::options::FormatOptions;

/// Options from `path`, or the defaults.
pub fn load_options(path: Option<&Path>) -> CliResult<FormatOptions> {
    match path {
        Some(path) => Ok(FormatOptions::load(path)?),
        None => Ok(FormatOptions::default()),
    }
}

/// Write generated text to `output`, or stdout when there is none.
pub fn write_output(output: Option<&Path>, text: &str) -> CliResult<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, text)?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
