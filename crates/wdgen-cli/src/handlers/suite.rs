//! Suite command handler

use super::{load_options, write_output};
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;
use crate::SuiteArgs;
use std::path::{Component, Path, PathBuf};
use wdgen::lexical::method_name;
use wdgen::model::{TestCaseRef, TestSuite};
use wdgen::options::FormatOptions;
use wdgen::suite::format_suite;

/// Execute the suite command
///
/// With `--out-dir`, test cases embedded in the suite file are formatted
/// first and the aggregator then requires them by their path relative to
/// the suite script (or to the out dir when the suite goes to stdout). A
/// case that fails to format is reported and skipped; the others are still
/// written.
pub fn execute_suite(reporter: &mut ProgressReporter, args: &SuiteArgs) -> CliResult<()> {
    let mut suite = TestSuite::load(&args.input).map_err(|e| CliError::input(&args.input, e))?;

    let mut failed = 0;
    let mut total = 0;
    if let Some(ref out_dir) = args.out_dir {
        let options = load_options(args.options.as_deref())?;
        std::fs::create_dir_all(out_dir)?;
        let out_dir = out_dir.canonicalize()?;
        let suite_dir = suite_dir(args.output.as_deref(), &out_dir)?;

        total = suite.tests.iter().filter(|t| !t.commands.is_empty()).count();
        reporter.header(&suite.title);
        reporter.start_progress(total as u64, "formatting test cases");
        for test in suite.tests.iter_mut().filter(|t| !t.commands.is_empty()) {
            match write_embedded(test, &options, &out_dir) {
                Ok(path) => test.filename = Some(relative_path(&suite_dir, &path)),
                Err(e) => {
                    failed += 1;
                    reporter.failure(&format!("{}: {e}", test.title));
                }
            }
            reporter.advance(&test.title);
        }
        reporter.finish();
    }

    let script = format_suite(&suite);
    tracing::info!(title = %suite.title, tests = suite.tests.len(), "formatted suite");
    write_output(args.output.as_deref(), &script)?;
    if let Some(ref path) = args.output {
        reporter.wrote(path);
    }

    if failed > 0 {
        return Err(CliError::FormatFailed { failed, total });
    }
    Ok(())
}

/// File name for an embedded test case: its own, or one derived from the title.
#[must_use]
pub fn embedded_filename(test: &TestCaseRef) -> String {
    test.filename
        .clone()
        .unwrap_or_else(|| format!("{}.t", method_name(&test.title)))
}

fn write_embedded(
    test: &TestCaseRef,
    options: &FormatOptions,
    out_dir: &Path,
) -> CliResult<PathBuf> {
    let path = out_dir.join(embedded_filename(test));
    let script = wdgen::format_test_case(&test.to_test_case(), options)?;
    write_output(Some(&path), &script)?;
    tracing::debug!(title = %test.title, file = %path.display(), "wrote embedded test case");
    Ok(path)
}

/// Directory the aggregator's `require`s resolve against.
fn suite_dir(output: Option<&Path>, out_dir: &Path) -> CliResult<PathBuf> {
    let Some(output) = output else {
        return Ok(out_dir.to_path_buf());
    };
    let parent = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;
    Ok(parent.canonicalize()?)
}

/// `target` as seen from directory `base`, `/`-separated. Both are absolute.
#[must_use]
pub fn relative_path(base: &Path, target: &Path) -> String {
    let base: Vec<Component<'_>> = base.components().collect();
    let target: Vec<Component<'_>> = target.components().collect();
    let common = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    std::iter::repeat("..".to_string())
        .take(base.len() - common)
        .chain(
            target[common..]
                .iter()
                .map(|c| c.as_os_str().to_string_lossy().into_owned()),
        )
        .collect::<Vec<_>>()
        .join("/")
}
