//! Case command handler

use super::{load_options, write_output};
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;
use crate::CaseArgs;
use wdgen::manifest::{write_with_manifest, GenerationMetadata};
use wdgen::model::TestCase;

/// Execute the case command
pub fn execute_case(reporter: &ProgressReporter, args: &CaseArgs) -> CliResult<()> {
    let options = load_options(args.options.as_deref())?;
    let test = TestCase::load(&args.input).map_err(|e| CliError::input(&args.input, e))?;
    let script =
        wdgen::format_test_case(&test, &options).map_err(|e| CliError::input(&args.input, e))?;

    tracing::info!(
        input = %args.input.display(),
        title = %test.title,
        commands = test.commands.len(),
        "formatted test case"
    );

    match args.output.as_deref() {
        Some(path) if args.manifest => {
            let input = std::fs::read_to_string(&args.input)?;
            let metadata = GenerationMetadata::for_input(&input, regenerate_command(args));
            write_with_manifest(path, &script, metadata)?;
            reporter.wrote(path);
        }
        Some(path) => {
            write_output(Some(path), &script)?;
            reporter.wrote(path);
        }
        None => write_output(None, &script)?,
    }
    Ok(())
}

/// The command line that reproduces this output.
#[must_use]
pub fn regenerate_command(args: &CaseArgs) -> String {
    let mut cmd = format!("wdgen case {}", args.input.display());
    if let Some(ref output) = args.output {
        cmd.push_str(&format!(" -o {}", output.display()));
    }
    if let Some(ref options) = args.options {
        cmd.push_str(&format!(" --options {}", options.display()));
    }
    if args.manifest {
        cmd.push_str(" --manifest");
    }
    cmd
}
