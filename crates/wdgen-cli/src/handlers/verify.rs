//! Verify command handler

use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;
use crate::VerifyArgs;

/// Execute the verify command
///
/// Every file is checked; the command fails if any of them did.
pub fn execute_verify(reporter: &ProgressReporter, args: &VerifyArgs) -> CliResult<()> {
    let mut failed = 0;
    for path in &args.files {
        match wdgen::manifest::verify(path) {
            Ok(()) => reporter.success(&path.display().to_string()),
            Err(e) => {
                failed += 1;
                reporter.failure(&e.to_string());
            }
        }
    }

    if failed > 0 {
        return Err(CliError::VerificationFailed {
            failed,
            total: args.files.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wdgen::manifest::{write_with_manifest, GenerationMetadata};

    #[test]
    fn test_verify_counts_failures() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.t");
        let edited = dir.path().join("edited.t");
        let bare = dir.path().join("bare.t");
        for path in [&good, &edited] {
            write_with_manifest(path, "ok(1);\n", GenerationMetadata::for_input("", "wdgen"))
                .unwrap();
        }
        std::fs::write(&edited, "ok(0);\n").unwrap();
        std::fs::write(&bare, "ok(1);\n").unwrap();

        let reporter = ProgressReporter::new(false, true);
        let err = execute_verify(
            &reporter,
            &VerifyArgs {
                files: vec![good.clone(), edited, bare],
            },
        )
        .unwrap_err();
        assert!(matches!(err, CliError::VerificationFailed { failed: 2, total: 3 }));

        execute_verify(&reporter, &VerifyArgs { files: vec![good] }).unwrap();
    }
}
