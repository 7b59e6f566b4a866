//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// wdgen: turn Selenium IDE recordings into Perl WebDriver test scripts
#[derive(Parser, Debug)]
#[command(name = "wdgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Format one recorded test case as a Perl test script
    Case(CaseArgs),

    /// Format a test suite as an aggregator script
    Suite(SuiteArgs),

    /// Print the default formatter options
    Options(OptionsArgs),

    /// Check generated scripts against their manifests
    Verify(VerifyArgs),
}

/// Arguments for the case command
#[derive(Parser, Debug)]
pub struct CaseArgs {
    /// Recorded test case (.yaml, .yml or .json)
    pub input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Formatter options file (.yaml, .yml or .json)
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Write a hash manifest next to the output file
    #[arg(long, requires = "output")]
    pub manifest: bool,
}

/// Arguments for the suite command
#[derive(Parser, Debug)]
pub struct SuiteArgs {
    /// Test suite (.yaml, .yml or .json)
    pub input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Formatter options file, used for embedded test cases
    #[arg(long)]
    pub options: Option<PathBuf>,

    /// Also format test cases embedded in the suite into this directory
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

/// Arguments for the options command
#[derive(Parser, Debug)]
pub struct OptionsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: OptionsFormat,
}

/// Arguments for the verify command
#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Generated scripts to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Serialization format for printed options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OptionsFormat {
    /// YAML
    #[default]
    Yaml,
    /// JSON
    Json,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;

    #[test]
    fn test_parse_case_command() {
        let cli = Cli::parse_from(["wdgen", "case", "login.yaml", "-o", "login.t", "--manifest"]);
        if let Commands::Case(args) = cli.command {
            assert_eq!(args.input, PathBuf::from("login.yaml"));
            assert_eq!(args.output, Some(PathBuf::from("login.t")));
            assert!(args.manifest);
            assert!(args.options.is_none());
        } else {
            panic!("expected Case command");
        }
    }

    #[test]
    fn test_manifest_requires_output() {
        assert!(Cli::try_parse_from(["wdgen", "case", "login.yaml", "--manifest"]).is_err());
    }

    #[test]
    fn test_parse_suite_with_out_dir() {
        let cli = Cli::parse_from(["wdgen", "suite", "smoke.yaml", "--out-dir", "t"]);
        if let Commands::Suite(args) = cli.command {
            assert_eq!(args.out_dir, Some(PathBuf::from("t")));
            assert!(args.output.is_none());
        } else {
            panic!("expected Suite command");
        }
    }

    #[test]
    fn test_parse_options_format() {
        let cli = Cli::parse_from(["wdgen", "options", "--format", "json"]);
        if let Commands::Options(args) = cli.command {
            assert_eq!(args.format, OptionsFormat::Json);
        } else {
            panic!("expected Options command");
        }
    }

    #[test]
    fn test_verify_requires_files() {
        assert!(Cli::try_parse_from(["wdgen", "verify"]).is_err());
        let cli = Cli::parse_from(["wdgen", "verify", "a.t", "b.t"]);
        if let Commands::Verify(args) = cli.command {
            assert_eq!(args.files.len(), 2);
        } else {
            panic!("expected Verify command");
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["wdgen", "-vv", "--color", "never", "options"]);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
        assert_eq!(ColorChoice::from(cli.color), ColorChoice::Never);
    }
}
