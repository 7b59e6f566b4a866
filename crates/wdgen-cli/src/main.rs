//! wdgen: Selenium IDE recordings to Perl WebDriver test scripts
//!
//! ## Usage
//!
//! ```bash
//! wdgen case login.yaml -o t/login.t --manifest   # Format one test case
//! wdgen suite smoke.yaml --out-dir t -o t/smoke.t # Format a suite and its cases
//! wdgen options --format json > perl.json         # Dump default options
//! wdgen verify t/login.t                          # Detect hand edits
//! ```

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wdgen_cli::{
    handlers, Cli, CliConfig, CliResult, ColorChoice, Commands, ProgressReporter, Verbosity,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Build configuration from CLI args
    let config = build_config(&cli);
    init_tracing(&config);

    let mut reporter = ProgressReporter::new(
        config.color.should_color(),
        config.verbosity.is_quiet(),
    );

    match cli.command {
        Commands::Case(args) => handlers::execute_case(&reporter, &args),
        Commands::Suite(args) => handlers::execute_suite(&mut reporter, &args),
        Commands::Options(args) => handlers::execute_options(&args),
        Commands::Verify(args) => handlers::execute_verify(&reporter, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new().with_verbosity(verbosity).with_color(color)
}

fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_filter()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.color.should_color())
        .with_target(config.verbosity.is_verbose())
        .try_init();
}
