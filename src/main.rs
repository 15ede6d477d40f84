//! elastic-trib: Elasticsearch cluster command line utility
//!
//! Entry point for the elastic-trib application.

use elastic_trib::commands;
use elastic_trib::config::{Cli, Command, LoadedConfig};
use std::io::Write;
use std::process::ExitCode;

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    setup_tracing(cli.verbose, cli.log_format);

    // Handle init subcommand
    if let Command::Init { output } = &cli.command {
        return match commands::init(output) {
            Ok(message) => print_output(&message),
            Err(e) => {
                eprintln!("Error: {e}");
                exit_code::CONFIG_ERROR
            }
        };
    }

    let config = match LoadedConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };
    tracing::debug!("Loaded {config}");

    run_application(&cli, &config)
}

/// Runs the selected command on a single-threaded runtime.
///
/// Excluded from coverage - requires async runtime and a live cluster.
#[cfg(not(tarpaulin_include))]
fn run_application(cli: &Cli, config: &LoadedConfig) -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(cli, config)) {
        Ok(output) => print_output(&output),
        Err(e) => {
            tracing::debug!("Command failed: {e:?}");
            eprintln!("Error: {e}");
            if let commands::CommandError::Config(config_error) = &e {
                print_config_hint(config_error);
            }
            exit_code::for_error(&e)
        }
    }
}

fn print_output(output: &str) -> ExitCode {
    let mut stdout = std::io::stdout().lock();
    match stdout.write_all(output.as_bytes()).and_then(|()| stdout.flush()) {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            eprintln!("Failed to write output: {e}");
            exit_code::runtime_error()
        }
    }
}
