use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod error;
mod filter_cmd;
mod load_cmd;
mod process_cmd;
mod shared;
mod summary_cmd;

use cli::{Cli, Commands};
use error::{CliResult, OutputFormat, report_error};
use filter_cmd::run_filter;
use load_cmd::run_load;
use process_cmd::run_process;
use summary_cmd::run_summary;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dispatch<A>(
    args: A,
    output_format: &str,
    run: fn(A, OutputFormat) -> CliResult<ExitCode>,
) -> ExitCode {
    let output_format = match output_format.parse::<OutputFormat>() {
        Ok(format) => format,
        Err(err) => return report_error(&err, OutputFormat::lenient(output_format)),
    };

    run(args, output_format).unwrap_or_else(|err| report_error(&err, output_format))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("Parsed CLI args: {:?}", cli);

    match cli.command {
        Commands::Filter(args) => {
            let format = args.output_format.clone();
            dispatch(args, &format, run_filter)
        }
        Commands::Process(args) => {
            let format = args.output_format.clone();
            dispatch(args, &format, run_process)
        }
        Commands::Load(args) => {
            let format = args.output_format.clone();
            dispatch(args, &format, run_load)
        }
        Commands::Summary(args) => {
            let format = args.output_format.clone();
            dispatch(args, &format, run_summary)
        }
    }
}
