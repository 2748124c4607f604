use std::path::Path;
use std::process::ExitCode;

use daybucket_core::LedgerSeed;
use daybucket_core::ledger::LoadReport;
use serde::Serialize;
use tracing::info;

use crate::cli::LoadArgs;
use crate::error::{CliResult, EXIT_SUCCESS, OutputFormat, print_json};
use crate::shared::{load_ledger, read_structured, save_ledger};

#[derive(Debug, Serialize)]
struct LoadOutput {
    ledger: String,
    states: LoadReport,
    offices: LoadReport,
}

pub fn run_load(args: LoadArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let seed: LedgerSeed = read_structured(Path::new(&args.file))?;

    let ledger_path = Path::new(&args.ledger);
    let mut ledger = load_ledger(ledger_path)?;
    let report = ledger.load_seed(seed, args.update)?;
    save_ledger(ledger_path, &ledger)?;
    info!(?report, "Loaded seed");

    match output_format {
        OutputFormat::Json => print_json(&LoadOutput {
            ledger: args.ledger,
            states: report.states,
            offices: report.offices,
        })?,
        OutputFormat::Text => {
            println!(
                "States: {} created, {} updated, {} skipped",
                report.states.created, report.states.updated, report.states.skipped
            );
            println!(
                "Offices: {} created, {} updated, {} skipped",
                report.offices.created, report.offices.updated, report.offices.skipped
            );
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
