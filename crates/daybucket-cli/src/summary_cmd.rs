use std::path::Path;
use std::process::ExitCode;

use crate::cli::SummaryArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat, print_json};
use crate::shared::{load_ledger, parse_date};

pub fn run_summary(args: SummaryArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let range = match (args.from.as_deref(), args.to.as_deref()) {
        (Some(from), Some(to)) => {
            let from = parse_date(from, "--from")?;
            let to = parse_date(to, "--to")?;
            if from > to {
                return Err(CliError::input(format!(
                    "--from ({}) must not be after --to ({})",
                    from, to
                )));
            }
            Some((from, to))
        }
        _ => None,
    };

    let ledger = load_ledger(Path::new(&args.ledger))?;
    let summary = ledger.summary(range);

    match output_format {
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Text => {
            if let (Some((from, to)), Some(length)) = (range, summary.days_in_range) {
                println!("Range: {} to {} ({} days)", from, to, length);
            }
            println!("Workdays recorded: {}", summary.workdays);
            if summary.states.is_empty() {
                println!("No states in ledger");
            }
            for tally in &summary.states {
                let status = if tally.reached {
                    "threshold reached".to_string()
                } else {
                    format!("{} remaining", tally.remaining)
                };
                println!(
                    "{} ({}): {}/{} days, {}",
                    tally.name, tally.abbreviation, tally.days, tally.threshold, status
                );
            }
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
