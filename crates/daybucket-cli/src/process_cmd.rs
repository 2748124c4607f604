use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use chrono::NaiveDate;
use daybucket_core::ledger::DayOutcome;
use daybucket_core::{DayLedger, PlaceIdChange, match_days};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::cli::ProcessArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat, print_json};
use crate::shared::{
    load_ledger, parse_tz_or_input_error, parse_weekdays, read_structured, save_ledger,
};

#[derive(Debug, Serialize)]
struct ProcessOutput {
    place_id: String,
    state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    office: Option<String>,
    timezone: String,
    dry_run: bool,
    segments_scanned: usize,
    segments_matched: usize,
    days: Vec<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated: Option<usize>,
}

pub fn run_process(args: ProcessArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    // Validate everything before touching the timeline or the ledger.
    let allowed_weekdays = parse_weekdays(args.days_of_week.as_deref())?;
    let tz = parse_tz_or_input_error(&args.timezone)?;

    let file_path = Path::new(&args.file_path);
    if !file_path.exists() {
        return Err(CliError::input(format!(
            "File not found: {}",
            file_path.display()
        )));
    }

    let ledger_path = Path::new(&args.ledger);
    let mut ledger = load_ledger(ledger_path)?;
    let state = ledger.state(&args.state)?.clone();

    let office = match args.office_name.as_deref() {
        Some(name) => match ledger.office(name) {
            Some(office) => Some(office.name.clone()),
            None => {
                warn!("Office '{}' not found. Skipping office assignment.", name);
                None
            }
        },
        None => None,
    };

    let mut ledger_changed = false;
    if let Some(office) = office.as_deref() {
        ledger_changed |=
            maybe_update_office_place_id(&mut ledger, office, &args, output_format)?;
    }

    let doc: Value = read_structured(file_path)?;
    let report = match_days(&doc, &args.place_id, tz, allowed_weekdays.as_ref());
    info!(
        scanned = report.segments_scanned,
        matched = report.segments_matched,
        days = report.days.len(),
        "Matched timeline segments"
    );

    let mut output = ProcessOutput {
        place_id: args.place_id.clone(),
        state: state.abbreviation.clone(),
        office: office.clone(),
        timezone: tz.to_string(),
        dry_run: args.dry_run,
        segments_scanned: report.segments_scanned,
        segments_matched: report.segments_matched,
        days: report.days.clone(),
        created: None,
        updated: None,
    };

    if output_format == OutputFormat::Text {
        println!(
            "Found {} matching days across {} segments",
            report.days.len(),
            report.segments_matched
        );
    }

    if report.days.is_empty() {
        warn!("No matching segments found for place id '{}'", args.place_id);
    } else if args.dry_run {
        if output_format == OutputFormat::Text {
            println!();
            println!("--- DRY RUN - Would process the following days ---");
            for day in &report.days {
                match office.as_deref() {
                    Some(office) => println!("  {} - {} - {}", day, state.name, office),
                    None => println!("  {} - {}", day, state.name),
                }
            }
        }
    } else {
        let recorded = ledger.record_days(&report.days, &state.abbreviation, office.as_deref())?;
        ledger_changed = true;

        if output_format == OutputFormat::Text {
            for (date, outcome) in &recorded.outcomes {
                let verb = match outcome {
                    DayOutcome::Created => "Created",
                    DayOutcome::Updated => "Updated",
                };
                println!("{}: {} - {}", verb, date, state.name);
            }
            println!();
            println!(
                "Processing complete! Created: {}, Updated: {}",
                recorded.created, recorded.updated
            );
        }
        output.created = Some(recorded.created);
        output.updated = Some(recorded.updated);
    }

    if ledger_changed && !args.dry_run {
        save_ledger(ledger_path, &ledger)?;
    }

    if output_format == OutputFormat::Json {
        print_json(&output)?;
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}

/// Offer to point the office at the processed place id.
///
/// The ledger only changes with confirmation: `--yes` gives it, `--no-input`
/// withholds it, and otherwise the user is asked on stdin.
fn maybe_update_office_place_id(
    ledger: &mut DayLedger,
    office: &str,
    args: &ProcessArgs,
    output_format: OutputFormat,
) -> CliResult<bool> {
    let place_id = args.place_id.as_str();
    let prompt = match ledger.place_id_change(office, place_id)? {
        PlaceIdChange::Unchanged => return Ok(false),
        PlaceIdChange::Conflict { owner } => {
            return Err(CliError::input(format!(
                "Place id '{}' already belongs to office '{}'",
                place_id, owner
            )));
        }
        PlaceIdChange::Set => {
            if args.dry_run {
                warn!("DRY RUN: Would set Office '{}' place_id to '{}'", office, place_id);
                return Ok(false);
            }
            format!("Set Office '{}' place_id to '{}'? [y/N]: ", office, place_id)
        }
        PlaceIdChange::Replace { current } => {
            if args.dry_run {
                warn!(
                    "DRY RUN: Would update Office '{}' place_id from '{}' to '{}'",
                    office, current, place_id
                );
                return Ok(false);
            }
            format!(
                "Office '{}' already has place_id='{}'. Update to '{}'? [y/N]: ",
                office, current, place_id
            )
        }
    };

    let confirmed = if args.yes {
        true
    } else if args.no_input {
        false
    } else {
        confirm(&prompt)?
    };

    let updated = ledger.update_office_place_id(office, place_id, confirmed)?;
    if updated && output_format == OutputFormat::Text {
        println!("Updated Office '{}' place_id -> '{}'", office, place_id);
    }
    Ok(updated)
}

fn confirm(prompt: &str) -> CliResult<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{}", prompt)
        .and_then(|_| stderr.flush())
        .map_err(|e| CliError::runtime(format!("Failed to write prompt: {}", e)))?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| CliError::runtime(format!("Failed to read answer: {}", e)))?;

    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes"
    ))
}
