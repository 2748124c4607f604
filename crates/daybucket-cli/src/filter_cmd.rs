use std::path::Path;
use std::process::ExitCode;

use daybucket_core::tz::format_rfc3339_utc;
use daybucket_core::{CutoffMode, cutoff_for_year, filter_timeline_doc, to_yaml_string};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::cli::FilterArgs;
use crate::error::{CliError, CliResult, EXIT_SUCCESS, OutputFormat, print_json};
use crate::shared::{parse_mode, read_structured, write_atomically};

#[derive(Debug, Serialize)]
struct FilterOutput {
    output: String,
    kept: usize,
    removed: usize,
    cutoff: String,
    mode: CutoffMode,
}

pub fn run_filter(args: FilterArgs, output_format: OutputFormat) -> CliResult<ExitCode> {
    let mode = parse_mode(&args.mode)?;
    let cutoff = cutoff_for_year(args.year)?;

    let mut doc: Value = read_structured(Path::new(&args.input))?;
    if !doc.is_object() {
        return Err(CliError::input(format!(
            "Expected the root of '{}' to be an object",
            args.input
        )));
    }

    let result = filter_timeline_doc(&mut doc, cutoff, mode)?;
    info!(kept = result.kept, removed = result.removed, %mode, "Filtered timeline");

    let yaml = to_yaml_string(&doc)?;
    write_atomically(Path::new(&args.output), &yaml)?;

    match output_format {
        OutputFormat::Json => print_json(&FilterOutput {
            output: args.output,
            kept: result.kept,
            removed: result.removed,
            cutoff: format_rfc3339_utc(&cutoff),
            mode,
        })?,
        OutputFormat::Text => {
            println!(
                "Wrote {}. Kept {} segments; removed {}. Cutoff={}-01-01Z mode={}",
                args.output, result.kept, result.removed, args.year, mode
            );
        }
    }

    Ok(ExitCode::from(EXIT_SUCCESS))
}
