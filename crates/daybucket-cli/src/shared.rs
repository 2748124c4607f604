use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use chrono_tz::Tz;
use daybucket_core::document::parse_as;
use daybucket_core::{CutoffMode, DayLedger, DocumentFormat, Weekdays, parse_days_of_week};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{CliError, CliResult};

pub fn parse_tz_or_input_error(name: &str) -> CliResult<Tz> {
    Ok(daybucket_core::tz::parse_tz(name)?)
}

pub fn parse_mode(s: &str) -> CliResult<CutoffMode> {
    Ok(s.parse::<CutoffMode>()?)
}

pub fn parse_weekdays(value: Option<&str>) -> CliResult<Option<Weekdays>> {
    value
        .map(|list| {
            parse_days_of_week(list)
                .map_err(|e| CliError::input(format!("Invalid --days-of-week: {}", e)))
        })
        .transpose()
}

pub fn parse_date(s: &str, flag: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| {
        CliError::input(format!(
            "Invalid {} '{}': {}. Expected YYYY-MM-DD",
            flag, s, e
        ))
    })
}

/// Read and parse a JSON or YAML file, picking the format from its extension.
pub fn read_structured<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    if !path.exists() {
        return Err(CliError::input(format!(
            "File not found: {}",
            path.display()
        )));
    }
    let format = DocumentFormat::from_path(path)?;
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    debug!(path = %path.display(), %format, bytes = text.len(), "Read input");

    parse_as(&text, format)
        .map_err(|e| CliError::input(format!("Error loading '{}': {}", path.display(), e)))
}

/// Load the ledger, starting from an empty one when the file does not exist yet.
pub fn load_ledger(path: &Path) -> CliResult<DayLedger> {
    if !path.exists() {
        debug!(path = %path.display(), "No ledger yet, starting empty");
        return Ok(DayLedger::new());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read ledger: {}", path.display()))?;
    DayLedger::from_json(&text)
        .map_err(|e| CliError::input(format!("Error loading '{}': {}", path.display(), e)))
}

pub fn save_ledger(path: &Path, ledger: &DayLedger) -> CliResult<()> {
    let json = ledger.to_json()?;
    write_atomically(path, &json)?;
    debug!(path = %path.display(), days = ledger.days().len(), "Saved ledger");
    Ok(())
}

/// Write through a sibling temporary file so readers never see a partial file.
pub fn write_atomically(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let tmp = temporary_sibling(path);
    fs::write(&tmp, contents)
        .with_context(|| format!("Failed to write file: {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| {
        format!(
            "Failed to move {} into place at {}",
            tmp.display(),
            path.display()
        )
    })?;
    Ok(())
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekdays_absent_is_none() {
        assert_eq!(parse_weekdays(None).unwrap(), None);
        assert_eq!(
            parse_weekdays(Some("mon,tue,wed,thu,fri")).unwrap(),
            Some(Weekdays::WORKWEEK)
        );
    }

    #[test]
    fn bad_weekdays_name_the_flag() {
        let err = parse_weekdays(Some("mon,funday")).unwrap_err();
        assert!(err.to_string().contains("--days-of-week"));
        assert!(err.to_string().contains("funday"));
    }

    #[test]
    fn bad_mode_is_input_error() {
        let err = parse_mode("sideways").unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT_ERROR);
    }

    #[test]
    fn temporary_sibling_appends_suffix() {
        assert_eq!(
            temporary_sibling(Path::new("data/ledger.json")),
            PathBuf::from("data/ledger.json.tmp")
        );
    }

    #[test]
    fn write_atomically_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.yaml");

        write_atomically(&path, "a: 1\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a: 1\n");
        assert!(!dir.path().join("nested/out.yaml.tmp").exists());
    }

    #[test]
    fn missing_ledger_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = load_ledger(&dir.path().join("absent.json")).unwrap();
        assert!(ledger.days().is_empty());
    }
}
