use clap::{Parser, Subcommand};

pub const DEFAULT_LEDGER: &str = "daybucket-ledger.json";

/// Timeline day bucketing for tax-residency day counting
#[derive(Parser, Debug)]
#[command(name = "daybucket", version)]
#[command(about = "Timeline day bucketing for tax-residency day counting")]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Keep only timeline segments at or after the start of a year, as YAML
    Filter(FilterArgs),
    /// Record the days a timeline spent at a place against a state
    Process(ProcessArgs),
    /// Merge states and offices from a seed file into the ledger
    Load(LoadArgs),
    /// Count ledger days per state against thresholds
    Summary(SummaryArgs),
}

#[derive(clap::Args, Debug)]
pub struct FilterArgs {
    /// Input timeline path (.json, .yaml or .yml)
    #[arg(long)]
    pub input: String,

    /// Output YAML path
    #[arg(long)]
    pub output: String,

    /// Keep segments from this year and later
    #[arg(long, default_value_t = 2023)]
    pub year: i32,

    /// Filtering mode: start, end, overlap
    #[arg(long, default_value = "start")]
    pub mode: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct ProcessArgs {
    /// Path to a YAML or JSON timeline
    pub file_path: String,

    /// Place identifier to match against timeline segments
    pub place_id: String,

    /// State abbreviation to count matching days toward
    pub state: String,

    /// Office to associate with matching days
    #[arg(long)]
    pub office_name: Option<String>,

    /// Show what would be recorded without changing the ledger
    #[arg(long)]
    pub dry_run: bool,

    /// Comma-separated days to include, e.g. mon,tue,wed,thu,fri
    #[arg(long)]
    pub days_of_week: Option<String>,

    /// IANA timezone used to decide which calendar day an instant falls on
    #[arg(long, default_value = daybucket_core::tz::DEFAULT_TIMEZONE)]
    pub timezone: String,

    /// Never prompt; leave the office place id as it is
    #[arg(long, conflicts_with = "yes")]
    pub no_input: bool,

    /// Update the office place id without prompting
    #[arg(long)]
    pub yes: bool,

    /// Ledger file
    #[arg(long, default_value = DEFAULT_LEDGER)]
    pub ledger: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct LoadArgs {
    /// Seed file with `states` and/or `offices` lists (.json, .yaml or .yml)
    #[arg(long)]
    pub file: String,

    /// Update existing records instead of skipping them
    #[arg(long)]
    pub update: bool,

    /// Ledger file
    #[arg(long, default_value = DEFAULT_LEDGER)]
    pub ledger: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}

#[derive(clap::Args, Debug)]
pub struct SummaryArgs {
    /// First day of the range (YYYY-MM-DD, inclusive)
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Last day of the range (YYYY-MM-DD, inclusive)
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    /// Ledger file
    #[arg(long, default_value = DEFAULT_LEDGER)]
    pub ledger: String,

    /// Output format: json, text
    #[arg(long, default_value = "text")]
    pub output_format: String,
}
