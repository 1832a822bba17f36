//! CLI argument definitions for the roster tally tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "roster-tally",
    version,
    about = "Roster Tally - Count treatments from clinic schedule workbooks",
    long_about = "Extract (patient, treatment) pairs from free-text schedule cells,\n\
                  deduplicate to first occurrence per day and month, and print\n\
                  treatment-count tables."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient names in log output (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Tally treatments from a schedule workbook.
    Tally(TallyArgs),

    /// Print the effective rule set.
    Rules(RulesArgs),
}

#[derive(Parser)]
pub struct TallyArgs {
    /// Path to the schedule workbook (.xlsx).
    #[arg(value_name = "WORKBOOK")]
    pub workbook: PathBuf,

    /// Header text of the marker column; cells are read from the column
    /// immediately to its right.
    #[arg(long = "marker", value_name = "NAME")]
    pub marker: String,

    /// Path to a JSON rules file.
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Counting policy for per-day tallies.
    #[arg(long = "day-policy", value_enum, default_value = "first")]
    pub day_policy: CountPolicyArg,

    /// Counting policy for the monthly tally.
    #[arg(long = "month-policy", value_enum, default_value = "first")]
    pub month_policy: CountPolicyArg,

    /// Split multi-name cells into one entry per name.
    #[arg(long = "split-names")]
    pub split_names: bool,

    /// Skip the built-in substitution rules and exclude keywords.
    #[arg(long = "no-default-rules")]
    pub no_default_rules: bool,

    /// Drop this name from all output (repeatable).
    #[arg(long = "exclude-name", value_name = "NAME")]
    pub exclude_names: Vec<String>,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Path to a JSON rules file.
    #[arg(long = "rules", value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Skip the built-in substitution rules and exclude keywords.
    #[arg(long = "no-default-rules")]
    pub no_default_rules: bool,
}

/// CLI counting policy choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum CountPolicyArg {
    /// Count one occurrence per newly seen name.
    First,
    /// Count every matched entry.
    Every,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
