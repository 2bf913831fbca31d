use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "jf",
    about = "Structural JSON diff with per-selector rules",
    version,
)]
pub struct Cli {
    /// Left JSON file
    pub a: PathBuf,

    /// Right JSON file
    pub b: PathBuf,

    /// TOML rule file, applied before the rules given as flags
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Ignore selectors matching REGEX in the right file
    #[arg(long, value_name = "REGEX")]
    pub ignore_b: Vec<String>,

    /// Sort arrays at selectors matching REGEX by --sort-key
    #[arg(long, value_name = "REGEX", requires = "sort_key")]
    pub sort_selector: Option<String>,

    /// Object field to sort by
    #[arg(long, value_name = "KEY", requires = "sort_selector")]
    pub sort_key: Option<String>,

    /// Compare arrays at selectors matching REGEX regardless of order
    #[arg(long, value_name = "REGEX")]
    pub ignore_order: Vec<String>,

    /// Treat numeric strings as numbers at selectors matching REGEX
    #[arg(long, value_name = "REGEX")]
    pub string_number: Vec<String>,

    /// Treat null as the empty value at selectors matching REGEX, both sides
    #[arg(long, value_name = "REGEX")]
    pub coerce_null: Vec<String>,

    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
