use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "okr-score",
    version,
    about = "OKR discipline scoring from check-ins and monthly goal movement"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score every user in a data directory
    Score(ScoreCommand),
    /// Show distinct check-in weeks per user without touching the store
    Checkins(CheckinsCommand),
    /// Read or write a single monthly snapshot
    #[command(subcommand)]
    Snapshot(SnapshotCommand),
}

#[derive(Args, Clone, Copy)]
pub struct WindowArgs {
    /// First day of the check-in window (YYYY-MM-DD); defaults to the quarter start
    #[arg(long)]
    pub start: Option<NaiveDate>,
    /// Last day of the check-in window (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

#[derive(Args)]
pub struct ScoreCommand {
    /// Directory holding accounts, key results, check-ins and goals as JSON
    pub data_dir: PathBuf,
    #[command(flatten)]
    pub window: WindowArgs,
    /// Month to score and snapshot (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
    /// Snapshot file; overrides `store.path` from okr.toml
    #[arg(long)]
    pub store: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct CheckinsCommand {
    pub data_dir: PathBuf,
    #[command(flatten)]
    pub window: WindowArgs,
}

#[derive(Subcommand)]
pub enum SnapshotCommand {
    Get(SnapshotGetArgs),
    Set(SnapshotSetArgs),
}

#[derive(Args)]
pub struct SnapshotGetArgs {
    pub user_id: String,
    pub year: i32,
    pub month: u32,
    #[arg(long, default_value = "snapshots.json")]
    pub store: PathBuf,
}

#[derive(Args)]
pub struct SnapshotSetArgs {
    pub user_id: String,
    pub year: i32,
    pub month: u32,
    #[arg(allow_negative_numbers = true)]
    pub value: f64,
    #[arg(long, default_value = "snapshots.json")]
    pub store: PathBuf,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
