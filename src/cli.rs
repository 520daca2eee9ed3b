/// CLI argument definitions for the `gimpact` command.
///
/// Defines all subcommands, their arguments, and long help text
/// using the `clap` derive macros.
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use gimpact::config::{AnalysisMode, AnalyzerOptions, TimeRange};
use gimpact::error::AnalysisError;
use gimpact::period::{PeriodUnit, parse_date_arg};

use crate::cli_help;

/// Top-level CLI parser. Without a subcommand the mode comes from
/// `--mode` or the config file.
#[derive(Parser)]
#[command(
    name = "gimpact",
    version,
    about = "Git contribution analytics: author totals, trends, commit-size efficiency, ownership"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options accepted by every analysis command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Repository to analyze (default: current directory)
    #[arg(short = 'C', long = "repo", global = true)]
    pub repo: Option<PathBuf>,

    /// Analyze the last N days (default: 30)
    #[arg(short, long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: Option<u32>,

    /// Start date, YYYY-MM-DD (overrides --days)
    #[arg(short, long, global = true, value_parser = parse_date_arg)]
    pub since: Option<NaiveDate>,

    /// End date, YYYY-MM-DD (inclusive)
    #[arg(short, long, global = true, value_parser = parse_date_arg)]
    pub until: Option<NaiveDate>,

    /// Analysis mode: aggregate, periodic or ownership
    #[arg(short, long, global = true)]
    pub mode: Option<String>,

    /// Period unit for periodic mode: daily, weekly or monthly
    #[arg(short, long, global = true)]
    pub period_unit: Option<String>,

    /// Only include these authors (case-insensitive)
    #[arg(short, long, global = true, num_args = 1.., value_delimiter = ',')]
    pub authors: Vec<String>,

    /// Branch or revision to analyze (default: HEAD)
    #[arg(short, long, global = true)]
    pub branch: Option<String>,

    /// Drop authors with fewer commits than this
    #[arg(short = 'c', long, global = true)]
    pub min_commits: Option<u64>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Ownership-mode options.
#[derive(Args, Debug, Clone, Default)]
pub struct OwnershipArgs {
    /// Extra glob patterns to exclude (added to the built-in list)
    #[arg(long, num_args = 1..)]
    pub exclude_patterns: Vec<String>,

    /// Keep files that .gitignore would ignore
    #[arg(long)]
    pub no_respect_gitignore: bool,

    /// Restrict the analysis to one directory
    #[arg(long)]
    pub directory: Option<String>,

    /// Levels of the tree to show (default: all)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Show directories only
    #[arg(long)]
    pub hide_files: bool,

    /// Show owner and lines next to each file
    #[arg(long)]
    pub show_file_stats: bool,
}

/// All available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Per-author totals, contributor types and commit-size efficiency
    #[command(long_about = cli_help::SUMMARY)]
    Summary,

    /// Contributions per author per day
    Daily,

    /// Contributions per author per ISO week
    Weekly,

    /// Contributions per author per month
    Monthly,

    /// File and directory ownership map
    #[command(long_about = cli_help::OWNERSHIP)]
    Ownership(OwnershipArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Cli {
    /// Ownership flags, when the `ownership` subcommand was used.
    pub fn ownership_args(&self) -> Option<&OwnershipArgs> {
        match &self.command {
            Some(Commands::Ownership(args)) => Some(args),
            _ => None,
        }
    }

    /// Translate the command line into analysis options. A subcommand
    /// fixes the mode (and period unit); otherwise `--mode` and
    /// `--period-unit` are used as given.
    pub fn analyzer_options(&self) -> Result<AnalyzerOptions, AnalysisError> {
        let g = &self.global;
        let (mode, period_unit) = match &self.command {
            Some(Commands::Summary) => (Some(AnalysisMode::Aggregate), None),
            Some(Commands::Daily) => (Some(AnalysisMode::Periodic), Some(PeriodUnit::Daily)),
            Some(Commands::Weekly) => (Some(AnalysisMode::Periodic), Some(PeriodUnit::Weekly)),
            Some(Commands::Monthly) => (Some(AnalysisMode::Periodic), Some(PeriodUnit::Monthly)),
            Some(Commands::Ownership(_)) => (Some(AnalysisMode::Ownership), None),
            Some(Commands::Completions { .. }) | None => (
                g.mode.as_deref().map(str::parse).transpose()?,
                g.period_unit.as_deref().map(str::parse).transpose()?,
            ),
        };

        let mut opts = AnalyzerOptions {
            time_range: TimeRange {
                since: g.since,
                until: g.until,
                days: g.days,
            },
            mode,
            period_unit,
            authors: g.authors.clone(),
            branch: g.branch.clone(),
            min_commits: g.min_commits,
            ..Default::default()
        };
        if let Some(args) = self.ownership_args() {
            opts.exclude_patterns = args.exclude_patterns.clone();
            opts.respect_gitignore = args.no_respect_gitignore.then_some(false);
            opts.directory = args.directory.clone();
        }
        Ok(opts)
    }
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
