//! Analysis options: CLI values layered over `.gimpact.toml` layered over
//! built-in defaults, and the log query derived from them.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::efficiency::EfficiencyThresholds;
use crate::error::AnalysisError;
use crate::period::{PeriodUnit, days_ago, end_of_day, start_of_day, validate_time_range};

pub const DEFAULT_DAYS: u32 = 30;
pub const CONFIG_FILE_NAME: &str = ".gimpact.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    #[default]
    Aggregate,
    Periodic,
    Ownership,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aggregate => "aggregate",
            Self::Periodic => "periodic",
            Self::Ownership => "ownership",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aggregate" => Ok(Self::Aggregate),
            "periodic" => Ok(Self::Periodic),
            "ownership" => Ok(Self::Ownership),
            _ => Err(AnalysisError::UnknownMode(s.to_string())),
        }
    }
}

/// Requested window. `since`/`until` are calendar dates; `days` counts
/// back from now and only applies when `since` is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
    pub days: Option<u32>,
}

/// Options as supplied by the caller. `None` and empty lists mean
/// "not given" and fall through to the config file, then the defaults.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerOptions {
    pub time_range: TimeRange,
    pub mode: Option<AnalysisMode>,
    pub period_unit: Option<PeriodUnit>,
    pub authors: Vec<String>,
    pub branch: Option<String>,
    pub min_commits: Option<u64>,
    pub exclude_patterns: Vec<String>,
    pub respect_gitignore: Option<bool>,
    pub directory: Option<String>,
}

/// Contents of `.gimpact.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub days: Option<u32>,
    pub mode: Option<String>,
    pub period_unit: Option<String>,
    pub min_commits: Option<u64>,
    pub authors: Vec<String>,
    pub branch: Option<String>,
    pub exclude_patterns: Vec<String>,
    pub respect_gitignore: Option<bool>,
    pub efficiency: EfficiencyThresholds,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self, AnalysisError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, AnalysisError> {
        Ok(toml::from_str(content)?)
    }

    /// Read `.gimpact.toml` from `dir`, `None` when there is no such file.
    pub fn discover(dir: &Path) -> Result<Option<Self>, AnalysisError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(None);
        }
        debug!(path = %path.display(), "loading config file");
        Self::from_file(&path).map(Some)
    }
}

/// Fully resolved options, nothing left optional except what is
/// optional by nature (dates, branch, directory).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub time_range: TimeRange,
    pub mode: AnalysisMode,
    pub period_unit: PeriodUnit,
    pub authors: Vec<String>,
    pub branch: Option<String>,
    pub min_commits: u64,
    pub exclude_patterns: Vec<String>,
    pub respect_gitignore: bool,
    pub directory: Option<String>,
    pub thresholds: EfficiencyThresholds,
}

/// Layer caller options over the config file over the defaults.
///
/// Exclude patterns are additive: the file's come first, then the caller's.
pub fn resolve_options(
    opts: &AnalyzerOptions,
    file: Option<&FileConfig>,
) -> Result<ResolvedOptions, AnalysisError> {
    let fallback = FileConfig::default();
    let file = file.unwrap_or(&fallback);

    let mode = match (opts.mode, &file.mode) {
        (Some(mode), _) => mode,
        (None, Some(name)) => name.parse()?,
        (None, None) => AnalysisMode::default(),
    };
    let period_unit = match (opts.period_unit, &file.period_unit) {
        (Some(unit), _) => unit,
        (None, Some(name)) => name.parse()?,
        (None, None) => PeriodUnit::default(),
    };
    let authors = if opts.authors.is_empty() {
        file.authors.clone()
    } else {
        opts.authors.clone()
    };
    let exclude_patterns = file
        .exclude_patterns
        .iter()
        .chain(&opts.exclude_patterns)
        .cloned()
        .collect();

    Ok(ResolvedOptions {
        time_range: TimeRange {
            days: opts.time_range.days.or(file.days).or(Some(DEFAULT_DAYS)),
            ..opts.time_range
        },
        mode,
        period_unit,
        authors,
        branch: opts.branch.clone().or_else(|| file.branch.clone()),
        min_commits: opts.min_commits.or(file.min_commits).unwrap_or(1),
        exclude_patterns,
        respect_gitignore: opts
            .respect_gitignore
            .or(file.respect_gitignore)
            .unwrap_or(true),
        directory: opts.directory.clone(),
        thresholds: file.efficiency,
    })
}

/// What to ask the log source for. Bounds are Unix timestamps, both
/// inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogQuery {
    pub since: Option<i64>,
    pub until: Option<i64>,
    pub branch: Option<String>,
    pub directory: Option<String>,
}

/// Validate the window against `now` and turn it into a [`LogQuery`].
///
/// `since` starts at midnight, `until` runs to the end of its day, and
/// without `since` the window opens `days` before `now`.
pub fn build_log_query(
    resolved: &ResolvedOptions,
    now: DateTime<Utc>,
) -> Result<LogQuery, AnalysisError> {
    let range = resolved.time_range;
    validate_time_range(range.since, range.until, now.date_naive())?;

    let since = match (range.since, range.days) {
        (Some(date), _) => Some(start_of_day(date)),
        (None, Some(days)) => Some(days_ago(now, days).timestamp()),
        (None, None) => None,
    };

    Ok(LogQuery {
        since,
        until: range.until.map(end_of_day),
        branch: resolved.branch.clone(),
        directory: resolved.directory.clone(),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
