//! Mode orchestration: check the repository, resolve options, validate
//! the time window, then hand off to the handler for the selected mode.

mod modes;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::{AnalysisMode, AnalyzerOptions, FileConfig, build_log_query, resolve_options};
use crate::error::AnalysisError;
use crate::filter::IgnoreOracle;
use crate::git::LogSource;
use crate::ownership::OwnershipReport;
use crate::stats::{AggregateReport, PeriodAuthorStats};

/// Result shape of each mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Aggregate(AggregateReport),
    Periodic(Vec<PeriodAuthorStats>),
    Ownership(OwnershipReport),
}

impl AnalysisResult {
    pub fn mode(&self) -> AnalysisMode {
        match self {
            Self::Aggregate(_) => AnalysisMode::Aggregate,
            Self::Periodic(_) => AnalysisMode::Periodic,
            Self::Ownership(_) => AnalysisMode::Ownership,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Aggregate(r) => r.stats.is_empty(),
            Self::Periodic(rows) => rows.is_empty(),
            Self::Ownership(r) => r.is_empty(),
        }
    }
}

/// Runs one analysis against a log source.
///
/// The ignore oracle is only consulted in ownership mode, and only when
/// gitignore handling is enabled.
pub struct Analyzer<'a> {
    source: &'a dyn LogSource,
    oracle: Option<&'a dyn IgnoreOracle>,
    config: Option<&'a FileConfig>,
    now: DateTime<Utc>,
}

impl<'a> Analyzer<'a> {
    pub fn new(source: &'a dyn LogSource) -> Self {
        Self {
            source,
            oracle: None,
            config: None,
            now: Utc::now(),
        }
    }

    pub fn with_oracle(mut self, oracle: &'a dyn IgnoreOracle) -> Self {
        self.oracle = Some(oracle);
        self
    }

    pub fn with_config(mut self, config: Option<&'a FileConfig>) -> Self {
        self.config = config;
        self
    }

    /// Reference time for relative windows and future-date checks.
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn run(&self, opts: &AnalyzerOptions) -> Result<AnalysisResult, AnalysisError> {
        if !self.source.is_repository() {
            return Err(AnalysisError::NotARepository);
        }
        let resolved = resolve_options(opts, self.config)?;
        let query = build_log_query(&resolved, self.now)?;
        info!(mode = %resolved.mode, ?query, "running analysis");

        let result = match resolved.mode {
            AnalysisMode::Aggregate => {
                AnalysisResult::Aggregate(modes::aggregate(self.source, &resolved, &query)?)
            }
            AnalysisMode::Periodic => {
                AnalysisResult::Periodic(modes::periodic(self.source, &resolved, &query)?)
            }
            AnalysisMode::Ownership => AnalysisResult::Ownership(modes::ownership(
                self.source,
                &resolved,
                &query,
                self.oracle,
            )?),
        };
        info!(mode = %result.mode(), empty = result.is_empty(), "analysis finished");
        Ok(result)
    }
}

/// Run `opts` against `source` with no config file and no ignore oracle.
pub fn analyze_contributions(
    source: &dyn LogSource,
    opts: &AnalyzerOptions,
) -> Result<AnalysisResult, AnalysisError> {
    Analyzer::new(source).run(opts)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
