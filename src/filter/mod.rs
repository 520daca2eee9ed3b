//! Post-parse filters.
//!
//! Author and min-commit filters work on both the aggregate map and the
//! periodic rows; a [`FilterChain`] applies them in the order added. The
//! ownership result has its own filter in [`patterns`], since removing
//! files means rebuilding the directory and author rollups.

pub mod patterns;

use crate::parse::AuthorSet;
use crate::stats::{AggregateReport, PeriodAuthorStats};

pub use patterns::{DEFAULT_EXCLUDE_PATTERNS, FilePatternFilter, GitignoreOracle, IgnoreOracle};

pub trait Filter {
    fn apply_aggregate(&self, report: AggregateReport) -> AggregateReport;
    fn apply_periods(&self, rows: Vec<PeriodAuthorStats>) -> Vec<PeriodAuthorStats>;
}

/// Keep only the listed authors, compared case-insensitively.
#[derive(Debug, Clone)]
pub struct AuthorFilter {
    authors: AuthorSet,
}

impl AuthorFilter {
    pub fn new(authors: AuthorSet) -> Self {
        Self { authors }
    }
}

impl Filter for AuthorFilter {
    fn apply_aggregate(&self, report: AggregateReport) -> AggregateReport {
        report.retain_authors(|author, _| self.authors.contains(author))
    }

    fn apply_periods(&self, mut rows: Vec<PeriodAuthorStats>) -> Vec<PeriodAuthorStats> {
        rows.retain(|row| self.authors.contains(&row.author));
        rows
    }
}

/// Drop authors (aggregate) or rows (periodic) with fewer commits than
/// the threshold.
#[derive(Debug, Clone, Copy)]
pub struct MinCommitsFilter {
    min_commits: u64,
}

impl MinCommitsFilter {
    pub fn new(min_commits: u64) -> Self {
        Self { min_commits }
    }
}

impl Filter for MinCommitsFilter {
    fn apply_aggregate(&self, report: AggregateReport) -> AggregateReport {
        report.retain_authors(|_, stats| stats.commits >= self.min_commits)
    }

    fn apply_periods(&self, mut rows: Vec<PeriodAuthorStats>) -> Vec<PeriodAuthorStats> {
        rows.retain(|row| row.stats.commits >= self.min_commits);
        rows
    }
}

#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn apply_aggregate(&self, report: AggregateReport) -> AggregateReport {
        self.filters
            .iter()
            .fold(report, |acc, f| f.apply_aggregate(acc))
    }

    pub fn apply_periods(&self, rows: Vec<PeriodAuthorStats>) -> Vec<PeriodAuthorStats> {
        self.filters.iter().fold(rows, |acc, f| f.apply_periods(acc))
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
