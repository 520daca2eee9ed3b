//! Per-author contribution statistics shared by the parsers, filters and
//! reports.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::efficiency::EfficiencyStats;

/// Totals for one author within one aggregation scope (the whole window
/// or a single period bucket).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuthorStats {
    pub commits: u64,
    pub insertions: u64,
    pub deletions: u64,
    pub files_touched: u64,
}

impl AuthorStats {
    /// Insertions plus deletions.
    pub fn churn(&self) -> u64 {
        self.insertions + self.deletions
    }
}

pub type AuthorStatsMap = BTreeMap<String, AuthorStats>;

/// One row of a periodic report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodAuthorStats {
    pub period: String,
    pub author: String,
    pub stats: AuthorStats,
}

/// Result of aggregate mode: totals plus commit-size efficiency per author.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateReport {
    pub stats: AuthorStatsMap,
    pub efficiency: BTreeMap<String, EfficiencyStats>,
}

impl AggregateReport {
    /// Authors ordered by churn, largest first.
    pub fn by_impact(&self) -> Vec<(&str, &AuthorStats)> {
        let mut rows: Vec<(&str, &AuthorStats)> =
            self.stats.iter().map(|(a, s)| (a.as_str(), s)).collect();
        rows.sort_by(|a, b| b.1.churn().cmp(&a.1.churn()));
        rows
    }

    /// Keep only the authors for which `keep` holds, in both maps.
    pub fn retain_authors(self, mut keep: impl FnMut(&str, &AuthorStats) -> bool) -> Self {
        let stats: AuthorStatsMap = self
            .stats
            .into_iter()
            .filter(|(author, s)| keep(author, s))
            .collect();
        let efficiency = self
            .efficiency
            .into_iter()
            .filter(|(author, _)| stats.contains_key(author))
            .collect();
        Self { stats, efficiency }
    }
}
