//! Commit-size efficiency: how many lines an author changes per commit.
//!
//! Two threshold sets are in play and they are deliberately not the same
//! function. Individual commits are bucketed with inclusive upper bounds
//! (micro <= 10 < small < 30 <= optimal <= 150 < high <= 500 < huge). The
//! per-author mean is labelled with its own comparisons, so a mean of 10
//! is `Small` while a commit of 10 lines is `micro`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::parse::CommitRecord;

/// Line-count boundaries shared by bucketing and labelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EfficiencyThresholds {
    pub micro: u64,
    pub optimal_min: u64,
    pub optimal_max: u64,
    pub huge: u64,
}

impl Default for EfficiencyThresholds {
    fn default() -> Self {
        Self {
            micro: 10,
            optimal_min: 30,
            optimal_max: 150,
            huge: 500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeBucket {
    Micro,
    Small,
    Optimal,
    High,
    Huge,
}

impl SizeBucket {
    pub const ALL: [SizeBucket; 5] = [
        SizeBucket::Micro,
        SizeBucket::Small,
        SizeBucket::Optimal,
        SizeBucket::High,
        SizeBucket::Huge,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Micro => "micro",
            Self::Small => "small",
            Self::Optimal => "optimal",
            Self::High => "high",
            Self::Huge => "huge",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommitSizeDistribution {
    pub micro: u64,
    pub small: u64,
    pub optimal: u64,
    pub high: u64,
    pub huge: u64,
}

impl CommitSizeDistribution {
    pub fn get(&self, bucket: SizeBucket) -> u64 {
        match bucket {
            SizeBucket::Micro => self.micro,
            SizeBucket::Small => self.small,
            SizeBucket::Optimal => self.optimal,
            SizeBucket::High => self.high,
            SizeBucket::Huge => self.huge,
        }
    }

    fn bump(&mut self, bucket: SizeBucket) {
        let slot = match bucket {
            SizeBucket::Micro => &mut self.micro,
            SizeBucket::Small => &mut self.small,
            SizeBucket::Optimal => &mut self.optimal,
            SizeBucket::High => &mut self.high,
            SizeBucket::Huge => &mut self.huge,
        };
        *slot += 1;
    }

    pub fn total(&self) -> u64 {
        SizeBucket::ALL.iter().map(|b| self.get(*b)).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyLabel {
    Micro,
    Small,
    Optimal,
    HighLoad,
    Huge,
}

impl EfficiencyLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Micro => "🟡 Micro",
            Self::Small => "🟡 Small",
            Self::Optimal => "✅ Optimal",
            Self::HighLoad => "⚠️ High Load",
            Self::Huge => "🚨 Huge",
        }
    }
}

impl std::fmt::Display for EfficiencyLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EfficiencyStats {
    pub author: String,
    /// Rounded mean of insertions + deletions per commit.
    pub efficiency: u64,
    pub label: EfficiencyLabel,
    pub distribution: CommitSizeDistribution,
    pub total_commits: u64,
}

pub fn classify_commit_size(lines: u64, t: &EfficiencyThresholds) -> SizeBucket {
    if lines <= t.micro {
        SizeBucket::Micro
    } else if lines < t.optimal_min {
        SizeBucket::Small
    } else if lines <= t.optimal_max {
        SizeBucket::Optimal
    } else if lines <= t.huge {
        SizeBucket::High
    } else {
        SizeBucket::Huge
    }
}

/// Label a mean commit size. Order matters: the optimal band is checked
/// before the huge and high-load bands, and everything left is small.
pub fn efficiency_label(efficiency: u64, t: &EfficiencyThresholds) -> EfficiencyLabel {
    if efficiency < t.micro {
        EfficiencyLabel::Micro
    } else if efficiency >= t.optimal_min && efficiency <= t.optimal_max {
        EfficiencyLabel::Optimal
    } else if efficiency > t.huge {
        EfficiencyLabel::Huge
    } else if efficiency > t.optimal_max {
        EfficiencyLabel::HighLoad
    } else {
        EfficiencyLabel::Small
    }
}

/// Efficiency for one author. Matching on the author name is exact and
/// case-sensitive. No commits gives efficiency 0 and an empty histogram.
pub fn analyze_author(
    author: &str,
    commits: &[CommitRecord],
    t: &EfficiencyThresholds,
) -> EfficiencyStats {
    let mut distribution = CommitSizeDistribution::default();
    let mut total_lines = 0u64;
    let mut total_commits = 0u64;

    for commit in commits.iter().filter(|c| c.author == author) {
        let lines = commit.churn();
        total_lines += lines;
        total_commits += 1;
        distribution.bump(classify_commit_size(lines, t));
    }

    let efficiency = if total_commits == 0 {
        0
    } else {
        (total_lines as f64 / total_commits as f64).round() as u64
    };

    EfficiencyStats {
        author: author.to_string(),
        efficiency,
        label: efficiency_label(efficiency, t),
        distribution,
        total_commits,
    }
}

pub fn analyze_all(
    commits: &[CommitRecord],
    t: &EfficiencyThresholds,
) -> BTreeMap<String, EfficiencyStats> {
    let mut result = BTreeMap::new();
    for commit in commits {
        if !result.contains_key(&commit.author) {
            result.insert(commit.author.clone(), analyze_author(&commit.author, commits, t));
        }
    }
    result
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
