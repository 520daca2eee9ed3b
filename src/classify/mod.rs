//! Contributor types derived from aggregate author stats.
//!
//! Rules run in a fixed order and the first match wins:
//! Scout (under 100 changed lines), Refactorer (deletions >= 40%),
//! Explorer (insertions > 70%), Generalist (files touched > 2.5x the
//! average), and Artisan for everyone else.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::stats::{AuthorStats, AuthorStatsMap};

const MIN_CHANGES: u64 = 100;
const REFACTORER_DELETION_RATIO: f64 = 0.4;
const EXPLORER_INSERTION_RATIO: f64 = 0.7;
const GENERALIST_FILES_MULTIPLIER: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContributorType {
    Scout,
    Generalist,
    Refactorer,
    Explorer,
    Artisan,
}

impl ContributorType {
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Scout => "✨",
            Self::Generalist => "👤",
            Self::Refactorer => "🛠",
            Self::Explorer => "🚀",
            Self::Artisan => "💎",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Scout => "Scout",
            Self::Generalist => "Generalist",
            Self::Refactorer => "Refactorer",
            Self::Explorer => "Explorer",
            Self::Artisan => "Artisan",
        }
    }

    /// Emoji and name, as shown in reports.
    pub fn label(self) -> String {
        format!("{} {}", self.emoji(), self.name())
    }
}

impl std::fmt::Display for ContributorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify one author against the corpus-wide average of files touched.
pub fn classify(stats: &AuthorStats, avg_files_touched: f64) -> ContributorType {
    let total = stats.churn();
    if total < MIN_CHANGES {
        return ContributorType::Scout;
    }

    let insertion_ratio = stats.insertions as f64 / total as f64;
    let deletion_ratio = stats.deletions as f64 / total as f64;

    if deletion_ratio >= REFACTORER_DELETION_RATIO {
        ContributorType::Refactorer
    } else if insertion_ratio > EXPLORER_INSERTION_RATIO {
        ContributorType::Explorer
    } else if stats.files_touched as f64 > avg_files_touched * GENERALIST_FILES_MULTIPLIER {
        ContributorType::Generalist
    } else {
        ContributorType::Artisan
    }
}

/// Mean `files_touched` across authors, 0 for an empty map.
pub fn average_files_touched(stats: &AuthorStatsMap) -> f64 {
    if stats.is_empty() {
        return 0.0;
    }
    let total: u64 = stats.values().map(|s| s.files_touched).sum();
    total as f64 / stats.len() as f64
}

pub fn classify_all(stats: &AuthorStatsMap) -> BTreeMap<String, ContributorType> {
    let avg = average_files_touched(stats);
    stats
        .iter()
        .map(|(author, s)| (author.clone(), classify(s, avg)))
        .collect()
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
