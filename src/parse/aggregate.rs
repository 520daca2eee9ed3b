//! Aggregate log: `git log --numstat --pretty=format:%aN`.
//!
//! A line without a tab is a commit header holding only the author name;
//! numstat lines that follow belong to that commit.

use std::collections::{HashMap, HashSet};

use crate::stats::{AuthorStats, AuthorStatsMap};

use super::{AuthorSet, allowed, parse_numstat};

/// Fold an aggregate log into per-author totals.
///
/// Every header counts one commit, even with no numstat lines after it.
/// `files_touched` is the number of distinct paths across all of an
/// author's commits. When `authors` is given, headers for other authors
/// are dropped together with their numstat lines.
pub fn parse_aggregate(log: &str, authors: Option<&AuthorSet>) -> AuthorStatsMap {
    let mut stats: HashMap<&str, AuthorStats> = HashMap::new();
    let mut files: HashMap<&str, HashSet<&str>> = HashMap::new();
    let mut current: Option<&str> = None;

    for line in log.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.contains('\t') {
            let Some(author) = current else {
                continue;
            };
            let numstat = parse_numstat(line);
            let entry = stats.entry(author).or_default();
            entry.insertions += numstat.insertions;
            entry.deletions += numstat.deletions;
            if let Some(path) = numstat.path {
                files.entry(author).or_default().insert(path);
            }
        } else {
            if !allowed(authors, line) {
                current = None;
                continue;
            }
            current = Some(line);
            stats.entry(line).or_default().commits += 1;
        }
    }

    stats
        .into_iter()
        .map(|(author, mut s)| {
            s.files_touched = files.get(author).map_or(0, |f| f.len() as u64);
            (author.to_string(), s)
        })
        .collect()
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
