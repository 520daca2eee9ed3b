//! Commit stream: `git log --numstat --pretty=format:%aN|%cd --date=iso --reverse`.
//!
//! Unlike the other parsers this one does not fold anything; it emits one
//! record per commit for the efficiency metric to consume.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::period::parse_commit_date;

use super::parse_numstat;

/// One commit with its summed line counts and touched paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub author: String,
    /// `None` when the header date could not be parsed.
    pub date: Option<DateTime<FixedOffset>>,
    pub insertions: u64,
    pub deletions: u64,
    pub files: Vec<String>,
}

impl CommitRecord {
    pub fn churn(&self) -> u64 {
        self.insertions + self.deletions
    }
}

/// Split a commit-stream log into records, in log order.
///
/// A line holding `|` and no tab opens a new record, whether or not any
/// numstat lines follow it.
pub fn parse_commits(log: &str) -> Vec<CommitRecord> {
    let mut commits: Vec<CommitRecord> = Vec::new();

    for line in log.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.contains('\t') {
            let Some(commit) = commits.last_mut() else {
                continue;
            };
            let numstat = parse_numstat(line);
            commit.insertions += numstat.insertions;
            commit.deletions += numstat.deletions;
            if let Some(path) = numstat.path {
                commit.files.push(path.to_string());
            }
        } else if let Some((author, rest)) = line.split_once('|') {
            let date = rest.split('|').next().and_then(parse_commit_date);
            commits.push(CommitRecord {
                author: author.to_string(),
                date,
                insertions: 0,
                deletions: 0,
                files: Vec::new(),
            });
        }
    }

    commits
}

#[cfg(test)]
#[path = "commits_test.rs"]
mod tests;
