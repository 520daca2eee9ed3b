//! Periodic log: `git log --numstat --pretty=format:%aN|%cd --date=iso`.

use std::collections::HashMap;

use tracing::debug;

use crate::period::{PeriodUnit, parse_commit_date};
use crate::stats::{AuthorStats, PeriodAuthorStats};

use super::{AuthorSet, allowed, parse_numstat};

/// Fold a periodic log into one row per (period, author).
///
/// Each `Author|date` header adds one commit to the author's row for the
/// period containing the date; the numstat lines after it add their
/// insertions and deletions and one touched file each. Rows come back
/// sorted by period, newest first, then by churn, largest first. Rows tied
/// on both keep the order in which they first appeared.
pub fn parse_periods(
    log: &str,
    unit: PeriodUnit,
    authors: Option<&AuthorSet>,
) -> Vec<PeriodAuthorStats> {
    let mut rows: Vec<PeriodAuthorStats> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut current: Option<usize> = None;

    for line in log.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line.contains('\t') {
            let Some(row) = current else {
                continue;
            };
            let numstat = parse_numstat(line);
            let stats = &mut rows[row].stats;
            stats.insertions += numstat.insertions;
            stats.deletions += numstat.deletions;
            stats.files_touched += 1;
            continue;
        }

        let mut parts = line.split('|');
        let (Some(author), Some(date), None) = (parts.next(), parts.next(), parts.next()) else {
            debug!(line, "skipping line that is neither header nor numstat");
            continue;
        };

        if !allowed(authors, author) {
            current = None;
            continue;
        }

        let Some(date) = parse_commit_date(date) else {
            debug!(author, date, "skipping commit with unparseable date");
            current = None;
            continue;
        };

        let key = (unit.label(date.date_naive()), author.to_string());
        let row = *index.entry(key).or_insert_with_key(|(period, author)| {
            rows.push(PeriodAuthorStats {
                period: period.clone(),
                author: author.clone(),
                stats: AuthorStats::default(),
            });
            rows.len() - 1
        });
        rows[row].stats.commits += 1;
        current = Some(row);
    }

    rows.sort_by(|a, b| {
        b.period
            .cmp(&a.period)
            .then_with(|| b.stats.churn().cmp(&a.stats.churn()))
    });
    rows
}

#[cfg(test)]
#[path = "period_test.rs"]
mod tests;
