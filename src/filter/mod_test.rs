use super::*;
use crate::efficiency::{EfficiencyThresholds, analyze_author};
use crate::stats::AuthorStats;

fn stats(commits: u64) -> AuthorStats {
    AuthorStats {
        commits,
        insertions: commits * 10,
        deletions: 0,
        files_touched: 1,
    }
}

fn report() -> AggregateReport {
    let mut report = AggregateReport::default();
    for (author, commits) in [("John Doe", 5), ("Jane Smith", 1), ("Bot", 2)] {
        report.stats.insert(author.to_string(), stats(commits));
        report.efficiency.insert(
            author.to_string(),
            analyze_author(author, &[], &EfficiencyThresholds::default()),
        );
    }
    report
}

fn rows() -> Vec<PeriodAuthorStats> {
    vec![
        PeriodAuthorStats {
            period: "2025-12-16".into(),
            author: "John Doe".into(),
            stats: stats(3),
        },
        PeriodAuthorStats {
            period: "2025-12-15".into(),
            author: "Jane Smith".into(),
            stats: stats(1),
        },
        PeriodAuthorStats {
            period: "2025-12-15".into(),
            author: "John Doe".into(),
            stats: stats(1),
        },
    ]
}

fn authors(names: &[&str]) -> AuthorFilter {
    AuthorFilter::new(AuthorSet::from_names(names).unwrap())
}

#[test]
fn author_filter_aggregate_keeps_efficiency_in_step() {
    let filtered = authors(&["john doe", "BOT"]).apply_aggregate(report());
    let kept: Vec<&str> = filtered.stats.keys().map(|k| k.as_str()).collect();
    assert_eq!(kept, vec!["Bot", "John Doe"]);
    assert_eq!(filtered.efficiency.len(), 2);
    assert!(!filtered.efficiency.contains_key("Jane Smith"));
}

#[test]
fn author_filter_periods_keeps_order() {
    let filtered = authors(&["JOHN DOE"]).apply_periods(rows());
    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered[0].period, "2025-12-16");
    assert_eq!(filtered[1].period, "2025-12-15");
}

#[test]
fn min_commits_aggregate() {
    let filtered = MinCommitsFilter::new(2).apply_aggregate(report());
    assert_eq!(filtered.stats.len(), 2);
    assert!(filtered.stats.contains_key("Bot"));
    assert!(!filtered.efficiency.contains_key("Jane Smith"));
}

#[test]
fn min_commits_periods_is_per_row() {
    let filtered = MinCommitsFilter::new(2).apply_periods(rows());
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].stats.commits, 3);
}

#[test]
fn chain_applies_in_order() {
    let chain = FilterChain::new()
        .with(MinCommitsFilter::new(2))
        .with(authors(&["jane smith", "john doe"]));
    assert_eq!(chain.len(), 2);
    let filtered = chain.apply_aggregate(report());
    assert_eq!(filtered.stats.len(), 1);
    assert!(filtered.stats.contains_key("John Doe"));
}

#[test]
fn empty_chain_is_identity() {
    let chain = FilterChain::new();
    assert!(chain.is_empty());
    assert_eq!(chain.apply_aggregate(report()), report());
    assert_eq!(chain.apply_periods(rows()), rows());
}
