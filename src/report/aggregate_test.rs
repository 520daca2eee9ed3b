use super::*;
use gimpact::efficiency::{EfficiencyThresholds, analyze_all};
use gimpact::parse::{parse_aggregate, parse_commits};
use indoc::indoc;

fn sample() -> AggregateReport {
    let log = indoc! {"
        Alice|2025-12-01 10:00:00 +0000
        120\t30\tsrc/a.rs
        5\t0\tsrc/b.rs

        Bob|2025-12-02 10:00:00 +0000
        1\t1\tREADME.md
    "};
    let commits = parse_commits(log);
    let headers: String = log
        .lines()
        .map(|l| l.split_once('|').map_or(l, |(author, _)| author))
        .collect::<Vec<_>>()
        .join("\n");
    AggregateReport {
        stats: parse_aggregate(&headers, None),
        efficiency: analyze_all(&commits, &EfficiencyThresholds::default()),
    }
}

#[test]
fn table_lists_authors_by_impact() {
    let text = render(&sample(), "Last 30 days");
    assert!(text.starts_with("Contributions · Last 30 days\n"));
    let alice = text.find(" Alice ").unwrap();
    let bob = text.find(" Bob ").unwrap();
    assert!(alice < bob);
    assert!(text.contains("+125"));
    assert!(text.contains("155 lines/commit"));
    assert!(text.contains("Scout"));
}

#[test]
fn histogram_has_every_bucket() {
    let text = render(&sample(), "Last 30 days");
    assert!(text.contains("Commit size distribution"));
    for bucket in ["micro", "small", "optimal", "high", "huge"] {
        assert!(text.contains(&format!("   {bucket}")), "{bucket}");
    }
}

#[test]
fn empty_report() {
    let text = render(&AggregateReport::default(), "Since 2025-12-01");
    assert_eq!(text, "No contributions found (Since 2025-12-01).\n");
}

