use super::*;
use gimpact::parse::parse_periods;
use indoc::indoc;

fn sample() -> Vec<PeriodAuthorStats> {
    let log = indoc! {"
        Alice|2025-12-15 10:00:00 +0000
        50\t3\ta.rs

        Bob|2025-12-15 11:00:00 +0000
        90\t10\tb.rs

        Alice|2025-12-16 10:00:00 +0000
        10\t6\ta.rs
    "};
    parse_periods(log, PeriodUnit::Daily, None)
}

#[test]
fn period_printed_once_per_group() {
    let text = render(&sample(), PeriodUnit::Daily, "Last 7 days");
    assert!(text.starts_with("Daily contributions · Last 7 days\n"));
    assert_eq!(text.matches("2025-12-15").count(), 1);
    assert_eq!(text.matches("2025-12-16").count(), 1);
    let newest = text.find("2025-12-16").unwrap();
    let older = text.find("2025-12-15").unwrap();
    assert!(newest < older);
}

#[test]
fn empty_rows() {
    let text = render(&[], PeriodUnit::Weekly, "Last 30 days");
    assert_eq!(text, "No contributions found (Last 30 days).\n");
}

#[test]
fn titles_follow_unit() {
    assert_eq!(title(PeriodUnit::Weekly), "Weekly contributions");
    assert_eq!(title(PeriodUnit::Monthly), "Monthly contributions");
}

