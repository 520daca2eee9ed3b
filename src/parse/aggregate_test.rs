use super::*;
use indoc::indoc;

#[test]
fn empty_log() {
    assert!(parse_aggregate("", None).is_empty());
    assert!(parse_aggregate("\n\n  \n", None).is_empty());
}

#[test]
fn single_commit() {
    let log = indoc! {"
        John Doe
        10\t5\tsrc/index.ts
        3\t1\tsrc/utils.ts
    "};
    let stats = parse_aggregate(log, None);
    assert_eq!(stats.len(), 1);
    assert_eq!(
        stats["John Doe"],
        AuthorStats {
            commits: 1,
            insertions: 13,
            deletions: 6,
            files_touched: 2,
        }
    );
}

#[test]
fn header_without_files_still_counts() {
    let log = indoc! {"
        John Doe

        Jane Smith
        1\t1\ta.txt
    "};
    let stats = parse_aggregate(log, None);
    assert_eq!(stats["John Doe"].commits, 1);
    assert_eq!(stats["John Doe"].churn(), 0);
    assert_eq!(stats["John Doe"].files_touched, 0);
    assert_eq!(stats["Jane Smith"].commits, 1);
}

#[test]
fn files_touched_is_distinct() {
    let log = indoc! {"
        John Doe
        10\t0\tsrc/a.ts
        5\t0\tsrc/b.ts

        John Doe
        2\t2\tsrc/a.ts
    "};
    let stats = parse_aggregate(log, None);
    let john = stats["John Doe"];
    assert_eq!(john.commits, 2);
    assert_eq!(john.insertions, 17);
    assert_eq!(john.deletions, 2);
    assert_eq!(john.files_touched, 2);
}

#[test]
fn binary_file_counts_as_touched() {
    let log = "John Doe\n-\t-\timage.png\n4\t0\tREADME.md\n";
    let stats = parse_aggregate(log, None);
    let john = stats["John Doe"];
    assert_eq!(john.insertions, 4);
    assert_eq!(john.deletions, 0);
    assert_eq!(john.files_touched, 2);
}

#[test]
fn multiple_authors() {
    let log = indoc! {"
        John Doe
        10\t5\ta.ts

        Jane Smith
        20\t0\tb.ts

        John Doe
        1\t1\tc.ts
    "};
    let stats = parse_aggregate(log, None);
    assert_eq!(stats.len(), 2);
    assert_eq!(stats["John Doe"].commits, 2);
    assert_eq!(stats["John Doe"].files_touched, 2);
    assert_eq!(stats["Jane Smith"].insertions, 20);
}

#[test]
fn author_filter_is_case_insensitive() {
    let log = indoc! {"
        John Doe
        10\t5\ta.ts

        Jane Smith
        20\t0\tb.ts
    "};
    let filter = AuthorSet::from_names(&["john doe"]);
    let stats = parse_aggregate(log, filter.as_ref());
    assert_eq!(stats.len(), 1);
    assert_eq!(stats["John Doe"].insertions, 10);
}

#[test]
fn filtered_author_numstat_is_dropped() {
    // Jane's numstat must not leak into John's totals
    let log = indoc! {"
        John Doe
        1\t0\ta.ts

        Jane Smith
        100\t100\tb.ts
    "};
    let filter = AuthorSet::from_names(&["John Doe"]);
    let stats = parse_aggregate(log, filter.as_ref());
    assert_eq!(stats["John Doe"].churn(), 1);
    assert_eq!(stats["John Doe"].files_touched, 1);
}

#[test]
fn numstat_before_any_header_is_ignored() {
    let log = "5\t5\torphan.rs\nJohn Doe\n1\t0\ta.rs\n";
    let stats = parse_aggregate(log, None);
    assert_eq!(stats.len(), 1);
    assert_eq!(stats["John Doe"].insertions, 1);
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    let log = "  John Doe  \n  3\t4\tx.rs  \n";
    let stats = parse_aggregate(log, None);
    assert_eq!(stats["John Doe"].churn(), 7);
}
