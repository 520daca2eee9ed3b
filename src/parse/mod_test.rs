use super::*;

#[test]
fn numstat_regular_line() {
    let line = parse_numstat("12\t3\tsrc/main.rs");
    assert_eq!(line.insertions, 12);
    assert_eq!(line.deletions, 3);
    assert_eq!(line.path, Some("src/main.rs"));
    assert_eq!(line.churn(), 15);
}

#[test]
fn numstat_binary_is_zero() {
    let line = parse_numstat("-\t-\tassets/logo.png");
    assert_eq!(line.insertions, 0);
    assert_eq!(line.deletions, 0);
    assert_eq!(line.path, Some("assets/logo.png"));
}

#[test]
fn numstat_path_keeps_extra_tabs() {
    let line = parse_numstat("1\t1\tweird\tname.txt");
    assert_eq!(line.path, Some("weird\tname.txt"));
}

#[test]
fn numstat_missing_path() {
    assert_eq!(parse_numstat("5\t2").path, None);
    assert_eq!(parse_numstat("5\t2\t").path, None);
}

#[test]
fn count_takes_leading_digits() {
    assert_eq!(parse_count(" 42"), 42);
    assert_eq!(parse_count("7abc"), 7);
    assert_eq!(parse_count("abc"), 0);
    assert_eq!(parse_count(""), 0);
    assert_eq!(parse_count("-"), 0);
}

#[test]
fn author_set_is_case_insensitive() {
    let set = AuthorSet::from_names(&["john doe"]).unwrap();
    assert!(set.contains("John Doe"));
    assert!(set.contains("JOHN DOE"));
    assert!(!set.contains("Jane Doe"));
}

#[test]
fn empty_author_list_means_no_filter() {
    let empty: [&str; 0] = [];
    assert!(AuthorSet::from_names(&empty).is_none());
    assert!(allowed(None, "anyone"));
}
