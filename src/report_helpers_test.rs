use super::*;

#[test]
fn column_width_with_cells() {
    let names = ["Alice", "Bartholomew"];
    assert_eq!(column_width(names.iter().copied(), 4), "Bartholomew".len());
}

#[test]
fn column_width_empty() {
    assert_eq!(column_width(std::iter::empty(), 6), 6);
}

#[test]
fn column_width_counts_wide_chars() {
    // each CJK char takes two columns
    assert_eq!(column_width(["山田太郎"].into_iter(), 4), 8);
}

#[test]
fn padding_uses_display_width() {
    assert_eq!(pad_right("ab", 4), "ab  ");
    assert_eq!(pad_left("ab", 4), "  ab");
    assert_eq!(pad_right("山田", 6), "山田  ");
    assert_eq!(pad_left("toolong", 3), "toolong");
}

#[test]
fn separator_width() {
    let s = separator(5);
    // Each ─ is 3 bytes in UTF-8
    assert_eq!(s.chars().count(), 5);
}

#[test]
fn thousands_separators() {
    assert_eq!(format_number(0), "0");
    assert_eq!(format_number(999), "999");
    assert_eq!(format_number(1000), "1,000");
    assert_eq!(format_number(1234567), "1,234,567");
}

#[test]
fn bar_scaling() {
    assert_eq!(bar(0, 10, 20), "");
    assert_eq!(bar(10, 10, 20).chars().count(), 20);
    assert_eq!(bar(5, 10, 20).chars().count(), 10);
    assert_eq!(bar(1, 1000, 20).chars().count(), 1);
}

#[test]
fn print_json_stdout_works() {
    let data = vec![1, 2, 3];
    print_json_stdout(&data).unwrap();
}
