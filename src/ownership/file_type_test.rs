use super::*;

#[test]
fn test_markers_win() {
    assert_eq!(classify_file_type("src/parser.test.ts"), FileType::Test);
    assert_eq!(classify_file_type("src/__tests__/parser.ts"), FileType::Test);
    assert_eq!(classify_file_type("tests/test_parser.py"), FileType::Test);
    // a test marker beats a config suffix
    assert_eq!(classify_file_type("fixtures/data.spec.json"), FileType::Test);
}

#[test]
fn config_files() {
    assert_eq!(classify_file_type("package.json"), FileType::Config);
    assert_eq!(classify_file_type("Cargo.toml"), FileType::Config);
    assert_eq!(classify_file_type("Dockerfile"), FileType::Config);
    assert_eq!(classify_file_type(".github/workflows/ci.yml"), FileType::Config);
    assert_eq!(classify_file_type("Makefile"), FileType::Config);
    assert_eq!(classify_file_type("app/.vscode/settings"), FileType::Config);
}

#[test]
fn docs_and_source_by_extension() {
    assert_eq!(classify_file_type("README.md"), FileType::Docs);
    assert_eq!(classify_file_type("docs/guide.RST"), FileType::Docs);
    assert_eq!(classify_file_type("src/main.rs"), FileType::Source);
    assert_eq!(classify_file_type("web/App.tsx"), FileType::Source);
    assert_eq!(classify_file_type("analysis/model.R"), FileType::Source);
}

#[test]
fn unknown_is_other() {
    assert_eq!(classify_file_type("assets/logo.png"), FileType::Other);
    assert_eq!(classify_file_type("LICENSE"), FileType::Other);
}

#[test]
fn grouping_keeps_order_and_all_buckets() {
    let files = vec!["b.rs", "README.md", "a.rs"];
    let groups = group_by_type(&files, |f| *f);
    assert_eq!(groups.len(), 5);
    assert_eq!(groups[0].0, FileType::Source);
    assert_eq!(groups[0].1, vec![&"b.rs", &"a.rs"]);
    assert_eq!(groups[2].0, FileType::Docs);
    assert_eq!(groups[2].1.len(), 1);
    assert!(groups[3].1.is_empty());
}
