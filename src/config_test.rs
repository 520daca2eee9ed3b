use super::*;
use chrono::TimeZone;
use indoc::indoc;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 20, 12, 0, 0).unwrap()
}

fn resolved(range: TimeRange) -> ResolvedOptions {
    let opts = AnalyzerOptions {
        time_range: range,
        ..Default::default()
    };
    resolve_options(&opts, None).unwrap()
}

#[test]
fn mode_parsing() {
    assert_eq!("aggregate".parse::<AnalysisMode>().unwrap(), AnalysisMode::Aggregate);
    assert_eq!("Periodic".parse::<AnalysisMode>().unwrap(), AnalysisMode::Periodic);
    assert_eq!("ownership".parse::<AnalysisMode>().unwrap(), AnalysisMode::Ownership);
    let err = "timeline".parse::<AnalysisMode>().unwrap_err();
    assert!(matches!(err, AnalysisError::UnknownMode(ref m) if m == "timeline"));
}

#[test]
fn defaults_without_file() {
    let r = resolve_options(&AnalyzerOptions::default(), None).unwrap();
    assert_eq!(r.mode, AnalysisMode::Aggregate);
    assert_eq!(r.period_unit, PeriodUnit::Daily);
    assert_eq!(r.time_range.days, Some(DEFAULT_DAYS));
    assert_eq!(r.min_commits, 1);
    assert!(r.respect_gitignore);
    assert!(r.authors.is_empty());
    assert_eq!(r.thresholds, EfficiencyThresholds::default());
}

#[test]
fn parse_config_file() {
    let file = FileConfig::from_toml(indoc! {r#"
        days = 90
        mode = "periodic"
        period_unit = "weekly"
        min_commits = 3
        authors = ["Alice"]
        branch = "develop"
        exclude_patterns = ["fixtures/**"]
        respect_gitignore = false

        [efficiency]
        micro = 5
        huge = 1000
    "#})
    .unwrap();
    assert_eq!(file.days, Some(90));
    assert_eq!(file.efficiency.micro, 5);
    assert_eq!(file.efficiency.optimal_min, 30);
    assert_eq!(file.efficiency.huge, 1000);

    let r = resolve_options(&AnalyzerOptions::default(), Some(&file)).unwrap();
    assert_eq!(r.mode, AnalysisMode::Periodic);
    assert_eq!(r.period_unit, PeriodUnit::Weekly);
    assert_eq!(r.time_range.days, Some(90));
    assert_eq!(r.min_commits, 3);
    assert_eq!(r.authors, vec!["Alice"]);
    assert_eq!(r.branch.as_deref(), Some("develop"));
    assert!(!r.respect_gitignore);
}

#[test]
fn cli_overrides_file() {
    let file = FileConfig::from_toml("mode = \"ownership\"\ndays = 90\nauthors = [\"Alice\"]\nexclude_patterns = [\"a/**\"]\n").unwrap();
    let opts = AnalyzerOptions {
        mode: Some(AnalysisMode::Aggregate),
        time_range: TimeRange {
            days: Some(7),
            ..Default::default()
        },
        authors: vec!["Bob".into()],
        exclude_patterns: vec!["b/**".into()],
        respect_gitignore: Some(false),
        ..Default::default()
    };
    let r = resolve_options(&opts, Some(&file)).unwrap();
    assert_eq!(r.mode, AnalysisMode::Aggregate);
    assert_eq!(r.time_range.days, Some(7));
    assert_eq!(r.authors, vec!["Bob"]);
    assert_eq!(r.exclude_patterns, vec!["a/**", "b/**"]);
    assert!(!r.respect_gitignore);
}

#[test]
fn unknown_values_in_file_fail() {
    let file = FileConfig::from_toml("mode = \"sideways\"").unwrap();
    let err = resolve_options(&AnalyzerOptions::default(), Some(&file)).unwrap_err();
    assert!(matches!(err, AnalysisError::UnknownMode(_)));

    let file = FileConfig::from_toml("period_unit = \"hourly\"").unwrap();
    let err = resolve_options(&AnalyzerOptions::default(), Some(&file)).unwrap_err();
    assert!(matches!(err, AnalysisError::UnknownPeriodUnit(_)));

    assert!(matches!(
        FileConfig::from_toml("colour = true").unwrap_err(),
        AnalysisError::Toml(_)
    ));
}

#[test]
fn discover_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(FileConfig::discover(dir.path()).unwrap().is_none());
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "days = 14\n").unwrap();
    let file = FileConfig::discover(dir.path()).unwrap().unwrap();
    assert_eq!(file.days, Some(14));
}

#[test]
fn query_from_days() {
    let q = build_log_query(&resolved(TimeRange::default()), now()).unwrap();
    assert_eq!(q.since, Some(now().timestamp() - 30 * 86_400));
    assert_eq!(q.until, None);
}

#[test]
fn query_from_dates() {
    let r = resolved(TimeRange {
        since: Some(date("2025-12-01")),
        until: Some(date("2025-12-15")),
        days: None,
    });
    let q = build_log_query(&r, now()).unwrap();
    let since = Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap().timestamp();
    let until = Utc.with_ymd_and_hms(2025, 12, 15, 23, 59, 59).unwrap().timestamp();
    assert_eq!(q.since, Some(since));
    assert_eq!(q.until, Some(until));
}

#[test]
fn since_wins_over_days() {
    let r = resolved(TimeRange {
        since: Some(date("2025-11-01")),
        until: None,
        days: Some(3),
    });
    let q = build_log_query(&r, now()).unwrap();
    assert_eq!(q.since, Some(start_of_day(date("2025-11-01"))));
}

#[test]
fn invalid_ranges_fail_before_fetching() {
    let backwards = resolved(TimeRange {
        since: Some(date("2025-12-10")),
        until: Some(date("2025-12-01")),
        days: None,
    });
    assert_eq!(
        build_log_query(&backwards, now()).unwrap_err().to_string(),
        "--since date must be before --until date"
    );

    let future = resolved(TimeRange {
        since: Some(date("2026-01-01")),
        until: None,
        days: None,
    });
    assert_eq!(
        build_log_query(&future, now()).unwrap_err().to_string(),
        "--since date cannot be in the future"
    );

    let future_until = resolved(TimeRange {
        since: None,
        until: Some(date("2025-12-21")),
        days: None,
    });
    assert_eq!(
        build_log_query(&future_until, now()).unwrap_err().to_string(),
        "--until date cannot be in the future"
    );
}

#[test]
fn query_carries_branch_and_directory() {
    let opts = AnalyzerOptions {
        branch: Some("main".into()),
        directory: Some("src".into()),
        ..Default::default()
    };
    let r = resolve_options(&opts, None).unwrap();
    let q = build_log_query(&r, now()).unwrap();
    assert_eq!(q.branch.as_deref(), Some("main"));
    assert_eq!(q.directory.as_deref(), Some("src"));
}
