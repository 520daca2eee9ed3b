use super::*;
use clap::CommandFactory;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("gimpact").chain(args.iter().copied())).unwrap()
}

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn no_subcommand_uses_flags() {
    let cli = parse(&["-m", "periodic", "-p", "weekly"]);
    assert!(cli.command.is_none());
    let opts = cli.analyzer_options().unwrap();
    assert_eq!(opts.mode, Some(AnalysisMode::Periodic));
    assert_eq!(opts.period_unit, Some(PeriodUnit::Weekly));
}

#[test]
fn no_flags_leaves_everything_to_config() {
    let opts = parse(&[]).analyzer_options().unwrap();
    assert_eq!(opts.mode, None);
    assert_eq!(opts.time_range, TimeRange::default());
    assert_eq!(opts.respect_gitignore, None);
}

#[test]
fn unknown_mode_flag_is_an_error() {
    let err = parse(&["--mode", "timeline"]).analyzer_options().unwrap_err();
    assert!(matches!(err, AnalysisError::UnknownMode(_)));
}

#[test]
fn subcommands_fix_the_mode() {
    let opts = parse(&["monthly", "-m", "ownership"]).analyzer_options().unwrap();
    assert_eq!(opts.mode, Some(AnalysisMode::Periodic));
    assert_eq!(opts.period_unit, Some(PeriodUnit::Monthly));

    let opts = parse(&["summary"]).analyzer_options().unwrap();
    assert_eq!(opts.mode, Some(AnalysisMode::Aggregate));
}

#[test]
fn global_flags_after_subcommand() {
    let cli = parse(&["weekly", "--since", "2025-11-01", "-u", "2025-11-30", "-a", "alice,bob", "-c", "3"]);
    let opts = cli.analyzer_options().unwrap();
    assert_eq!(opts.time_range.since, NaiveDate::from_ymd_opt(2025, 11, 1));
    assert_eq!(opts.time_range.until, NaiveDate::from_ymd_opt(2025, 11, 30));
    assert_eq!(opts.authors, vec!["alice", "bob"]);
    assert_eq!(opts.min_commits, Some(3));
}

#[test]
fn invalid_date_and_days_rejected() {
    assert!(Cli::try_parse_from(["gimpact", "--since", "11/01/2025"]).is_err());
    assert!(Cli::try_parse_from(["gimpact", "--days", "0"]).is_err());
}

#[test]
fn ownership_flags() {
    let cli = parse(&[
        "ownership",
        "--exclude-patterns",
        "fixtures/**",
        "*.snap",
        "--no-respect-gitignore",
        "--directory",
        "src",
        "--max-depth",
        "2",
        "--hide-files",
    ]);
    let args = cli.ownership_args().unwrap();
    assert_eq!(args.max_depth, Some(2));
    assert!(args.hide_files);
    assert!(!args.show_file_stats);

    let opts = cli.analyzer_options().unwrap();
    assert_eq!(opts.mode, Some(AnalysisMode::Ownership));
    assert_eq!(opts.exclude_patterns, vec!["fixtures/**", "*.snap"]);
    assert_eq!(opts.respect_gitignore, Some(false));
    assert_eq!(opts.directory.as_deref(), Some("src"));
}

#[test]
fn ownership_defaults_respect_gitignore() {
    let opts = parse(&["ownership"]).analyzer_options().unwrap();
    assert_eq!(opts.respect_gitignore, None);
}
