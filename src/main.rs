mod cli;
mod cli_help;
mod report;
mod report_helpers;

use std::error::Error;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use gimpact::config::{DEFAULT_DAYS, FileConfig, resolve_options};
use gimpact::filter::GitignoreOracle;
use gimpact::git::GitRepo;
use gimpact::period::describe_time_range;
use gimpact::Analyzer;

use cli::{Cli, Commands};
use report::{ReportContext, TreeOptions};

const LOG_ENV: &str = "GIMPACT_LOG";

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(*shell, &mut cmd, "gimpact", &mut std::io::stdout());
        return Ok(());
    }

    let target = cli.global.repo.clone().unwrap_or_else(|| PathBuf::from("."));
    let source = GitRepo::new(&target);
    let workdir = source.workdir().unwrap_or_else(|| target.clone());
    let config = FileConfig::discover(&workdir)?;
    debug!(workdir = %workdir.display(), config = config.is_some(), "starting");

    let opts = cli.analyzer_options()?;
    let resolved = resolve_options(&opts, config.as_ref())?;
    let oracle = GitignoreOracle::new(&workdir);

    let result = Analyzer::new(&source)
        .with_oracle(&oracle)
        .with_config(config.as_ref())
        .run(&opts)?;

    if cli.global.json {
        return report::print_json(&result);
    }

    let range = resolved.time_range;
    let ownership = cli.ownership_args();
    let ctx = ReportContext {
        window: describe_time_range(range.since, range.until, range.days.unwrap_or(DEFAULT_DAYS)),
        period_unit: resolved.period_unit,
        directory: resolved.directory.clone(),
        tree: ownership
            .map(|args| TreeOptions {
                max_depth: args.max_depth,
                hide_files: args.hide_files,
                show_file_stats: args.show_file_stats,
            })
            .unwrap_or_default(),
    };
    report::print_report(&result, &ctx);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
