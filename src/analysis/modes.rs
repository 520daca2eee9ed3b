//! One handler per analysis mode: fetch the right log, parse it, filter.

use tracing::{debug, info};

use crate::config::{LogQuery, ResolvedOptions};
use crate::efficiency::analyze_all;
use crate::error::{AnalysisError, LogSourceError};
use crate::filter::{AuthorFilter, FilePatternFilter, FilterChain, IgnoreOracle, MinCommitsFilter};
use crate::git::LogSource;
use crate::ownership::OwnershipReport;
use crate::parse::{AuthorSet, parse_aggregate, parse_commits, parse_ownership, parse_periods};
use crate::stats::{AggregateReport, PeriodAuthorStats};

/// `Ok(None)` when the branch has no commits yet.
fn fetched(log: Result<String, LogSourceError>) -> Result<Option<String>, AnalysisError> {
    match log {
        Ok(log) => Ok(Some(log)),
        Err(err) if err.is_no_commits() => {
            info!(error = %err, "no commits, returning an empty result");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Author and min-commit filters for the two author-keyed shapes.
fn author_filters(opts: &ResolvedOptions) -> FilterChain {
    let mut chain = FilterChain::new();
    if opts.min_commits > 1 {
        chain = chain.with(MinCommitsFilter::new(opts.min_commits));
    }
    if let Some(authors) = AuthorSet::from_names(&opts.authors) {
        chain = chain.with(AuthorFilter::new(authors));
    }
    chain
}

pub(crate) fn aggregate(
    source: &dyn LogSource,
    opts: &ResolvedOptions,
    query: &LogQuery,
) -> Result<AggregateReport, AnalysisError> {
    let (totals, stream) = rayon::join(
        || source.aggregate_log(query),
        || source.commit_stream_log(query),
    );
    let (Some(totals), Some(stream)) = (fetched(totals)?, fetched(stream)?) else {
        return Ok(AggregateReport::default());
    };

    let authors = AuthorSet::from_names(&opts.authors);
    let stats = parse_aggregate(&totals, authors.as_ref());
    let mut commits = parse_commits(&stream);
    if let Some(authors) = &authors {
        commits.retain(|c| authors.contains(&c.author));
    }
    debug!(authors = stats.len(), commits = commits.len(), "parsed aggregate logs");
    let efficiency = analyze_all(&commits, &opts.thresholds);

    let chain = author_filters(opts);
    Ok(chain.apply_aggregate(AggregateReport { stats, efficiency }))
}

pub(crate) fn periodic(
    source: &dyn LogSource,
    opts: &ResolvedOptions,
    query: &LogQuery,
) -> Result<Vec<PeriodAuthorStats>, AnalysisError> {
    let Some(log) = fetched(source.periodic_log(query))? else {
        return Ok(Vec::new());
    };
    let authors = AuthorSet::from_names(&opts.authors);
    let rows = parse_periods(&log, opts.period_unit, authors.as_ref());
    Ok(author_filters(opts).apply_periods(rows))
}

pub(crate) fn ownership(
    source: &dyn LogSource,
    opts: &ResolvedOptions,
    query: &LogQuery,
    oracle: Option<&dyn IgnoreOracle>,
) -> Result<OwnershipReport, AnalysisError> {
    // patterns are checked before the log is fetched
    let oracle = oracle.filter(|_| opts.respect_gitignore);
    let filter = FilePatternFilter::new(&opts.exclude_patterns, opts.directory.as_deref(), oracle)?;

    let Some(log) = fetched(source.ownership_log(query))? else {
        return Ok(OwnershipReport::default());
    };
    let authors = AuthorSet::from_names(&opts.authors);
    let report = parse_ownership(&log, authors.as_ref());
    debug!(files = report.files.len(), "parsed ownership log");
    Ok(filter.apply(report))
}
