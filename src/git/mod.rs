//! Commit history as `git log --numstat` text.
//!
//! The parsers consume plain log text, so the source of that text sits
//! behind [`LogSource`]. [`GitRepo`] renders it straight from the object
//! database with `git2`, in the same shape `git log` prints.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Offset, Utc};
use git2::{Commit, Diff, DiffFindOptions, DiffOptions, Mailmap, Patch, Repository, Sort};
use tracing::debug;

use crate::config::LogQuery;
use crate::error::LogSourceError;

/// Produces the four log formats the parsers understand.
///
/// Implementations must be shareable across threads: aggregate mode asks
/// for two logs at once.
pub trait LogSource: Sync {
    fn is_repository(&self) -> bool;

    /// Header `%aN`, numstat lines, newest first.
    fn aggregate_log(&self, query: &LogQuery) -> Result<String, LogSourceError>;

    /// Header `%aN|%cd`, numstat lines, newest first.
    fn periodic_log(&self, query: &LogQuery) -> Result<String, LogSourceError>;

    /// Header `%aN|%cd`, numstat lines, oldest first.
    fn commit_stream_log(&self, query: &LogQuery) -> Result<String, LogSourceError>;

    /// Header `AUTHOR:%aN|DATE:%cd`, numstat lines, newest first,
    /// restricted to `query.directory` when set.
    fn ownership_log(&self, query: &LogQuery) -> Result<String, LogSourceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Header {
    Author,
    AuthorDate,
    Ownership,
}

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// The time-ordered walk stops at the first commit this far before
/// `since`. Commits with skewed clocks inside the margin are still seen.
const SINCE_SLACK_SECS: i64 = 86_400;

/// Log source reading a repository on disk. Every call opens its own
/// handle, so one `GitRepo` can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Working directory of the repository containing `root`.
    pub fn workdir(&self) -> Option<PathBuf> {
        Repository::discover(&self.root)
            .ok()
            .and_then(|repo| repo.workdir().map(Path::to_path_buf))
    }

    fn open(&self) -> Result<Repository, LogSourceError> {
        Ok(Repository::discover(&self.root)?)
    }

    fn render(
        &self,
        query: &LogQuery,
        header: Header,
        oldest_first: bool,
        restrict: bool,
    ) -> Result<String, LogSourceError> {
        let repo = self.open()?;
        let mailmap = repo.mailmap().ok();
        let pathspec = query
            .directory
            .as_deref()
            .filter(|_| restrict)
            .map(normalize_pathspec)
            .filter(|p| !p.is_empty());

        let mut revwalk = repo.revwalk()?;
        match query.branch.as_deref() {
            Some(branch) => {
                let commit = repo.revparse_single(branch)?.peel_to_commit()?;
                revwalk.push(commit.id())?;
            }
            None => {
                ensure_born(&repo)?;
                revwalk.push_head()?;
            }
        }
        revwalk.set_sorting(Sort::TIME)?;

        let mut entries = Vec::new();
        for oid in revwalk {
            let commit = repo.find_commit(oid?)?;
            let time = commit.time().seconds();
            if query
                .since
                .is_some_and(|since| time < since.saturating_sub(SINCE_SLACK_SECS))
            {
                break;
            }
            if query.since.is_some_and(|since| time < since)
                || query.until.is_some_and(|until| time > until)
            {
                continue;
            }

            let diff = first_parent_diff(&repo, &commit, pathspec.as_deref())?;
            if pathspec.is_some() && diff.deltas().len() == 0 {
                continue;
            }

            let mut entry = header_line(&commit, header, mailmap.as_ref());
            entry.push('\n');
            // merges print no numstat, like `git log` without `-m`
            if commit.parent_count() <= 1 {
                numstat(&diff, &mut entry)?;
            }
            entry.push('\n');
            entries.push(entry);
        }
        if oldest_first {
            entries.reverse();
        }
        let rendered = entries.len();
        let out = entries.concat();
        debug!(rendered, ?header, "rendered git log");
        Ok(out)
    }
}

impl LogSource for GitRepo {
    fn is_repository(&self) -> bool {
        Repository::discover(&self.root).is_ok()
    }

    fn aggregate_log(&self, query: &LogQuery) -> Result<String, LogSourceError> {
        self.render(query, Header::Author, false, false)
    }

    fn periodic_log(&self, query: &LogQuery) -> Result<String, LogSourceError> {
        self.render(query, Header::AuthorDate, false, false)
    }

    fn commit_stream_log(&self, query: &LogQuery) -> Result<String, LogSourceError> {
        self.render(query, Header::AuthorDate, true, false)
    }

    fn ownership_log(&self, query: &LogQuery) -> Result<String, LogSourceError> {
        self.render(query, Header::Ownership, false, true)
    }
}

/// Fail the way `git log` does on a branch without commits.
fn ensure_born(repo: &Repository) -> Result<(), LogSourceError> {
    match repo.head() {
        Ok(_) => Ok(()),
        Err(err) if err.code() == git2::ErrorCode::UnbornBranch => {
            let head = repo.find_reference("HEAD")?;
            let branch = head
                .symbolic_target()
                .map(|t| t.strip_prefix("refs/heads/").unwrap_or(t).to_string())
                .unwrap_or_else(|| "HEAD".to_string());
            Err(LogSourceError::new(format!(
                "your current branch '{branch}' does not have any commits yet"
            )))
        }
        Err(err) => Err(err.into()),
    }
}

fn normalize_pathspec(dir: &str) -> String {
    let dir = dir.trim();
    let dir = dir.strip_prefix("./").unwrap_or(dir);
    dir.trim_end_matches('/').to_string()
}

fn author_name(commit: &Commit, mailmap: Option<&Mailmap>) -> String {
    if let Some(map) = mailmap
        && let Ok(sig) = commit.author_with_mailmap(map)
    {
        return String::from_utf8_lossy(sig.name_bytes()).into_owned();
    }
    String::from_utf8_lossy(commit.author().name_bytes()).into_owned()
}

/// Committer date in the committer's own offset.
fn commit_date(commit: &Commit) -> String {
    let time = commit.time();
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60).unwrap_or(Utc.fix());
    DateTime::from_timestamp(time.seconds(), 0)
        .map(|dt| dt.with_timezone(&offset).format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

fn header_line(commit: &Commit, header: Header, mailmap: Option<&Mailmap>) -> String {
    let author = author_name(commit, mailmap);
    match header {
        Header::Author => author,
        Header::AuthorDate => format!("{author}|{}", commit_date(commit)),
        Header::Ownership => format!("AUTHOR:{author}|DATE:{}", commit_date(commit)),
    }
}

/// Tree diff against the first parent (the empty tree for a root commit),
/// with rename detection.
fn first_parent_diff<'r>(
    repo: &'r Repository,
    commit: &Commit,
    pathspec: Option<&str>,
) -> Result<Diff<'r>, LogSourceError> {
    let tree = commit.tree()?;
    let parent_tree = if commit.parent_count() > 0 {
        Some(commit.parent(0)?.tree()?)
    } else {
        None
    };

    let mut opts = DiffOptions::new();
    if let Some(spec) = pathspec {
        opts.pathspec(spec);
    }
    let mut diff = repo.diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))?;
    diff.find_similar(Some(DiffFindOptions::new().renames(true)))?;
    Ok(diff)
}

/// Append one `insertions<TAB>deletions<TAB>path` line per delta.
fn numstat(diff: &Diff, out: &mut String) -> Result<(), LogSourceError> {
    for idx in 0..diff.deltas().len() {
        let Some(delta) = diff.get_delta(idx) else {
            continue;
        };
        let old = delta.old_file().path().map(|p| p.to_string_lossy().into_owned());
        let new = delta.new_file().path().map(|p| p.to_string_lossy().into_owned());
        let path = match (old, new) {
            (Some(old), Some(new)) if old != new => rename_notation(&old, &new),
            (_, Some(new)) => new,
            (Some(old), None) => old,
            (None, None) => continue,
        };

        let counts = match Patch::from_diff(diff, idx)? {
            Some(patch) if !patch.delta().flags().is_binary() => {
                let (_, insertions, deletions) = patch.line_stats()?;
                format!("{insertions}\t{deletions}")
            }
            _ => "-\t-".to_string(),
        };
        out.push_str(&counts);
        out.push('\t');
        out.push_str(&path);
        out.push('\n');
    }
    Ok(())
}

/// Git's compact rename form: the shared leading directories and trailing
/// path stay outside the braces, `src/{a.rs => b.rs}`. With nothing shared
/// it falls back to `old => new`.
pub fn rename_notation(old: &str, new: &str) -> String {
    let (a, b) = (old.as_bytes(), new.as_bytes());

    let mut prefix = 0;
    for (i, (x, y)) in a.iter().zip(b).enumerate() {
        if x != y {
            break;
        }
        if *x == b'/' {
            prefix = i + 1;
        }
    }

    // walk back from the end; a shared prefix ends in '/', which the
    // suffix may reuse
    let floor = prefix.saturating_sub(1);
    let byte = |s: &[u8], i: usize| s.get(i).copied().unwrap_or(0);
    let mut suffix = 0;
    let (mut i, mut j) = (a.len(), b.len());
    while i >= floor && j >= floor && byte(a, i) == byte(b, j) {
        if byte(a, i) == b'/' {
            suffix = a.len() - i;
        }
        if i == 0 || j == 0 {
            break;
        }
        i -= 1;
        j -= 1;
    }

    if prefix + suffix == 0 {
        return format!("{old} => {new}");
    }
    let old_mid = a.len().saturating_sub(prefix + suffix);
    let new_mid = b.len().saturating_sub(prefix + suffix);
    format!(
        "{}{{{} => {}}}{}",
        &old[..prefix],
        &old[prefix..prefix + old_mid],
        &new[prefix..prefix + new_mid],
        &old[a.len() - suffix..]
    )
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
