//! Path-based filtering for ownership results.
//!
//! A file is dropped when it lies outside the requested directory, matches
//! an exclude glob (built-in deny-list plus user patterns), or is reported
//! by the ignore oracle. Directory and author rollups are then rebuilt from
//! the files that survive.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use git2::Repository;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::{debug, warn};

use crate::error::{AnalysisError, OracleError};
use crate::ownership::{FileOwnership, OwnershipReport};

/// Lock files, build output, generated code, editor and OS droppings.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "**/*.lock",
    "**/package-lock.json",
    "**/yarn.lock",
    "**/pnpm-lock.yaml",
    "**/uv.lock",
    "**/Cargo.lock",
    "**/Gemfile.lock",
    "**/Pipfile.lock",
    "**/poetry.lock",
    "**/composer.lock",
    "**/go.sum",
    "**/go.mod",
    "**/node_modules/**",
    "**/dist/**",
    "**/build/**",
    "**/out/**",
    "**/.next/**",
    "**/.nuxt/**",
    "**/.cache/**",
    "**/coverage/**",
    "**/.coverage/**",
    "**/openapi.json",
    "**/openapi.yaml",
    "**/openapi.yml",
    "**/*.generated.*",
    "**/*.pb.go",
    "**/*.pb.ts",
    "**/*.pb.js",
    "**/.idea/**",
    "**/.vscode/**",
    "**/.DS_Store",
    "**/Thumbs.db",
    "**/*.log",
    "**/*.tmp",
    "**/*.temp",
];

/// Answers "which of these paths does version control ignore?" for a whole
/// batch at once.
pub trait IgnoreOracle {
    fn ignored(&self, paths: &[String]) -> Result<HashSet<String>, OracleError>;
}

/// Ignore oracle backed by the repository's `.gitignore` files,
/// `.git/info/exclude` and `core.excludesFile`. Files tracked in the index
/// are never ignored, matching `git check-ignore`.
#[derive(Debug, Clone)]
pub struct GitignoreOracle {
    root: PathBuf,
}

impl GitignoreOracle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn matcher_for(&self, dir: &str) -> Result<Gitignore, OracleError> {
        let base = self.root.join(dir);
        let mut builder = GitignoreBuilder::new(&base);
        let file = base.join(".gitignore");
        if file.is_file()
            && let Some(err) = builder.add(&file)
        {
            return Err(err.into());
        }
        Ok(builder.build()?)
    }

    /// Repository-wide matchers in precedence order: `info/exclude`, then
    /// the file named by `core.excludesFile`.
    fn repo_matchers(&self, repo: &Repository) -> Result<Vec<Gitignore>, OracleError> {
        let mut files = vec![repo.path().join("info").join("exclude")];
        files.extend(excludes_file(repo));
        files.iter().map(|file| self.root_matcher(file)).collect()
    }

    fn root_matcher(&self, file: &Path) -> Result<Gitignore, OracleError> {
        let mut builder = GitignoreBuilder::new(&self.root);
        if file.is_file()
            && let Some(err) = builder.add(file)
        {
            return Err(err.into());
        }
        Ok(builder.build()?)
    }
}

fn tracked(repo: &Repository) -> Result<HashSet<PathBuf>, OracleError> {
    let index = repo.index()?;
    Ok(index
        .iter()
        .filter_map(|entry| String::from_utf8(entry.path).ok())
        .map(PathBuf::from)
        .collect())
}

fn excludes_file(repo: &Repository) -> Option<PathBuf> {
    let path = repo.config().ok()?.get_path("core.excludesFile").ok()?;
    debug!(path = %path.display(), "using core.excludesFile");
    Some(path)
}

/// Parent directories of `path`, deepest first, ending with the root ("").
fn ancestors(path: &str) -> Vec<&str> {
    let mut dirs: Vec<&str> = path.rmatch_indices('/').map(|(i, _)| &path[..i]).collect();
    dirs.push("");
    dirs
}

impl IgnoreOracle for GitignoreOracle {
    fn ignored(&self, paths: &[String]) -> Result<HashSet<String>, OracleError> {
        let repo = Repository::open(&self.root)?;
        let tracked = tracked(&repo)?;
        let repo_wide = self.repo_matchers(&repo)?;
        let mut matchers: HashMap<&str, Gitignore> = HashMap::new();
        let mut ignored = HashSet::new();

        for path in paths {
            if tracked.contains(Path::new(path)) {
                continue;
            }
            let full = self.root.join(path);
            let mut verdict = None;
            for dir in ancestors(path) {
                if !matchers.contains_key(dir) {
                    matchers.insert(dir, self.matcher_for(dir)?);
                }
                let m = matchers[dir].matched_path_or_any_parents(&full, false);
                if !m.is_none() {
                    verdict = Some(m.is_ignore());
                    break;
                }
            }
            let is_ignored = verdict.unwrap_or_else(|| {
                repo_wide
                    .iter()
                    .map(|m| m.matched_path_or_any_parents(&full, false))
                    .find(|m| !m.is_none())
                    .is_some_and(|m| m.is_ignore())
            });
            if is_ignored {
                ignored.insert(path.clone());
            }
        }
        Ok(ignored)
    }
}

/// Turn a user glob into one anchored at the repository root.
///
/// `./` is stripped, `/x` anchors at the root, `**/...` is kept as is, and
/// anything else may match at any depth.
fn anchored_glob(pattern: &str) -> String {
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    if pattern.starts_with("**") {
        pattern.to_string()
    } else if let Some(rooted) = pattern.strip_prefix('/') {
        rooted.to_string()
    } else {
        format!("**/{pattern}")
    }
}

fn normalize_dir(dir: &str) -> &str {
    let dir = dir.strip_prefix("./").unwrap_or(dir);
    dir.strip_suffix('/').unwrap_or(dir)
}

fn within(path: &str, dir: &str) -> bool {
    path == dir || path.starts_with(&format!("{dir}/"))
}

pub struct FilePatternFilter<'a> {
    excludes: GlobSet,
    include_directory: Option<String>,
    oracle: Option<&'a dyn IgnoreOracle>,
}

impl<'a> FilePatternFilter<'a> {
    /// Build a filter from the built-in deny-list plus `extra` patterns.
    ///
    /// An invalid pattern is an error naming the pattern.
    pub fn new(
        extra: &[String],
        include_directory: Option<&str>,
        oracle: Option<&'a dyn IgnoreOracle>,
    ) -> Result<Self, AnalysisError> {
        let mut builder = GlobSetBuilder::new();
        let patterns = DEFAULT_EXCLUDE_PATTERNS
            .iter()
            .copied()
            .chain(extra.iter().map(String::as_str));
        for pattern in patterns {
            let glob = GlobBuilder::new(&anchored_glob(pattern))
                .literal_separator(true)
                .build()
                .map_err(|source| AnalysisError::Pattern {
                    pattern: pattern.to_string(),
                    source,
                })?;
            builder.add(glob);
        }
        let excludes = builder.build().map_err(|source| AnalysisError::Pattern {
            pattern: extra.join(", "),
            source,
        })?;

        Ok(Self {
            excludes,
            include_directory: include_directory
                .map(normalize_dir)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            oracle,
        })
    }

    /// Outside the included directory, or matching an exclude glob.
    pub fn is_excluded(&self, path: &str) -> bool {
        let path = path.strip_prefix("./").unwrap_or(path);
        if let Some(dir) = &self.include_directory
            && !within(path, dir)
        {
            return true;
        }
        self.excludes.is_match(path)
    }

    /// Drop excluded and ignored files, then rebuild the rollups.
    pub fn apply(&self, report: OwnershipReport) -> OwnershipReport {
        let before = report.files.len();
        let mut files: Vec<FileOwnership> = report
            .files
            .into_iter()
            .filter(|f| !self.is_excluded(&f.file))
            .collect();

        if let Some(oracle) = self.oracle
            && !files.is_empty()
        {
            let paths: Vec<String> = files.iter().map(|f| f.file.clone()).collect();
            let ignored = oracle.ignored(&paths).unwrap_or_else(|err| {
                warn!(error = %err, "ignore check failed, keeping all files");
                HashSet::new()
            });
            files.retain(|f| !ignored.contains(&f.file));
        }
        debug!(before, after = files.len(), "file pattern filter applied");

        let mut filtered = OwnershipReport::from_files(files);
        if let Some(dir) = &self.include_directory {
            filtered
                .directories
                .retain(|d| within(normalize_dir(&d.directory), dir));
        }
        filtered
    }
}

#[cfg(test)]
#[path = "patterns_test.rs"]
mod tests;
