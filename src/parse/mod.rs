//! Log parsers: turn line-oriented `git log --numstat` text into
//! structured records.
//!
//! All four formats share the same numstat line shape,
//! `insertions<TAB>deletions<TAB>path`, and differ only in their commit
//! header. Parsing is tolerant: blank lines are skipped, numeric fields
//! that fail to parse (binary files print `-`) count as zero, and lines
//! that fit no grammar are ignored.

pub mod aggregate;
pub mod commits;
pub mod ownership;
pub mod period;

pub use aggregate::parse_aggregate;
pub use commits::{CommitRecord, parse_commits};
pub use ownership::{normalize_rename, parse_ownership};
pub use period::parse_periods;

/// One `insertions<TAB>deletions<TAB>path` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumstatLine<'a> {
    pub insertions: u64,
    pub deletions: u64,
    /// `None` when the line carries fewer than three fields or an empty path.
    pub path: Option<&'a str>,
}

impl NumstatLine<'_> {
    pub fn churn(&self) -> u64 {
        self.insertions + self.deletions
    }
}

/// Split a numstat line. Callers have already checked it contains a tab.
pub fn parse_numstat(line: &str) -> NumstatLine<'_> {
    let mut parts = line.splitn(3, '\t');
    let insertions = parse_count(parts.next().unwrap_or_default());
    let deletions = parse_count(parts.next().unwrap_or_default());
    let path = parts.next().filter(|p| !p.is_empty());
    NumstatLine {
        insertions,
        deletions,
        path,
    }
}

/// Leading decimal digits of `field`, or 0 when there are none.
fn parse_count(field: &str) -> u64 {
    let field = field.trim_start();
    let end = field
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(field.len());
    field[..end].parse().unwrap_or(0)
}

/// Case-insensitive author allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSet {
    names: Vec<String>,
}

impl AuthorSet {
    /// `None` for an empty list: no filtering at all.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Option<Self> {
        let names: Vec<String> = names
            .iter()
            .map(|n| n.as_ref().to_lowercase())
            .collect();
        (!names.is_empty()).then_some(Self { names })
    }

    pub fn contains(&self, author: &str) -> bool {
        let author = author.to_lowercase();
        self.names.iter().any(|n| *n == author)
    }
}

/// True when there is no allow-list or `author` is on it.
pub(crate) fn allowed(authors: Option<&AuthorSet>, author: &str) -> bool {
    authors.is_none_or(|set| set.contains(author))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
