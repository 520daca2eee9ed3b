//! Ownership log: `git log --numstat --pretty=format:AUTHOR:%aN|DATE:%cd --date=iso`.
//!
//! The `|DATE:` part is optional. Paths may carry git's rename notation,
//! which is resolved to the new name before lines are attributed.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::ownership::{AuthorLines, FileOwnership, OwnershipReport};
use crate::period::parse_commit_date;

use super::{AuthorSet, allowed, parse_numstat};

const AUTHOR_PREFIX: &str = "AUTHOR:";
const DATE_SEPARATOR: &str = "|DATE:";

struct FileEntry {
    path: String,
    authors: Vec<AuthorLines>,
    last_commit_date: Option<DateTime<FixedOffset>>,
}

impl FileEntry {
    fn add(&mut self, author: &str, lines: u64) {
        match self.authors.iter_mut().find(|a| a.author == author) {
            Some(entry) => entry.lines += lines,
            None => self.authors.push(AuthorLines {
                author: author.to_string(),
                lines,
            }),
        }
    }

    fn touch(&mut self, date: Option<DateTime<FixedOffset>>) {
        if let Some(date) = date
            && self.last_commit_date.is_none_or(|last| date > last)
        {
            self.last_commit_date = Some(date);
        }
    }
}

/// Fold an ownership log into file, directory and author ownership.
///
/// Each numstat line credits `insertions + deletions` to the current
/// author for that path. Files come out in the order they first appear.
pub fn parse_ownership(log: &str, authors: Option<&AuthorSet>) -> OwnershipReport {
    let mut files: Vec<FileEntry> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut author = String::new();
    let mut date: Option<DateTime<FixedOffset>> = None;

    for line in log.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix(AUTHOR_PREFIX) {
            let (name, date_part) = match header.split_once(DATE_SEPARATOR) {
                Some((name, date_part)) => (name, Some(date_part.trim())),
                None => (header, None),
            };
            author = name.trim().to_string();
            date = date_part.filter(|d| !d.is_empty()).and_then(|d| {
                let parsed = parse_commit_date(d);
                if parsed.is_none() {
                    debug!(author = %author, date = d, "ignoring unparseable commit date");
                }
                parsed
            });
            if !allowed(authors, &author) {
                author.clear();
            }
            continue;
        }

        if author.is_empty() || !line.contains('\t') {
            continue;
        }

        let numstat = parse_numstat(line);
        let Some(raw_path) = numstat.path else {
            continue;
        };
        let Some(path) = normalize_rename(raw_path) else {
            debug!(path = raw_path, "dropping rename to an empty path");
            continue;
        };

        let idx = match index.get(&path) {
            Some(&idx) => idx,
            None => {
                index.insert(path.clone(), files.len());
                files.push(FileEntry {
                    path,
                    authors: Vec::new(),
                    last_commit_date: None,
                });
                files.len() - 1
            }
        };
        let entry = &mut files[idx];
        entry.add(&author, numstat.churn());
        entry.touch(date);
    }

    let owned = files
        .into_iter()
        .filter_map(|f| FileOwnership::from_authors(f.path, f.authors, f.last_commit_date))
        .collect();
    OwnershipReport::from_files(owned)
}

/// Resolve git's rename notation to the new path.
///
/// Every `{old => new}` group is replaced by `new`; a path without braces
/// comes back unchanged. Returns `None` when any group has an empty new
/// side, which git prints for a file moved out of a directory level.
///
/// ```
/// use gimpact::parse::normalize_rename;
///
/// assert_eq!(normalize_rename("src/{old => new}/a.rs").as_deref(), Some("src/new/a.rs"));
/// assert_eq!(normalize_rename("{lib => }/a.rs"), None);
/// ```
pub fn normalize_rename(path: &str) -> Option<String> {
    let mut out = String::with_capacity(path.len());
    let mut rest = path;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|c| open + c) else {
            break;
        };
        let group = &rest[open + 1..close];
        let Some(arrow) = group.rfind("=>") else {
            out.push_str(&rest[..=close]);
            rest = &rest[close + 1..];
            continue;
        };
        let new = group[arrow + 2..].trim();
        if new.is_empty() {
            return None;
        }
        out.push_str(&rest[..open]);
        out.push_str(new);
        rest = &rest[close + 1..];
    }
    out.push_str(rest);

    // git drops the braces when old and new share no prefix or suffix
    if !path.contains('{')
        && let Some((_, new)) = out.split_once(" => ")
    {
        let new = new.trim();
        return (!new.is_empty()).then(|| new.to_string());
    }
    Some(out)
}

#[cfg(test)]
#[path = "ownership_test.rs"]
mod tests;
