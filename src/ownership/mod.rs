//! Ownership maps: who carries the churn of each file, directory and author.
//!
//! A file's owner is the author with the most attributed lines
//! (insertions + deletions across the window). A directory's owner is the
//! author who owns the most of its direct files. Ties always go to the
//! author seen first, which follows log order.
//!
//! [`OwnershipReport::from_files`] is the single place directory and author
//! rollups are derived, so the log parser and the file-pattern filter agree
//! on the rules.

pub mod file_type;
pub mod tree;

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

pub use file_type::{FileType, classify_file_type};
pub use tree::{ConcentrationArea, NodeKind, TreeNode, build_tree, concentration_areas, flatten};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLines {
    pub author: String,
    pub lines: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOwnership {
    pub file: String,
    pub owner: String,
    /// Owner's share of `total_lines`, 0 to 100.
    pub share: u32,
    pub owner_lines: u64,
    pub total_lines: u64,
    /// Every author who touched the file, in first-seen order.
    pub authors: Vec<AuthorLines>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_commit_date: Option<DateTime<FixedOffset>>,
}

impl FileOwnership {
    /// Derive the owner from per-author line counts.
    ///
    /// Returns `None` when no author has a non-blank name. An author with
    /// zero lines can still own a file when nobody changed more.
    pub fn from_authors(
        file: String,
        authors: Vec<AuthorLines>,
        last_commit_date: Option<DateTime<FixedOffset>>,
    ) -> Option<Self> {
        let total_lines = authors.iter().map(|a| a.lines).sum();
        let mut owner: Option<&AuthorLines> = None;
        for entry in authors.iter().filter(|a| !a.author.trim().is_empty()) {
            if owner.is_none_or(|o| entry.lines > o.lines) {
                owner = Some(entry);
            }
        }
        let owner = owner?;
        let (owner_name, owner_lines) = (owner.author.clone(), owner.lines);

        Some(Self {
            file,
            owner: owner_name,
            share: percent(owner_lines, total_lines),
            owner_lines,
            total_lines,
            authors,
            last_commit_date,
        })
    }

    pub fn directory(&self) -> &str {
        directory_of(&self.file)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryOwnership {
    pub directory: String,
    pub owner: String,
    /// Owner's share of `total_files`, 0 to 100.
    pub share: u32,
    pub owner_files: u64,
    pub total_files: u64,
    /// Sum of the direct files' `total_lines`.
    pub total_lines: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnedFile {
    pub file: String,
    pub lines: u64,
    pub share: u32,
}

/// Files an author is the primary owner of, largest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorOwnership {
    pub author: String,
    pub files: Vec<OwnedFile>,
    pub total_files: u64,
    pub total_lines: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OwnershipReport {
    pub files: Vec<FileOwnership>,
    pub directories: Vec<DirectoryOwnership>,
    pub authors: Vec<AuthorOwnership>,
}

impl OwnershipReport {
    /// Directories and authors come out in the order their first file
    /// appears in `files`.
    pub fn from_files(files: Vec<FileOwnership>) -> Self {
        let directories = roll_up_directories(&files);
        let authors = roll_up_authors(&files);
        Self {
            files,
            directories,
            authors,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn file(&self, path: &str) -> Option<&FileOwnership> {
        self.files.iter().find(|f| f.file == path)
    }

    pub fn directory(&self, directory: &str) -> Option<&DirectoryOwnership> {
        self.directories.iter().find(|d| d.directory == directory)
    }

    pub fn author(&self, author: &str) -> Option<&AuthorOwnership> {
        self.authors.iter().find(|a| a.author == author)
    }
}

/// Directory key for a file path: `src/a.rs` -> `src/`, `a.rs` -> `./`.
pub fn directory_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..=idx],
        None => "./",
    }
}

/// `round(part / total * 100)`, 0 when `total` is 0.
pub fn percent(part: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

/// Running per-author counts that remember first-seen order.
#[derive(Debug, Default)]
pub(crate) struct OwnerTally {
    counts: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl OwnerTally {
    /// Zero counts are not recorded, so they never claim first-seen order.
    pub(crate) fn add(&mut self, author: &str, count: u64) {
        if count == 0 {
            return;
        }
        match self.index.get(author) {
            Some(&idx) => self.counts[idx].1 += count,
            None => {
                self.index.insert(author.to_string(), self.counts.len());
                self.counts.push((author.to_string(), count));
            }
        }
    }

    /// Author with the strictly highest count, first-seen on ties.
    /// Blank names never lead.
    pub(crate) fn leader(&self) -> Option<(&str, u64)> {
        let mut best: Option<(&str, u64)> = None;
        for (author, count) in &self.counts {
            if author.trim().is_empty() {
                continue;
            }
            if best.is_none_or(|(_, c)| *count > c) {
                best = Some((author.as_str(), *count));
            }
        }
        best
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(a, c)| (a.as_str(), *c))
    }
}

fn roll_up_directories(files: &[FileOwnership]) -> Vec<DirectoryOwnership> {
    let mut order: Vec<&str> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<(OwnerTally, u64, u64)> = Vec::new();

    for file in files {
        let dir = file.directory();
        let idx = *index.entry(dir).or_insert_with(|| {
            order.push(dir);
            tallies.push((OwnerTally::default(), 0, 0));
            order.len() - 1
        });
        let (tally, total_files, total_lines) = &mut tallies[idx];
        tally.add(&file.owner, 1);
        *total_files += 1;
        *total_lines += file.total_lines;
    }

    order
        .into_iter()
        .zip(tallies)
        .filter_map(|(dir, (tally, total_files, total_lines))| {
            let (owner, owner_files) = tally.leader()?;
            Some(DirectoryOwnership {
                directory: dir.to_string(),
                owner: owner.to_string(),
                share: percent(owner_files, total_files),
                owner_files,
                total_files,
                total_lines,
            })
        })
        .collect()
}

fn roll_up_authors(files: &[FileOwnership]) -> Vec<AuthorOwnership> {
    let mut authors: Vec<AuthorOwnership> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for file in files {
        let idx = *index.entry(file.owner.as_str()).or_insert_with(|| {
            authors.push(AuthorOwnership {
                author: file.owner.clone(),
                files: Vec::new(),
                total_files: 0,
                total_lines: 0,
            });
            authors.len() - 1
        });
        let entry = &mut authors[idx];
        entry.files.push(OwnedFile {
            file: file.file.clone(),
            lines: file.owner_lines,
            share: file.share,
        });
        entry.total_files += 1;
        entry.total_lines += file.owner_lines;
    }

    for author in &mut authors {
        author.files.sort_by(|a, b| b.lines.cmp(&a.lines));
    }
    authors
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
