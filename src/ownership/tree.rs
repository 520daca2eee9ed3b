//! Directory tree over file ownership, with recursive rollups.
//!
//! The tree is built bottom-up: every directory node is constructed after
//! its children, with its totals already computed from them. Nothing is
//! mutated after construction.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use super::{FileOwnership, OwnerTally, percent};

/// Lines a directory needs before sole ownership counts as a concentration.
pub const CONCENTRATION_MIN_LINES: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub name: String,
    pub path: String,
    pub kind: NodeKind,
    /// Empty for a directory with no owned files.
    pub owner: String,
    pub share: u32,
    /// Files the owner owns below this node (1 or 0 for a file).
    pub owner_files: u64,
    pub total_files: u64,
    pub lines: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_commit_date: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn is_root(&self) -> bool {
        self.path == "."
    }

    fn file(name: &str, path: String, ownership: &FileOwnership) -> Self {
        Self {
            name: name.to_string(),
            path,
            kind: NodeKind::File,
            owner: ownership.owner.clone(),
            share: ownership.share,
            owner_files: 1,
            total_files: 1,
            lines: ownership.total_lines,
            last_commit_date: ownership.last_commit_date,
            children: Vec::new(),
        }
    }
}

#[derive(Default)]
struct DirEntries<'a> {
    dirs: BTreeMap<&'a str, DirEntries<'a>>,
    files: BTreeMap<&'a str, &'a FileOwnership>,
}

/// Build the ownership tree rooted at `.`.
///
/// Children are ordered directories first, then files, each by name.
/// A directory's owner is the author owning the most descendant files,
/// first-seen in that child order on ties.
pub fn build_tree(files: &[FileOwnership]) -> TreeNode {
    let mut root = DirEntries::default();
    for ownership in files {
        let parts: Vec<&str> = ownership.file.split('/').filter(|p| !p.is_empty()).collect();
        let Some((file_name, dirs)) = parts.split_last() else {
            continue;
        };
        let mut current = &mut root;
        for dir in dirs {
            current = current.dirs.entry(*dir).or_default();
        }
        current.files.insert(*file_name, ownership);
    }
    fold(".", ".".to_string(), &root).0
}

fn child_path(parent: &str, name: &str) -> String {
    if parent == "." {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

fn fold(name: &str, path: String, entries: &DirEntries<'_>) -> (TreeNode, OwnerTally) {
    let mut children = Vec::with_capacity(entries.dirs.len() + entries.files.len());
    let mut tally = OwnerTally::default();

    for (dir_name, sub) in &entries.dirs {
        let (node, sub_tally) = fold(dir_name, child_path(&path, dir_name), sub);
        for (author, count) in sub_tally.entries() {
            tally.add(author, count);
        }
        children.push(node);
    }
    for (file_name, ownership) in &entries.files {
        tally.add(&ownership.owner, 1);
        children.push(TreeNode::file(file_name, child_path(&path, file_name), ownership));
    }

    let total_files: u64 = children.iter().map(|c| c.total_files).sum();
    let lines: u64 = children.iter().map(|c| c.lines).sum();
    let last_commit_date = children.iter().filter_map(|c| c.last_commit_date).max();
    let (owner, owner_files) = tally
        .leader()
        .map_or((String::new(), 0), |(a, c)| (a.to_string(), c));

    let node = TreeNode {
        name: name.to_string(),
        path,
        kind: NodeKind::Directory,
        owner,
        share: percent(owner_files, total_files),
        owner_files,
        total_files,
        lines,
        last_commit_date,
        children,
    };
    (node, tally)
}

/// Collapse chains of single-child directories into one node named
/// `a/b/c`, carrying the deepest directory's path and statistics.
/// The root is never merged into its child.
pub fn flatten(root: &TreeNode) -> TreeNode {
    TreeNode {
        children: root.children.iter().map(flatten_node).collect(),
        ..root.clone_shallow()
    }
}

fn flatten_node(node: &TreeNode) -> TreeNode {
    if !node.is_dir() {
        return node.clone();
    }
    if let [only] = node.children.as_slice()
        && only.is_dir()
    {
        let mut merged = flatten_node(only);
        merged.name = format!("{}/{}", node.name, merged.name);
        return merged;
    }
    TreeNode {
        children: node.children.iter().map(flatten_node).collect(),
        ..node.clone_shallow()
    }
}

impl TreeNode {
    fn clone_shallow(&self) -> Self {
        Self {
            name: self.name.clone(),
            path: self.path.clone(),
            kind: self.kind,
            owner: self.owner.clone(),
            share: self.share,
            owner_files: self.owner_files,
            total_files: self.total_files,
            lines: self.lines,
            last_commit_date: self.last_commit_date,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConcentrationArea {
    pub path: String,
    pub owner: String,
    pub share: u32,
    pub lines: u64,
}

/// Directories (root excluded) with share 100 and at least
/// [`CONCENTRATION_MIN_LINES`] lines, largest first.
///
/// With `directory` set, only that directory, its descendants and its
/// ancestors qualify.
pub fn concentration_areas(root: &TreeNode, directory: Option<&str>) -> Vec<ConcentrationArea> {
    let scope = directory.map(|d| d.trim_start_matches("./").trim_end_matches('/'));
    let mut areas = Vec::new();
    collect_areas(root, scope, &mut areas);
    areas.sort_by(|a, b| b.lines.cmp(&a.lines));
    areas
}

fn collect_areas(node: &TreeNode, scope: Option<&str>, out: &mut Vec<ConcentrationArea>) {
    if !node.is_root()
        && !node.owner.is_empty()
        && node.share == 100
        && node.lines >= CONCENTRATION_MIN_LINES
        && scope.is_none_or(|dir| related(&node.path, dir))
    {
        out.push(ConcentrationArea {
            path: node.path.clone(),
            owner: node.owner.clone(),
            share: node.share,
            lines: node.lines,
        });
    }
    for child in node.children.iter().filter(|c| c.is_dir()) {
        collect_areas(child, scope, out);
    }
}

fn related(path: &str, dir: &str) -> bool {
    path == dir || path.starts_with(&format!("{dir}/")) || dir.starts_with(&format!("{path}/"))
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tests;
