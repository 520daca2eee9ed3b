use gimpact::ownership::file_type::group_by_type;
use gimpact::ownership::{
    AuthorOwnership, ConcentrationArea, OwnershipReport, TreeNode, build_tree,
    concentration_areas, flatten,
};

use crate::report_helpers::{format_number, separator};

const FILES_PER_TYPE: usize = 5;

/// How much of the tree to draw.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeOptions {
    /// Levels below the root to show; `None` for all.
    pub max_depth: Option<usize>,
    pub hide_files: bool,
    pub show_file_stats: bool,
}

pub fn render(
    report: &OwnershipReport,
    opts: &TreeOptions,
    directory: Option<&str>,
    window: &str,
) -> String {
    if report.is_empty() {
        return format!("No file ownership data found ({window}).\n");
    }

    let tree = build_tree(&report.files);
    let sep = separator(78);
    let mut out = Vec::new();

    out.push(format!("Code ownership · {window}"));
    out.push(sep.clone());
    out.push(format!(
        ". {} files, {} lines{}",
        format_number(tree.total_files),
        format_number(tree.lines),
        owner_suffix(&tree)
    ));
    draw_children(&flatten(&tree), "", 1, opts, &mut out);

    out.push(String::new());
    out.push("Owners".to_string());
    out.push(sep.clone());
    for author in &report.authors {
        out.extend(author_block(author));
    }

    let areas = concentration_areas(&tree, directory);
    if !areas.is_empty() {
        out.push(String::new());
        out.push("Knowledge concentration".to_string());
        out.push(sep);
        out.extend(areas.iter().map(concentration_line));
    }

    let mut text = out.join("\n");
    text.push('\n');
    text
}

fn owner_suffix(node: &TreeNode) -> String {
    if node.owner.is_empty() {
        String::new()
    } else {
        format!(" · {} {}%", node.owner, node.share)
    }
}

fn node_line(node: &TreeNode, opts: &TreeOptions) -> String {
    if node.is_dir() {
        return format!(
            "{}/ ({} files, {} lines){}",
            node.name,
            format_number(node.total_files),
            format_number(node.lines),
            owner_suffix(node)
        );
    }
    if opts.show_file_stats {
        format!(
            "{} ({} lines){}",
            node.name,
            format_number(node.lines),
            owner_suffix(node)
        )
    } else {
        node.name.clone()
    }
}

fn draw_children(
    node: &TreeNode,
    prefix: &str,
    depth: usize,
    opts: &TreeOptions,
    out: &mut Vec<String>,
) {
    if opts.max_depth.is_some_and(|max| depth > max) {
        return;
    }
    let visible: Vec<&TreeNode> = node
        .children
        .iter()
        .filter(|c| c.is_dir() || !opts.hide_files)
        .collect();
    for (i, child) in visible.iter().enumerate() {
        let last = i + 1 == visible.len();
        let (branch, indent) = if last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        out.push(format!("{prefix}{branch}{}", node_line(child, opts)));
        if child.is_dir() {
            draw_children(child, &format!("{prefix}{indent}"), depth + 1, opts, out);
        }
    }
}

fn author_block(author: &AuthorOwnership) -> Vec<String> {
    let mut lines = vec![format!(
        " {} · {} files · {} lines",
        author.author,
        format_number(author.total_files),
        format_number(author.total_lines)
    )];
    for (kind, files) in group_by_type(&author.files, |f| f.file.as_str()) {
        if files.is_empty() {
            continue;
        }
        let names: Vec<&str> = files
            .iter()
            .take(FILES_PER_TYPE)
            .map(|f| f.file.as_str())
            .collect();
        let more = files.len().saturating_sub(FILES_PER_TYPE);
        let extra = if more > 0 { format!(" (+{more} more)") } else { String::new() };
        lines.push(format!("   {:<7} {}{extra}", kind.label(), names.join(", ")));
    }
    lines
}

fn concentration_line(area: &ConcentrationArea) -> String {
    format!(
        " {}/ · {} {}% · {} lines",
        area.path,
        area.owner,
        area.share,
        format_number(area.lines)
    )
}

#[cfg(test)]
#[path = "ownership_test.rs"]
mod tests;
