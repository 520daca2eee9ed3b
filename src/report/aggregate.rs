use gimpact::classify::classify_all;
use gimpact::efficiency::{EfficiencyStats, SizeBucket};
use gimpact::stats::AggregateReport;

use crate::report_helpers::{bar, column_width, format_number, pad_left, pad_right, separator};

const HISTOGRAM_WIDTH: usize = 24;

pub fn render(report: &AggregateReport, window: &str) -> String {
    if report.stats.is_empty() {
        return format!("No contributions found ({window}).\n");
    }

    let rows = report.by_impact();
    let types = classify_all(&report.stats);
    let type_labels: Vec<String> = rows
        .iter()
        .map(|(author, _)| types.get(*author).map(|t| t.label()).unwrap_or_default())
        .collect();

    let aw = column_width(rows.iter().map(|(a, _)| *a), 6);
    let tw = column_width(type_labels.iter().map(String::as_str), 4);
    // 1 + author + 2 + 7 + 1 + 10 + 1 + 10 + 1 + 6 + 2 + type + 2 + 24
    let width = (aw + tw + 67).max(78);
    let sep = separator(width);

    let mut out = Vec::new();
    out.push(format!("Contributions · {window}"));
    out.push(sep.clone());
    out.push(format!(
        " {}  {} {} {} {}  {}  {}",
        pad_right("Author", aw),
        pad_left("Commits", 7),
        pad_left("+Added", 10),
        pad_left("-Deleted", 10),
        pad_left("Files", 6),
        pad_right("Type", tw),
        "Efficiency"
    ));
    out.push(sep.clone());

    let (mut commits, mut added, mut deleted) = (0, 0, 0);
    for ((author, stats), kind) in rows.iter().zip(&type_labels) {
        commits += stats.commits;
        added += stats.insertions;
        deleted += stats.deletions;
        let efficiency = report
            .efficiency
            .get(*author)
            .map(|e| format!("{} lines/commit {}", e.efficiency, e.label))
            .unwrap_or_default();
        out.push(format!(
            " {}  {} {} {} {}  {}  {}",
            pad_right(author, aw),
            pad_left(&format_number(stats.commits), 7),
            pad_left(&format!("+{}", format_number(stats.insertions)), 10),
            pad_left(&format!("-{}", format_number(stats.deletions)), 10),
            pad_left(&format_number(stats.files_touched), 6),
            pad_right(kind, tw),
            efficiency
        ));
    }
    out.push(sep.clone());
    out.push(format!(
        " {}  {} {} {}",
        pad_right("Total", aw),
        pad_left(&format_number(commits), 7),
        pad_left(&format!("+{}", format_number(added)), 10),
        pad_left(&format!("-{}", format_number(deleted)), 10),
    ));

    if !report.efficiency.is_empty() {
        out.push(String::new());
        out.push("Commit size distribution".to_string());
        out.push(sep);
        for (author, _) in &rows {
            if let Some(stats) = report.efficiency.get(*author) {
                out.extend(histogram(stats));
            }
        }
    }

    let mut text = out.join("\n");
    text.push('\n');
    text
}

fn histogram(stats: &EfficiencyStats) -> Vec<String> {
    let max = SizeBucket::ALL
        .iter()
        .map(|b| stats.distribution.get(*b))
        .max()
        .unwrap_or(0);
    let mut lines = vec![format!(
        " {} ({} commits, {})",
        stats.author, stats.total_commits, stats.label
    )];
    for bucket in SizeBucket::ALL {
        let count = stats.distribution.get(bucket);
        lines.push(format!(
            "   {} {} {count}",
            pad_right(bucket.as_str(), 8),
            pad_right(&bar(count, max, HISTOGRAM_WIDTH), HISTOGRAM_WIDTH)
        ));
    }
    lines
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
