use gimpact::period::PeriodUnit;
use gimpact::stats::PeriodAuthorStats;

use crate::report_helpers::{column_width, format_number, pad_left, pad_right, separator};

fn title(unit: PeriodUnit) -> &'static str {
    match unit {
        PeriodUnit::Daily => "Daily contributions",
        PeriodUnit::Weekly => "Weekly contributions",
        PeriodUnit::Monthly => "Monthly contributions",
    }
}

/// Rows arrive sorted newest period first; the period is printed once per
/// group.
pub fn render(rows: &[PeriodAuthorStats], unit: PeriodUnit, window: &str) -> String {
    if rows.is_empty() {
        return format!("No contributions found ({window}).\n");
    }

    let pw = column_width(rows.iter().map(|r| r.period.as_str()), 6);
    let aw = column_width(rows.iter().map(|r| r.author.as_str()), 6);
    // 1 + period + 2 + author + 2 + 7 + 1 + 10 + 1 + 10 + 1 + 6
    let width = (pw + aw + 41).max(60);
    let sep = separator(width);

    let mut out = Vec::new();
    out.push(format!("{} · {window}", title(unit)));
    out.push(sep.clone());
    out.push(format!(
        " {}  {}  {} {} {} {}",
        pad_right("Period", pw),
        pad_right("Author", aw),
        pad_left("Commits", 7),
        pad_left("+Added", 10),
        pad_left("-Deleted", 10),
        pad_left("Files", 6)
    ));
    out.push(sep.clone());

    let mut previous: Option<&str> = None;
    for row in rows {
        let period = if previous == Some(row.period.as_str()) {
            ""
        } else {
            if previous.is_some() {
                out.push(String::new());
            }
            row.period.as_str()
        };
        previous = Some(row.period.as_str());
        out.push(format!(
            " {}  {}  {} {} {} {}",
            pad_right(period, pw),
            pad_right(&row.author, aw),
            pad_left(&format_number(row.stats.commits), 7),
            pad_left(&format!("+{}", format_number(row.stats.insertions)), 10),
            pad_left(&format!("-{}", format_number(row.stats.deletions)), 10),
            pad_left(&format_number(row.stats.files_touched), 6)
        ));
    }
    out.push(sep);

    let mut text = out.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
#[path = "period_test.rs"]
mod tests;
