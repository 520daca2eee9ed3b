//! Terminal and JSON output for each analysis mode.

pub mod aggregate;
pub mod ownership;
pub mod period;

use gimpact::AnalysisResult;
use gimpact::period::PeriodUnit;

use crate::report_helpers::print_json_stdout;

pub use ownership::TreeOptions;

/// Presentation settings that are not part of the analysis itself.
#[derive(Debug, Clone, Default)]
pub struct ReportContext {
    /// Human-readable analysed window, e.g. "Last 30 days".
    pub window: String,
    pub period_unit: PeriodUnit,
    pub directory: Option<String>,
    pub tree: TreeOptions,
}

pub fn render(result: &AnalysisResult, ctx: &ReportContext) -> String {
    match result {
        AnalysisResult::Aggregate(report) => aggregate::render(report, &ctx.window),
        AnalysisResult::Periodic(rows) => period::render(rows, ctx.period_unit, &ctx.window),
        AnalysisResult::Ownership(report) => {
            ownership::render(report, &ctx.tree, ctx.directory.as_deref(), &ctx.window)
        }
    }
}

pub fn print_report(result: &AnalysisResult, ctx: &ReportContext) {
    print!("{}", render(result, ctx));
}

pub fn print_json(result: &AnalysisResult) -> Result<(), Box<dyn std::error::Error>> {
    print_json_stdout(result)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
