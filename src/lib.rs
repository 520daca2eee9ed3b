//! Contribution analytics over git history.
//!
//! The log source ([`git::LogSource`]) supplies `git log --numstat` style
//! text; the [`parse`] module turns it into per-author, per-period and
//! per-file records; [`efficiency`], [`classify`] and [`ownership`] derive
//! metrics from those; [`filter`] trims results; [`analysis::Analyzer`]
//! ties one mode together end to end.

pub mod analysis;
pub mod classify;
pub mod config;
pub mod efficiency;
pub mod error;
pub mod filter;
pub mod git;
pub mod ownership;
pub mod parse;
pub mod period;
pub mod stats;

pub use analysis::{AnalysisResult, Analyzer, analyze_contributions};
pub use config::{AnalysisMode, AnalyzerOptions, FileConfig, TimeRange};
pub use error::AnalysisError;
