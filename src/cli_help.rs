//! Long help text constants for CLI subcommands.

/// Aggregate summary: totals, contributor types and commit-size efficiency.
pub const SUMMARY: &str = "\
Show per-author totals for the analysed window.

Each author gets commits, lines added and deleted, distinct files touched,
a contributor type and a commit-size efficiency profile.

Contributor types (first matching rule wins):
  ✨ Scout       fewer than 100 changed lines
  🛠 Refactorer  deletions are at least 40% of changes
  🚀 Explorer    insertions are more than 70% of changes
  👤 Generalist  touches over 2.5x the average number of files
  💎 Artisan     everyone else

Commit size buckets (lines changed per commit):
  micro    <= 10
  small    11-29
  optimal  30-150
  high     151-500
  huge     > 500

Thresholds can be changed in the [efficiency] table of .gimpact.toml.";

/// Ownership map: who carries the churn of each file and directory.
pub const OWNERSHIP: &str = "\
Show who owns which files and directories.

A file belongs to the author with the most lines changed in it
(insertions + deletions within the window). A directory belongs to the
author owning the most of its files. Ties go to the author seen first.

Lock files, build output, generated code and editor files are skipped,
as are files ignored by .gitignore (see --no-respect-gitignore).

Directories with a single owner and at least 500 lines are listed as
knowledge concentration areas.";
