//! Coarse file categories used to group an author's owned files.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Source,
    Config,
    Docs,
    Test,
    Other,
}

impl FileType {
    pub const ALL: [FileType; 5] = [
        FileType::Source,
        FileType::Config,
        FileType::Docs,
        FileType::Test,
        FileType::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FileType::Source => "Source",
            FileType::Config => "Config",
            FileType::Docs => "Docs",
            FileType::Test => "Test",
            FileType::Other => "Other",
        }
    }
}

const TEST_MARKERS: &[&str] = &[".test.", ".spec.", "__tests__", "__test__", "test_", "spec_"];

// Matched as a path suffix or as a whole directory component.
const CONFIG_MARKERS: &[&str] = &[
    "json",
    "yaml",
    "yml",
    "toml",
    "ini",
    "conf",
    "config",
    "properties",
    "lock",
    "go.mod",
    "go.sum",
    "requirements.txt",
    "pipfile",
    "setup.py",
    "setup.cfg",
    "gemfile",
    "pom.xml",
    "build.gradle",
    "build.gradle.kts",
    "podfile",
    "dockerfile",
    ".dockerignore",
    ".github",
    ".vscode",
    ".idea",
    ".gitlab-ci.yml",
    "jenkinsfile",
    ".circleci",
    ".env",
    ".env.local",
];

const DOCS_EXTENSIONS: &[&str] = &["md", "mdx", "txt", "rst", "adoc", "org", "wiki"];

const SOURCE_EXTENSIONS: &[&str] = &[
    "js", "jsx", "ts", "tsx", "mjs", "cjs", "vue", "svelte", "html", "css", "scss", "sass", "less",
    "styl", "py", "pyx", "pyi", "java", "kt", "kts", "scala", "sc", "groovy", "c", "cpp", "cc",
    "cxx", "h", "hpp", "hxx", "go", "rs", "rb", "rake", "php", "phtml", "swift", "m", "mm", "cs",
    "dart", "r", "sh", "bash", "zsh", "fish", "ps1", "psm1", "lua", "pl", "pm", "ex", "exs",
    "clj", "cljs", "cljc", "erl", "hrl", "hs", "lhs", "ml", "mli", "fs", "fsi", "fsx", "wasm",
    "wat",
];

const EXTENSIONLESS_CONFIG: &[&str] = &["makefile", "rakefile"];

/// Classify a repository path. Checks run in order: test markers anywhere
/// in the path, config names, then the extension.
pub fn classify_file_type(path: &str) -> FileType {
    let lower = path.to_lowercase();

    if TEST_MARKERS.iter().any(|m| lower.contains(m)) {
        return FileType::Test;
    }

    if CONFIG_MARKERS
        .iter()
        .any(|m| lower.ends_with(m) || lower.contains(&format!("/{m}/")))
    {
        return FileType::Config;
    }

    let file_name = lower.rsplit('/').next().unwrap_or(&lower);
    if let Some((_, ext)) = file_name.rsplit_once('.') {
        if DOCS_EXTENSIONS.contains(&ext) {
            return FileType::Docs;
        }
        if SOURCE_EXTENSIONS.contains(&ext) {
            return FileType::Source;
        }
    }

    if EXTENSIONLESS_CONFIG.contains(&file_name) {
        return FileType::Config;
    }

    FileType::Other
}

/// Bucket items by the file type of their path, keeping input order
/// within each bucket. Every category is present, possibly empty.
pub fn group_by_type<T>(items: &[T], path: impl Fn(&T) -> &str) -> Vec<(FileType, Vec<&T>)> {
    let mut groups: Vec<(FileType, Vec<&T>)> =
        FileType::ALL.iter().map(|t| (*t, Vec::new())).collect();
    for item in items {
        let kind = classify_file_type(path(item));
        if let Some((_, bucket)) = groups.iter_mut().find(|(t, _)| *t == kind) {
            bucket.push(item);
        }
    }
    groups
}

#[cfg(test)]
#[path = "file_type_test.rs"]
mod tests;
