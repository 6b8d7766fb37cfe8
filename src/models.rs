use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A candidate file read from disk, alive only while it is being converted
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path to the file
    pub path: PathBuf,

    /// Extension without the leading dot (empty if none)
    pub extension: String,

    /// Raw textual content
    pub content: String,
}

/// What happened to a single file during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Header already carries SPDX tags
    AlreadySpdx,

    /// Header would be rewritten (dry run)
    WouldReplace,

    /// Header was rewritten in place
    Replaced,

    /// Handled extension, but the file lives in vendored or stub code
    Vendored,

    /// Packaging, docs, images and other metadata
    Ignorable,

    /// No rewrite strategy exists for this file
    Unhandled,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::AlreadySpdx => "already SPDX",
            Outcome::WouldReplace => "would replace",
            Outcome::Replaced => "replaced",
            Outcome::Vendored => "vendored",
            Outcome::Ignorable => "ignorable",
            Outcome::Unhandled => "not handled",
        }
    }
}

/// Result of processing one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// Path to the file
    pub path: PathBuf,

    /// What happened to it
    pub outcome: Outcome,

    /// Authors extracted from its header (empty unless rewritten)
    pub authors: Vec<String>,
}

/// Complete report of a conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertReport {
    /// Root that was processed
    pub root: PathBuf,

    /// Whether the run was a preview
    pub dry_run: bool,

    /// Per-file results in walk order
    pub files: Vec<FileReport>,

    /// Count of files by outcome
    pub by_outcome: BTreeMap<Outcome, usize>,

    /// Sorted, deduplicated author list
    pub authors: Vec<String>,

    /// Rendered AUTHORS.md fragment
    pub authors_markdown: String,

    /// Where the author list was (or would be) appended
    pub authors_file: PathBuf,

    /// When the run finished
    pub generated_at: DateTime<Utc>,
}

impl ConvertReport {
    /// Files no rewrite strategy exists for
    pub fn unhandled(&self) -> Vec<&FileReport> {
        self.files
            .iter()
            .filter(|f| f.outcome == Outcome::Unhandled)
            .collect()
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.by_outcome.get(&outcome).copied().unwrap_or(0)
    }
}

/// Immutable settings handed to every header rewrite
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Holder text for the synthesized `SPDX-FileCopyrightText` line
    pub default_copyright: String,

    /// Holder substrings whose attribution is kept verbatim
    pub preserve_spdx: Vec<String>,

    /// Preview only, never touch the filesystem
    pub dry_run: bool,
}

impl ConvertOptions {
    /// The preserve list as a single lowercase comma-joined needle.
    ///
    /// An empty list yields no needle, so nothing is preserved.
    pub fn preserve_needle(&self) -> Option<String> {
        if self.preserve_spdx.is_empty() {
            return None;
        }
        Some(self.preserve_spdx.join(",").to_lowercase())
    }

    /// Whether a holder's attribution must be kept verbatim
    pub fn is_preserved(&self, holder: &str) -> bool {
        match self.preserve_needle() {
            Some(needle) => holder.to_lowercase().contains(&needle),
            None => false,
        }
    }
}

/// Configuration loaded from `.spdx-convert.toml`
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directories excluded from the walk, on top of `--ignore-dir`
    #[serde(default)]
    pub ignored_dirs: Vec<String>,

    /// Preserved holders, on top of `--preserve-spdx`
    #[serde(default)]
    pub preserve_spdx: Vec<String>,

    /// Path segments marking vendored code for php/css/scss/m/h files
    #[serde(default = "default_vendor_segments")]
    pub vendor_segments: Vec<String>,

    /// Path segments marking vendored code for script and markup files
    #[serde(default = "default_script_vendor_segments")]
    pub script_vendor_segments: Vec<String>,

    /// File suffixes that are silently skipped
    #[serde(default = "default_ignorable_suffixes")]
    pub ignorable_suffixes: Vec<String>,

    /// Path fragments never reported as unhandled
    #[serde(default = "default_unhandled_exemptions")]
    pub unhandled_exemptions: Vec<String>,

    /// Name of the author list written under the root
    #[serde(default = "default_authors_file")]
    pub authors_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignored_dirs: Vec::new(),
            preserve_spdx: Vec::new(),
            vendor_segments: default_vendor_segments(),
            script_vendor_segments: default_script_vendor_segments(),
            ignorable_suffixes: default_ignorable_suffixes(),
            unhandled_exemptions: default_unhandled_exemptions(),
            authors_file: default_authors_file(),
        }
    }
}

fn default_vendor_segments() -> Vec<String> {
    vec![
        "/lib/Vendor/".to_string(),
        "/vendor/".to_string(),
        "/tests/stubs/".to_string(),
    ]
}

fn default_script_vendor_segments() -> Vec<String> {
    vec!["/vendor/".to_string()]
}

fn default_ignorable_suffixes() -> Vec<String> {
    vec![
        "composer.json".to_string(),
        "composer.lock".to_string(),
        ".md".to_string(),
        ".png".to_string(),
        ".svg".to_string(),
        ".xml".to_string(),
        ".json".to_string(),
    ]
}

fn default_unhandled_exemptions() -> Vec<String> {
    vec![
        "/tests/integration/vendor/".to_string(),
        "/tests/integration/phpserver.log".to_string(),
        "/tests/integration/phpserver_fed.log".to_string(),
    ]
}

fn default_authors_file() -> String {
    "AUTHORS.md".to_string()
}
