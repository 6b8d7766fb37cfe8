use crate::models::Config;
use crate::syntax::CommentSyntax;
use anyhow::{Context, Result};
use regex::Regex;
use std::path::Path;

/// What to do with a file, decided from its extension and location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Rewrite its header in this comment syntax
    Rewrite(CommentSyntax),
    /// Handled extension inside vendored or stub code
    Vendored,
    /// Packaging, docs, images and other metadata
    Ignorable,
    /// Known noise (logs, locale bundles) that is never reported
    Exempt,
    /// Nothing knows how to convert this file
    Unhandled,
}

/// Routes files to a rewrite strategy
#[derive(Debug)]
pub struct Classifier {
    vendor_segments: Vec<String>,
    script_vendor_segments: Vec<String>,
    ignorable_suffixes: Vec<String>,
    unhandled_exemptions: Vec<String>,
    script_extension: Regex,
}

impl Classifier {
    pub fn new(config: &Config) -> Result<Self> {
        // ts, js, mts, cts, mjs, cjs
        let script_extension =
            Regex::new(r"^[mc]?[tj]s$").context("Failed to compile script extension regex")?;

        Ok(Self {
            vendor_segments: config.vendor_segments.clone(),
            script_vendor_segments: config.script_vendor_segments.clone(),
            ignorable_suffixes: config.ignorable_suffixes.clone(),
            unhandled_exemptions: config.unhandled_exemptions.clone(),
            script_extension,
        })
    }

    /// Classify a file given its path relative to the processed root.
    pub fn classify(&self, relative: &Path) -> Classification {
        let path = anchored(relative);
        let extension = relative
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        match extension {
            "php" | "css" | "scss" | "m" | "h" => {
                rewrite_unless_vendored(&path, &self.vendor_segments, CommentSyntax::CBlock)
            }
            ext if self.script_extension.is_match(ext) => {
                rewrite_unless_vendored(&path, &self.script_vendor_segments, CommentSyntax::CBlock)
            }
            "vue" | "html" => {
                rewrite_unless_vendored(&path, &self.script_vendor_segments, CommentSyntax::Html)
            }
            "swift" => Classification::Rewrite(CommentSyntax::LineComment),
            _ => self.classify_other(&path),
        }
    }

    fn classify_other(&self, path: &str) -> Classification {
        if self.ignorable_suffixes.iter().any(|s| path.ends_with(s.as_str())) {
            return Classification::Ignorable;
        }

        let locale_bundle = path.starts_with("/l10n/") && path.ends_with(".json");
        if locale_bundle
            || self
                .unhandled_exemptions
                .iter()
                .any(|fragment| path.contains(fragment.as_str()))
        {
            return Classification::Exempt;
        }

        Classification::Unhandled
    }
}

fn rewrite_unless_vendored(
    path: &str,
    segments: &[String],
    syntax: CommentSyntax,
) -> Classification {
    if segments.iter().any(|segment| path.contains(segment.as_str())) {
        Classification::Vendored
    } else {
        Classification::Rewrite(syntax)
    }
}

/// Root-relative path as `/a/b/c` with forward slashes, so segment markers
/// like `/vendor/` also match at the top level.
fn anchored(relative: &Path) -> String {
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    format!("/{}", joined)
}
