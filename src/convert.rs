use crate::attribution::AttributionParser;
use crate::authors::{self, AuthorRegistry};
use crate::classifier::{Classification, Classifier};
use crate::collector::FileCollector;
use crate::error::ConvertError;
use crate::models::{Config, ConvertOptions, ConvertReport, FileReport, Outcome};
use crate::rewriter;
use anyhow::{Context, Result};
use chrono::Utc;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Validate the command line inputs and resolve the root.
pub fn resolve_root(path: &Path, options: &ConvertOptions) -> Result<PathBuf, ConvertError> {
    let root = path.canonicalize().map_err(|e| {
        ConvertError::InvalidArguments(format!("cannot resolve {}: {}", path.display(), e))
    })?;

    if !root.is_dir() {
        return Err(ConvertError::InvalidArguments(format!(
            "{} is not a directory",
            root.display()
        )));
    }

    if !options.dry_run && options.default_copyright.trim().is_empty() {
        return Err(ConvertError::InvalidArguments(
            "the default file copyright text is empty".to_string(),
        ));
    }

    Ok(root)
}

/// One conversion run over a source tree
#[derive(Debug)]
pub struct Converter {
    root: PathBuf,
    options: ConvertOptions,
    authors_file: PathBuf,
    collector: FileCollector,
    classifier: Classifier,
    parser: AttributionParser,
}

impl Converter {
    /// `root` must already be resolved, see [`resolve_root`].
    pub fn new(root: &Path, config: &Config, options: ConvertOptions) -> Result<Self> {
        let collector = FileCollector::with_manifest(root, &config.ignored_dirs)
            .context("Failed to prepare file collector")?;
        let classifier = Classifier::new(config)?;
        let parser = AttributionParser::new()?;

        Ok(Self {
            root: root.to_path_buf(),
            options,
            authors_file: root.join(&config.authors_file),
            collector,
            classifier,
            parser,
        })
    }

    /// Process every file, stopping at the first one that cannot be
    /// converted. `on_file` sees each result as soon as it is known.
    pub fn run<F>(&self, mut on_file: F) -> Result<ConvertReport, ConvertError>
    where
        F: FnMut(&FileReport),
    {
        let mut files = Vec::new();
        let mut registry = AuthorRegistry::new();

        for path in self.collector.files() {
            let relative = path.strip_prefix(&self.root).unwrap_or(&path);

            let report = match self.classifier.classify(relative) {
                Classification::Rewrite(syntax) => {
                    rewriter::rewrite_file(&path, syntax, &self.parser, &self.options)
                        .map_err(|e| e.in_file(&path))?
                }
                Classification::Vendored => skipped(&path, Outcome::Vendored),
                Classification::Ignorable => skipped(&path, Outcome::Ignorable),
                Classification::Unhandled => skipped(&path, Outcome::Unhandled),
                Classification::Exempt => {
                    log::debug!("Not reporting {}", relative.display());
                    continue;
                }
            };

            registry.extend(report.authors.iter().cloned());
            on_file(&report);
            files.push(report);
        }

        let authors = registry.finalize();
        let authors_markdown = authors::render_markdown(&authors);

        if !self.options.dry_run {
            authors::append_to_file(&self.authors_file, &authors_markdown)
                .map_err(|e| ConvertError::from(e).in_file(&self.authors_file))?;
        }

        let mut by_outcome = BTreeMap::new();
        for file in &files {
            *by_outcome.entry(file.outcome).or_insert(0) += 1;
        }

        Ok(ConvertReport {
            root: self.root.clone(),
            dry_run: self.options.dry_run,
            files,
            by_outcome,
            authors,
            authors_markdown,
            authors_file: self.authors_file.clone(),
            generated_at: Utc::now(),
        })
    }
}

fn skipped(path: &Path, outcome: Outcome) -> FileReport {
    FileReport {
        path: path.to_path_buf(),
        outcome,
        authors: Vec::new(),
    }
}
